//! Common mechanism machinery: identity, visibility, behaviors, and the
//! re-tagged interaction subjects every mechanism exposes.

use crate::events::{MechanismFacePick, MechanismHingePick};
use pop_core::{DisposeToken, ObjectId, Subject};
use std::cell::{Cell, RefCell};

/// Typed registry key for mechanism behaviors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BehaviorKind {
    /// Axis gizmos on a fold's side transforms.
    Orientation,
}

/// A unit of editor-side functionality attached to a mechanism.
pub trait Behavior {
    fn kind(&self) -> BehaviorKind;
    fn dispose(&mut self);
}

/// State shared by every mechanism kind.
pub struct MechanismBase {
    id: ObjectId,
    visible: Cell<bool>,
    on_dispose: DisposeToken,
    on_invisible: DisposeToken,
    behaviors: RefCell<Vec<Box<dyn Behavior>>>,
    pub on_face_down: Subject<MechanismFacePick>,
    pub on_face_up: Subject<MechanismFacePick>,
    pub on_face_move: Subject<MechanismFacePick>,
    pub on_hinge_down: Subject<MechanismHingePick>,
    pub on_hinge_up: Subject<MechanismHingePick>,
    pub on_hinge_move: Subject<MechanismHingePick>,
}

impl Default for MechanismBase {
    fn default() -> Self {
        Self::new()
    }
}

impl MechanismBase {
    pub fn new() -> Self {
        Self {
            id: ObjectId::new(),
            visible: Cell::new(true),
            on_dispose: DisposeToken::new(),
            on_invisible: DisposeToken::new(),
            behaviors: RefCell::new(Vec::new()),
            on_face_down: Subject::new(),
            on_face_up: Subject::new(),
            on_face_move: Subject::new(),
            on_hinge_down: Subject::new(),
            on_hinge_up: Subject::new(),
            on_hinge_move: Subject::new(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Record the visibility flag. Going invisible for the first time fires
    /// `on_invisible`, which terminates subscriptions bound to it.
    pub fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
        if !visible {
            self.on_invisible.fire();
        }
    }

    pub fn on_dispose(&self) -> DisposeToken {
        self.on_dispose.clone()
    }

    pub fn on_invisible(&self) -> DisposeToken {
        self.on_invisible.clone()
    }

    /// Attach a behavior. At most one behavior per kind; duplicates are
    /// rejected.
    pub fn add_behavior(&self, behavior: Box<dyn Behavior>) -> bool {
        let mut behaviors = self.behaviors.borrow_mut();
        if behaviors.iter().any(|b| b.kind() == behavior.kind()) {
            log::warn!(
                "mechanism {}: duplicate behavior {:?} rejected",
                self.id,
                behavior.kind()
            );
            return false;
        }
        behaviors.push(behavior);
        true
    }

    pub fn has_behavior(&self, kind: BehaviorKind) -> bool {
        self.behaviors.borrow().iter().any(|b| b.kind() == kind)
    }

    /// Run `f` against the behavior of the given kind, if attached.
    pub fn with_behavior<R>(
        &self,
        kind: BehaviorKind,
        f: impl FnOnce(&mut dyn Behavior) -> R,
    ) -> Option<R> {
        let mut behaviors = self.behaviors.borrow_mut();
        behaviors
            .iter_mut()
            .find(|b| b.kind() == kind)
            .map(|b| f(b.as_mut()))
    }

    /// Detach and dispose the behavior of the given kind.
    pub fn remove_behavior(&self, kind: BehaviorKind) -> bool {
        let mut behaviors = self.behaviors.borrow_mut();
        match behaviors.iter().position(|b| b.kind() == kind) {
            Some(index) => {
                let mut behavior = behaviors.remove(index);
                behavior.dispose();
                true
            }
            None => false,
        }
    }

    /// Tear down the shared state: dispose all behaviors, fire the dispose
    /// token, complete the subjects. Idempotent.
    pub fn dispose(&self) {
        if self.on_dispose.is_fired() {
            return;
        }
        self.on_dispose.fire();
        for behavior in self.behaviors.borrow_mut().iter_mut() {
            behavior.dispose();
        }
        self.behaviors.borrow_mut().clear();
        self.on_face_down.complete();
        self.on_face_up.complete();
        self.on_face_move.complete();
        self.on_hinge_down.complete();
        self.on_hinge_up.complete();
        self.on_hinge_move.complete();
    }
}

/// A foldable unit of the model.
pub trait Mechanism {
    fn base(&self) -> &MechanismBase;

    fn id(&self) -> ObjectId {
        self.base().id()
    }

    fn set_visible(&self, visible: bool);

    /// Per-frame hook, called once per render tick after the host has
    /// refreshed pointer state but before world matrices are rebuilt.
    fn update(&mut self) {}

    /// Tear down scene nodes, subjects and behaviors. Must be called
    /// explicitly; dropping a mechanism without disposing leaks its nodes.
    fn dispose(&mut self);
}
