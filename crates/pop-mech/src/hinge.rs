//! Fold lines between panels.
//!
//! A hinge is three transforms: the hinge node itself sitting on the fold
//! line, and a left and right child transform that panels and child
//! mechanisms parent themselves to. The right transform is built with a
//! permanent 180° yaw so that "opening" both sides by the same angle folds
//! them symmetrically away from each other.
//!
//! Angles are stored in degrees (the unit every property panel and command
//! works in) and applied to the transforms in radians.

use crate::events::{HingePick, PointerInfo};
use pop_core::{deg2rad, DisposeToken, NodeKey, ObjectId, Param, SceneHandle, Subject, TransformNode};
use std::f64::consts::PI;

/// Copyable, non-owning reference to a hinge used by child mechanisms to
/// parent their own transforms.
#[derive(Copy, Clone, Debug)]
pub struct HingeAttachment {
    pub hinge_id: ObjectId,
    pub node: NodeKey,
    pub left: NodeKey,
    pub right: NodeKey,
}

// ─── Hinge ──────────────────────────────────────────────────────────────

pub struct Hinge {
    id: ObjectId,
    node: TransformNode,
    left_transform: TransformNode,
    right_transform: TransformNode,
    width: Param<f64>,
    mechanisms: Param<Vec<ObjectId>>,
    pub on_change: Subject<()>,
    pub on_mouse_down: Subject<HingePick>,
    pub on_mouse_up: Subject<HingePick>,
    pub on_mouse_move: Subject<HingePick>,
    on_dispose: DisposeToken,
}

impl Hinge {
    pub fn new(scene: &SceneHandle, parent: Option<NodeKey>) -> Self {
        let node = TransformNode::new(scene, parent);
        let left_transform = TransformNode::new(scene, Some(node.key()));
        let right_transform = TransformNode::new(scene, Some(node.key()));
        right_transform.set_rotation_y(PI);
        Self {
            id: ObjectId::new(),
            node,
            left_transform,
            right_transform,
            width: Param::new(1.0),
            mechanisms: Param::new(Vec::new()),
            on_change: Subject::new(),
            on_mouse_down: Subject::new(),
            on_mouse_up: Subject::new(),
            on_mouse_move: Subject::new(),
            on_dispose: DisposeToken::new(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn node(&self) -> &TransformNode {
        &self.node
    }

    pub fn left_transform(&self) -> &TransformNode {
        &self.left_transform
    }

    pub fn right_transform(&self) -> &TransformNode {
        &self.right_transform
    }

    pub fn attachment(&self) -> HingeAttachment {
        HingeAttachment {
            hinge_id: self.id,
            node: self.node.key(),
            left: self.left_transform.key(),
            right: self.right_transform.key(),
        }
    }

    pub fn width(&self) -> f64 {
        self.width.get()
    }

    /// Resize the hinge along its fold axis. Negative widths are rejected
    /// without touching the current value.
    pub fn set_width(&self, width: f64) {
        if width < 0.0 {
            log::warn!("hinge {}: rejected negative width {width}", self.id);
            return;
        }
        self.width.set(width);
        self.node.set_scaling_x(width);
    }

    /// Ids of the mechanisms folding against this hinge, in registration
    /// order.
    pub fn mechanisms(&self) -> &Param<Vec<ObjectId>> {
        &self.mechanisms
    }

    pub fn add_mechanism(&self, id: ObjectId) {
        let mut list = self.mechanisms.get();
        list.push(id);
        self.mechanisms.set(list);
    }

    /// Deregister a child mechanism, preserving the order of the rest.
    /// Unknown ids are ignored.
    pub fn remove_mechanism(&self, id: ObjectId) {
        let mut list = self.mechanisms.get();
        match list.iter().position(|&m| m == id) {
            Some(index) => {
                list.remove(index);
                self.mechanisms.set(list);
            }
            None => log::debug!("hinge {}: remove of unknown mechanism {id}", self.id),
        }
    }

    /// Orient the two side transforms for a hinge whose panels extend into
    /// the given half-spaces. Only the +x/+z quadrant is defined so far;
    /// other sign combinations leave the transforms untouched.
    pub fn set_transform_orientation(&self, x_positive: bool, z_positive: bool, left_side: bool) {
        if !(x_positive && z_positive) {
            return;
        }
        if left_side {
            self.left_transform.set_rotation_y(0.0);
            self.right_transform.set_rotation_y(PI);
        } else {
            self.left_transform.set_rotation_y(PI);
            self.right_transform.set_rotation_y(0.0);
        }
    }

    pub fn pointer_down(&self, pointer: PointerInfo) {
        self.on_mouse_down.next(&HingePick {
            pointer,
            hinge_id: self.id,
        });
    }

    pub fn pointer_up(&self, pointer: PointerInfo) {
        self.on_mouse_up.next(&HingePick {
            pointer,
            hinge_id: self.id,
        });
    }

    pub fn pointer_move(&self, pointer: PointerInfo) {
        self.on_mouse_move.next(&HingePick {
            pointer,
            hinge_id: self.id,
        });
    }

    pub fn on_dispose(&self) -> DisposeToken {
        self.on_dispose.clone()
    }

    pub fn dispose(&self) {
        if self.on_dispose.is_fired() {
            return;
        }
        self.on_dispose.fire();
        self.on_change.complete();
        self.on_mouse_down.complete();
        self.on_mouse_up.complete();
        self.on_mouse_move.complete();
        self.left_transform.dispose();
        self.right_transform.dispose();
        self.node.dispose();
    }
}

// ─── Active Hinge ───────────────────────────────────────────────────────

/// A hinge with driveable fold angles.
///
/// `left_angle`/`right_angle` are degrees; each drives only its own side
/// transform's rotation about the fold axis.
pub struct HingeActive {
    hinge: Hinge,
    pub left_angle: Param<f64>,
    pub right_angle: Param<f64>,
}

impl HingeActive {
    pub fn new(scene: &SceneHandle, parent: Option<NodeKey>) -> Self {
        let hinge = Hinge::new(scene, parent);
        let left_angle = Param::new(0.0);
        let right_angle = Param::new(0.0);

        let until = [hinge.on_dispose()];
        {
            let transform = hinge.left_transform().clone();
            let on_change = hinge.on_change.clone();
            left_angle.changed().subscribe_until(&until, move |&deg| {
                transform.set_rotation_x(deg2rad(deg));
                on_change.next(&());
            });
        }
        {
            let transform = hinge.right_transform().clone();
            let on_change = hinge.on_change.clone();
            right_angle.changed().subscribe_until(&until, move |&deg| {
                transform.set_rotation_x(deg2rad(deg));
                on_change.next(&());
            });
        }

        Self {
            hinge,
            left_angle,
            right_angle,
        }
    }

    pub fn hinge(&self) -> &Hinge {
        &self.hinge
    }

    pub fn id(&self) -> ObjectId {
        self.hinge.id()
    }

    pub fn attachment(&self) -> HingeAttachment {
        self.hinge.attachment()
    }

    pub fn on_dispose(&self) -> DisposeToken {
        self.hinge.on_dispose()
    }

    pub fn dispose(&self) {
        self.hinge.dispose();
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────
