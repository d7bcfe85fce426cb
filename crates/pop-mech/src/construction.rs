//! The document root: every mechanism in the model, with merged events.
//!
//! Tools subscribe once to the construction instead of chasing individual
//! mechanisms; events from a mechanism stop flowing as soon as it is
//! removed, disposed, or hidden.

use crate::events::{MechanismFacePick, MechanismHingePick};
use crate::mechanism::Mechanism;
use pop_core::{DisposeToken, ObjectId, Subject};

#[derive(Default)]
pub struct Construction {
    mechanisms: Vec<Box<dyn Mechanism>>,
    pub on_face_down: Subject<MechanismFacePick>,
    pub on_face_up: Subject<MechanismFacePick>,
    pub on_face_move: Subject<MechanismFacePick>,
    pub on_hinge_down: Subject<MechanismHingePick>,
    pub on_hinge_up: Subject<MechanismHingePick>,
    pub on_hinge_move: Subject<MechanismHingePick>,
    on_list_changed: Subject<()>,
    on_dispose: DisposeToken,
}

impl Construction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.mechanisms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mechanisms.is_empty()
    }

    /// Fires on every add or remove.
    pub fn on_list_changed(&self) -> &Subject<()> {
        &self.on_list_changed
    }

    /// Take ownership of a mechanism and merge its events into the
    /// construction's subjects. Forwarding stops when the construction or
    /// the mechanism is disposed, or the mechanism goes invisible.
    pub fn add(&mut self, mechanism: Box<dyn Mechanism>) {
        let base = mechanism.base();
        let until = [
            self.on_dispose.clone(),
            base.on_dispose(),
            base.on_invisible(),
        ];
        for (source, target) in [
            (&base.on_face_down, &self.on_face_down),
            (&base.on_face_up, &self.on_face_up),
            (&base.on_face_move, &self.on_face_move),
        ] {
            let target = target.clone();
            source.subscribe_until(&until, move |pick: &MechanismFacePick| {
                target.next(pick);
            });
        }
        for (source, target) in [
            (&base.on_hinge_down, &self.on_hinge_down),
            (&base.on_hinge_up, &self.on_hinge_up),
            (&base.on_hinge_move, &self.on_hinge_move),
        ] {
            let target = target.clone();
            source.subscribe_until(&until, move |pick: &MechanismHingePick| {
                target.next(pick);
            });
        }
        self.mechanisms.push(mechanism);
        self.on_list_changed.next(&());
    }

    /// Splice a mechanism out WITHOUT disposing it; the caller regains
    /// ownership (undoable removal keeps the mechanism alive).
    pub fn remove(&mut self, id: ObjectId) -> Option<Box<dyn Mechanism>> {
        let index = self.mechanisms.iter().position(|m| m.id() == id)?;
        let mechanism = self.mechanisms.remove(index);
        self.on_list_changed.next(&());
        Some(mechanism)
    }

    pub fn get(&self, id: ObjectId) -> Option<&dyn Mechanism> {
        self.mechanisms
            .iter()
            .find(|m| m.id() == id)
            .map(|m| m.as_ref())
    }

    /// Per-frame pass over every mechanism.
    pub fn update(&mut self) {
        for mechanism in &mut self.mechanisms {
            mechanism.update();
        }
    }

    pub fn dispose(&mut self) {
        if self.on_dispose.is_fired() {
            return;
        }
        self.on_dispose.fire();
        for mechanism in &mut self.mechanisms {
            mechanism.dispose();
        }
        self.mechanisms.clear();
        self.on_face_down.complete();
        self.on_face_up.complete();
        self.on_face_move.complete();
        self.on_hinge_down.complete();
        self.on_hinge_up.complete();
        self.on_hinge_move.complete();
        self.on_list_changed.complete();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::active::MechanismActive;
    use crate::events::PointerInfo;
    use pop_core::Scene;
    use std::cell::Cell;
    use std::rc::Rc;

    fn face_down_counter(construction: &Construction) -> Rc<Cell<usize>> {
        let count = Rc::new(Cell::new(0));
        {
            let count = Rc::clone(&count);
            construction.on_face_down.subscribe(move |_| {
                count.set(count.get() + 1);
            });
        }
        count
    }

    #[test]
    fn events_merge_through_the_construction() {
        let scene = Scene::new_handle();
        let mechanism = MechanismActive::new(&scene, None);

        let mut construction = Construction::new();
        let count = face_down_counter(&construction);
        // keep a handle to poke the face after ownership moves
        let poke = {
            let face = mechanism.left_side().top_side();
            let down = face.on_mouse_down.clone();
            let id = face.id();
            move || {
                down.next(&crate::events::FacePick {
                    pointer: PointerInfo { x: 0.0, y: 0.0 },
                    face_id: id,
                });
            }
        };
        construction.add(Box::new(mechanism));

        poke();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn invisible_mechanisms_stop_forwarding() {
        let scene = Scene::new_handle();
        let mechanism = MechanismActive::new(&scene, None);
        let poke = {
            let face = mechanism.left_side().top_side();
            let down = face.on_mouse_down.clone();
            let id = face.id();
            move || {
                down.next(&crate::events::FacePick {
                    pointer: PointerInfo { x: 0.0, y: 0.0 },
                    face_id: id,
                });
            }
        };
        let id = mechanism.id();

        let mut construction = Construction::new();
        let count = face_down_counter(&construction);
        construction.add(Box::new(mechanism));

        poke();
        assert_eq!(count.get(), 1);

        construction
            .get(id)
            .map(|m| m.set_visible(false))
            .unwrap();
        poke();
        assert_eq!(count.get(), 1, "hidden mechanisms must not forward picks");
    }

    #[test]
    fn remove_returns_the_live_mechanism() {
        let scene = Scene::new_handle();
        let mechanism = MechanismActive::new(&scene, None);
        let id = mechanism.id();

        let mut construction = Construction::new();
        construction.add(Box::new(mechanism));
        assert_eq!(construction.len(), 1);

        let removed = construction.remove(id);
        assert!(removed.is_some());
        assert!(construction.is_empty());
        let removed = removed.unwrap();
        assert!(
            !removed.base().on_dispose().is_fired(),
            "removal must not dispose"
        );
    }
}
