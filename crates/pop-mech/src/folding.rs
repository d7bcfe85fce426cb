//! The three-hinge fold chassis.
//!
//! A parallelogram fold glued across an existing hinge needs three hinges
//! of its own: one on each parent panel (the glue lines) and one in the
//! middle of the new paper strip. This module owns that plumbing — the
//! hinges, the two new panels between them, registration with the parent
//! hinge, and the event re-tagging — while the actual fold trigonometry
//! lives with the concrete mechanism kinds built on top of it.

use crate::events::{MechanismFacePick, MechanismHingePick, PlanePick};
use crate::hinge::{Hinge, HingeActive, HingeAttachment};
use crate::mechanism::MechanismBase;
use crate::plane::PlaneRectangle;
use pop_core::{ObjectId, Param, SceneHandle};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::rc::Rc;

/// Which way each half of a parallelogram fold is glued, and whether the
/// fold points up over the spine or hangs under it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldForm {
    pub left_side_switch: bool,
    pub right_side_switch: bool,
    pub top_fold_switch: bool,
}

/// Hinges, panels and parent-hinge bookkeeping shared by folding
/// mechanisms.
pub struct ThreeHingeFold {
    parent: HingeAttachment,
    parent_mechanisms: Param<Vec<ObjectId>>,
    left_hinge: Rc<HingeActive>,
    right_hinge: Rc<HingeActive>,
    center_hinge: Rc<HingeActive>,
    left_side: PlaneRectangle,
    right_side: PlaneRectangle,
    /// Translation of the whole fold along the parent fold line.
    pub offset: Param<f64>,
    pub folding_form: Param<FoldForm>,
}

impl ThreeHingeFold {
    /// Build the chassis against `parent` and register `base`'s id in the
    /// parent's child-mechanism list.
    pub fn new(scene: &SceneHandle, parent: &Hinge, base: &MechanismBase) -> Self {
        let left_hinge = Rc::new(HingeActive::new(scene, Some(parent.attachment().left)));
        let right_hinge = Rc::new(HingeActive::new(scene, Some(parent.attachment().right)));
        let center_hinge = Rc::new(HingeActive::new(
            scene,
            Some(left_hinge.hinge().right_transform().key()),
        ));
        // the center hinge hangs off the left strip upside down
        center_hinge.hinge().node().set_rotation_x(PI);

        let left_side = PlaneRectangle::new(
            scene,
            Some(left_hinge.hinge().right_transform().key()),
            1.0,
            1.0,
        );
        let right_side = PlaneRectangle::new(
            scene,
            Some(right_hinge.hinge().left_transform().key()),
            1.0,
            1.0,
        );

        parent.add_mechanism(base.id());

        let fold = Self {
            parent: parent.attachment(),
            parent_mechanisms: parent.mechanisms().clone(),
            left_hinge,
            right_hinge,
            center_hinge,
            left_side,
            right_side,
            offset: Param::new(0.0),
            folding_form: Param::new(FoldForm::default()),
        };
        fold.wire_offset(base);
        fold.wire_events(base);
        fold
    }

    fn wire_offset(&self, base: &MechanismBase) {
        let until = [base.on_dispose()];
        let left = self.left_hinge.hinge().node().clone();
        let right = self.right_hinge.hinge().node().clone();
        self.offset.changed().subscribe_until(&until, move |&x| {
            left.set_position_x(x);
            // the right frame is yawed by pi, so its local x runs backwards
            right.set_position_x(-x);
        });
    }

    fn wire_events(&self, base: &MechanismBase) {
        let until = [base.on_dispose()];
        let mechanism_id = base.id();
        for hinge in [&self.left_hinge, &self.right_hinge, &self.center_hinge] {
            for (source, target) in [
                (&hinge.hinge().on_mouse_down, &base.on_hinge_down),
                (&hinge.hinge().on_mouse_up, &base.on_hinge_up),
                (&hinge.hinge().on_mouse_move, &base.on_hinge_move),
            ] {
                let target = target.clone();
                source.subscribe_until(&until, move |pick| {
                    target.next(&MechanismHingePick {
                        pick: *pick,
                        mechanism_id,
                    });
                });
            }
        }
        for plane in [&self.left_side, &self.right_side] {
            for (source, target) in [
                (&plane.on_mouse_down, &base.on_face_down),
                (&plane.on_mouse_up, &base.on_face_up),
                (&plane.on_mouse_move, &base.on_face_move),
            ] {
                let target = target.clone();
                source.subscribe_until(&until, move |pick: &PlanePick| {
                    target.next(&MechanismFacePick {
                        pick: *pick,
                        mechanism_id,
                    });
                });
            }
        }
    }

    pub fn parent(&self) -> HingeAttachment {
        self.parent
    }

    pub fn left_hinge(&self) -> &HingeActive {
        &self.left_hinge
    }

    pub fn right_hinge(&self) -> &HingeActive {
        &self.right_hinge
    }

    pub fn center_hinge(&self) -> &HingeActive {
        &self.center_hinge
    }

    pub fn left_side(&self) -> &PlaneRectangle {
        &self.left_side
    }

    pub fn right_side(&self) -> &PlaneRectangle {
        &self.right_side
    }

    /// Bring both side hinges' world matrices up to date right now, without
    /// waiting for the frame refresh. The fold solver measures their
    /// separation immediately after moving the parent panels.
    pub fn force_side_world_matrices(&self) {
        self.left_hinge.hinge().node().compute_world_matrix();
        self.right_hinge.hinge().node().compute_world_matrix();
    }

    /// Current world-space separation of the two glue hinges.
    pub fn hinge_distance(&self) -> f64 {
        let left = self.left_hinge.hinge().node().world_position();
        let right = self.right_hinge.hinge().node().world_position();
        (left - right).norm()
    }

    pub fn set_visible(&self, visible: bool) {
        self.left_side.set_visible(visible);
        self.right_side.set_visible(visible);
        for hinge in [&self.left_hinge, &self.right_hinge, &self.center_hinge] {
            hinge.hinge().node().set_visible(visible);
        }
    }

    /// Tear down hinges and panels and deregister from the parent hinge.
    pub fn dispose(&self, mechanism_id: ObjectId) {
        let mut list = self.parent_mechanisms.get();
        if let Some(index) = list.iter().position(|&m| m == mechanism_id) {
            list.remove(index);
            self.parent_mechanisms.set(list);
        }
        self.left_side.dispose();
        self.right_side.dispose();
        self.left_hinge.dispose();
        self.right_hinge.dispose();
        self.center_hinge.dispose();
        self.offset.complete();
        self.folding_form.complete();
    }
}
