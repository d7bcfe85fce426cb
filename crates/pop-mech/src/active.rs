//! The v-fold primitive: one driven hinge with a panel on each side.

use crate::events::{MechanismFacePick, MechanismHingePick, PlanePick};
use crate::hinge::HingeActive;
use crate::mechanism::{Mechanism, MechanismBase};
use crate::plane::PlaneRectangle;
use pop_core::{NodeKey, Param, SceneHandle};
use std::rc::Rc;

const DEFAULT_ANGLE: f64 = 90.0;
const DEFAULT_WIDTH: f64 = 10.0;
const DEFAULT_HEIGHT: f64 = 10.0;

/// A single active hinge joining two rectangular panels.
///
/// `left_angle` and `right_angle` alias the hinge's own cells, so driving
/// them from a property panel or a command is the same as driving the hinge
/// directly. Any angle is accepted; the mechanism has no discrete states.
pub struct MechanismActive {
    base: MechanismBase,
    hinge: Rc<HingeActive>,
    left_side: PlaneRectangle,
    right_side: PlaneRectangle,
    pub left_angle: Param<f64>,
    pub right_angle: Param<f64>,
    pub width: Param<f64>,
    pub height: Param<f64>,
}

impl MechanismActive {
    pub fn new(scene: &SceneHandle, parent: Option<NodeKey>) -> Self {
        let base = MechanismBase::new();
        let hinge = Rc::new(HingeActive::new(scene, parent));
        let left_side = PlaneRectangle::new(
            scene,
            Some(hinge.hinge().left_transform().key()),
            DEFAULT_WIDTH,
            DEFAULT_HEIGHT,
        );
        let right_side = PlaneRectangle::new(
            scene,
            Some(hinge.hinge().right_transform().key()),
            DEFAULT_WIDTH,
            DEFAULT_HEIGHT,
        );

        let mechanism = Self {
            left_angle: hinge.left_angle.clone(),
            right_angle: hinge.right_angle.clone(),
            width: Param::new(DEFAULT_WIDTH),
            height: Param::new(DEFAULT_HEIGHT),
            base,
            hinge,
            left_side,
            right_side,
        };
        mechanism.wire_params();
        mechanism.wire_events();
        mechanism.left_angle.set(DEFAULT_ANGLE);
        mechanism.right_angle.set(DEFAULT_ANGLE);
        mechanism
    }

    fn wire_params(&self) {
        let until = [self.base.on_dispose()];
        {
            let left = self.left_side.width.clone();
            let right = self.right_side.width.clone();
            let hinge = Rc::clone(&self.hinge);
            self.width.changed().subscribe_until(&until, move |&w| {
                left.set(w);
                right.set(w);
                hinge.hinge().set_width(w);
            });
        }
        let left = self.left_side.height.clone();
        let right = self.right_side.height.clone();
        self.height.changed().subscribe_until(&until, move |&h| {
            left.set(h);
            right.set(h);
        });
    }

    fn wire_events(&self) {
        let until = [self.base.on_dispose()];
        let mechanism_id = self.base.id();
        for plane in [&self.left_side, &self.right_side] {
            for (source, target) in [
                (&plane.on_mouse_down, &self.base.on_face_down),
                (&plane.on_mouse_up, &self.base.on_face_up),
                (&plane.on_mouse_move, &self.base.on_face_move),
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
        for (source, target) in [
            (&self.hinge.hinge().on_mouse_down, &self.base.on_hinge_down),
            (&self.hinge.hinge().on_mouse_up, &self.base.on_hinge_up),
            (&self.hinge.hinge().on_mouse_move, &self.base.on_hinge_move),
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

    pub fn hinge(&self) -> &HingeActive {
        &self.hinge
    }

    pub fn left_side(&self) -> &PlaneRectangle {
        &self.left_side
    }

    pub fn right_side(&self) -> &PlaneRectangle {
        &self.right_side
    }
}

impl Mechanism for MechanismActive {
    fn base(&self) -> &MechanismBase {
        &self.base
    }

    fn set_visible(&self, visible: bool) {
        self.base.set_visible(visible);
        self.left_side.set_visible(visible);
        self.right_side.set_visible(visible);
        self.hinge.hinge().node().set_visible(visible);
    }

    fn dispose(&mut self) {
        self.left_side.dispose();
        self.right_side.dispose();
        self.hinge.dispose();
        self.width.complete();
        self.height.complete();
        self.base.dispose();
    }
}
