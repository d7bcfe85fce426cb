//! The parallelogram fold.
//!
//! A strip of paper glued across an open hinge at `left_distance` and
//! `right_distance` from the spine, with its own fold `height`. The strip's
//! two halves (`b_side`, `d_side`) derive from the glue configuration;
//! closing or opening the parent hinge changes the distance between the two
//! glue lines, and the per-frame solver recovers the three fold angles from
//! that distance by the law of cosines.

use crate::events::{MechanismFacePick, MechanismHingePick};
use crate::folding::{FoldForm, ThreeHingeFold};
use crate::hinge::Hinge;
use crate::mechanism::{Mechanism, MechanismBase};
use pop_core::{calc_triangle_angle, Param, SceneHandle, Subject};

/// Strip half-lengths for a glue configuration.
///
/// With matching side switches the `height` is a paper length added to each
/// glue distance; the top-fold switch swaps which half gets which. With
/// mismatched switches the strip spans the whole glue chord and `height` is
/// the fraction of it given to the `d` half.
fn side_lengths(form: FoldForm, left: f64, right: f64, height: f64) -> (f64, f64) {
    if form.left_side_switch == form.right_side_switch {
        if form.top_fold_switch {
            (right + height, left + height)
        } else {
            (left + height, right + height)
        }
    } else {
        let chord = left + right;
        ((1.0 - height) * chord, height * chord)
    }
}

// ─── Mechanism ──────────────────────────────────────────────────────────

pub struct MechanismParallel {
    base: MechanismBase,
    fold: ThreeHingeFold,
    pub left_distance: Param<f64>,
    pub right_distance: Param<f64>,
    pub height: Param<f64>,
    pub width: Param<f64>,
    pub folding_form: Param<FoldForm>,
    b_side: Param<f64>,
    d_side: Param<f64>,
}

impl MechanismParallel {
    pub fn new(scene: &SceneHandle, parent: &Hinge) -> Self {
        let base = MechanismBase::new();
        let fold = ThreeHingeFold::new(scene, parent, &base);
        let mechanism = Self {
            folding_form: fold.folding_form.clone(),
            left_distance: Param::new(1.0),
            right_distance: Param::new(1.0),
            height: Param::new(1.0),
            width: Param::new(1.0),
            b_side: Param::new(2.0),
            d_side: Param::new(2.0),
            base,
            fold,
        };
        mechanism.wire_params();
        mechanism
    }

    fn wire_params(&self) {
        let until = [self.base.on_dispose()];

        // any glue parameter or the fold form reshapes the strip
        let refresh = {
            let left_distance = self.left_distance.clone();
            let right_distance = self.right_distance.clone();
            let height = self.height.clone();
            let form = self.folding_form.clone();
            let b_side = self.b_side.clone();
            let d_side = self.d_side.clone();
            let left_panel = self.fold.left_side().height.clone();
            let right_panel = self.fold.right_side().height.clone();
            let center_node = self.fold.center_hinge().hinge().node().clone();
            let left_node = self.fold.left_hinge().hinge().node().clone();
            let right_node = self.fold.right_hinge().hinge().node().clone();
            move || {
                let (l, r) = (left_distance.get(), right_distance.get());
                let (b, d) = side_lengths(form.get(), l, r, height.get());
                b_side.set(b);
                d_side.set(d);
                // the d half is the left strip panel, the b half the right
                left_panel.set(d);
                right_panel.set(b);
                center_node.set_position_y(d);
                left_node.set_position_y(l);
                right_node.set_position_y(r);
            }
        };
        {
            let refresh = refresh.clone();
            self.left_distance
                .changed()
                .subscribe_until(&until, move |_| refresh());
        }
        {
            let refresh = refresh.clone();
            self.right_distance
                .changed()
                .subscribe_until(&until, move |_| refresh());
        }
        {
            let refresh = refresh.clone();
            self.height
                .changed()
                .subscribe_until(&until, move |_| refresh());
        }
        {
            let refresh = refresh.clone();
            self.folding_form
                .changed()
                .subscribe_until(&until, move |_| refresh());
        }

        {
            let left = self.fold.left_side().width.clone();
            let right = self.fold.right_side().width.clone();
            let left_hinge = self.fold.left_hinge().hinge().node().clone();
            let right_hinge = self.fold.right_hinge().hinge().node().clone();
            let center_hinge = self.fold.center_hinge().hinge().node().clone();
            self.width.changed().subscribe_until(&until, move |&w| {
                left.set(w);
                right.set(w);
                for node in [&left_hinge, &right_hinge, &center_hinge] {
                    node.set_scaling_x(w.max(0.0));
                }
            });
        }

        refresh();
    }

    pub fn fold(&self) -> &ThreeHingeFold {
        &self.fold
    }

    pub fn b_side(&self) -> f64 {
        self.b_side.get()
    }

    pub fn d_side(&self) -> f64 {
        self.d_side.get()
    }

    pub fn on_face_down(&self) -> &Subject<MechanismFacePick> {
        &self.base.on_face_down
    }

    pub fn on_hinge_down(&self) -> &Subject<MechanismHingePick> {
        &self.base.on_hinge_down
    }
}

impl Mechanism for MechanismParallel {
    fn base(&self) -> &MechanismBase {
        &self.base
    }

    fn set_visible(&self, visible: bool) {
        self.base.set_visible(visible);
        self.fold.set_visible(visible);
    }

    /// Solve the fold for the current parent-hinge opening.
    ///
    /// The mismatched-switches configuration has no angle solution yet; the
    /// update is a deliberate no-op for it, leaving the strip wherever the
    /// last solvable configuration put it.
    fn update(&mut self) {
        let form = self.folding_form.get();
        if form.left_side_switch != form.right_side_switch {
            return;
        }

        self.fold.force_side_world_matrices();
        let dist = self.fold.hinge_distance();
        let (b, d) = (self.b_side.get(), self.d_side.get());
        let (l, r) = (self.left_distance.get(), self.right_distance.get());

        let alpha = calc_triangle_angle(b, d, dist);
        let alpha_under = calc_triangle_angle(r, l, dist);
        let beta = calc_triangle_angle(d, b, dist);
        let beta_under = calc_triangle_angle(l, r, dist);
        let gamma = calc_triangle_angle(dist, b, d);

        let (fa, fb) = if form.top_fold_switch {
            (alpha - alpha_under, beta - beta_under)
        } else {
            (alpha + alpha_under, beta + beta_under)
        };

        self.fold.left_hinge().right_angle.set(-180.0 + fa);
        self.fold.right_hinge().left_angle.set(-180.0 + fb);
        self.fold.center_hinge().right_angle.set(-gamma);
    }

    fn dispose(&mut self) {
        self.fold.dispose(self.base.id());
        self.left_distance.complete();
        self.right_distance.complete();
        self.height.complete();
        self.width.complete();
        self.base.dispose();
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn matching_switches_add_height_to_each_distance() {
        let form = FoldForm::default();
        let (b, d) = side_lengths(form, 2.0, 3.0, 4.0);
        assert_eq!((b, d), (6.0, 7.0));
    }

    #[test]
    fn top_fold_swaps_the_halves() {
        let form = FoldForm {
            top_fold_switch: true,
            ..FoldForm::default()
        };
        let (b, d) = side_lengths(form, 2.0, 3.0, 4.0);
        assert_eq!((b, d), (7.0, 6.0));
    }

    #[test]
    fn mismatched_switches_split_the_chord() {
        let form = FoldForm {
            left_side_switch: true,
            ..FoldForm::default()
        };
        // height is a fraction here, not a length
        let (b, d) = side_lengths(form, 2.0, 3.0, 0.25);
        assert!((b - 3.75).abs() < EPS);
        assert!((d - 1.25).abs() < EPS);
        // the strip always spans exactly the glue chord
        assert!((b + d - 5.0).abs() < EPS, "halves must partition the chord");
    }

    #[test]
    fn derived_sides_drive_panels_and_center_hinge() {
        let scene = pop_core::Scene::new_handle();
        let parent = Hinge::new(&scene, None);
        let m = MechanismParallel::new(&scene, &parent);
        m.left_distance.set(2.0);
        m.right_distance.set(2.0);
        m.height.set(4.0);
        assert_eq!(m.b_side(), 6.0);
        assert_eq!(m.d_side(), 6.0);
        assert_eq!(m.fold().left_side().height.get(), 6.0);
        assert_eq!(m.fold().right_side().height.get(), 6.0);
        assert_eq!(m.fold().center_hinge().hinge().node().position().y, 6.0);
        assert_eq!(m.fold().left_hinge().hinge().node().position().y, 2.0);
    }
}
