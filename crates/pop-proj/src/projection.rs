//! Per-mechanism pattern layouts.
//!
//! A mechanism's pattern is two groups: the `top` group with the outlines
//! of the front faces and the `down` group with the back faces, pushed
//! [`DEFAULT_DISTANCE`] away so the two printable sheets do not overlap.
//! Within each group the right half is rotated 180° about the fold line —
//! unfolding paper flat does exactly that — and the finished layout is
//! turned 90° so the fold lines run vertically on the sheet.

use crate::gluestrip::GlueStrip;
use crate::path::{ProjGroup, ProjPath};
use kurbo::{Affine, BezPath, Point};
use pop_core::{DisposeToken, Param};
use pop_mech::{Mechanism, MechanismActive, MechanismParallel, PlaneRectangle};
use std::f64::consts::{FRAC_PI_2, PI};

/// Separation between the top-face sheet and the down-face sheet.
pub const DEFAULT_DISTANCE: f64 = 20.0;

const FOLD_LINE_DASHES: [f64; 2] = [1.0, 1.0];

/// Pattern-wide styling knobs, passed in explicitly by the host.
#[derive(Clone)]
pub struct ProjectionSettings {
    pub glue_strip_width: Param<f64>,
    pub glue_strip_offset: Param<f64>,
    pub stroke_width: Param<f64>,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            glue_strip_width: Param::new(2.0),
            glue_strip_offset: Param::new(0.2),
            stroke_width: Param::new(0.1),
        }
    }
}

/// A path bound to a face outline stream.
fn live_path(stream: &Param<Vec<Point>>, until: &[DisposeToken]) -> ProjPath {
    let path = ProjPath::new(Vec::new(), true);
    {
        let path = path.clone();
        stream.subscribe_until(until, move |points: &Vec<Point>| {
            path.update_points(points);
        });
    }
    path
}

/// A dashed fold line spanning `width` on the x axis, kept in sync with a
/// width parameter.
fn live_fold_line(width: &Param<f64>, until: &[DisposeToken]) -> ProjPath {
    let path = ProjPath::dashed(Vec::new(), FOLD_LINE_DASHES.to_vec());
    {
        let path = path.clone();
        width.subscribe_until(until, move |&w| {
            path.update_points(&[Point::new(-w / 2.0, 0.0), Point::new(w / 2.0, 0.0)]);
        });
    }
    path
}

/// One sheet: left half as-is, right half rotated about the fold line, a
/// dashed fold line between them.
fn half_and_half(
    left: &PlaneRectangle,
    right: &PlaneRectangle,
    top_faces: bool,
    fold_width: &Param<f64>,
    until: &[DisposeToken],
) -> ProjGroup {
    let sheet = ProjGroup::new();
    let (left_stream, right_stream) = if top_faces {
        (left.projection_top(), right.projection_top())
    } else {
        (left.projection_down(), right.projection_down())
    };
    sheet.add_path(live_path(left_stream, until));

    let right_half = ProjGroup::new();
    right_half.rotate(PI);
    right_half.add_path(live_path(right_stream, until));
    sheet.add_group(right_half);

    sheet.add_path(live_fold_line(fold_width, until));
    sheet
}

fn layout(top: &ProjGroup, down: &ProjGroup) -> ProjGroup {
    let root = ProjGroup::new();
    down.translate(DEFAULT_DISTANCE, 0.0);
    root.add_group(top.clone());
    root.add_group(down.clone());
    // fold lines vertical on the sheet
    root.rotate(FRAC_PI_2);
    root
}

/// Pattern of a [`MechanismActive`].
pub struct ProjectionActive {
    root: ProjGroup,
    top: ProjGroup,
    down: ProjGroup,
}

impl ProjectionActive {
    pub fn new(mechanism: &MechanismActive, _settings: &ProjectionSettings) -> Self {
        let until = [mechanism.base().on_dispose()];
        let top = half_and_half(
            mechanism.left_side(),
            mechanism.right_side(),
            true,
            &mechanism.width,
            &until,
        );
        let down = half_and_half(
            mechanism.left_side(),
            mechanism.right_side(),
            false,
            &mechanism.width,
            &until,
        );
        let root = layout(&top, &down);
        Self { root, top, down }
    }

    pub fn root(&self) -> &ProjGroup {
        &self.root
    }

    pub fn top(&self) -> &ProjGroup {
        &self.top
    }

    pub fn down(&self) -> &ProjGroup {
        &self.down
    }

    pub fn flatten(&self) -> Vec<(Affine, BezPath)> {
        self.root.flatten()
    }
}

/// Pattern of a [`MechanismParallel`], glue strips included: the strip's
/// two halves are glued onto the parent panels, so each half gets a tab.
pub struct ProjectionParallel {
    root: ProjGroup,
    top: ProjGroup,
    down: ProjGroup,
    glue_left: GlueStrip,
    glue_right: GlueStrip,
}

impl ProjectionParallel {
    pub fn new(mechanism: &MechanismParallel, settings: &ProjectionSettings) -> Self {
        let until = [mechanism.base().on_dispose()];
        let left = mechanism.fold().left_side();
        let right = mechanism.fold().right_side();

        let top = half_and_half(left, right, true, &mechanism.width, &until);
        let down = half_and_half(left, right, false, &mechanism.width, &until);

        let glue_left = GlueStrip::new(left, settings, &until);
        let glue_right = GlueStrip::new(right, settings, &until);
        top.add_path(glue_left.path().clone());
        top.add_path(glue_right.path().clone());

        let root = layout(&top, &down);
        Self {
            root,
            top,
            down,
            glue_left,
            glue_right,
        }
    }

    pub fn root(&self) -> &ProjGroup {
        &self.root
    }

    pub fn top(&self) -> &ProjGroup {
        &self.top
    }

    pub fn down(&self) -> &ProjGroup {
        &self.down
    }

    pub fn glue_left(&self) -> &GlueStrip {
        &self.glue_left
    }

    pub fn glue_right(&self) -> &GlueStrip {
        &self.glue_right
    }

    pub fn flatten(&self) -> Vec<(Affine, BezPath)> {
        self.root.flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pop_core::Scene;

    #[test]
    fn active_pattern_has_two_sheets_apart() {
        let scene = Scene::new_handle();
        let mechanism = MechanismActive::new(&scene, None);
        let projection = ProjectionActive::new(&mechanism, &ProjectionSettings::default());

        // 2 faces + 1 fold line per sheet
        assert_eq!(projection.flatten().len(), 6);

        // a down-sheet point sits DEFAULT_DISTANCE from its top twin,
        // after the 90 degree layout turn
        let leaves = projection.flatten();
        let top_origin = leaves[0].0 * Point::ZERO;
        let down_origin = leaves[3].0 * Point::ZERO;
        let gap = ((top_origin.x - down_origin.x).powi(2)
            + (top_origin.y - down_origin.y).powi(2))
        .sqrt();
        assert!((gap - DEFAULT_DISTANCE).abs() < 1e-9);
    }

    #[test]
    fn outlines_track_the_mechanism_width() {
        let scene = Scene::new_handle();
        let mechanism = MechanismActive::new(&scene, None);
        let projection = ProjectionActive::new(&mechanism, &ProjectionSettings::default());

        mechanism.width.set(4.0);
        let leaves = projection.flatten();
        // the top-left outline leaf reflects the new half-width
        let bez = &leaves[0].1;
        let first = match bez.elements()[0] {
            kurbo::PathEl::MoveTo(p) => p,
            _ => panic!("outline must start with a move"),
        };
        assert_eq!(first, Point::new(-2.0, 0.0));
    }

    #[test]
    fn right_half_is_turned_about_the_fold_line() {
        let scene = Scene::new_handle();
        let mechanism = MechanismActive::new(&scene, None);
        let projection = ProjectionActive::new(&mechanism, &ProjectionSettings::default());

        let top_leaves = projection.top().flatten();
        // leaf order: left path, right path (in its half group), fold line
        let right_transform = top_leaves[1].0;
        let image = right_transform * Point::new(0.0, 1.0);
        assert!((image.y + 1.0).abs() < 1e-9, "right half must point down");
    }

    #[test]
    fn parallel_pattern_carries_glue_strips() {
        let scene = Scene::new_handle();
        let parent = MechanismActive::new(&scene, None);
        let mechanism = MechanismParallel::new(&scene, parent.hinge().hinge());
        let settings = ProjectionSettings::default();
        let projection = ProjectionParallel::new(&mechanism, &settings);

        // 2 faces + fold line + 2 strips on top, 2 faces + fold line below
        assert_eq!(projection.flatten().len(), 8);
        assert_eq!(projection.glue_left().path().points().len(), 4);
    }
}
