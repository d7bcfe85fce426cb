//! Glue strips on the cut pattern.
//!
//! A glued panel gets a tapered tab along its top edge; the tab is part of
//! the cut outline but folds away behind the joint. The strip tracks the
//! panel width and height as well as the pattern-wide strip settings.

use crate::path::ProjPath;
use crate::projection::ProjectionSettings;
use kurbo::Point;
use pop_core::DisposeToken;
use pop_mech::PlaneRectangle;

/// Trapezoid tab corners for a panel of `width` x `height`.
fn strip_points(width: f64, height: f64, strip: f64, offset: f64) -> Vec<Point> {
    let half = width / 2.0;
    let base = height + offset;
    // 45 degree taper so the tab clears neighbouring panels when folded
    vec![
        Point::new(-half, base),
        Point::new(half, base),
        Point::new(half - strip, base + strip),
        Point::new(-half + strip, base + strip),
    ]
}

pub struct GlueStrip {
    path: ProjPath,
}

impl GlueStrip {
    /// A strip following `plane`'s top edge. Updates stop when any token in
    /// `until` fires.
    pub fn new(plane: &PlaneRectangle, settings: &ProjectionSettings, until: &[DisposeToken]) -> Self {
        let path = ProjPath::new(Vec::new(), true);

        let refresh = {
            let path = path.clone();
            let width = plane.width.clone();
            let height = plane.height.clone();
            let strip = settings.glue_strip_width.clone();
            let offset = settings.glue_strip_offset.clone();
            move || {
                path.update_points(&strip_points(
                    width.get(),
                    height.get(),
                    strip.get(),
                    offset.get(),
                ));
            }
        };
        refresh();
        for param in [&plane.width, &plane.height] {
            let refresh = refresh.clone();
            param.changed().subscribe_until(until, move |_| refresh());
        }
        for param in [&settings.glue_strip_width, &settings.glue_strip_offset] {
            let refresh = refresh.clone();
            param.changed().subscribe_until(until, move |_| refresh());
        }

        Self { path }
    }

    pub fn path(&self) -> &ProjPath {
        &self.path
    }
}
