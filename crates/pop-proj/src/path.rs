//! Retained 2D paths and groups.
//!
//! Groups carry an `Affine` of their own, and moving a group only ever
//! touches that transform. Point updates coming from the model therefore
//! never fight with layout: a path's points stay in face-local
//! coordinates for its whole life, and the pattern layout is purely a
//! matter of group transforms stacked above it.

use kurbo::{Affine, BezPath, Point};
use std::cell::RefCell;
use std::rc::Rc;

// ─── Paths ──────────────────────────────────────────────────────────────

struct PathInner {
    points: Vec<Point>,
    closed: bool,
    dashes: Vec<f64>,
}

/// A polyline or polygon in face-local coordinates. Cheap to clone;
/// clones alias the same path.
#[derive(Clone)]
pub struct ProjPath {
    inner: Rc<RefCell<PathInner>>,
}

impl ProjPath {
    pub fn new(points: Vec<Point>, closed: bool) -> Self {
        Self {
            inner: Rc::new(RefCell::new(PathInner {
                points,
                closed,
                dashes: Vec::new(),
            })),
        }
    }

    /// A dashed line, e.g. a fold line on the pattern.
    pub fn dashed(points: Vec<Point>, dashes: Vec<f64>) -> Self {
        let path = Self::new(points, false);
        path.inner.borrow_mut().dashes = dashes;
        path
    }

    pub fn points(&self) -> Vec<Point> {
        self.inner.borrow().points.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.borrow().closed
    }

    pub fn dashes(&self) -> Vec<f64> {
        self.inner.borrow().dashes.clone()
    }

    /// Overwrite points index by index, growing or shrinking to match.
    pub fn update_points(&self, points: &[Point]) {
        let mut inner = self.inner.borrow_mut();
        inner.points.resize(points.len(), Point::ZERO);
        for (slot, point) in inner.points.iter_mut().zip(points) {
            *slot = *point;
        }
    }

    pub fn to_bez(&self) -> BezPath {
        let inner = self.inner.borrow();
        let mut bez = BezPath::new();
        let mut iter = inner.points.iter();
        if let Some(first) = iter.next() {
            bez.move_to(*first);
            for point in iter {
                bez.line_to(*point);
            }
            if inner.closed {
                bez.close_path();
            }
        }
        bez
    }
}

/// A child of a group.
#[derive(Clone)]
pub enum ProjNode {
    Path(ProjPath),
    Group(ProjGroup),
}

// ─── Groups ─────────────────────────────────────────────────────────────

struct GroupInner {
    transform: Affine,
    children: Vec<ProjNode>,
}

/// A transformed collection of paths and subgroups. Cheap to clone;
/// clones alias the same group.
#[derive(Clone)]
pub struct ProjGroup {
    inner: Rc<RefCell<GroupInner>>,
}

impl Default for ProjGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjGroup {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(GroupInner {
                transform: Affine::IDENTITY,
                children: Vec::new(),
            })),
        }
    }

    pub fn add_path(&self, path: ProjPath) {
        self.inner.borrow_mut().children.push(ProjNode::Path(path));
    }

    pub fn add_group(&self, group: ProjGroup) {
        self.inner.borrow_mut().children.push(ProjNode::Group(group));
    }

    pub fn transform(&self) -> Affine {
        self.inner.borrow().transform
    }

    pub fn set_transform(&self, transform: Affine) {
        self.inner.borrow_mut().transform = transform;
    }

    /// Compose a rotation (radians, about the group origin) onto the group
    /// transform.
    pub fn rotate(&self, radians: f64) {
        let mut inner = self.inner.borrow_mut();
        inner.transform = Affine::rotate(radians) * inner.transform;
    }

    /// Compose a translation onto the group transform.
    pub fn translate(&self, x: f64, y: f64) {
        let mut inner = self.inner.borrow_mut();
        inner.transform = Affine::translate((x, y)) * inner.transform;
    }

    /// Resolve the tree into drawable leaves, each with its accumulated
    /// transform.
    pub fn flatten(&self) -> Vec<(Affine, BezPath)> {
        let mut leaves = Vec::new();
        self.collect(Affine::IDENTITY, &mut leaves);
        leaves
    }

    fn collect(&self, outer: Affine, leaves: &mut Vec<(Affine, BezPath)>) {
        let inner = self.inner.borrow();
        let transform = outer * inner.transform;
        for child in &inner.children {
            match child {
                ProjNode::Path(path) => leaves.push((transform, path.to_bez())),
                ProjNode::Group(group) => group.collect(transform, leaves),
            }
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn update_points_is_index_wise() {
        let path = ProjPath::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)], true);
        path.update_points(&[Point::new(2.0, 0.0), Point::new(3.0, 4.0), Point::new(5.0, 6.0)]);
        assert_eq!(path.points().len(), 3);
        assert_eq!(path.points()[1], Point::new(3.0, 4.0));

        path.update_points(&[Point::new(9.0, 9.0)]);
        assert_eq!(path.points(), vec![Point::new(9.0, 9.0)]);
    }

    #[test]
    fn group_transform_does_not_touch_path_points() {
        let path = ProjPath::new(vec![Point::new(1.0, 0.0)], false);
        let group = ProjGroup::new();
        group.add_path(path.clone());
        group.translate(10.0, 0.0);
        group.rotate(std::f64::consts::FRAC_PI_2);

        assert_eq!(path.points()[0], Point::new(1.0, 0.0), "points stay local");
        let leaves = group.flatten();
        assert_eq!(leaves.len(), 1);
        let moved = leaves[0].0 * Point::new(1.0, 0.0);
        // translate then rotate: (11, 0) swings up to (0, 11)
        assert!((moved.x).abs() < 1e-12);
        assert!((moved.y - 11.0).abs() < 1e-12);
    }

    #[test]
    fn flatten_accumulates_nested_transforms() {
        let path = ProjPath::new(vec![Point::ZERO], false);
        let child = ProjGroup::new();
        child.add_path(path);
        child.translate(1.0, 0.0);
        let root = ProjGroup::new();
        root.add_group(child);
        root.translate(0.0, 2.0);

        let leaves = root.flatten();
        let moved = leaves[0].0 * Point::ZERO;
        assert_eq!(moved, Point::new(1.0, 2.0));
    }

    #[test]
    fn closed_paths_emit_a_close_segment() {
        let path = ProjPath::new(
            vec![Point::ZERO, Point::new(1.0, 0.0), Point::new(1.0, 1.0)],
            true,
        );
        let bez = path.to_bez();
        assert_eq!(bez.elements().len(), 4, "move, two lines, close");
    }
}
