//! A single renderable rectangle of paper.
//!
//! The face keeps two synchronized descriptions of itself: four 3D corner
//! points in the local frame of its transform node, and a flat 2D outline
//! used by the cut-pattern projection. Both are recomputed inside the same
//! parameter propagation step, so no observer can ever see a width change
//! in 3D that has not yet reached the 2D outline.

use crate::events::{FacePick, PointerInfo};
use kurbo::Point;
use nalgebra::Vector3;
use pop_core::{deg2rad, DisposeToken, ObjectId, Param, SceneHandle, Subject, TransformNode};
use std::cell::RefCell;
use std::rc::Rc;

/// Corner indexes into [`FaceRectangle::corners`].
pub const BOTTOM_LEFT: usize = 0;
pub const BOTTOM_RIGHT: usize = 1;
pub const TOP_RIGHT: usize = 2;
pub const TOP_LEFT: usize = 3;

/// An upright rectangle: bottom edge on the local x axis, centered on x,
/// extending to `height` on +y, flat on z = 0.
pub struct FaceRectangle {
    id: ObjectId,
    node: TransformNode,
    pub width: Param<f64>,
    pub height: Param<f64>,
    pub flipped: Param<bool>,
    corners: Rc<RefCell<[Vector3<f64>; 4]>>,
    projection: Param<Vec<Point>>,
    pub on_mouse_down: Subject<FacePick>,
    pub on_mouse_up: Subject<FacePick>,
    pub on_mouse_move: Subject<FacePick>,
    on_dispose: DisposeToken,
}

fn corner_points(width: f64, height: f64) -> [Vector3<f64>; 4] {
    let half = width / 2.0;
    [
        Vector3::new(-half, 0.0, 0.0),
        Vector3::new(half, 0.0, 0.0),
        Vector3::new(half, height, 0.0),
        Vector3::new(-half, height, 0.0),
    ]
}

/// The 2D outline in fixed winding: bottom-left, top-left, top-right,
/// bottom-right.
fn projection_points(width: f64, height: f64) -> Vec<Point> {
    let half = width / 2.0;
    vec![
        Point::new(-half, 0.0),
        Point::new(-half, height),
        Point::new(half, height),
        Point::new(half, 0.0),
    ]
}

impl FaceRectangle {
    pub fn new(
        scene: &SceneHandle,
        parent: Option<pop_core::NodeKey>,
        width: f64,
        height: f64,
    ) -> Self {
        let node = TransformNode::new(scene, parent);
        let face = Self {
            id: ObjectId::new(),
            node,
            width: Param::new(width),
            height: Param::new(height),
            flipped: Param::new(false),
            corners: Rc::new(RefCell::new(corner_points(width, height))),
            projection: Param::new(projection_points(width, height)),
            on_mouse_down: Subject::new(),
            on_mouse_up: Subject::new(),
            on_mouse_move: Subject::new(),
            on_dispose: DisposeToken::new(),
        };
        face.wire_geometry();
        face
    }

    fn wire_geometry(&self) {
        let until = [self.on_dispose.clone()];
        let refresh = {
            let width = self.width.clone();
            let height = self.height.clone();
            let corners = Rc::clone(&self.corners);
            let projection = self.projection.clone();
            move || {
                let (w, h) = (width.get(), height.get());
                *corners.borrow_mut() = corner_points(w, h);
                projection.set(projection_points(w, h));
            }
        };
        {
            let refresh = refresh.clone();
            self.width.changed().subscribe_until(&until, move |_| refresh());
        }
        self.height.changed().subscribe_until(&until, move |_| refresh());

        let node = self.node.clone();
        self.flipped.subscribe_until(&until, move |&flipped| {
            node.set_rotation_y(if flipped { deg2rad(180.0) } else { 0.0 });
        });
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn node(&self) -> &TransformNode {
        &self.node
    }

    /// The four local-frame corners, indexed by the `BOTTOM_LEFT`... consts.
    pub fn corners(&self) -> [Vector3<f64>; 4] {
        *self.corners.borrow()
    }

    /// The live 2D outline stream.
    pub fn projection(&self) -> &Param<Vec<Point>> {
        &self.projection
    }

    /// The current 2D outline.
    pub fn projection_points(&self) -> Vec<Point> {
        self.projection.get()
    }

    pub fn pointer_down(&self, pointer: PointerInfo) {
        self.on_mouse_down.next(&FacePick {
            pointer,
            face_id: self.id,
        });
    }

    pub fn pointer_up(&self, pointer: PointerInfo) {
        self.on_mouse_up.next(&FacePick {
            pointer,
            face_id: self.id,
        });
    }

    pub fn pointer_move(&self, pointer: PointerInfo) {
        self.on_mouse_move.next(&FacePick {
            pointer,
            face_id: self.id,
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
        self.on_mouse_down.complete();
        self.on_mouse_up.complete();
        self.on_mouse_move.complete();
        self.node.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pop_core::Scene;
    use std::cell::Cell;

    #[test]
    fn corners_follow_width_and_height() {
        let scene = Scene::new_handle();
        let face = FaceRectangle::new(&scene, None, 10.0, 4.0);
        face.width.set(6.0);
        face.height.set(8.0);
        let corners = face.corners();
        assert_eq!(corners[BOTTOM_LEFT], Vector3::new(-3.0, 0.0, 0.0));
        assert_eq!(corners[TOP_RIGHT], Vector3::new(3.0, 8.0, 0.0));
    }

    #[test]
    fn projection_updates_within_the_same_set() {
        let scene = Scene::new_handle();
        let face = FaceRectangle::new(&scene, None, 10.0, 4.0);
        let seen = Rc::new(Cell::new(Point::ZERO));
        {
            let seen = Rc::clone(&seen);
            face.projection().changed().subscribe(move |points| {
                seen.set(points[2]);
            });
        }
        face.width.set(2.0);
        // the outline was already consistent when set() returned
        assert_eq!(seen.get(), Point::new(1.0, 4.0), "top-right must track width");
        assert_eq!(face.projection_points()[0], Point::new(-1.0, 0.0));
    }

    #[test]
    fn flipping_turns_the_node_around_y() {
        let scene = Scene::new_handle();
        let face = FaceRectangle::new(&scene, None, 4.0, 4.0);
        face.flipped.set(true);
        assert!((face.node().rotation().y - std::f64::consts::PI).abs() < 1e-12);
        face.flipped.set(false);
        assert_eq!(face.node().rotation().y, 0.0);
    }

    #[test]
    fn pick_events_carry_the_face_id() {
        let scene = Scene::new_handle();
        let face = FaceRectangle::new(&scene, None, 4.0, 4.0);
        let seen = Rc::new(RefCell::new(None));
        {
            let seen = Rc::clone(&seen);
            face.on_mouse_down.subscribe(move |pick: &FacePick| {
                *seen.borrow_mut() = Some(*pick);
            });
        }
        face.pointer_down(PointerInfo { x: 3.0, y: 7.0 });
        let pick = seen.borrow().unwrap();
        assert_eq!(pick.face_id, face.id());
        assert_eq!(pick.pointer.x, 3.0);
    }
}
