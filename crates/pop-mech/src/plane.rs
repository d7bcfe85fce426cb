//! A paper panel: two faces back to back on one transform.
//!
//! Paper is printable on both sides, so a panel carries a front face and a
//! flipped back face. The back face is nudged along z by [`OFFSET_FACE`] so
//! the two coplanar rectangles stay individually pickable.

use crate::events::{FacePick, PlanePick};
use crate::face::FaceRectangle;
use kurbo::Point;
use pop_core::{DisposeToken, NodeKey, ObjectId, Param, SceneHandle, Subject, TransformNode};

/// Separation between the front and back face of a panel.
pub const OFFSET_FACE: f64 = 0.001;

pub struct PlaneRectangle {
    id: ObjectId,
    node: TransformNode,
    top_side: FaceRectangle,
    down_side: FaceRectangle,
    pub width: Param<f64>,
    pub height: Param<f64>,
    glue_hints: Param<Vec<Point>>,
    pub on_mouse_down: Subject<PlanePick>,
    pub on_mouse_up: Subject<PlanePick>,
    pub on_mouse_move: Subject<PlanePick>,
    on_dispose: DisposeToken,
}

/// Candidate glue positions: the two endpoints of the bottom edge.
fn glue_hint_points(width: f64) -> Vec<Point> {
    let half = width / 2.0;
    vec![Point::new(-half, 0.0), Point::new(half, 0.0)]
}

impl PlaneRectangle {
    pub fn new(scene: &SceneHandle, parent: Option<NodeKey>, width: f64, height: f64) -> Self {
        let node = TransformNode::new(scene, parent);
        let top_side = FaceRectangle::new(scene, Some(node.key()), width, height);
        let down_side = FaceRectangle::new(scene, Some(node.key()), width, height);
        down_side.flipped.set(true);
        down_side.node().set_position_z(-OFFSET_FACE);

        let plane = Self {
            id: ObjectId::new(),
            node,
            top_side,
            down_side,
            width: Param::new(width),
            height: Param::new(height),
            glue_hints: Param::new(glue_hint_points(width)),
            on_mouse_down: Subject::new(),
            on_mouse_up: Subject::new(),
            on_mouse_move: Subject::new(),
            on_dispose: DisposeToken::new(),
        };
        plane.wire_params();
        plane.wire_events();
        plane
    }

    fn wire_params(&self) {
        let until = [self.on_dispose.clone()];
        {
            let top = self.top_side.width.clone();
            let down = self.down_side.width.clone();
            let hints = self.glue_hints.clone();
            self.width.changed().subscribe_until(&until, move |&w| {
                top.set(w);
                down.set(w);
                hints.set(glue_hint_points(w));
            });
        }
        let top = self.top_side.height.clone();
        let down = self.down_side.height.clone();
        self.height.changed().subscribe_until(&until, move |&h| {
            top.set(h);
            down.set(h);
        });
    }

    fn wire_events(&self) {
        let until = [self.on_dispose.clone()];
        for face in [&self.top_side, &self.down_side] {
            for (source, target) in [
                (&face.on_mouse_down, &self.on_mouse_down),
                (&face.on_mouse_up, &self.on_mouse_up),
                (&face.on_mouse_move, &self.on_mouse_move),
            ] {
                let target = target.clone();
                let plane_id = self.id;
                source.subscribe_until(&until, move |pick: &FacePick| {
                    target.next(&PlanePick {
                        pick: *pick,
                        plane_id,
                    });
                });
            }
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn node(&self) -> &TransformNode {
        &self.node
    }

    pub fn top_side(&self) -> &FaceRectangle {
        &self.top_side
    }

    pub fn down_side(&self) -> &FaceRectangle {
        &self.down_side
    }

    /// Live outline stream of the front face.
    pub fn projection_top(&self) -> &Param<Vec<Point>> {
        self.top_side.projection()
    }

    /// Live outline stream of the back face.
    pub fn projection_down(&self) -> &Param<Vec<Point>> {
        self.down_side.projection()
    }

    pub fn projection_top_points(&self) -> Vec<Point> {
        self.top_side.projection_points()
    }

    pub fn projection_down_points(&self) -> Vec<Point> {
        self.down_side.projection_points()
    }

    /// Bottom-edge glue hint positions, tracking the panel width.
    pub fn glue_hints(&self) -> &Param<Vec<Point>> {
        &self.glue_hints
    }

    pub fn set_visible(&self, visible: bool) {
        self.node.set_visible(visible);
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
        self.top_side.dispose();
        self.down_side.dispose();
        self.node.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::PointerInfo;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn width_fans_out_to_both_faces_and_glue_hints() {
        let scene = pop_core::Scene::new_handle();
        let plane = PlaneRectangle::new(&scene, None, 10.0, 5.0);
        plane.width.set(4.0);
        assert_eq!(plane.top_side().width.get(), 4.0);
        assert_eq!(plane.down_side().width.get(), 4.0);
        assert_eq!(
            plane.glue_hints().get(),
            vec![Point::new(-2.0, 0.0), Point::new(2.0, 0.0)],
            "glue hints must track the bottom edge"
        );
    }

    #[test]
    fn down_side_is_flipped_and_offset() {
        let scene = pop_core::Scene::new_handle();
        let plane = PlaneRectangle::new(&scene, None, 10.0, 5.0);
        assert!(plane.down_side().flipped.get());
        assert_eq!(plane.down_side().node().position().z, -OFFSET_FACE);
    }

    #[test]
    fn face_picks_are_retagged_with_the_plane_id() {
        let scene = pop_core::Scene::new_handle();
        let plane = PlaneRectangle::new(&scene, None, 10.0, 5.0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = Rc::clone(&seen);
            plane.on_mouse_down.subscribe(move |pick: &PlanePick| {
                seen.borrow_mut().push(*pick);
            });
        }
        plane.top_side().pointer_down(PointerInfo { x: 1.0, y: 2.0 });
        plane.down_side().pointer_down(PointerInfo { x: 3.0, y: 4.0 });
        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].plane_id, plane.id());
        assert_eq!(seen[0].pick.face_id, plane.top_side().id());
        assert_eq!(seen[1].pick.face_id, plane.down_side().id());
    }
}
