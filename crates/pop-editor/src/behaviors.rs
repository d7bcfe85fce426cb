//! Mechanism behaviors.

use pop_core::{SceneHandle, TransformNode};
use pop_mech::{Behavior, BehaviorKind, ThreeHingeFold};

/// Axis gizmos on the four side transforms of a three-hinge fold.
///
/// Debug aid while orienting a fold: a gizmo node rides each glue-hinge
/// side transform so the host can render axes on it. Attach through the
/// mechanism's behavior registry so there is never more than one set.
pub struct OrientationBehavior {
    gizmos: Vec<TransformNode>,
}

impl OrientationBehavior {
    pub fn attach(scene: &SceneHandle, fold: &ThreeHingeFold) -> Self {
        let sides = [
            fold.left_hinge().hinge().left_transform().key(),
            fold.left_hinge().hinge().right_transform().key(),
            fold.right_hinge().hinge().left_transform().key(),
            fold.right_hinge().hinge().right_transform().key(),
        ];
        let gizmos = sides
            .into_iter()
            .map(|side| TransformNode::new(scene, Some(side)))
            .collect();
        Self { gizmos }
    }

    pub fn gizmos(&self) -> &[TransformNode] {
        &self.gizmos
    }
}

impl Behavior for OrientationBehavior {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Orientation
    }

    fn dispose(&mut self) {
        for gizmo in &self.gizmos {
            gizmo.dispose();
        }
        self.gizmos.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pop_core::Scene;
    use pop_mech::{Hinge, Mechanism, MechanismBase, MechanismParallel};

    #[test]
    fn gizmos_ride_the_side_transforms() {
        let scene = Scene::new_handle();
        let parent = Hinge::new(&scene, None);
        let base = MechanismBase::new();
        let fold = ThreeHingeFold::new(&scene, &parent, &base);
        let behavior = OrientationBehavior::attach(&scene, &fold);

        assert_eq!(behavior.gizmos().len(), 4);
        assert_eq!(
            scene.borrow().parent(behavior.gizmos()[0].key()),
            Some(fold.left_hinge().hinge().left_transform().key())
        );
    }

    #[test]
    fn registry_rejects_a_second_orientation_behavior() {
        let scene = Scene::new_handle();
        let parent = Hinge::new(&scene, None);
        let mechanism = MechanismParallel::new(&scene, &parent);

        let first = OrientationBehavior::attach(&scene, mechanism.fold());
        let second = OrientationBehavior::attach(&scene, mechanism.fold());
        assert!(mechanism.base().add_behavior(Box::new(first)));
        assert!(!mechanism.base().add_behavior(Box::new(second)));
        assert!(mechanism.base().has_behavior(BehaviorKind::Orientation));
    }

    #[test]
    fn dispose_removes_the_gizmo_nodes() {
        let scene = Scene::new_handle();
        let parent = Hinge::new(&scene, None);
        let base = MechanismBase::new();
        let fold = ThreeHingeFold::new(&scene, &parent, &base);
        let mut behavior = OrientationBehavior::attach(&scene, &fold);
        let key = behavior.gizmos()[0].key();

        behavior.dispose();
        assert!(!scene.borrow().contains(key));
        assert!(behavior.gizmos().is_empty());
    }
}
