//! Minimal retained 3D scene graph.
//!
//! Nodes carry a local translation / Euler rotation / scaling and a cached
//! world matrix. World matrices are refreshed once per frame by
//! `update_world_matrices` (the render pass); between refreshes the cache is
//! stale, and code that needs an up-to-date world position right after a
//! parameter change must call `compute_world_matrix` explicitly. This
//! mirrors how the folding solvers are driven: the hinge-angle solver forces
//! a recomputation before measuring hinge separation.
//!
//! The graph stores transforms and a visibility flag only — meshes,
//! materials and picking live with the rendering host.

use crate::id::{DisposeToken, ObjectId};
use nalgebra::{Matrix4, Rotation3, Vector3};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;

new_key_type! {
    /// Key of a node in a `Scene`.
    pub struct NodeKey;
}

struct NodeData {
    parent: Option<NodeKey>,
    children: SmallVec<[NodeKey; 4]>,
    translation: Vector3<f64>,
    /// Euler angles in radians, applied X, then Y, then Z.
    rotation: Vector3<f64>,
    scaling: Vector3<f64>,
    visible: bool,
    world: Matrix4<f64>,
}

impl NodeData {
    fn new(parent: Option<NodeKey>) -> Self {
        Self {
            parent,
            children: SmallVec::new(),
            translation: Vector3::zeros(),
            rotation: Vector3::zeros(),
            scaling: Vector3::new(1.0, 1.0, 1.0),
            visible: true,
            world: Matrix4::identity(),
        }
    }

    fn local_matrix(&self) -> Matrix4<f64> {
        let rotation =
            Rotation3::from_euler_angles(self.rotation.x, self.rotation.y, self.rotation.z);
        Matrix4::new_translation(&self.translation)
            * rotation.to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&self.scaling)
    }
}

/// Shared, single-threaded handle to a scene.
pub type SceneHandle = Rc<RefCell<Scene>>;

/// Arena of transform nodes with cached world matrices.
#[derive(Default)]
pub struct Scene {
    nodes: SlotMap<NodeKey, NodeData>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_handle() -> SceneHandle {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn add_node(&mut self, parent: Option<NodeKey>) -> NodeKey {
        let key = self.nodes.insert(NodeData::new(parent));
        if let Some(p) = parent {
            if let Some(pdata) = self.nodes.get_mut(p) {
                pdata.children.push(key);
            }
        }
        key
    }

    /// Remove a node, detaching it from its parent and orphaning its
    /// children. Missing keys are ignored.
    pub fn remove_node(&mut self, key: NodeKey) {
        let data = match self.nodes.remove(key) {
            Some(d) => d,
            None => return,
        };
        if let Some(p) = data.parent {
            if let Some(pdata) = self.nodes.get_mut(p) {
                pdata.children.retain(|c| *c != key);
            }
        }
        for child in data.children {
            if let Some(cdata) = self.nodes.get_mut(child) {
                cdata.parent = None;
            }
        }
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Re-parent a node synchronously. Passing `None` detaches it.
    pub fn set_parent(&mut self, key: NodeKey, parent: Option<NodeKey>) {
        let old = match self.nodes.get(key) {
            Some(d) => d.parent,
            None => return,
        };
        if let Some(p) = old {
            if let Some(pdata) = self.nodes.get_mut(p) {
                pdata.children.retain(|c| *c != key);
            }
        }
        if let Some(p) = parent {
            if let Some(pdata) = self.nodes.get_mut(p) {
                pdata.children.push(key);
            }
        }
        if let Some(data) = self.nodes.get_mut(key) {
            data.parent = parent;
        }
    }

    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes.get(key).and_then(|d| d.parent)
    }

    pub fn set_translation(&mut self, key: NodeKey, translation: Vector3<f64>) {
        if let Some(data) = self.nodes.get_mut(key) {
            data.translation = translation;
        }
    }

    pub fn translation(&self, key: NodeKey) -> Vector3<f64> {
        self.nodes
            .get(key)
            .map(|d| d.translation)
            .unwrap_or_else(Vector3::zeros)
    }

    pub fn set_rotation(&mut self, key: NodeKey, rotation: Vector3<f64>) {
        if let Some(data) = self.nodes.get_mut(key) {
            data.rotation = rotation;
        }
    }

    pub fn rotation(&self, key: NodeKey) -> Vector3<f64> {
        self.nodes
            .get(key)
            .map(|d| d.rotation)
            .unwrap_or_else(Vector3::zeros)
    }

    pub fn set_scaling(&mut self, key: NodeKey, scaling: Vector3<f64>) {
        if let Some(data) = self.nodes.get_mut(key) {
            data.scaling = scaling;
        }
    }

    pub fn scaling(&self, key: NodeKey) -> Vector3<f64> {
        self.nodes
            .get(key)
            .map(|d| d.scaling)
            .unwrap_or_else(|| Vector3::new(1.0, 1.0, 1.0))
    }

    pub fn set_visible(&mut self, key: NodeKey, visible: bool) {
        if let Some(data) = self.nodes.get_mut(key) {
            data.visible = visible;
        }
    }

    pub fn is_visible(&self, key: NodeKey) -> bool {
        self.nodes.get(key).map(|d| d.visible).unwrap_or(false)
    }

    /// The once-per-frame refresh: recompute every cached world matrix from
    /// the roots down.
    pub fn update_world_matrices(&mut self) {
        let roots: Vec<NodeKey> = self
            .nodes
            .iter()
            .filter(|(_, d)| d.parent.is_none())
            .map(|(k, _)| k)
            .collect();
        for root in roots {
            self.refresh_subtree(root, Matrix4::identity());
        }
    }

    fn refresh_subtree(&mut self, key: NodeKey, parent_world: Matrix4<f64>) {
        let (world, children) = match self.nodes.get_mut(key) {
            Some(data) => {
                data.world = parent_world * data.local_matrix();
                (data.world, data.children.clone())
            }
            None => return,
        };
        for child in children {
            self.refresh_subtree(child, world);
        }
    }

    /// Force the node's world matrix (and those of its ancestors) up to
    /// date immediately, without waiting for the frame refresh.
    pub fn compute_world_matrix(&mut self, key: NodeKey) -> Matrix4<f64> {
        let mut chain: SmallVec<[NodeKey; 8]> = SmallVec::new();
        let mut cursor = Some(key);
        while let Some(k) = cursor {
            chain.push(k);
            cursor = self.parent(k);
        }
        let mut world = Matrix4::identity();
        for &k in chain.iter().rev() {
            if let Some(data) = self.nodes.get_mut(k) {
                data.world = world * data.local_matrix();
                world = data.world;
            }
        }
        world
    }

    /// Cached world-space position. Stale until the next frame refresh or a
    /// forced `compute_world_matrix`.
    pub fn world_position(&self, key: NodeKey) -> Vector3<f64> {
        self.nodes
            .get(key)
            .map(|d| d.world.fixed_view::<3, 1>(0, 3).into_owned())
            .unwrap_or_else(Vector3::zeros)
    }

    pub fn world_matrix(&self, key: NodeKey) -> Matrix4<f64> {
        self.nodes
            .get(key)
            .map(|d| d.world)
            .unwrap_or_else(Matrix4::identity)
    }
}

/// Handle to a scene node used by model entities.
///
/// Clones are cheap and alias the same node; operations on a disposed node
/// are no-ops, so handles captured by subscriber closures stay safe after
/// teardown.
pub struct TransformNode {
    id: ObjectId,
    scene: SceneHandle,
    key: NodeKey,
    on_dispose: DisposeToken,
}

impl Clone for TransformNode {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            scene: Rc::clone(&self.scene),
            key: self.key,
            on_dispose: self.on_dispose.clone(),
        }
    }
}

impl TransformNode {
    pub fn new(scene: &SceneHandle, parent: Option<NodeKey>) -> Self {
        let key = scene.borrow_mut().add_node(parent);
        Self {
            id: ObjectId::new(),
            scene: Rc::clone(scene),
            key,
            on_dispose: DisposeToken::new(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn key(&self) -> NodeKey {
        self.key
    }

    pub fn scene(&self) -> &SceneHandle {
        &self.scene
    }

    pub fn on_dispose(&self) -> DisposeToken {
        self.on_dispose.clone()
    }

    pub fn set_parent(&self, parent: Option<NodeKey>) {
        self.scene.borrow_mut().set_parent(self.key, parent);
    }

    pub fn position(&self) -> Vector3<f64> {
        self.scene.borrow().translation(self.key)
    }

    pub fn set_position(&self, position: Vector3<f64>) {
        self.scene.borrow_mut().set_translation(self.key, position);
    }

    pub fn set_position_x(&self, x: f64) {
        let mut p = self.position();
        p.x = x;
        self.set_position(p);
    }

    pub fn set_position_y(&self, y: f64) {
        let mut p = self.position();
        p.y = y;
        self.set_position(p);
    }

    pub fn set_position_z(&self, z: f64) {
        let mut p = self.position();
        p.z = z;
        self.set_position(p);
    }

    pub fn rotation(&self) -> Vector3<f64> {
        self.scene.borrow().rotation(self.key)
    }

    pub fn set_rotation(&self, rotation: Vector3<f64>) {
        self.scene.borrow_mut().set_rotation(self.key, rotation);
    }

    pub fn set_rotation_x(&self, x: f64) {
        let mut r = self.rotation();
        r.x = x;
        self.set_rotation(r);
    }

    pub fn set_rotation_y(&self, y: f64) {
        let mut r = self.rotation();
        r.y = y;
        self.set_rotation(r);
    }

    pub fn scaling(&self) -> Vector3<f64> {
        self.scene.borrow().scaling(self.key)
    }

    pub fn set_scaling(&self, scaling: Vector3<f64>) {
        self.scene.borrow_mut().set_scaling(self.key, scaling);
    }

    pub fn set_scaling_x(&self, x: f64) {
        let mut s = self.scaling();
        s.x = x;
        self.set_scaling(s);
    }

    pub fn set_scaling_y(&self, y: f64) {
        let mut s = self.scaling();
        s.y = y;
        self.set_scaling(s);
    }

    pub fn set_visible(&self, visible: bool) {
        self.scene.borrow_mut().set_visible(self.key, visible);
    }

    pub fn is_visible(&self) -> bool {
        self.scene.borrow().is_visible(self.key)
    }

    /// Cached world position (see `Scene::world_position` for staleness).
    pub fn world_position(&self) -> Vector3<f64> {
        self.scene.borrow().world_position(self.key)
    }

    /// Force the world matrix up to date now.
    pub fn compute_world_matrix(&self) {
        self.scene.borrow_mut().compute_world_matrix(self.key);
    }

    /// Remove the node from the scene. Idempotent; clones of this handle
    /// become no-op handles.
    pub fn dispose(&self) {
        if self.on_dispose.is_fired() {
            return;
        }
        self.on_dispose.fire();
        self.scene.borrow_mut().remove_node(self.key);
    }
}
