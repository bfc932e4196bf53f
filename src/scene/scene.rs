use std::borrow::Cow;

use slotmap::{SlotMap, SparseSecondaryMap};

use crate::assets::prefab::Prefab;
use crate::scene::NodeHandle;
use crate::scene::camera::Camera;
use crate::scene::light::Light;
use crate::scene::node::Node;
use crate::scene::transform::Transform;
use crate::scene::transform_system;

/// Scene graph container.
///
/// `Scene` is a pure data layer: node hierarchy plus component maps keyed by
/// node handle. Nothing here talks to the GPU.
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    // ==== Components ====
    pub cameras: SparseSecondaryMap<NodeHandle, Camera>,
    pub lights: SparseSecondaryMap<NodeHandle, Light>,

    pub active_camera: Option<NodeHandle>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            cameras: SparseSecondaryMap::new(),
            lights: SparseSecondaryMap::new(),
            active_camera: None,
        }
    }

    // ========================================================================
    // Node creation & removal
    // ========================================================================

    /// Creates a detached node. Call [`attach`](Self::attach) or push it to
    /// `root_nodes` to make it part of the hierarchy.
    pub fn create_node(&mut self) -> NodeHandle {
        self.nodes.insert(Node::new())
    }

    pub fn create_node_with_name(&mut self, name: impl Into<Cow<'static, str>>) -> NodeHandle {
        self.nodes.insert(Node::with_name(name))
    }

    /// Adds a node as a scene root.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    pub fn add_to_parent(&mut self, child: Node, parent: NodeHandle) -> NodeHandle {
        let handle = self.nodes.insert(child);

        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(handle);
        }
        if let Some(c) = self.nodes.get_mut(handle) {
            c.parent = Some(parent);
        }

        handle
    }

    /// Removes a node and its whole subtree, including components.
    pub fn remove_node(&mut self, handle: NodeHandle) {
        let Some(node) = self.nodes.get(handle) else {
            return;
        };
        let parent = node.parent;

        if let Some(parent_handle) = parent {
            if let Some(p) = self.nodes.get_mut(parent_handle)
                && let Some(pos) = p.children.iter().position(|&x| x == handle)
            {
                p.children.remove(pos);
            }
        } else if let Some(pos) = self.root_nodes.iter().position(|&x| x == handle) {
            self.root_nodes.remove(pos);
        }

        let mut stack = vec![handle];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                stack.extend(node.children);
            }
            self.cameras.remove(current);
            self.lights.remove(current);
            if self.active_camera == Some(current) {
                self.active_camera = None;
            }
        }
    }

    /// Re-parents `child` under `parent`, detaching it from its previous
    /// parent (or from the root list).
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return;
        }
        if !self.nodes.contains_key(parent) {
            log::error!("Parent node not found during attach!");
            return;
        }

        let old_parent = self.nodes.get(child).and_then(|n| n.parent);
        if let Some(p) = old_parent {
            if let Some(n) = self.nodes.get_mut(p)
                && let Some(i) = n.children.iter().position(|&x| x == child)
            {
                n.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == child) {
            self.root_nodes.remove(i);
        }

        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }

        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
            c.transform.mark_dirty();
        }
    }

    // ========================================================================
    // Node access
    // ========================================================================

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    #[must_use]
    pub fn get_name(&self, handle: NodeHandle) -> Option<&str> {
        self.nodes.get(handle).map(Node::name)
    }

    pub fn set_name(&mut self, handle: NodeHandle, name: impl Into<Cow<'static, str>>) {
        if let Some(node) = self.nodes.get_mut(handle) {
            node.name = name.into();
        }
    }

    /// Finds the first node named `name` anywhere in the scene, searching
    /// each root tree depth-first in root order.
    #[must_use]
    pub fn find_node_by_name(&self, name: &str) -> Option<NodeHandle> {
        self.root_nodes
            .iter()
            .find_map(|&root| self.find_descendant_by_name(root, name))
    }

    /// Finds the first node named `name` in the subtree rooted at `root`
    /// (the root itself included), in depth-first pre-order: a node's whole
    /// subtree is searched before its next sibling.
    #[must_use]
    pub fn find_descendant_by_name(&self, root: NodeHandle, name: &str) -> Option<NodeHandle> {
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            if node.name == name {
                return Some(handle);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    // ========================================================================
    // Component API
    // ========================================================================

    pub fn set_camera(&mut self, handle: NodeHandle, camera: Camera) {
        self.cameras.insert(handle, camera);
    }

    #[must_use]
    pub fn get_camera(&self, handle: NodeHandle) -> Option<&Camera> {
        self.cameras.get(handle)
    }

    pub fn set_light(&mut self, handle: NodeHandle, light: Light) {
        self.lights.insert(handle, light);
    }

    #[must_use]
    pub fn get_light(&self, handle: NodeHandle) -> Option<&Light> {
        self.lights.get(handle)
    }

    /// Creates a root node carrying `camera` and returns its handle.
    pub fn add_camera(&mut self, camera: Camera) -> NodeHandle {
        let handle = self.add_node(Node::with_name("Camera"));
        self.cameras.insert(handle, camera);
        handle
    }

    /// Creates a root node carrying `light` and returns its handle.
    pub fn add_light(&mut self, light: Light) -> NodeHandle {
        let handle = self.add_node(Node::with_name("Light"));
        self.lights.insert(handle, light);
        handle
    }

    /// Returns the active camera together with its node transform.
    pub fn query_main_camera_bundle(&mut self) -> Option<(&mut Transform, &mut Camera)> {
        let node_id = self.active_camera?;
        let camera = self.cameras.get_mut(node_id)?;
        let transform = &mut self.nodes.get_mut(node_id)?.transform;
        Some((transform, camera))
    }

    /// Iterates lights with their owning node's world matrix.
    pub fn iter_lights(&self) -> impl Iterator<Item = (&Light, &glam::Affine3A)> {
        self.lights.iter().filter_map(|(handle, light)| {
            self.nodes
                .get(handle)
                .map(|node| (light, &node.transform.world_matrix))
        })
    }

    // ========================================================================
    // Prefab instantiation
    // ========================================================================

    /// Instantiates a prefab under a fresh `"gltf_root"` scene root and
    /// returns the root handle.
    pub fn instantiate(&mut self, prefab: &Prefab) -> NodeHandle {
        let root = self.add_node(Node::with_name("gltf_root"));

        let handles: Vec<NodeHandle> = prefab
            .nodes
            .iter()
            .map(|p| {
                let mut node = Node::with_name(p.name.clone());
                node.transform = p.transform.clone();
                self.nodes.insert(node)
            })
            .collect();

        for (index, p) in prefab.nodes.iter().enumerate() {
            for &child in &p.children_indices {
                match handles.get(child) {
                    Some(&child_handle) => self.attach(child_handle, handles[index]),
                    None => log::warn!("Prefab node {index} references missing child {child}"),
                }
            }
        }
        for &index in &prefab.root_indices {
            if let Some(&handle) = handles.get(index) {
                self.attach(handle, root);
            }
        }

        root
    }

    // ========================================================================
    // Matrix update pipeline
    // ========================================================================

    /// Recomputes world matrices for the whole scene. Call once per frame.
    pub fn update_matrix_world(&mut self) {
        transform_system::update_hierarchy_iterative(
            &mut self.nodes,
            &mut self.cameras,
            &self.root_nodes,
        );
    }

    pub fn update_subtree(&mut self, root: NodeHandle) {
        transform_system::update_subtree(&mut self.nodes, &mut self.cameras, root);
    }

    /// Per-frame scene update.
    pub fn update(&mut self) {
        self.update_matrix_world();
    }
}
