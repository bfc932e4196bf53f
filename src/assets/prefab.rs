use std::sync::Arc;

use crate::scene::transform::Transform;

/// Prefab node: plain data, children referenced by index.
#[derive(Debug, Clone)]
pub struct PrefabNode {
    pub name: String,
    pub transform: Transform,
    /// Indices of the children in `Prefab::nodes`.
    pub children_indices: Vec<usize>,
}

impl PrefabNode {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::new(),
            children_indices: Vec::new(),
        }
    }
}

/// Node hierarchy parsed from a model file.
///
/// A `Prefab` holds no scene handles, so it can be built on a loader thread
/// and sent to the frame thread. Use
/// [`Scene::instantiate`](crate::scene::Scene::instantiate) to turn it into
/// scene nodes.
#[derive(Debug, Clone, Default)]
pub struct Prefab {
    /// All nodes, flattened.
    pub nodes: Vec<PrefabNode>,
    /// Indices of the default-scene roots.
    pub root_indices: Vec<usize>,
}

impl Prefab {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index of the first node called `name`.
    #[must_use]
    pub fn find_node(&self, name: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.name == name)
    }
}

/// Thread-safe prefab reference.
pub type SharedPrefab = Arc<Prefab>;
