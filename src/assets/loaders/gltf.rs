use std::path::Path;

use crate::assets::prefab::{Prefab, PrefabNode};
use crate::errors::{Error, Result};
use crate::scene::transform::Transform;

/// glTF / GLB hierarchy loader.
///
/// Only the node tree (names and TRS) is extracted. Mesh, material and
/// texture decoding belong to the rendering backend, so external buffers are
/// never touched and a `.gltf` without its `.bin` still parses.
pub struct GltfLoader;

impl GltfLoader {
    /// Reads and parses a model file.
    pub fn load(path: &Path) -> Result<Prefab> {
        let bytes = std::fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::AssetNotFound(path.display().to_string())
            } else {
                Error::Io(e)
            }
        })?;
        Self::parse(&bytes)
    }

    /// Parses a glTF JSON or GLB container from memory.
    ///
    /// Extension support is not checked: required mesh or material
    /// extensions (Draco, meshopt, quantization) only affect data this loader
    /// never reads. Hierarchy indices are range-checked here instead.
    pub fn parse(bytes: &[u8]) -> Result<Prefab> {
        let gltf = gltf::Gltf::from_slice_without_validation(bytes)?;
        let root = gltf.document.as_json();

        if !root.extensions_required.is_empty() {
            log::debug!(
                "glTF requires extensions {:?}; only the node hierarchy is read",
                root.extensions_required
            );
        }

        let node_count = root.nodes.len();
        let mut prefab = Prefab {
            nodes: Vec::with_capacity(node_count),
            root_indices: Vec::new(),
        };

        // Pass 1: nodes and transforms.
        for node in gltf.nodes() {
            let name = node
                .name()
                .map_or_else(|| format!("Node_{}", node.index()), str::to_string);
            let (t, r, s) = node.transform().decomposed();

            let mut prefab_node = PrefabNode::new(name);
            prefab_node.transform = Transform::from_trs(t, r, s);
            prefab.nodes.push(prefab_node);
        }

        // Pass 2: hierarchy.
        for (parent, node) in root.nodes.iter().enumerate() {
            for child in node.children.iter().flatten() {
                let child = checked_node(child.value(), node_count, "children of a node")?;
                prefab.nodes[parent].children_indices.push(child);
            }
        }

        // Pass 3: roots. Fall back to every parentless node when the file
        // declares no scene at all.
        let scene_index = root
            .scene
            .map(|i| i.value())
            .or_else(|| (!root.scenes.is_empty()).then_some(0));
        if let Some(index) = scene_index {
            let scene = root
                .scenes
                .get(index)
                .ok_or_else(|| Error::Gltf(format!("default scene {index} does not exist")))?;
            prefab.root_indices = scene
                .nodes
                .iter()
                .map(|n| checked_node(n.value(), node_count, "scene roots"))
                .collect::<Result<_>>()?;
        } else {
            let mut has_parent = vec![false; node_count];
            for n in &prefab.nodes {
                for &c in &n.children_indices {
                    has_parent[c] = true;
                }
            }
            prefab.root_indices = (0..node_count).filter(|&i| !has_parent[i]).collect();
        }

        log::debug!(
            "Parsed glTF hierarchy: {} nodes, {} roots",
            prefab.nodes.len(),
            prefab.root_indices.len()
        );

        Ok(prefab)
    }
}

fn checked_node(index: usize, node_count: usize, context: &str) -> Result<usize> {
    if index < node_count {
        Ok(index)
    } else {
        Err(Error::Gltf(format!(
            "node index {index} in {context} is out of range ({node_count} nodes)"
        )))
    }
}
