//! World-matrix propagation.
//!
//! Works on the node storage and camera components directly rather than on
//! [`Scene`](crate::scene::Scene), so the scene can hand out disjoint borrows.

use glam::Affine3A;
use slotmap::{SlotMap, SparseSecondaryMap};

use crate::scene::NodeHandle;
use crate::scene::camera::Camera;
use crate::scene::node::Node;

/// A pending visit: the node, its parent's world matrix, and whether that
/// parent's world matrix moved this pass.
type Visit = (NodeHandle, Affine3A, bool);

/// Updates world matrices for every tree reachable from `roots`.
///
/// Subtrees whose local matrices and ancestors are unchanged are walked but
/// not recomputed.
pub fn update_hierarchy_iterative(
    nodes: &mut SlotMap<NodeHandle, Node>,
    cameras: &mut SparseSecondaryMap<NodeHandle, Camera>,
    roots: &[NodeHandle],
) {
    let pending: Vec<Visit> = roots
        .iter()
        .rev()
        .map(|&root| (root, Affine3A::IDENTITY, false))
        .collect();
    propagate(nodes, cameras, pending);
}

/// Recomputes the subtree under `root` unconditionally, starting from its
/// parent's current world matrix. Used after a prefab is attached mid-frame.
pub fn update_subtree(
    nodes: &mut SlotMap<NodeHandle, Node>,
    cameras: &mut SparseSecondaryMap<NodeHandle, Camera>,
    root: NodeHandle,
) {
    let Some(node) = nodes.get(root) else {
        return;
    };
    let parent_world = node
        .parent
        .and_then(|p| nodes.get(p))
        .map_or(Affine3A::IDENTITY, |p| p.transform.world_matrix);

    propagate(nodes, cameras, vec![(root, parent_world, true)]);
}

fn propagate(
    nodes: &mut SlotMap<NodeHandle, Node>,
    cameras: &mut SparseSecondaryMap<NodeHandle, Camera>,
    mut pending: Vec<Visit>,
) {
    while let Some((handle, parent_world, parent_moved)) = pending.pop() {
        let Some(node) = nodes.get_mut(handle) else {
            continue;
        };

        let moved = node.transform.update_local_matrix() || parent_moved;
        if moved {
            let world = parent_world * *node.transform.local_matrix();
            node.transform.set_world_matrix(world);
            if let Some(camera) = cameras.get_mut(handle) {
                camera.update_view_projection(&world);
            }
        }

        let world = node.transform.world_matrix;
        pending.extend(node.children.iter().rev().map(|&child| (child, world, moved)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn two_level() -> (SlotMap<NodeHandle, Node>, NodeHandle, NodeHandle) {
        let mut nodes: SlotMap<NodeHandle, Node> = SlotMap::with_key();

        let mut shoulder = Node::with_name("Shoulder");
        shoulder.transform.position = Vec3::new(1.0, 0.0, 0.0);
        let shoulder = nodes.insert(shoulder);

        let mut hand = Node::with_name("Hand");
        hand.transform.position = Vec3::new(0.0, 1.0, 0.0);
        hand.parent = Some(shoulder);
        let hand = nodes.insert(hand);

        nodes[shoulder].children.push(hand);
        (nodes, shoulder, hand)
    }

    #[test]
    fn child_inherits_parent_translation() {
        let (mut nodes, shoulder, hand) = two_level();
        let mut cameras = SparseSecondaryMap::new();

        update_hierarchy_iterative(&mut nodes, &mut cameras, &[shoulder]);

        let p = nodes[hand].transform.world_matrix.translation;
        assert!((p.x - 1.0).abs() < 1e-5);
        assert!((p.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn subtree_update_uses_parent_world() {
        let (mut nodes, shoulder, hand) = two_level();
        let mut cameras = SparseSecondaryMap::new();
        update_hierarchy_iterative(&mut nodes, &mut cameras, &[shoulder]);

        nodes[hand].transform.position = Vec3::new(0.0, 2.0, 0.0);
        update_subtree(&mut nodes, &mut cameras, hand);

        let p = nodes[hand].transform.world_matrix.translation;
        assert!((p.x - 1.0).abs() < 1e-5);
        assert!((p.y - 2.0).abs() < 1e-5);
    }
}
