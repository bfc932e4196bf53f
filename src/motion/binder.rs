//! Scene Binder
//!
//! Projects an [`AvatarPose`] onto the named nodes of a loaded model and
//! places the model root. The binder writes transforms only; it never owns
//! the graph it writes to.

use glam::Vec3;

use crate::config::PlacementConfig;
use crate::motion::pose::{AvatarPose, Limb};
use crate::scene::{NodeHandle, Scene, Transform};

/// Named-node lookup plus transform write access over a model graph.
///
/// `root` identifies the model inside the graph; lookups are confined to
/// its subtree so two avatars in one scene never cross-bind.
pub trait SceneGraph {
    fn find_node(&self, root: NodeHandle, name: &str) -> Option<NodeHandle>;

    fn transform_mut(&mut self, node: NodeHandle) -> Option<&mut Transform>;
}

impl SceneGraph for Scene {
    fn find_node(&self, root: NodeHandle, name: &str) -> Option<NodeHandle> {
        self.find_descendant_by_name(root, name)
    }

    fn transform_mut(&mut self, node: NodeHandle) -> Option<&mut Transform> {
        self.get_node_mut(node).map(|n| &mut n.transform)
    }
}

/// Which limbs were found during one bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BindReport {
    bound: [bool; 4],
}

impl BindReport {
    #[must_use]
    pub fn is_bound(&self, limb: Limb) -> bool {
        self.bound[limb as usize]
    }

    #[must_use]
    pub fn bound_count(&self) -> usize {
        self.bound.iter().filter(|&&b| b).count()
    }

    /// Limbs whose node was absent from the model.
    pub fn missing(&self) -> impl Iterator<Item = Limb> + '_ {
        Limb::ALL.into_iter().filter(|&limb| !self.is_bound(limb))
    }
}

/// Writes every present limb node, skipping absent ones, then places the
/// model root.
pub fn bind<G: SceneGraph + ?Sized>(
    graph: &mut G,
    model_root: NodeHandle,
    pose: &AvatarPose,
    placement: &PlacementConfig,
) -> BindReport {
    let mut report = BindReport::default();

    for (limb, sample) in pose.iter() {
        let Some(node) = graph.find_node(model_root, limb.node_name()) else {
            continue;
        };
        let Some(transform) = graph.transform_mut(node) else {
            continue;
        };

        transform.position = sample.position;
        let r = sample.rotation_radians();
        transform.set_rotation_euler(r.x, r.y, r.z);

        report.bound[limb as usize] = true;
    }

    place_root(graph, model_root, placement);

    report
}

/// Applies the static root placement: lowered by a quarter of the avatar
/// height, nudged on X/Z, uniformly scaled.
pub fn place_root<G: SceneGraph + ?Sized>(
    graph: &mut G,
    model_root: NodeHandle,
    placement: &PlacementConfig,
) {
    if let Some(root) = graph.transform_mut(model_root) {
        root.position = placement.root_position();
        root.scale = Vec3::splat(placement.model_scale);
    }
}
