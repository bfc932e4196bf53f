//! Avatar Viewer
//!
//! One mounted viewer instance. It owns the idle motion and the model slot
//! and re-binds the pose whenever either of them changes:
//!
//! ```text
//! frame ──► poll model ──► advance idle motion ──► (pose, model) changed? ──► bind
//! ```
//!
//! Nothing is bound while the model is pending or failed, so a viewer
//! without a ready model presents nothing.

use std::time::Duration;

use rand::RngExt;

use crate::assets::{ModelRequest, ModelState};
use crate::config::{PlacementConfig, ViewerConfig};
use crate::motion::{self, AvatarPose, BindReport, IdleMotion, Limb, SceneGraph};
use crate::scene::{NodeHandle, Scene};

pub struct AvatarViewer {
    motion: IdleMotion,
    placement: PlacementConfig,

    request: Option<ModelRequest>,
    model_root: Option<NodeHandle>,
    /// Bumped every time a different model root is attached.
    model_generation: u64,

    /// `(pose_version, model_generation)` of the last bind.
    last_bound: Option<(u64, u64)>,
    last_report: Option<BindReport>,
    warned_missing: [bool; 4],
}

impl AvatarViewer {
    #[must_use]
    pub fn new(tick_interval: Duration, placement: PlacementConfig) -> Self {
        Self {
            motion: IdleMotion::new(tick_interval),
            placement,
            request: None,
            model_root: None,
            model_generation: 0,
            last_bound: None,
            last_report: None,
            warned_missing: [false; 4],
        }
    }

    #[must_use]
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self::new(config.tick_interval(), config.placement)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Starts idle motion.
    pub fn mount(&mut self) {
        self.motion.mount();
    }

    /// Stops idle motion for good. The model stays in the scene untouched.
    pub fn unmount(&mut self) {
        self.motion.unmount();
        self.request = None;
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.motion.is_mounted()
    }

    // ========================================================================
    // Model slot
    // ========================================================================

    /// Hands the viewer a model load. It is instantiated into the scene as
    /// soon as it resolves.
    pub fn set_model(&mut self, request: ModelRequest) {
        self.request = Some(request);
    }

    /// Uses an already-present subtree as the model.
    pub fn attach_model(&mut self, root: NodeHandle) {
        if self.model_root == Some(root) {
            return;
        }
        self.model_root = Some(root);
        self.model_generation += 1;
        self.warned_missing = [false; 4];
        log::debug!("Model root attached (generation {})", self.model_generation);
    }

    /// Current state of the pending model load, if any.
    #[must_use]
    pub fn model_state(&self) -> Option<&ModelState> {
        self.request.as_ref().map(|r| r.state())
    }

    #[must_use]
    pub fn model_root(&self) -> Option<NodeHandle> {
        self.model_root
    }

    /// Whether a model is attached and can be drawn.
    #[must_use]
    pub fn is_presentable(&self) -> bool {
        self.model_root.is_some()
    }

    /// Polls the model load and instantiates it on success.
    pub fn poll_model(&mut self, scene: &mut Scene) {
        let Some(request) = self.request.as_mut() else {
            return;
        };
        let ModelState::Ready(prefab) = request.poll() else {
            return;
        };
        let prefab = prefab.clone();
        self.request = None;

        let root = scene.instantiate(&prefab);
        log::info!("Model instantiated with {} nodes", prefab.nodes.len());
        self.attach_model(root);
    }

    // ========================================================================
    // Frame
    // ========================================================================

    /// Full per-frame step against the owning scene.
    pub fn update<R: RngExt + ?Sized>(&mut self, scene: &mut Scene, dt: Duration, rng: &mut R) {
        self.poll_model(scene);
        self.advance(scene, dt, rng);
    }

    /// Advances idle motion, then binds if the pose or the model changed.
    ///
    /// Returns the bind report when a bind happened.
    pub fn advance<G, R>(&mut self, graph: &mut G, dt: Duration, rng: &mut R) -> Option<BindReport>
    where
        G: SceneGraph + ?Sized,
        R: RngExt + ?Sized,
    {
        self.motion.update(dt, rng);

        let root = self.model_root?;
        let key = (self.motion.pose_version(), self.model_generation);
        if self.last_bound == Some(key) {
            return None;
        }

        let report = motion::bind(graph, root, self.motion.pose(), &self.placement);
        log::debug!(
            "Bound pose v{} to model g{} ({} of 4 limbs)",
            key.0,
            key.1,
            report.bound_count()
        );
        self.warn_missing(&report);

        self.last_bound = Some(key);
        self.last_report = Some(report);
        Some(report)
    }

    fn warn_missing(&mut self, report: &BindReport) {
        for limb in report.missing() {
            let warned = &mut self.warned_missing[limb as usize];
            if !*warned {
                log::warn!("Model has no '{}' node; limb stays still", limb.node_name());
                *warned = true;
            }
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn pose(&self) -> &AvatarPose {
        self.motion.pose()
    }

    #[must_use]
    pub fn motion(&self) -> &IdleMotion {
        &self.motion
    }

    #[must_use]
    pub fn placement(&self) -> &PlacementConfig {
        &self.placement
    }

    #[must_use]
    pub fn last_report(&self) -> Option<&BindReport> {
        self.last_report.as_ref()
    }

    #[must_use]
    pub fn is_limb_bound(&self, limb: Limb) -> bool {
        self.last_report.is_some_and(|r| r.is_bound(limb))
    }
}
