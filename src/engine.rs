//! Frame coordinator.
//!
//! [`Engine`] is the frame-level coordinator: the scene, the asset server,
//! input state and frame timing. It holds no window, so it can be driven by
//! the winit shell in [`app::winit`](crate::app::winit) or directly by tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use myth_avatar::Engine;
//!
//! let mut engine = Engine::new();
//! loop {
//!     // ... app logic mutating engine.scene ...
//!     engine.update(dt);
//! }
//! ```

use std::time::Duration;

use crate::app::input::Input;
use crate::assets::AssetServer;
use crate::scene::Scene;
use crate::utils::Timer;

/// Owns everything a frame needs except the window.
///
/// # Lifecycle
///
/// 1. Create with [`Engine::new`] or [`Engine::with_assets`]
/// 2. Forward window size changes to [`Engine::resize`]
/// 3. Call [`Engine::update`] once per frame, after app logic
pub struct Engine {
    pub scene: Scene,
    pub assets: AssetServer,
    pub input: Input,

    time: f32,
    frame_count: u64,
    size: (u32, u32),
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self::with_assets(AssetServer::new())
    }

    /// Creates an engine that loads models through `assets`.
    #[must_use]
    pub fn with_assets(assets: AssetServer) -> Self {
        Self {
            scene: Scene::new(),
            assets,
            input: Input::new(),
            time: 0.0,
            frame_count: 0,
            size: (0, 0),
        }
    }

    /// Seconds accumulated through [`update`](Self::update).
    #[inline]
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Frames finished so far.
    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Viewport `(width, height)` in physical pixels; `(0, 0)` before the first resize.
    #[inline]
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Handles viewport resize: records the size, updates input and the
    /// active camera aspect ratio.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.input.inject_resize(width, height);

        if width > 0 && height > 0 {
            self.update_camera_aspect(width as f32 / height as f32);
        }
    }

    /// Closes the frame: world matrices pick up whatever the app wrote this
    /// frame, then per-frame input is cleared.
    pub fn update(&mut self, dt: f32) {
        self.time += dt;
        self.frame_count += 1;

        self.scene.update();

        self.input.start_frame();
    }

    fn update_camera_aspect(&mut self, aspect: f32) {
        let Some(cam_handle) = self.scene.active_camera else {
            return;
        };
        if let Some(cam) = self.scene.cameras.get_mut(cam_handle) {
            cam.set_aspect(aspect);
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Timing handed to [`AppHandler::update`](crate::app::winit::AppHandler::update).
#[derive(Debug, Clone, Copy)]
pub struct FrameState {
    /// Seconds since the window opened.
    pub time: f32,
    /// Seconds since the previous frame.
    pub dt: f32,
    /// The same frame length, exact, for interval-driven logic.
    pub delta: Duration,
    pub frame_count: u64,
}

impl FrameState {
    /// Snapshot of a clock that was just ticked.
    #[must_use]
    pub fn from_clock(clock: &Timer, frame_count: u64) -> Self {
        Self {
            time: clock.elapsed.as_secs_f32(),
            dt: clock.dt_seconds(),
            delta: clock.delta,
            frame_count,
        }
    }
}
