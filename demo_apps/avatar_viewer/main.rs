//! Avatar viewer
//!
//! Usage: `avatar_viewer [config.json]`
//!
//! Loads the avatar named by the configuration, lights it, and lets it idle.
//! Left drag orbits, right drag pans, the wheel zooms, `R` resets the camera.

use std::sync::Arc;

use glam::Vec3;
use myth_avatar::app::input::Key;
use myth_avatar::app::winit::{App, AppHandler, Window};
use myth_avatar::config::{CameraConfig, LightingConfig};
use myth_avatar::engine::{Engine, FrameState};
use myth_avatar::scene::LightKind;
use myth_avatar::{AvatarViewer, Camera, Light, ModelState, OrbitControls, Scene, ViewerConfig};
use rand::rngs::ThreadRng;

struct AvatarApp {
    config: ViewerConfig,
    viewer: AvatarViewer,
    controls: OrbitControls,
    rng: ThreadRng,
    failure_reported: bool,
}

impl AvatarApp {
    fn new(engine: &mut Engine, config: ViewerConfig) -> Self {
        let (width, height) = engine.size();
        let aspect = if height > 0 {
            width as f32 / height as f32
        } else {
            config.width as f32 / config.height.max(1) as f32
        };
        spawn_camera(&mut engine.scene, &config.camera, aspect);
        spawn_lights(&mut engine.scene, &config.lights);

        let controls =
            OrbitControls::from_config(&config.orbit, Vec3::from_array(config.camera.position));

        let mut viewer = AvatarViewer::from_config(&config);
        viewer.set_model(engine.assets.load_prefab_async(&config.model_path));
        viewer.mount();

        Self {
            config,
            viewer,
            controls,
            rng: rand::rng(),
            failure_reported: false,
        }
    }
}

fn spawn_camera(scene: &mut Scene, config: &CameraConfig, aspect: f32) {
    let camera = Camera::new_perspective(config.fov, aspect, config.near, config.far);
    let cam_node = scene.add_camera(camera);
    if let Some(node) = scene.get_node_mut(cam_node) {
        node.transform.position = Vec3::from_array(config.position);
        node.transform.look_at(Vec3::ZERO, Vec3::Y);
    }
    scene.active_camera = Some(cam_node);
}

fn spawn_lights(scene: &mut Scene, config: &LightingConfig) {
    scene.add_light(Light::new_ambient(Vec3::ONE, config.ambient));

    let sun_node = scene.add_light(Light::from_config(LightKind::Directional, &config.directional));
    if let Some(node) = scene.get_node_mut(sun_node) {
        node.transform.position = Vec3::from_array(config.directional.position);
        node.transform.look_at(Vec3::ZERO, Vec3::Y);
    }

    let fill = Light::from_config(LightKind::Point { range: 50.0 }, &config.point);
    let fill_node = scene.add_light(fill);
    if let Some(node) = scene.get_node_mut(fill_node) {
        node.transform.position = Vec3::from_array(config.point.position);
    }
}

impl AppHandler for AvatarApp {
    fn init(engine: &mut Engine, _window: &Arc<Window>) -> Self {
        Self::new(engine, ViewerConfig::default())
    }

    fn update(&mut self, engine: &mut Engine, window: &Arc<Window>, frame: &FrameState) {
        self.viewer
            .update(&mut engine.scene, frame.delta, &mut self.rng);

        if !self.failure_reported
            && let Some(ModelState::Failed(reason)) = self.viewer.model_state()
        {
            window.set_title(&format!("{} | {reason}", self.config.title));
            self.failure_reported = true;
        }

        if engine.input.get_key_down(Key::R) {
            self.controls
                .set_position(Vec3::from_array(self.config.camera.position));
        }

        if let Some((transform, camera)) = engine.scene.query_main_camera_bundle() {
            self.controls
                .update(transform, &engine.input, camera.fov_degrees(), frame.dt);
        }
    }

    fn on_exit(&mut self, _engine: &mut Engine) {
        self.viewer.unmount();
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };

    log::info!("Starting avatar viewer for {}", config.model_path.display());

    App::new()
        .with_title(config.title.clone())
        .with_size(config.width, config.height)
        .run_with(move |engine: &mut Engine, _window: &Arc<Window>| AvatarApp::new(engine, config))?;

    Ok(())
}
