use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::{Vec2, Vec3};

use crate::app::input::{Input, MouseButton};
use crate::config::OrbitConfig;
use crate::scene::transform::Transform;

const DAMPING_REFERENCE_FPS: f32 = 60.0;
const POLE_EPSILON: f32 = 1e-4;

/// Orbit camera controller.
///
/// Left drag orbits around `center`, right drag pans, the wheel zooms.
/// The camera position is stored in spherical coordinates (`radius`,
/// `theta` around +Y, `phi` from +Y).
pub struct OrbitControls {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub damping_factor: f32,
    pub enable_damping: bool,
    pub min_distance: f32,
    pub max_distance: f32,

    pub center: Vec3,
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,

    rotate_delta: Vec2,
}

impl OrbitControls {
    #[must_use]
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            rotate_speed: 1.0,
            zoom_speed: 0.05,
            pan_speed: 1.0,
            damping_factor: 0.05,
            enable_damping: true,
            min_distance: 1.0,
            max_distance: 1000.0,

            center,
            radius,
            theta: 0.0,
            phi: FRAC_PI_2,

            rotate_delta: Vec2::ZERO,
        }
    }

    /// Builds controls that start exactly at `camera_position`, looking at
    /// `config.target`.
    #[must_use]
    pub fn from_config(config: &OrbitConfig, camera_position: Vec3) -> Self {
        let center = Vec3::from_array(config.target);
        let mut controls = Self::new(center, 1.0);
        controls.rotate_speed = config.rotate_speed;
        controls.zoom_speed = config.zoom_speed;
        controls.pan_speed = config.pan_speed;
        controls.damping_factor = config.damping_factor;
        controls.enable_damping = config.enable_damping;
        controls.min_distance = config.min_distance;
        controls.max_distance = config.max_distance;
        controls.set_position(camera_position);
        controls
    }

    /// Re-derives the spherical coordinates from a world position.
    pub fn set_position(&mut self, position: Vec3) {
        let offset = position - self.center;
        self.radius = offset.length().clamp(self.min_distance, self.max_distance);
        if offset.length_squared() > 0.0 {
            self.theta = offset.x.atan2(offset.z);
            self.phi = (offset.y / offset.length()).clamp(-1.0, 1.0).acos();
        }
        self.rotate_delta = Vec2::ZERO;
    }

    /// Camera position implied by the current spherical coordinates.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.center
            + Vec3::new(
                self.radius * sin_phi * sin_theta,
                self.radius * cos_phi,
                self.radius * sin_phi * cos_theta,
            )
    }

    /// Applies this frame's mouse input and writes the resulting camera pose.
    pub fn update(&mut self, transform: &mut Transform, input: &Input, fov_degrees: f32, dt: f32) {
        let viewport_height = input.screen_size().y.max(1.0);
        let drag = input.mouse_delta();

        if input.get_mouse_button(MouseButton::Left) {
            self.queue_orbit(drag, viewport_height);
        }
        self.apply_orbit(dt);
        self.zoom(input.scroll_delta().y);
        if input.get_mouse_button(MouseButton::Right) {
            self.pan(drag, viewport_height, fov_degrees);
        }

        transform.position = self.position();
        transform.look_at(self.center, Vec3::Y);
    }

    /// A full-height drag turns the camera once around.
    fn queue_orbit(&mut self, drag: Vec2, viewport_height: f32) {
        let radians_per_pixel = TAU / viewport_height * self.rotate_speed;
        self.rotate_delta -= drag * radians_per_pixel;
    }

    /// Consumes the queued rotation, all at once or eased over frames.
    fn apply_orbit(&mut self, dt: f32) {
        let step = if self.enable_damping {
            // Frame-rate independent: the same decay per second at any fps.
            let kept = (1.0 - self.damping_factor).powf(dt * DAMPING_REFERENCE_FPS);
            let step = self.rotate_delta * (1.0 - kept);
            self.rotate_delta *= kept;
            step
        } else {
            std::mem::take(&mut self.rotate_delta)
        };

        self.theta += step.x;
        self.phi = (self.phi + step.y).clamp(POLE_EPSILON, PI - POLE_EPSILON);
    }

    fn zoom(&mut self, scroll: f32) {
        if scroll == 0.0 {
            return;
        }
        let factor = (1.0 - self.zoom_speed).powf(scroll.abs());
        let radius = if scroll > 0.0 {
            self.radius * factor
        } else {
            self.radius / factor
        };
        self.radius = radius.clamp(self.min_distance, self.max_distance);
    }

    /// Moves `center` so the point under the cursor tracks the cursor.
    fn pan(&mut self, drag: Vec2, viewport_height: f32, fov_degrees: f32) {
        let visible_height = 2.0 * self.radius * (fov_degrees.to_radians() * 0.5).tan();
        let world_per_pixel = visible_height / viewport_height * self.pan_speed;

        let view_dir = (self.center - self.position()).normalize();
        let right = view_dir.cross(Vec3::Y).normalize();
        let up = right.cross(view_dir);

        self.center += (up * drag.y - right * drag.x) * world_per_pixel;
    }
}
