use glam::Vec3;

use crate::config::PositionedLight;

/// What a light is. Direction and position come from the owning node:
/// directional lights shine along the node's -Z axis, point lights radiate
/// from its origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Ambient,
    Directional,
    Point { range: f32 },
}

/// Light component. Static for the session; the rendering backend reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub color: Vec3,
    pub intensity: f32,
    pub kind: LightKind,
    pub cast_shadows: bool,
}

impl Light {
    #[must_use]
    pub fn new(kind: LightKind, color: Vec3, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            kind,
            cast_shadows: false,
        }
    }

    #[must_use]
    pub fn new_ambient(color: Vec3, intensity: f32) -> Self {
        Self::new(LightKind::Ambient, color, intensity)
    }

    #[must_use]
    pub fn new_directional(color: Vec3, intensity: f32) -> Self {
        Self::new(LightKind::Directional, color, intensity)
    }

    #[must_use]
    pub fn new_point(color: Vec3, intensity: f32, range: f32) -> Self {
        Self::new(LightKind::Point { range }, color, intensity)
    }

    /// White light of `kind` with intensity and shadow flag from config.
    #[must_use]
    pub fn from_config(kind: LightKind, config: &PositionedLight) -> Self {
        Self::new(kind, Vec3::ONE, config.intensity).with_shadows(config.cast_shadows)
    }

    /// Ambient light never casts shadows; the flag is ignored for it.
    #[must_use]
    pub fn with_shadows(mut self, cast_shadows: bool) -> Self {
        self.cast_shadows = cast_shadows && self.kind != LightKind::Ambient;
        self
    }
}
