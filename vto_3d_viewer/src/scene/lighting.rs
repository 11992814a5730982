/// Fixed lighting rig for the viewer scene.
///
/// Deterministic three-point-plus-ambient setup installed once at
/// initialization, so loaded meshes are lit consistently without
/// per-asset light authoring. Not configurable.

use glam::Vec3;
use super::node::Color;

/// Ambient fill intensity.
pub const AMBIENT_INTENSITY: f32 = 0.6;
/// Key directional light intensity.
pub const KEY_LIGHT_INTENSITY: f32 = 0.8;
/// Fill directional light intensity.
pub const FILL_LIGHT_INTENSITY: f32 = 0.4;
/// Rim/back directional light intensity.
pub const RIM_LIGHT_INTENSITY: f32 = 0.3;
/// Shadow-map resolution of the key light (square).
pub const KEY_LIGHT_SHADOW_MAP_SIZE: u32 = 1024;

/// Kind of light in the rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    /// Uniform fill with no direction or position.
    Ambient,
    /// Parallel light shining from `position` toward the origin.
    Directional,
}

/// One light of the fixed rig.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    kind: LightKind,
    color: Color,
    intensity: f32,
    position: Vec3,
    cast_shadow: bool,
    shadow_map_size: u32,
}

impl Light {
    /// Ambient light (position is unused and kept at the origin).
    pub fn ambient(intensity: f32) -> Light {
        Light {
            kind: LightKind::Ambient,
            color: Color::WHITE,
            intensity,
            position: Vec3::ZERO,
            cast_shadow: false,
            shadow_map_size: 0,
        }
    }

    /// Directional light at a relative position, no shadow casting.
    pub fn directional(position: Vec3, intensity: f32) -> Light {
        Light {
            kind: LightKind::Directional,
            color: Color::WHITE,
            intensity,
            position,
            cast_shadow: false,
            shadow_map_size: 0,
        }
    }

    /// Enable shadow casting with the given square shadow-map resolution.
    pub fn with_shadow(mut self, shadow_map_size: u32) -> Light {
        self.cast_shadow = true;
        self.shadow_map_size = shadow_map_size;
        self
    }

    pub fn kind(&self) -> LightKind {
        self.kind
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn casts_shadow(&self) -> bool {
        self.cast_shadow
    }

    /// Shadow-map resolution; 0 when the light does not cast shadows.
    pub fn shadow_map_size(&self) -> u32 {
        self.shadow_map_size
    }
}

/// The standard four-light rig: ambient, shadow-casting key light,
/// fill light, and rim/back light.
pub fn standard_rig() -> Vec<Light> {
    vec![
        Light::ambient(AMBIENT_INTENSITY),
        Light::directional(Vec3::new(5.0, 5.0, 5.0), KEY_LIGHT_INTENSITY)
            .with_shadow(KEY_LIGHT_SHADOW_MAP_SIZE),
        Light::directional(Vec3::new(-5.0, 0.0, -5.0), FILL_LIGHT_INTENSITY),
        Light::directional(Vec3::new(0.0, 5.0, -5.0), RIM_LIGHT_INTENSITY),
    ]
}

#[cfg(test)]
#[path = "lighting_tests.rs"]
mod tests;
