//! Visualization configuration.

use bevy::prelude::*;

/// Look of the rendered scene. Camera placement and interaction tuning live
/// in [`CameraConfig`](domino_core::config::CameraConfig).
#[derive(Resource, Clone, Debug)]
pub struct VizConfig {
    pub tile_color: Color,
    pub ground_color: Color,
    /// Point light position in world space, metres.
    pub light_position: Vec3,
    /// Point light luminous power, lumens.
    pub light_intensity: f32,
    pub light_range: f32,
    /// Vertical field of view, degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            tile_color: Color::srgb(0.0, 0.0, 0.7),
            ground_color: Color::WHITE,
            light_position: Vec3::new(5.0, 5.0, 10.0),
            light_intensity: 4_000_000.0,
            light_range: 50.0,
            fov_degrees: 60.0,
            near: 0.1,
            far: 800.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_frustum_is_sane() {
        let viz = VizConfig::default();
        assert!(viz.near > 0.0 && viz.near < viz.far);
        assert!((viz.fov_degrees.to_radians() - std::f32::consts::FRAC_PI_3).abs() < 1e-6);
    }
}
