//! Orbit camera: spherical placement around a focus point, Z up.
//!
//! The eye sits at
//! `focus + distance * (sin(el) cos(az), sin(el) sin(az), cos(el))`
//! where `el` is the polar angle from +Z. Elevation is kept strictly inside
//! `(0, π)` so the view never flips over a pole.

use std::f32::consts::PI;

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;

use domino_core::config::{CameraConfig, DominoConfig};
use domino_core::time::FrameClock;

use crate::config::VizConfig;

/// Closest the elevation may get to either pole, radians.
pub const POLE_MARGIN: f32 = 0.05;

// ---------------------------------------------------------------------------
// OrbitCamera
// ---------------------------------------------------------------------------

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    /// Angle around +Z, radians.
    pub azimuth: f32,
    /// Polar angle from +Z, radians.
    pub elevation: f32,
    pub distance: f32,
    pub focus: Vec3,
}

impl OrbitCamera {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            azimuth: config.azimuth,
            elevation: config.elevation.clamp(POLE_MARGIN, PI - POLE_MARGIN),
            distance: config.distance,
            focus: Vec3::ZERO,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_el, cos_el) = self.elevation.sin_cos();
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        self.focus + self.distance * Vec3::new(sin_el * cos_az, sin_el * sin_az, cos_el)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.focus, Vec3::Z)
    }

    /// Rotate by the given angles; elevation is clamped away from the poles.
    pub fn rotate(&mut self, d_azimuth: f32, d_elevation: f32) {
        self.azimuth += d_azimuth;
        self.elevation = (self.elevation + d_elevation).clamp(POLE_MARGIN, PI - POLE_MARGIN);
    }

    pub fn zoom_in(&mut self, factor: f32) {
        self.distance /= factor;
    }

    pub fn zoom_out(&mut self, factor: f32) {
        self.distance *= factor;
    }

    pub fn pan(&mut self, offset: Vec3) {
        self.focus += offset;
    }
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Spawn the perspective camera at the configured orbit.
#[allow(clippy::needless_pass_by_value)]
pub fn spawn_camera(mut commands: Commands, config: Res<DominoConfig>, viz: Res<VizConfig>) {
    let orbit = OrbitCamera::from_config(&config.camera);
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: viz.fov_degrees.to_radians(),
            near: viz.near,
            far: viz.far,
            ..default()
        }),
        orbit.transform(),
        orbit,
    ));
}

/// Left-button drag orbits the camera.
///
/// Only the sign of the pointer delta matters. Each axis moves by
/// `rotate_speed * frame delta` radians, so the orbit rate does not depend
/// on how many motion events the platform delivers.
#[allow(clippy::needless_pass_by_value)]
pub fn pointer_drag_system(
    buttons: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    clock: Res<FrameClock>,
    config: Res<DominoConfig>,
    mut cameras: Query<&mut OrbitCamera>,
) {
    if !buttons.pressed(MouseButton::Left) || motion.delta == Vec2::ZERO {
        return;
    }
    let step = config.camera.rotate_speed * clock.delta_secs();
    let d_azimuth = -sign(motion.delta.x) * step;
    let d_elevation = -sign(motion.delta.y) * step;
    for mut camera in &mut cameras {
        camera.rotate(d_azimuth, d_elevation);
    }
}

/// Copy orbit state into the camera transform.
pub fn apply_camera_transform(
    mut cameras: Query<(&OrbitCamera, &mut Transform), Changed<OrbitCamera>>,
) {
    for (orbit, mut transform) in &mut cameras {
        *transform = orbit.transform();
    }
}

fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
