//! Keyboard commands: camera zoom and pan, topple, reset, quit.

use bevy::prelude::*;

use domino_core::config::DominoConfig;
use domino_core::phase::SimPhase;
use domino_physics::systems::PhysicsWorld;

use crate::camera::OrbitCamera;

/// Resource mapping keys to commands.
#[derive(Resource, Clone, Debug)]
pub struct KeyBindings {
    pub zoom_in: Vec<KeyCode>,
    pub zoom_out: Vec<KeyCode>,
    pub topple: KeyCode,
    pub reset: KeyCode,
    pub quit: KeyCode,
    /// Pan the focus along -X / +X / +Y / -Y.
    pub pan_left: KeyCode,
    pub pan_right: KeyCode,
    pub pan_forward: KeyCode,
    pub pan_back: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            // `+` shares a key with `=` on most layouts.
            zoom_in: vec![KeyCode::Equal, KeyCode::NumpadAdd],
            zoom_out: vec![KeyCode::Minus, KeyCode::NumpadSubtract],
            topple: KeyCode::KeyP,
            reset: KeyCode::KeyR,
            quit: KeyCode::Escape,
            pan_left: KeyCode::KeyA,
            pan_right: KeyCode::KeyD,
            pan_forward: KeyCode::KeyW,
            pan_back: KeyCode::KeyS,
        }
    }
}

impl KeyBindings {
    /// Focus offset for the pan keys pressed this frame.
    fn pan_offset(&self, keys: &ButtonInput<KeyCode>, step: f32) -> Vec3 {
        let mut offset = Vec3::ZERO;
        if keys.just_pressed(self.pan_left) {
            offset.x -= step;
        }
        if keys.just_pressed(self.pan_right) {
            offset.x += step;
        }
        if keys.just_pressed(self.pan_forward) {
            offset.y += step;
        }
        if keys.just_pressed(self.pan_back) {
            offset.y -= step;
        }
        offset
    }
}

/// Zoom and pan keys move the orbit camera.
#[allow(clippy::needless_pass_by_value)]
pub fn camera_keys_system(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    config: Res<DominoConfig>,
    mut cameras: Query<&mut OrbitCamera>,
) {
    let zoom_in = keys.any_just_pressed(bindings.zoom_in.iter().copied());
    let zoom_out = keys.any_just_pressed(bindings.zoom_out.iter().copied());
    let pan = bindings.pan_offset(&keys, config.camera.pan_step);
    if !zoom_in && !zoom_out && pan == Vec3::ZERO {
        return;
    }

    let factor = config.camera.zoom_factor;
    for mut camera in &mut cameras {
        if zoom_in {
            camera.zoom_in(factor);
        }
        if zoom_out {
            camera.zoom_out(factor);
        }
        camera.pan(pan);
    }
}

/// One-shot world commands: topple, reset and quit.
///
/// Quit releases the physics world before asking the app to exit, so nothing
/// steps it in between.
#[allow(clippy::needless_pass_by_value)]
pub fn world_commands_system(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut world: ResMut<PhysicsWorld>,
    mut phase: ResMut<SimPhase>,
    mut exit: MessageWriter<AppExit>,
) {
    if *phase == SimPhase::Terminated {
        return;
    }

    if keys.just_pressed(bindings.quit) {
        world.release();
        *phase = SimPhase::Terminated;
        info!("Quit requested, physics world released");
        exit.write(AppExit::Success);
        return;
    }

    if keys.just_pressed(bindings.topple) {
        info!("Toppling tile 0");
        world.topple();
    }
    if keys.just_pressed(bindings.reset) {
        info!("Resetting tiles");
        world.reset();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
