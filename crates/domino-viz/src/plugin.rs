//! The main visualization plugin.
//!
//! [`DominoVizPlugin`] adds the orbit camera, keyboard commands, the ground,
//! the light and one box per tile to a Bevy app.

use bevy::prelude::*;

use domino_core::DominoSet;

use crate::camera;
use crate::config::VizConfig;
use crate::input::{self, KeyBindings};
use crate::render;

/// Bevy plugin for the windowed domino scene.
///
/// Input systems run in [`DominoSet::Input`] and transform sync in
/// [`DominoSet::Render`], bracketing the physics step.
///
/// Expects [`DominoPhysicsPlugin`](domino_physics::DominoPhysicsPlugin) to be
/// added first so the tile world exists at startup.
pub struct DominoVizPlugin;

impl Plugin for DominoVizPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<VizConfig>()
            .init_resource::<KeyBindings>()
            .add_systems(
                Startup,
                (camera::spawn_camera, render::spawn_scene, render::spawn_tiles),
            )
            .add_systems(
                Update,
                (
                    camera::pointer_drag_system,
                    input::camera_keys_system,
                    input::world_commands_system,
                )
                    .in_set(DominoSet::Input),
            )
            .add_systems(
                Update,
                (render::sync_tile_transforms, camera::apply_camera_transform)
                    .in_set(DominoSet::Render),
            );
    }
}
