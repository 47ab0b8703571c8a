//! [`RapierBackend`]: concrete physics backend using raw `rapier3d`.

use bevy::prelude::*;

use domino_core::DominoSet;
use domino_core::config::DominoConfig;
use domino_core::phase::SimPhase;
use domino_core::time::{SimTime, StepTimer};

use crate::backend::{PhysicsBackend, TileWorld};
use crate::systems::{PhysicsWorld, StepStats, step_world_system};

use super::world::RapierTileWorld;

/// Shared setup: build the tile world from the app's [`DominoConfig`].
///
/// The config is expected to have been validated on load; an invalid one
/// here is a startup bug.
fn insert_tile_world(app: &mut App) {
    let config = app
        .world_mut()
        .get_resource_or_insert_with(DominoConfig::default)
        .clone();

    let world = match RapierTileWorld::new(&config) {
        Ok(world) => world,
        Err(err) => panic!("Invalid domino configuration: {err}"),
    };
    info!(
        "rapier3d world ready: {} tiles at {:.0} Hz",
        world.tile_count(),
        config.sim.physics_hz()
    );

    if !app.world().contains_resource::<StepTimer>() {
        app.insert_resource(StepTimer::new(config.sim.physics_dt));
    }
    app.insert_resource(PhysicsWorld::new(world))
        .init_resource::<StepStats>()
        .init_resource::<SimTime>()
        .init_resource::<SimPhase>()
        .init_resource::<Time<Real>>();
}

/// Raw rapier3d physics backend.
///
/// Inserts a [`PhysicsWorld`] holding a [`RapierTileWorld`] and registers
/// [`step_world_system`] in [`DominoSet::Simulate`] on the `Update` schedule.
/// Reads everything from [`DominoConfig`]. A [`StepTimer`] inserted before
/// the plugin is kept, which is how headless runs step on every update.
pub struct RapierBackend;

impl PhysicsBackend for RapierBackend {
    fn build(&self, app: &mut App) {
        insert_tile_world(app);
        app.add_systems(Update, step_world_system.in_set(DominoSet::Simulate));
    }

    fn name(&self) -> &str {
        "rapier3d"
    }
}
