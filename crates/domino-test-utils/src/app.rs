//! Bevy test app builders with various plugin combinations.

use bevy::prelude::*;
use domino_core::config::DominoConfig;
use domino_core::time::StepTimer;
use domino_core::{DominoCorePlugin, DominoSet};
use domino_physics::DominoPhysicsPlugin;
use domino_physics::rapier::RapierBackend;
use domino_physics::systems::{PhysicsWorld, StepStats, step_world_system};

use crate::mocks::{MockProbe, MockTileWorld};

/// Create a minimal test app with only the core plugin and a default config.
///
/// Provides `DominoSet` system ordering and core resources but no physics.
pub fn minimal_test_app() -> App {
    let mut app = App::new();
    app.insert_resource(DominoConfig::default());
    app.add_plugins(DominoCorePlugin);
    app.finish();
    app.cleanup();
    app
}

/// Core plugin plus a [`MockTileWorld`] stepped once per `app.update()`.
pub fn mock_world_app() -> (App, MockProbe) {
    let config = DominoConfig::default();
    let (world, probe) = MockTileWorld::new(&config.tiles);

    let mut app = App::new();
    app.insert_resource(config)
        .insert_resource(PhysicsWorld::new(world))
        .insert_resource(StepTimer::every_tick())
        .init_resource::<StepStats>()
        .init_resource::<Time<Real>>()
        .add_plugins(DominoCorePlugin)
        .add_systems(Update, step_world_system.in_set(DominoSet::Simulate));
    app.finish();
    app.cleanup();
    (app, probe)
}

/// Core plugin plus the real rapier backend, stepped once per `app.update()`.
pub fn rapier_test_app(config: DominoConfig) -> App {
    let mut app = App::new();
    app.insert_resource(config)
        .insert_resource(StepTimer::every_tick())
        .add_plugins(DominoCorePlugin)
        .add_plugins(DominoPhysicsPlugin::new(RapierBackend));
    app.finish();
    app.cleanup();
    app
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
