//! The main physics plugin that delegates to a concrete backend.

use bevy::app::{App, Plugin};

use crate::backend::PhysicsBackend;

/// Bevy plugin that wires a [`PhysicsBackend`] into the app.
///
/// # Usage
///
/// ```ignore
/// app.insert_resource(DominoConfig::default())
///     .add_plugins(DominoCorePlugin)
///     .add_plugins(DominoPhysicsPlugin::new(RapierBackend));
/// ```
///
/// The plugin delegates all setup to the backend's [`build`](PhysicsBackend::build)
/// method, which inserts the [`PhysicsWorld`](crate::systems::PhysicsWorld)
/// and registers the step system in
/// [`DominoSet::Simulate`](domino_core::DominoSet::Simulate).
pub struct DominoPhysicsPlugin {
    backend: Box<dyn PhysicsBackend>,
}

impl DominoPhysicsPlugin {
    /// Create a new physics plugin with the given backend.
    pub fn new(backend: impl PhysicsBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// The name of the active physics backend.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }
}

impl Plugin for DominoPhysicsPlugin {
    fn build(&self, app: &mut App) {
        self.backend.build(app);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
