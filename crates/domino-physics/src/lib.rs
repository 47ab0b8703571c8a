// domino-physics: Physics layer for the domino simulation.
//
// `TileWorld` is the engine-agnostic surface the rest of the program drives;
// `rapier` implements it on raw rapier3d, including the contact relay hooked
// into the narrow phase. The plugin delegates all setup to the chosen backend.

pub mod backend;
pub mod components;
pub mod plugin;
pub mod rapier;
pub mod systems;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        backend::{PhysicsBackend, TileWorld},
        components::{GroundPlane, Tile},
        plugin::DominoPhysicsPlugin,
        rapier::{RapierBackend, RapierTileWorld},
        systems::{PhysicsWorld, StepStats},
    };
}

// Re-export the plugin at crate root for convenience.
pub use plugin::DominoPhysicsPlugin;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
