//! Interactive visualization for the domino simulation.
//!
//! `domino-viz` provides the windowed half of the program:
//! - Orbit camera driven by left-button drag and the zoom/pan keys
//! - One-shot keyboard commands (topple, reset, quit)
//! - Flat-colored boxes for the tiles, a white ground quad and one light
//!
//! # Usage
//!
//! ```no_run
//! use bevy::prelude::*;
//! use domino_core::DominoCorePlugin;
//! use domino_core::config::DominoConfig;
//! use domino_physics::DominoPhysicsPlugin;
//! use domino_physics::rapier::RapierBackend;
//! use domino_viz::DominoVizPlugin;
//!
//! App::new()
//!     .insert_resource(DominoConfig::default())
//!     .add_plugins(DefaultPlugins)
//!     .add_plugins(DominoCorePlugin)
//!     .add_plugins(DominoPhysicsPlugin::new(RapierBackend))
//!     .add_plugins(DominoVizPlugin)
//!     .run();
//! ```

pub mod camera;
pub mod config;
pub mod input;
pub mod plugin;
pub mod render;

pub use camera::OrbitCamera;
pub use config::VizConfig;
pub use input::KeyBindings;
pub use plugin::DominoVizPlugin;
