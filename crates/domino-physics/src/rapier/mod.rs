//! Raw `rapier3d` physics backend.
//!
//! This module implements [`PhysicsBackend`](crate::backend::PhysicsBackend)
//! and [`TileWorld`](crate::backend::TileWorld) using the `rapier3d` crate
//! directly (not `bevy_rapier3d`). We own the
//! [`PhysicsPipeline`](rapier3d::pipeline::PhysicsPipeline), call `step()`
//! ourselves, and hook the narrow phase with our own contact relay.

pub mod backend;
pub mod context;
pub mod relay;
pub mod world;

pub use backend::RapierBackend;
pub use context::RapierContext;
pub use relay::ContactRelay;
pub use world::RapierTileWorld;
