//! Shared test fixtures and utilities for the domino crates.
//!
//! Provides a recording [`MockTileWorld`](mocks::MockTileWorld) and helpers
//! for building Bevy test apps around either the mock or the real rapier
//! backend.

pub mod app;
pub mod mocks;

// ---------------------------------------------------------------------------
// Re-exports for convenience
// ---------------------------------------------------------------------------

pub use app::{minimal_test_app, mock_world_app, rapier_test_app};
pub use mocks::{MockLog, MockProbe, MockTileWorld};
