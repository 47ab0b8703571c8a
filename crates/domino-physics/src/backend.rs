//! Engine-agnostic physics traits.
//!
//! [`PhysicsBackend`] wires a concrete engine into the app; [`TileWorld`] is
//! the narrow surface the rest of the program drives a domino world through.
//! The rapier implementation lives in [`crate::rapier`]; tests substitute a
//! mock from `domino-test-utils`.

use bevy::app::App;

use domino_core::types::{StepReport, TilePose};

// ---------------------------------------------------------------------------
// PhysicsBackend
// ---------------------------------------------------------------------------

/// Trait that concrete physics engines must implement.
///
/// The backend is responsible for:
/// - Building a [`TileWorld`] from the app's
///   [`DominoConfig`](domino_core::config::DominoConfig) and inserting it as a
///   [`PhysicsWorld`](crate::systems::PhysicsWorld) resource
/// - Registering the step system in
///   [`DominoSet::Simulate`](domino_core::DominoSet::Simulate)
pub trait PhysicsBackend: Send + Sync + 'static {
    /// Called once during plugin build to insert engine-specific resources
    /// and register systems.
    fn build(&self, app: &mut App);

    /// Human-readable engine name (e.g., "rapier3d").
    fn name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// TileWorld
// ---------------------------------------------------------------------------

/// A world holding a fixed row of domino tiles resting on a static ground.
///
/// Tile indices run over `0..tile_count()`. Passing an index outside that
/// range to any method taking one is a caller bug and panics.
pub trait TileWorld: Send + Sync + 'static {
    /// Advance the world by exactly `dt` seconds and report the contacts the
    /// relay produced. The contact set is gone once this returns.
    ///
    /// Does nothing after [`release`](Self::release).
    fn step(&mut self, dt: f32) -> StepReport;

    /// Wake tile `index` if it is asleep and apply a linear impulse at its
    /// centre of mass.
    fn apply_impulse(&mut self, index: usize, impulse: bevy::math::Vec3);

    /// Push tile 0 over: a horizontal impulse at its top edge.
    fn topple(&mut self);

    /// Current pose of tile `index`.
    fn body_pose(&self, index: usize) -> TilePose;

    fn is_sleeping(&self, index: usize) -> bool;

    fn tile_count(&self) -> usize;

    /// Put every tile back at its initial pose with zero velocity.
    fn reset(&mut self);

    /// Drop all engine state. Later calls to [`step`](Self::step),
    /// [`topple`](Self::topple) and [`reset`](Self::reset) are no-ops.
    fn release(&mut self);

    fn is_released(&self) -> bool;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
