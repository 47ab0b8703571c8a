//! Mock implementations of the physics traits for testing.
//!
//! [`MockTileWorld`] never simulates anything. It records every call into a
//! shared [`MockLog`] that the test keeps a [`MockProbe`] to, so assertions
//! still work after the world has been boxed into a resource.

use std::sync::{Arc, Mutex, MutexGuard};

use bevy::prelude::*;
use domino_core::config::TileConfig;
use domino_core::types::{StepReport, TILE_COUNT, TilePose};
use domino_physics::backend::TileWorld;

// ---------------------------------------------------------------------------
// MockLog
// ---------------------------------------------------------------------------

/// Everything a [`MockTileWorld`] was asked to do.
#[derive(Debug, Clone, Default)]
pub struct MockLog {
    pub steps: Vec<f32>,
    pub impulses: Vec<(usize, Vec3)>,
    pub topples: usize,
    pub resets: usize,
    pub released: bool,
    pub poses: Vec<TilePose>,
    /// Returned from every `step` call.
    pub report: StepReport,
}

// ---------------------------------------------------------------------------
// MockProbe
// ---------------------------------------------------------------------------

/// Test-side handle onto a [`MockTileWorld`]'s log.
#[derive(Debug, Clone)]
pub struct MockProbe(Arc<Mutex<MockLog>>);

impl MockProbe {
    pub fn log(&self) -> MutexGuard<'_, MockLog> {
        self.0.lock().expect("mock log poisoned")
    }

    pub fn is_released(&self) -> bool {
        self.log().released
    }

    pub fn step_count(&self) -> usize {
        self.log().steps.len()
    }

    /// Overwrite the pose `body_pose(index)` returns.
    pub fn set_pose(&self, index: usize, pose: TilePose) {
        self.log().poses[index] = pose;
    }
}

// ---------------------------------------------------------------------------
// MockTileWorld
// ---------------------------------------------------------------------------

/// A [`TileWorld`] that records calls instead of simulating.
///
/// Poses start at the layout of the given [`TileConfig`] and only change
/// through [`MockProbe::set_pose`].
pub struct MockTileWorld {
    log: Arc<Mutex<MockLog>>,
}

impl MockTileWorld {
    pub fn new(tiles: &TileConfig) -> (Self, MockProbe) {
        let log = MockLog {
            poses: (0..TILE_COUNT)
                .map(|i| TilePose::upright(tiles.layout_position(i)))
                .collect(),
            ..MockLog::default()
        };
        let log = Arc::new(Mutex::new(log));
        (Self { log: log.clone() }, MockProbe(log))
    }

    fn log(&self) -> MutexGuard<'_, MockLog> {
        self.log.lock().expect("mock log poisoned")
    }

    fn check(index: usize) {
        assert!(
            index < TILE_COUNT,
            "Tile index {index} out of range (tile count {TILE_COUNT})"
        );
    }
}

impl TileWorld for MockTileWorld {
    fn step(&mut self, dt: f32) -> StepReport {
        let mut log = self.log();
        if log.released {
            return StepReport::default();
        }
        log.steps.push(dt);
        log.report
    }

    fn apply_impulse(&mut self, index: usize, impulse: Vec3) {
        Self::check(index);
        self.log().impulses.push((index, impulse));
    }

    fn topple(&mut self) {
        let mut log = self.log();
        if !log.released {
            log.topples += 1;
        }
    }

    fn body_pose(&self, index: usize) -> TilePose {
        Self::check(index);
        self.log().poses[index]
    }

    fn is_sleeping(&self, index: usize) -> bool {
        Self::check(index);
        self.log().released
    }

    fn tile_count(&self) -> usize {
        TILE_COUNT
    }

    fn reset(&mut self) {
        let mut log = self.log();
        if !log.released {
            log.resets += 1;
        }
    }

    fn release(&mut self) {
        self.log().released = true;
    }

    fn is_released(&self) -> bool {
        self.log().released
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
