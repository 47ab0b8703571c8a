//! Frame loop driver: the resources and system that step the world.
//!
//! [`step_world_system`] runs in
//! [`DominoSet::Simulate`](domino_core::DominoSet::Simulate). Each frame it
//! feeds the real-time delta to the [`StepTimer`]; when the timer fires it
//! performs exactly one fixed `dt` step, advances [`SimTime`] and records
//! what the contact relay saw.

use bevy::prelude::*;

use domino_core::config::DominoConfig;
use domino_core::phase::SimPhase;
use domino_core::time::{SimTime, StepTimer};
use domino_core::types::StepReport;

use crate::backend::TileWorld;

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// The active tile world, behind the engine-agnostic trait.
#[derive(Resource, Deref, DerefMut)]
pub struct PhysicsWorld(pub Box<dyn TileWorld>);

impl PhysicsWorld {
    pub fn new(world: impl TileWorld) -> Self {
        Self(Box::new(world))
    }

    /// Number of tiles currently tilted past
    /// [`FALLEN_TILT`](domino_core::types::FALLEN_TILT).
    pub fn fallen_count(&self) -> usize {
        (0..self.tile_count())
            .filter(|&index| self.body_pose(index).is_fallen())
            .count()
    }
}

// ---------------------------------------------------------------------------
// StepStats
// ---------------------------------------------------------------------------

/// Running totals over all steps taken so far.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct StepStats {
    pub steps: u64,
    pub last: StepReport,
    pub peak_contacts: usize,
}

impl StepStats {
    pub fn record(&mut self, report: StepReport) {
        self.steps += 1;
        self.last = report;
        self.peak_contacts = self.peak_contacts.max(report.contacts);
    }
}

// ---------------------------------------------------------------------------
// step_world_system
// ---------------------------------------------------------------------------

/// Tick the step timer and, when it fires, advance the world by one `dt`.
#[allow(clippy::needless_pass_by_value)]
pub fn step_world_system(
    time: Res<Time<Real>>,
    config: Res<DominoConfig>,
    mut timer: ResMut<StepTimer>,
    mut sim_time: ResMut<SimTime>,
    mut phase: ResMut<SimPhase>,
    mut world: ResMut<PhysicsWorld>,
    mut stats: ResMut<StepStats>,
) {
    if !phase.can_step() {
        return;
    }

    timer.tick(time.delta());
    if !timer.should_step() {
        return;
    }

    if world.is_released() {
        return;
    }

    let report = world.step(config.sim.dt());
    sim_time.advance_secs(config.sim.physics_dt);
    stats.record(report);

    let next = phase.on_tick();
    if next != *phase {
        info!("Simulation {} -> {}", phase.label(), next.label());
        *phase = next;
    }
}
