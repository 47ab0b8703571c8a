//! Rapier pipeline state for one domino world.

use bevy::prelude::Vec3;
use rapier3d::prelude::{
    CCDSolver, ColliderSet, DefaultBroadPhase, ImpulseJointSet, IntegrationParameters,
    IslandManager, MultibodyJointSet, NarrowPhase, PhysicsPipeline, RigidBodySet,
};

use domino_core::config::{SimConfig, SurfaceConfig};
use domino_core::types::StepReport;

use super::relay::ContactRelay;

// ---------------------------------------------------------------------------
// RapierContext
// ---------------------------------------------------------------------------

/// All rapier state for one world.
///
/// `PhysicsPipeline::step()` requires mutable access to every set
/// simultaneously, so they must all live together.
pub struct RapierContext {
    // -- Rapier sets --
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,

    // -- Pipeline objects --
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub ccd_solver: CCDSolver,

    // -- Parameters --
    pub integration_parameters: IntegrationParameters,
    pub gravity: Vec3,

    /// Narrow-phase hook tuning every contact the step produces.
    pub relay: ContactRelay,
}

impl RapierContext {
    /// Create an empty world with the solver parameters from `sim` and a
    /// contact relay configured from `surface`.
    pub fn new(sim: &SimConfig, surface: &SurfaceConfig) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = sim.dt();
        integration_parameters.contact_softness.natural_frequency = sim.contact_natural_frequency;
        integration_parameters.contact_softness.damping_ratio = sim.contact_damping_ratio;
        integration_parameters.normalized_allowed_linear_error = sim.allowed_linear_error;
        integration_parameters.normalized_max_corrective_velocity = sim.max_corrective_velocity;

        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            integration_parameters,
            gravity: sim.gravity(),
            relay: ContactRelay::new(surface),
        }
    }

    /// Run one physics step of `dt` seconds.
    ///
    /// Broad phase, the relay inside the narrow phase, then the solver. The
    /// relay's contact tally is drained before returning.
    pub fn step(&mut self, dt: f32) -> StepReport {
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            &self.relay,
            &(),
        );
        self.relay.drain()
    }
}
