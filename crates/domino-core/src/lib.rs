// domino-core: Config, errors, clocks, pose types and system ordering for the domino simulation.

pub mod config;
pub mod error;
pub mod phase;
pub mod time;
pub mod types;

use bevy::prelude::*;

use crate::phase::SimPhase;
use crate::time::{FrameClock, SimTime, tick_frame_clock};

// ---------------------------------------------------------------------------
// DominoSet
// ---------------------------------------------------------------------------

/// Per-frame system ordering.
///
/// Input is read before the physics step so a topple command lands in the
/// same frame; rendering reads the poses the step just produced.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DominoSet {
    /// Pointer and keyboard handling, camera updates, one-shot commands.
    Input,
    /// Fixed-rate physics step.
    Simulate,
    /// Copy poses and camera state into render transforms.
    Render,
}

// ---------------------------------------------------------------------------
// DominoCorePlugin
// ---------------------------------------------------------------------------

/// Registers [`DominoSet`] ordering on `Update` plus the shared clocks and
/// lifecycle state. [`FrameClock`] is ticked in `PreUpdate`, after bevy's
/// time update in `First`.
pub struct DominoCorePlugin;

impl Plugin for DominoCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimTime>()
            .init_resource::<FrameClock>()
            .init_resource::<SimPhase>()
            .init_resource::<Time<Real>>()
            .add_systems(PreUpdate, tick_frame_clock)
            .configure_sets(
                Update,
                (DominoSet::Input, DominoSet::Simulate, DominoSet::Render).chain(),
            );
    }
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        DominoCorePlugin, DominoSet,
        config::DominoConfig,
        error::{ConfigError, DominoError, SimError},
        phase::SimPhase,
        time::{FrameClock, SimTime, StepTimer, tick_frame_clock},
        types::{FALLEN_TILT, GROUND_SIZE, StepReport, TILE_COUNT, TilePose},
    };
}
