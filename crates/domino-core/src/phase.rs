//! Program lifecycle state machine.
//!
//! `Uninitialized → Running → Terminated`. There is no pause or resume.

use bevy::prelude::*;

/// Lifecycle phase of the simulation.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SimPhase {
    /// App built, no timer tick has fired yet.
    #[default]
    Uninitialized,
    /// At least one physics step has run.
    Running,
    /// Quit requested; the physics world has been released.
    Terminated,
}

impl SimPhase {
    /// Human-readable label for logs.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Uninitialized => "Uninitialized",
            Self::Running => "Running",
            Self::Terminated => "Terminated",
        }
    }

    /// Whether the physics step may still run.
    pub const fn can_step(self) -> bool {
        !matches!(self, Self::Terminated)
    }

    /// Transition taken when a timer tick fires.
    #[must_use]
    pub const fn on_tick(self) -> Self {
        match self {
            Self::Uninitialized | Self::Running => Self::Running,
            Self::Terminated => Self::Terminated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_uninitialized() {
        assert_eq!(SimPhase::default(), SimPhase::Uninitialized);
    }

    #[test]
    fn first_tick_enters_running() {
        let phase = SimPhase::Uninitialized.on_tick();
        assert_eq!(phase, SimPhase::Running);
        assert_eq!(phase.on_tick(), SimPhase::Running);
    }

    #[test]
    fn terminated_is_absorbing() {
        assert_eq!(SimPhase::Terminated.on_tick(), SimPhase::Terminated);
        assert!(!SimPhase::Terminated.can_step());
        assert!(SimPhase::Uninitialized.can_step());
    }

    #[test]
    fn labels() {
        assert_eq!(SimPhase::Running.label(), "Running");
        assert_eq!(SimPhase::Terminated.label(), "Terminated");
    }
}
