//! Contact relay: the narrow-phase hook that shapes every contact manifold.
//!
//! Rapier calls [`PhysicsHooks::modify_solver_contacts`] once per colliding
//! manifold whose colliders opt in with
//! [`ActiveHooks::MODIFY_SOLVER_CONTACTS`]. The relay caps the number of
//! solver contacts per manifold and stamps the configured surface parameters
//! on each of them. Contacts against the ground collider have no second body;
//! rapier attaches them to the static environment on its own.
//!
//! Hooks only get `&self`, so the per-step tally lives in atomics and is
//! drained by [`RapierContext::step`](super::context::RapierContext::step).

use std::sync::atomic::{AtomicUsize, Ordering};

use rapier3d::prelude::{ActiveHooks, ContactModificationContext, PhysicsHooks};

use domino_core::config::SurfaceConfig;
use domino_core::types::StepReport;

/// Hook flags every domino collider carries.
pub const RELAY_HOOKS: ActiveHooks = ActiveHooks::MODIFY_SOLVER_CONTACTS;

#[derive(Debug)]
pub struct ContactRelay {
    friction: f32,
    restitution: f32,
    max_contacts: usize,
    pairs: AtomicUsize,
    contacts: AtomicUsize,
}

impl ContactRelay {
    pub fn new(surface: &SurfaceConfig) -> Self {
        Self {
            friction: surface.friction,
            restitution: surface.restitution,
            max_contacts: surface.max_contacts.max(1),
            pairs: AtomicUsize::new(0),
            contacts: AtomicUsize::new(0),
        }
    }

    pub const fn max_contacts(&self) -> usize {
        self.max_contacts
    }

    /// Take the tally accumulated since the last drain and zero it.
    pub fn drain(&self) -> StepReport {
        StepReport {
            contact_pairs: self.pairs.swap(0, Ordering::Relaxed),
            contacts: self.contacts.swap(0, Ordering::Relaxed),
        }
    }

    fn record(&self, kept: usize) {
        self.pairs.fetch_add(1, Ordering::Relaxed);
        self.contacts.fetch_add(kept, Ordering::Relaxed);
    }
}

impl PhysicsHooks for ContactRelay {
    fn modify_solver_contacts(&self, context: &mut ContactModificationContext) {
        context.solver_contacts.truncate(self.max_contacts);
        for contact in context.solver_contacts.iter_mut() {
            contact.friction = self.friction;
            contact.restitution = self.restitution;
        }
        self.record(context.solver_contacts.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_contact_cap_is_raised_to_one() {
        let relay = ContactRelay::new(&SurfaceConfig {
            max_contacts: 0,
            ..SurfaceConfig::default()
        });
        assert_eq!(relay.max_contacts(), 1);
    }

    #[test]
    fn drain_resets_the_tally() {
        let relay = ContactRelay::new(&SurfaceConfig::default());
        relay.record(4);
        relay.record(2);
        assert_eq!(
            relay.drain(),
            StepReport {
                contact_pairs: 2,
                contacts: 6
            }
        );
        assert_eq!(relay.drain(), StepReport::default());
    }
}
