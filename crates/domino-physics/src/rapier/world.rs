//! [`RapierTileWorld`]: the domino row built in a [`RapierContext`].

use bevy::log::{debug, warn};
use bevy::prelude::{Quat, Vec3};
use rapier3d::prelude::{ColliderBuilder, RigidBodyBuilder, RigidBodyHandle};

use domino_core::config::DominoConfig;
use domino_core::error::{ConfigError, SimError};
use domino_core::types::{GROUND_SIZE, StepReport, TILE_COUNT, TilePose};

use crate::backend::TileWorld;

use super::context::RapierContext;
use super::relay::RELAY_HOOKS;

/// Half thickness of the ground slab. Thick enough that CCD never lets a
/// falling tile tunnel through.
const GROUND_HALF_THICKNESS: f32 = 0.5;

// ---------------------------------------------------------------------------
// RapierTileWorld
// ---------------------------------------------------------------------------

/// `TILE_COUNT` box tiles on a static ground slab.
///
/// Tile `i` starts upright at `origin + i * spacing * axis`. Handles are
/// stored in tile order, so every index lookup is O(1).
pub struct RapierTileWorld {
    /// `None` once released.
    context: Option<RapierContext>,
    tiles: Vec<RigidBodyHandle>,
    initial: Vec<TilePose>,
    /// Poses at the moment of release, served by `body_pose` afterwards.
    frozen: Vec<TilePose>,
    tile_height: f32,
    topple_impulse: Vec3,
}

impl RapierTileWorld {
    /// Validate `config` and build the world.
    pub fn new(config: &DominoConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut context = RapierContext::new(&config.sim, &config.surface);

        let ground_collider = ColliderBuilder::cuboid(
            GROUND_SIZE * 0.5,
            GROUND_SIZE * 0.5,
            GROUND_HALF_THICKNESS,
        )
        .translation(Vec3::new(0.0, 0.0, -GROUND_HALF_THICKNESS))
        .active_hooks(RELAY_HOOKS)
        .build();
        context.collider_set.insert(ground_collider);

        let half = config.tiles.half_extents();
        let dt = config.sim.dt();
        let mut tiles = Vec::with_capacity(TILE_COUNT);
        let mut initial = Vec::with_capacity(TILE_COUNT);

        for index in 0..TILE_COUNT {
            let position = config.tiles.layout_position(index);

            let mut body = RigidBodyBuilder::dynamic()
                .translation(position)
                .linear_damping(config.tiles.linear_damping)
                .ccd_enabled(true)
                .can_sleep(config.sleep.enabled)
                .build();
            if config.sleep.enabled {
                let activation = body.activation_mut();
                activation.normalized_linear_threshold = config.sleep.linear_threshold;
                activation.angular_threshold = config.sleep.angular_threshold;
                activation.time_until_sleep = config.sleep.time_until_sleep(dt);
            }
            let handle = context.rigid_body_set.insert(body);

            let collider = ColliderBuilder::cuboid(half.x, half.y, half.z)
                .mass(config.tiles.mass)
                .active_hooks(RELAY_HOOKS)
                .build();
            context.collider_set.insert_with_parent(
                collider,
                handle,
                &mut context.rigid_body_set,
            );

            tiles.push(handle);
            initial.push(TilePose::upright(position));
        }

        debug!(
            "Built domino world: {} tiles, spacing {} m, dt {} s",
            TILE_COUNT, config.tiles.spacing, dt
        );

        Ok(Self {
            context: Some(context),
            tiles,
            initial,
            frozen: Vec::new(),
            tile_height: config.tiles.extents[2],
            topple_impulse: config.tiles.topple_impulse(),
        })
    }

    /// Pose of tile `index`, or the reason it cannot be read.
    pub fn try_body_pose(&self, index: usize) -> Result<TilePose, SimError> {
        let handle = self.handle(index)?;
        let Some(context) = &self.context else {
            return self
                .frozen
                .get(index)
                .copied()
                .ok_or(SimError::WorldReleased);
        };
        let pose = context.rigid_body_set[handle].position();
        Ok(TilePose::new(pose.translation, pose.rotation))
    }

    /// Wake tile `index` and apply a linear impulse at its centre of mass.
    pub fn try_apply_impulse(&mut self, index: usize, impulse: Vec3) -> Result<(), SimError> {
        self.try_apply_impulse_with_torque(index, impulse, Vec3::ZERO)
    }

    fn try_apply_impulse_with_torque(
        &mut self,
        index: usize,
        impulse: Vec3,
        torque_impulse: Vec3,
    ) -> Result<(), SimError> {
        let handle = self.handle(index)?;
        let context = self.context.as_mut().ok_or(SimError::WorldReleased)?;
        let body = &mut context.rigid_body_set[handle];
        body.wake_up(true);
        body.apply_impulse(impulse, true);
        if torque_impulse != Vec3::ZERO {
            body.apply_torque_impulse(torque_impulse, true);
        }
        Ok(())
    }

    fn handle(&self, index: usize) -> Result<RigidBodyHandle, SimError> {
        self.tiles
            .get(index)
            .copied()
            .ok_or(self.out_of_range(index))
    }

    const fn out_of_range(&self, index: usize) -> SimError {
        SimError::TileOutOfRange {
            index,
            count: TILE_COUNT,
        }
    }
}

/// Index errors are caller bugs; a released world only warns.
fn expect_index<T: Default>(result: Result<T, SimError>) -> T {
    match result {
        Ok(value) => value,
        Err(err @ SimError::TileOutOfRange { .. }) => panic!("{err}"),
        Err(err @ SimError::WorldReleased) => {
            warn!("{err}");
            T::default()
        }
    }
}

impl TileWorld for RapierTileWorld {
    fn step(&mut self, dt: f32) -> StepReport {
        self.context
            .as_mut()
            .map_or_else(StepReport::default, |context| context.step(dt))
    }

    fn apply_impulse(&mut self, index: usize, impulse: Vec3) {
        expect_index(self.try_apply_impulse(index, impulse));
    }

    fn topple(&mut self) {
        if self.context.is_none() {
            return;
        }
        let orientation = self.try_body_pose(0).map_or(Quat::IDENTITY, |p| p.orientation);
        // Lever arm from the centre of mass to the top face.
        let lever = orientation * Vec3::new(0.0, 0.0, self.tile_height * 0.5);
        let impulse = self.topple_impulse;
        expect_index(self.try_apply_impulse_with_torque(0, impulse, lever.cross(impulse)));
    }

    fn body_pose(&self, index: usize) -> TilePose {
        match self.try_body_pose(index) {
            Ok(pose) => pose,
            Err(err) => panic!("{err}"),
        }
    }

    fn is_sleeping(&self, index: usize) -> bool {
        let handle = match self.handle(index) {
            Ok(handle) => handle,
            Err(err) => panic!("{err}"),
        };
        self.context
            .as_ref()
            .is_none_or(|context| context.rigid_body_set[handle].is_sleeping())
    }

    fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    fn reset(&mut self) {
        let Some(context) = self.context.as_mut() else {
            return;
        };
        for (&handle, pose) in self.tiles.iter().zip(&self.initial) {
            let body = &mut context.rigid_body_set[handle];
            body.set_translation(pose.position, true);
            body.set_rotation(pose.orientation, true);
            body.set_linvel(Vec3::ZERO, true);
            body.set_angvel(Vec3::ZERO, true);
            body.wake_up(true);
        }
        context.relay.drain();
    }

    fn release(&mut self) {
        if self.context.is_none() {
            return;
        }
        self.frozen = (0..self.tiles.len())
            .filter_map(|index| self.try_body_pose(index).ok())
            .collect();
        self.context = None;
        debug!("Released domino world");
    }

    fn is_released(&self) -> bool {
        self.context.is_none()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
