//! ECS markers tying render entities to physics bodies.

use bevy::prelude::*;

/// Visual for the tile at `index` in the physics world.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub index: usize,
}

/// Marker for the static ground visual.
#[derive(Component, Debug, Default)]
pub struct GroundPlane;
