//! Scene visuals: ground quad, light, one box per tile, pose sync.

use bevy::prelude::*;

use domino_core::config::DominoConfig;
use domino_core::types::GROUND_SIZE;
use domino_physics::components::{GroundPlane, Tile};
use domino_physics::systems::PhysicsWorld;

use crate::config::VizConfig;

/// Spawn the ground quad and the single point light. Ambient light is off.
#[allow(clippy::needless_pass_by_value)]
pub fn spawn_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    viz: Res<VizConfig>,
) {
    commands.spawn((
        GroundPlane,
        Mesh3d(meshes.add(Plane3d::new(Vec3::Z, Vec2::splat(GROUND_SIZE * 0.5)))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: viz.ground_color,
            ..default()
        })),
        Transform::IDENTITY,
    ));

    commands.spawn((
        PointLight {
            intensity: viz.light_intensity,
            range: viz.light_range,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(viz.light_position),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::BLACK,
        brightness: 0.0,
        ..default()
    });
}

/// Spawn one flat-colored box per tile, sharing a mesh and a material.
#[allow(clippy::needless_pass_by_value)]
pub fn spawn_tiles(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<DominoConfig>,
    viz: Res<VizConfig>,
    world: Res<PhysicsWorld>,
) {
    let [width, depth, height] = config.tiles.extents;
    let mesh = meshes.add(Cuboid::new(width, depth, height));
    let material = materials.add(StandardMaterial {
        base_color: viz.tile_color,
        ..default()
    });

    for index in 0..world.tile_count() {
        commands.spawn((
            Tile { index },
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            world.body_pose(index).to_transform(),
        ));
    }
}

/// Copy each tile's current pose into its render transform.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_tile_transforms(world: Res<PhysicsWorld>, mut tiles: Query<(&Tile, &mut Transform)>) {
    for (tile, mut transform) in &mut tiles {
        *transform = world.body_pose(tile.index).to_transform();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
