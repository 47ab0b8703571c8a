//! Integration test: the rapier domino row end to end.
//!
//! Builds the default world (60 tiles, SI units, 10 ms steps) and checks:
//! 1. The initial layout sits on the row axis with identity rotation
//! 2. An untouched row stays put under repeated steps
//! 3. Toppling tips tile 0 within two simulated seconds
//! 4. The chain reaction reaches the last tile
//! 5. Contact tallies are per-step and honour the per-pair cap
//! 6. Surface friction is applied per contact
//! 7. Reset and release behave

use bevy::prelude::Vec3;

use domino_core::config::DominoConfig;
use domino_core::types::{StepReport, TILE_COUNT};
use domino_physics::backend::TileWorld;
use domino_physics::rapier::RapierTileWorld;

const DT: f32 = 0.01;

fn build(config: &DominoConfig) -> RapierTileWorld {
    RapierTileWorld::new(config).expect("default config is valid")
}

/// Default config with looser sleep floors so resting tiles settle quickly.
fn sleepy_config() -> DominoConfig {
    let mut config = DominoConfig::default();
    config.sleep.linear_threshold = 0.05;
    config.sleep.angular_threshold = 0.05;
    config
}

fn run(world: &mut RapierTileWorld, steps: usize) -> Vec<StepReport> {
    (0..steps).map(|_| world.step(DT)).collect()
}

#[test]
fn initial_layout_is_on_axis() {
    let config = DominoConfig::default();
    let world = build(&config);

    for i in 0..TILE_COUNT {
        let pose = world.body_pose(i);
        let expected = config.tiles.layout_position(i);
        assert!(
            (pose.position - expected).length() < 1e-6,
            "tile {i}: {} != {expected}",
            pose.position
        );
        assert!(pose.rotation_angle() < 1e-6, "tile {i} starts rotated");
    }

    // Consecutive centres are exactly `spacing` apart along +X.
    let d = world.body_pose(1).position - world.body_pose(0).position;
    assert!((d - Vec3::X * config.tiles.spacing).length() < 1e-6);
}

#[test]
fn resting_row_stays_still() {
    let config = DominoConfig::default();
    let mut world = build(&config);
    run(&mut world, 300);

    for i in 0..TILE_COUNT {
        let pose = world.body_pose(i);
        let drift = (pose.position - config.tiles.layout_position(i)).length();
        assert!(drift < 1e-2, "tile {i} drifted {drift} m");
        assert!(pose.tilt() < 0.01, "tile {i} tilted {}", pose.tilt());
    }
}

#[test]
fn resting_row_falls_asleep() {
    let mut world = build(&sleepy_config());
    run(&mut world, 300);
    let asleep = (0..TILE_COUNT).filter(|&i| world.is_sleeping(i)).count();
    assert_eq!(asleep, TILE_COUNT);
}

#[test]
fn sleep_disabled_keeps_tiles_awake() {
    let mut config = DominoConfig::default();
    config.sleep.enabled = false;
    let mut world = build(&config);
    run(&mut world, 120);
    assert!((0..TILE_COUNT).all(|i| !world.is_sleeping(i)));
}

#[test]
fn topple_tips_first_tile() {
    let mut world = build(&DominoConfig::default());
    world.topple();
    run(&mut world, 200);

    let angle = world.body_pose(0).rotation_angle();
    eprintln!("tile 0 rotation after 2 s: {angle}");
    assert!(angle > 0.2, "tile 0 should have tipped: angle={angle}");
}

#[test]
fn topple_wakes_a_sleeping_tile() {
    let mut world = build(&sleepy_config());
    run(&mut world, 200);
    assert!(world.is_sleeping(0));

    world.topple();
    assert!(!world.is_sleeping(0));
    run(&mut world, 200);
    assert!(world.body_pose(0).tilt() > 0.2);
}

#[test]
fn chain_reaction_reaches_last_tile() {
    let mut world = build(&DominoConfig::default());
    world.topple();
    run(&mut world, 3000);

    let last = world.body_pose(TILE_COUNT - 1);
    let fallen = (0..TILE_COUNT)
        .filter(|&i| world.body_pose(i).is_fallen())
        .count();
    eprintln!("after 30 s: {fallen}/{TILE_COUNT} fallen, last tilt {}", last.tilt());
    assert!(last.tilt() > 0.2, "last tile still standing: tilt={}", last.tilt());
}

#[test]
fn step_reports_fresh_contacts() {
    let mut world = build(&DominoConfig::default());
    let reports = run(&mut world, 5);

    let last = reports[reports.len() - 1];
    assert!(last.contact_pairs > 0, "tiles rest on the ground");
    // Only tile-ground pairs exist at rest. A tally carried over from
    // earlier steps would exceed that.
    assert!(
        last.contact_pairs <= TILE_COUNT,
        "stale contacts: {last:?}"
    );
    let max = DominoConfig::default().surface.max_contacts;
    assert!(last.contacts <= last.contact_pairs * max);
}

#[test]
fn contact_cap_truncates_manifolds() {
    let mut config = DominoConfig::default();
    config.surface.max_contacts = 1;
    let mut world = build(&config);

    for report in run(&mut world, 5) {
        assert!(
            report.contacts <= report.contact_pairs,
            "more than one contact per pair: {report:?}"
        );
    }
}

/// Push tile 0 away from the row at its centre of mass and return its
/// (sideways travel, tilt) after half a second.
fn shove_first_tile(friction: f32) -> (f32, f32) {
    let mut config = DominoConfig::default();
    config.surface.friction = friction;
    let mut world = build(&config);
    world.apply_impulse(0, Vec3::new(-0.03, 0.0, 0.0));
    run(&mut world, 50);

    let pose = world.body_pose(0);
    let travel = config.tiles.layout_position(0).x - pose.position.x;
    (travel, pose.tilt())
}

#[test]
fn surface_friction_reaches_contacts() {
    // Collider friction stays at rapier's default. The relay stamps the
    // configured value on every contact, which decides slide versus pivot.
    let (slide_travel, slide_tilt) = shove_first_tile(0.0);
    let (grip_travel, grip_tilt) = shove_first_tile(1.0);
    eprintln!(
        "friction 0: travel {slide_travel} tilt {slide_tilt}; \
         friction 1: travel {grip_travel} tilt {grip_tilt}"
    );

    assert!(slide_travel > 0.1, "frictionless tile should slide: {slide_travel}");
    assert!(slide_tilt < 0.05, "frictionless tile should stay upright: {slide_tilt}");
    assert!(grip_tilt > 0.2, "gripping tile should pivot: {grip_tilt}");
}

#[test]
fn reset_restores_layout() {
    let config = DominoConfig::default();
    let mut world = build(&config);
    world.topple();
    run(&mut world, 150);
    assert!(world.body_pose(0).rotation_angle() > 0.05);

    world.reset();
    for i in 0..TILE_COUNT {
        let pose = world.body_pose(i);
        assert!((pose.position - config.tiles.layout_position(i)).length() < 1e-6);
        assert!(pose.rotation_angle() < 1e-6);
        assert!(!world.is_sleeping(i));
    }

    // The restored row is at rest again.
    run(&mut world, 100);
    assert!(world.body_pose(0).tilt() < 0.01);
}

#[test]
fn released_world_is_inert() {
    let mut world = build(&DominoConfig::default());
    world.topple();
    run(&mut world, 50);
    let before = world.body_pose(0);

    world.release();
    assert!(world.is_released());
    world.topple();
    let reports = run(&mut world, 50);
    assert!(reports.iter().all(|r| *r == StepReport::default()));
    assert_eq!(world.body_pose(0), before);
    assert_eq!(world.tile_count(), TILE_COUNT);
}
