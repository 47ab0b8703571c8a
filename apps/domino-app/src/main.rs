//! Falling dominoes CLI.
//!
//! Provides three modes of operation:
//! - default / `run`: open the window and simulate interactively
//! - `headless`: step the world without a window and report how many tiles fell
//! - `config`: print the effective configuration as TOML

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use clap::{Parser, Subcommand};

use domino_core::prelude::*;
use domino_physics::DominoPhysicsPlugin;
use domino_physics::rapier::RapierBackend;
use domino_physics::systems::{PhysicsWorld, StepStats};
use domino_viz::DominoVizPlugin;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// A row of dominoes toppling under rapier3d, drawn with bevy.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// TOML configuration file. Missing fields take their defaults.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the window and simulate interactively.
    Run,

    /// Step without a window and print how many tiles fell.
    Headless {
        /// Number of physics steps to run.
        #[arg(short, long, default_value_t = 3000)]
        steps: u32,

        /// Leave the row untouched instead of toppling tile 0 first.
        #[arg(long)]
        no_topple: bool,
    },

    /// Print the effective configuration.
    Config,
}

// ---------------------------------------------------------------------------
// Mode implementations
// ---------------------------------------------------------------------------

fn load_config(path: Option<&Path>) -> Result<DominoConfig, ConfigError> {
    match path {
        Some(path) => DominoConfig::from_file(path),
        None => Ok(DominoConfig::default()),
    }
}

fn run_windowed(config: DominoConfig) -> AppExit {
    let [width, height] = config.window.size;
    let title = config.window.title.clone();

    let mut app = App::new();
    app.insert_resource(config)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title,
                resolution: (width, height).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(DominoCorePlugin)
        .add_plugins(DominoPhysicsPlugin::new(RapierBackend))
        .add_plugins(DominoVizPlugin);

    println!("Falling dominoes");
    println!("  Drag with the left mouse button to orbit");
    println!("  +/- zoom, a/d/w/s pan, p topple, r reset, Esc quit");
    app.run()
}

fn run_headless(config: DominoConfig, steps: u32, topple: bool) {
    let dt = config.sim.physics_dt;

    let mut app = App::new();
    app.add_plugins(bevy::log::LogPlugin::default())
        .insert_resource(config)
        .insert_resource(StepTimer::every_tick())
        .add_plugins(DominoCorePlugin)
        .add_plugins(DominoPhysicsPlugin::new(RapierBackend));
    app.finish();
    app.cleanup();

    if topple {
        app.world_mut().resource_mut::<PhysicsWorld>().topple();
    }
    for _ in 0..steps {
        app.update();
    }

    let world = app.world().resource::<PhysicsWorld>();
    let stats = app.world().resource::<StepStats>();
    let sim_time = app.world().resource::<SimTime>();
    println!(
        "steps={}, sim_time={sim_time}, dt={dt}s, peak_contacts={}",
        stats.steps, stats.peak_contacts
    );
    println!("fallen: {}/{}", world.fallen_count(), world.tile_count());
}

fn config_toml(config: &DominoConfig) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(config)?)
}

fn run_config(config: &DominoConfig) -> Result<(), ConfigError> {
    print!("{}", config_toml(config)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<(), DominoError> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Headless { steps, no_topple }) => run_headless(config, steps, !no_topple),
        Some(Commands::Config) => run_config(&config)?,
        Some(Commands::Run) | None => {
            if let AppExit::Error(code) = run_windowed(config) {
                std::process::exit(i32::from(code.get()));
            }
        }
    }
    Ok(())
}
