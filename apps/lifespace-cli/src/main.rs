use clap::{Args, Parser, Subcommand};
use lifespace_common::{LifeError, Pattern};
use lifespace_kernel::{SeedConfig, Seeder, World};
use lifespace_tools::WorldInspector;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lifespace-cli", about = "Sparse Game of Life simulator")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and the pattern catalog
    Info,
    /// Seed a world and advance it
    Run {
        #[command(flatten)]
        seed: SeedArgs,
        /// Start from a named pattern instead of random cells
        #[arg(short, long)]
        pattern: Option<String>,
        /// Number of generations to advance
        #[arg(short, long, default_value = "10")]
        generations: u64,
        /// Print every live cell after the run
        #[arg(long)]
        cells: bool,
        /// Print live cells as JSON instead of text
        #[arg(long, requires = "cells")]
        json: bool,
    },
    /// Run a seeded world, then rebuild it from its event log
    Replay {
        #[command(flatten)]
        seed: SeedArgs,
        /// Number of generations to advance
        #[arg(short, long, default_value = "10")]
        generations: u64,
    },
}

/// Random seeding options. The rectangle is `[x_min, x_max) x [y_min, y_max)`.
#[derive(Args, Debug, Clone)]
struct SeedArgs {
    /// Number of random cells to draw
    #[arg(short, long, default_value_t = 100, allow_negative_numbers = true)]
    count: i64,
    #[arg(long, default_value_t = -100, allow_negative_numbers = true)]
    x_min: i64,
    #[arg(long, default_value_t = 200, allow_negative_numbers = true)]
    x_max: i64,
    #[arg(long, default_value_t = -100, allow_negative_numbers = true)]
    y_min: i64,
    #[arg(long, default_value_t = 200, allow_negative_numbers = true)]
    y_max: i64,
    /// RNG seed for a reproducible world
    #[arg(short, long)]
    seed: Option<u64>,
}

impl SeedArgs {
    fn to_config(&self) -> Result<SeedConfig, LifeError> {
        let count = usize::try_from(self.count).map_err(|_| {
            LifeError::InvalidArgument(format!("count ({}) must not be negative", self.count))
        })?;
        let config = SeedConfig {
            count,
            x_min: self.x_min,
            x_max: self.x_max,
            y_min: self.y_min,
            y_max: self.y_max,
            seed: self.seed,
        };
        config.bounds()?;
        Ok(config)
    }
}

fn build_world(seed: &SeedArgs, pattern: Option<&str>) -> anyhow::Result<World> {
    if let Some(name) = pattern {
        let pattern = Pattern::by_name(name)?;
        tracing::info!(pattern = pattern.name, "seeding from pattern");
        return Ok(World::from_cells(pattern.cells()));
    }
    let config = seed.to_config()?;
    let mut world = World::new();
    Seeder::from_config(&config).populate_with(&mut world, &config)?;
    tracing::info!(
        requested = config.count,
        live = world.count(),
        "seeded random world"
    );
    Ok(world)
}

/// Advance a recording copy of a seeded world, then rebuild it from its log.
fn record_and_replay(seed: &SeedArgs, generations: u64) -> anyhow::Result<(World, World)> {
    let mut original = build_world(seed, None)?;
    original.set_recording(true);
    advance_for(&mut original, generations);
    let replayed = World::replay(original.events())?;
    Ok((original, replayed))
}

fn advance_for(world: &mut World, generations: u64) {
    for _ in 0..generations {
        world.advance();
        tracing::debug!("{}", WorldInspector::summary(world));
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose when set.
    let filter = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Info => {
            println!("lifespace-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("kernel: generation={}", World::new().generation());
            println!("tools: {}", lifespace_tools::crate_info());
            let names: Vec<&str> = Pattern::names().collect();
            println!("patterns: {}", names.join(", "));
        }
        Commands::Run {
            seed,
            pattern,
            generations,
            cells,
            json,
        } => {
            let mut world = build_world(&seed, pattern.as_deref())?;
            println!("Start: {}", WorldInspector::summary(&world));
            advance_for(&mut world, generations);
            println!("End:   {}", WorldInspector::summary(&world));

            if cells {
                let live = WorldInspector::list_cells(&world);
                if json {
                    println!("{}", serde_json::to_string_pretty(&live)?);
                } else {
                    for cell in live {
                        println!("{cell}");
                    }
                }
            }
        }
        Commands::Replay { seed, generations } => {
            println!("Deterministic replay: generations={generations}");

            let (original, replayed) = record_and_replay(&seed, generations)?;

            println!(
                "Run:    generation={}, live={}, hash={:#x}",
                original.generation(),
                original.count(),
                original.state_hash()
            );
            println!(
                "Replay: generation={}, live={}, hash={:#x}",
                replayed.generation(),
                replayed.count(),
                replayed.state_hash()
            );
            println!(
                "Match: {}",
                if original.state_hash() == replayed.state_hash() {
                    "OK"
                } else {
                    "MISMATCH"
                }
            );
        }
    }

    Ok(())
}
