//! Headless Stealth Runner
//!
//! Plays a scripted player through a generated maze (shortest path to the
//! finish, one step every few ticks) and prints a JSON summary.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use shadow_maze::core::constants::{DEFAULT_MAZE_HEIGHT, DEFAULT_MAZE_WIDTH};
use shadow_maze::core::error::Result;
use shadow_maze::maze::{find_path, random_seed};
use shadow_maze::simulation::SimEventKind;
use shadow_maze::{Direction, MoveResult, Position, Simulation, SimulationConfig};

/// Headless Stealth Runner - scripted runs for tuning
#[derive(Parser, Debug)]
#[command(name = "stealth_runner")]
#[command(about = "Run a scripted player through a maze and report the result")]
struct Args {
    #[arg(long, default_value_t = DEFAULT_MAZE_WIDTH)]
    width: usize,

    #[arg(long, default_value_t = DEFAULT_MAZE_HEIGHT)]
    height: usize,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file overriding the simulation settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum ticks before giving up
    #[arg(long, default_value_t = 2000)]
    max_ticks: u64,

    /// Simulated milliseconds per tick
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,

    /// The player moves once every this many ticks
    #[arg(long, default_value_t = 3)]
    move_every: u64,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Print every simulation event to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Serialize, Debug, Default)]
struct RunSummary {
    outcome: String,
    ticks: u64,
    elapsed_ms: u64,
    moves: u32,
    waits: u32,
    alerts: u32,
    hunter_disengages: u32,
    peak_noise: u32,
    seed: u64,
    width: usize,
    height: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shadow_maze=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => SimulationConfig::load_from_toml(path)?,
        None => SimulationConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(random_seed);
    let mut sim = Simulation::new(args.width, args.height, seed, config)?;

    let mut summary = RunSummary {
        seed,
        width: args.width,
        height: args.height,
        ..RunSummary::default()
    };
    let move_every = args.move_every.max(1);

    for tick in 1..=args.max_ticks {
        summary.ticks = tick;
        let now = tick * args.tick_ms;

        if tick % move_every == 0 {
            match next_step(&sim) {
                Some(direction) => {
                    if let MoveResult::Moved | MoveResult::ReachedFinish = sim.handle_input(direction) {
                        summary.moves += 1;
                    }
                }
                None => summary.waits += 1,
            }
        }

        if !sim.is_terminal() {
            sim.tick(now);
        }
        summary.elapsed_ms = sim.clock();
        summary.peak_noise = summary.peak_noise.max(sim.noise().level());

        for event in sim.drain_events() {
            if args.verbose {
                eprintln!("  [{}ms] {:?}", event.at, event.kind);
            }
            match event.kind {
                SimEventKind::AlertRaised { .. } => summary.alerts += 1,
                SimEventKind::HunterDisengaged { .. } => summary.hunter_disengages += 1,
                _ => {}
            }
        }

        if sim.is_terminal() {
            break;
        }
    }

    summary.outcome = format!("{:?}", sim.outcome());

    match args.format.as_str() {
        "text" => {
            println!("Stealth Run");
            println!("===========");
            println!("Outcome: {}", summary.outcome);
            println!("Ticks: {} ({}ms)", summary.ticks, summary.elapsed_ms);
            println!("Moves: {}  Waits: {}", summary.moves, summary.waits);
            println!("Alerts: {}  Disengages: {}", summary.alerts, summary.hunter_disengages);
            println!("Peak noise: {}", summary.peak_noise);
            println!("Seed: {}", summary.seed);
        }
        format => {
            if format != "json" {
                eprintln!("Unknown format '{}', defaulting to json", format);
            }
            match serde_json::to_string_pretty(&summary) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("Failed to encode summary: {}", e),
            }
        }
    }

    Ok(())
}

/// First step of the shortest path to the finish, unless an agent stands on it
fn next_step(sim: &Simulation) -> Option<Direction> {
    let finish = sim.grid().finish()?;
    let path = find_path(sim.grid(), sim.player(), finish);
    let next: Position = *path.first()?;
    if sim.is_blocked(next) {
        return None;
    }
    Direction::ALL
        .iter()
        .copied()
        .find(|d| sim.player().step(*d) == next)
}
