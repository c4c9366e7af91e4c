//! Shadow Maze - Entry Point
//!
//! Terminal front end: generates a maze, prints a text view of each
//! snapshot and reads one movement intent per line.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use shadow_maze::agents::HunterState;
use shadow_maze::core::constants::{DEFAULT_MAZE_HEIGHT, DEFAULT_MAZE_WIDTH};
use shadow_maze::core::error::Result;
use shadow_maze::maze::random_seed;
use shadow_maze::{Direction, MoveResult, Outcome, Simulation, SimulationConfig, Snapshot};

/// Sneak through a generated maze to the finish
#[derive(Parser, Debug)]
#[command(name = "shadow_maze")]
#[command(about = "Reach the finish without waking the hunters")]
struct Args {
    /// Maze width in cells (odd, at least 3)
    #[arg(long, default_value_t = DEFAULT_MAZE_WIDTH)]
    width: usize,

    /// Maze height in cells (odd, at least 3)
    #[arg(long, default_value_t = DEFAULT_MAZE_HEIGHT)]
    height: usize,

    /// Random seed for a reproducible maze
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file overriding the simulation settings
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shadow_maze=info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimulationConfig::load_from_toml(path)?,
        None => SimulationConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(random_seed);
    let mut sim = Simulation::new(args.width, args.height, seed, config)?;

    tracing::info!("Shadow Maze starting (seed {})", seed);

    println!("\n=== SHADOW MAZE ===");
    println!("Reach F without getting caught. Every step makes noise.");
    println!();
    println!("  w/a/s/d   - Move up/left/down/right");
    println!("  t / enter - Wait in place");
    println!("  q         - Quit");
    println!("  @ you, p pawn, H hunter, ! hunter on your trail, ~ your noise");

    let started = Instant::now();
    let stdin = io::stdin();

    loop {
        draw(&sim.snapshot());
        if sim.is_terminal() {
            break;
        }

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input == "q" || input == "quit" {
            break;
        }

        if !(input.is_empty() || input == "t") {
            match Direction::from_key(input) {
                Some(direction) => match sim.handle_input(direction) {
                    MoveResult::Blocked(reason) => println!("{}", reason),
                    MoveResult::CaughtByAgent => println!("You walked straight into a guard."),
                    _ => {}
                },
                None => println!("Unknown command. Use w/a/s/d, t or q."),
            }
        }

        sim.tick(started.elapsed().as_millis() as u64);

        for event in sim.drain_events() {
            tracing::debug!("[{}ms] {:?}", event.at, event.kind);
        }
    }

    match sim.outcome() {
        Outcome::Won => println!("\nYou slipped out through the finish. Well done!"),
        Outcome::Lost => println!("\nCaught! Better luck next time."),
        Outcome::Running => println!("\nGoodbye!"),
    }
    Ok(())
}

fn draw(snapshot: &Snapshot) {
    println!();
    for row in snapshot.render_rows() {
        println!("{}", row);
    }
    let chasing = snapshot
        .agents
        .iter()
        .filter(|a| matches!(a.hunter_state, Some(HunterState::Alerted | HunterState::Pursuing)))
        .count();
    println!(
        "Noise: {}  Hunters on your trail: {}  Time: {}ms",
        snapshot.noise_level, chasing, snapshot.at
    );
}
