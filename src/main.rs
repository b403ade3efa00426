//! Checkers-Rust: a checkers rules engine with a text front end.
//!
//! ## Usage
//!
//! - `checkers-rust` - Show a demo
//! - `checkers-rust play` - Read click commands from stdin
//! - `checkers-rust demo` - Play a short scripted sequence

use anyhow::Result;
use clap::{Parser, Subcommand};

use checkers_rust::board::Square;
use checkers_rust::constants::{MAX_TILE_SIZE, TILE_SIZE};
use checkers_rust::game::{ChainRule, ClickOutcome, GameState, Rules, click};
use checkers_rust::protocol::{ClickEngine, NO_MOVES_MESSAGE};
use checkers_rust::render::{Layout, frame};

/// Checkers-Rust: a checkers rules engine
#[derive(Parser)]
#[command(name = "checkers-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Edge length of a board cell in pixels, used to map clicks to squares
    #[arg(
        long,
        default_value_t = TILE_SIZE,
        global = true,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_TILE_SIZE))
    )]
    tile_size: u32,

    /// Offer only further captures while a jump chain continues
    #[arg(long, global = true)]
    jumps_only_chains: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Read commands (click, select, showboard, ...) from stdin
    Play,
    /// Play a short scripted opening with a capture
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let rules = Rules {
        chain: if cli.jumps_only_chains {
            ChainRule::JumpsOnly
        } else {
            ChainRule::AnyMove
        },
    };

    match cli.command {
        Some(Commands::Play) => {
            let mut engine = ClickEngine::with_options(Layout::new(cli.tile_size), rules);
            engine.run()?;
        }
        Some(Commands::Demo) | None => run_demo(rules)?,
    }
    Ok(())
}

fn run_demo(rules: Rules) -> Result<()> {
    println!("Checkers-Rust: click-driven checkers engine\n");

    let mut state = GameState::with_rules(rules);
    println!("{}\n", frame(&state));

    // White c3-d4, Black f6-e5, White d4xf6, Black g7xe5.
    let script = ["c3", "d4", "f6", "e5", "d4", "f6", "g7", "e5"];
    for name in script {
        let sq: Square = name.parse()?;
        match click(&mut state, sq) {
            ClickOutcome::Selected { at, destinations } => {
                println!("select {at}: {destinations} destination(s)");
                println!("{}\n", frame(&state));
            }
            ClickOutcome::Moved { record, turn_over } => {
                let sep = if record.is_jump() { 'x' } else { '-' };
                println!("move {}{sep}{}", record.from, record.to);
                if !turn_over {
                    println!("capture chain continues");
                }
                println!("{}\n", frame(&state));
            }
            ClickOutcome::NoLegalMoves(_) => eprintln!("{NO_MOVES_MESSAGE}"),
            ClickOutcome::Ignored | ClickOutcome::Cancelled => {}
        }
    }
    Ok(())
}
