//! Throw House CLI
//!
//! Front end for the th_core engine: list the mode catalog, resolve raw
//! board coordinates, replay recorded sessions and export the JSON schemas.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use serde_json::Value;
use th_core::{Dartboard, JsonSession, RingTarget};

#[derive(Parser)]
#[command(name = "th_cli")]
#[command(about = "Target-throwing score keeper", long_about = None)]
#[command(version = th_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in game modes and their variants
    Modes,

    /// Resolve a board coordinate to its scoring zone
    Resolve {
        /// Which target to resolve against
        #[arg(long, value_enum, default_value = "ring")]
        board: Board,

        /// Horizontal position in the unit square (0.0 left, 1.0 right)
        #[arg(long)]
        x: f32,

        /// Vertical position in the unit square (0.0 top, 1.0 bottom)
        #[arg(long)]
        y: f32,

        /// Arm the killshot discs (ring board only)
        #[arg(long, default_value = "false")]
        killshots: bool,
    },

    /// Replay a recorded session script and print the outcome
    Replay {
        /// Input script JSON file
        #[arg(long)]
        script: PathBuf,

        /// Print every response instead of only rejections
        #[arg(long, default_value = "false")]
        verbose: bool,
    },

    /// Print one of the session JSON schemas
    Schema {
        /// Which schema to print
        #[arg(long, value_enum)]
        which: SchemaKind,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Board {
    Ring,
    Dartboard,
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemaKind {
    Request,
    Response,
}

/// A recorded session: one game setup plus the requests made against it.
#[derive(Debug, Deserialize)]
struct ReplayScript {
    setup: Value,
    actions: Vec<Value>,
}

/// What a replay ended with, for the summary line.
#[derive(Debug)]
struct ReplayOutcome {
    rejected: usize,
    status: String,
    result: Option<Value>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Modes => print_modes(),

        Commands::Resolve { board, x, y, killshots } => match board {
            Board::Ring => {
                let zone = RingTarget::standard().resolve_unit(x, y, killshots);
                println!("🎯 {} ({} points)", zone.label(), zone.points());
            }
            Board::Dartboard => {
                let hit = Dartboard::standard().resolve_unit(x, y);
                println!("🎯 {} ({} points)", hit.label(), hit.points());
            }
        },

        Commands::Replay { script, verbose } => {
            let text = std::fs::read_to_string(&script)
                .with_context(|| format!("reading {}", script.display()))?;
            let parsed: ReplayScript =
                serde_json::from_str(&text).context("parsing replay script")?;

            println!("🎮 Replaying {} actions...", parsed.actions.len());
            let outcome = run_replay(&parsed, verbose)?;

            println!(
                "\n✅ Replay finished: {} actions, {} rejected, status {}",
                parsed.actions.len(),
                outcome.rejected,
                outcome.status
            );
            if let Some(result) = outcome.result {
                println!("\n🏆 Result:\n{}", serde_json::to_string_pretty(&result)?);
            }
        }

        Commands::Schema { which } => {
            let schema = match which {
                SchemaKind::Request => th_core::request_schema(),
                SchemaKind::Response => th_core::response_schema(),
            };
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }

    Ok(())
}

fn print_modes() {
    let catalog = th_core::data::get_mode_catalog();
    println!("🎯 {} game modes\n", catalog.modes.len());
    for preset in &catalog.modes {
        let play = if preset.team_play { "solo or teams" } else { "solo" };
        println!(
            "  {:<16} at least {} player(s), {}",
            preset.name, preset.min_players, play
        );
        for variant in &preset.variants {
            println!("      variant: {}", variant.label);
        }
    }
}

/// Feed a script through a fresh session. The setup failing is an error;
/// rejected actions are counted and reported, not fatal.
fn run_replay(script: &ReplayScript, verbose: bool) -> Result<ReplayOutcome> {
    let mut session = JsonSession::new();

    let open = serde_json::json!({"op": "new_game", "setup": script.setup}).to_string();
    let response: Value = serde_json::from_str(&session.handle(&open))?;
    if response["ok"] != Value::Bool(true) {
        anyhow::bail!(
            "setup rejected: {}",
            response["error"].as_str().unwrap_or("unknown")
        );
    }

    let mut rejected = 0usize;
    for (index, action) in script.actions.iter().enumerate() {
        let response: Value = serde_json::from_str(&session.handle(&action.to_string()))?;
        let ok = response["ok"] == Value::Bool(true);
        if !ok {
            rejected += 1;
        }
        if verbose {
            println!("   [{:>3}] {}", index + 1, response);
        } else if !ok {
            println!(
                "   [{:>3}] rejected: {}",
                index + 1,
                response["error"].as_str().unwrap_or("unknown")
            );
        }
    }

    let state: Value = serde_json::from_str(&session.handle(r#"{"op":"get_state"}"#))?;
    let status = state["state"]["status"].as_str().unwrap_or("unknown").to_string();

    let result: Value = serde_json::from_str(&session.handle(r#"{"op":"get_result"}"#))?;
    let result = (result["ok"] == Value::Bool(true))
        .then(|| result.get("result").cloned())
        .flatten();

    Ok(ReplayOutcome { rejected, status, result })
}
