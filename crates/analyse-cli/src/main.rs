//! chess-analyse - Convert recorded games and evaluate them with a UCI engine.
//!
//! Results go to stdout (JSON for `eval`); logs go to stderr and follow
//! `RUST_LOG` (default `info`).

use anyhow::Context;
use chess_analysis::store::{encode_scores, strip_move_numbers};
use chess_analysis::{EngineConfig, ProcessEngine};
use chess_engine::{convert_notation, uci_moves, Game};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chess-analyse")]
#[command(about = "Convert chess games and evaluate them with a UCI engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the long algebraic (or UCI) form of a game
    Convert {
        /// Moves in short algebraic notation
        moves: Vec<String>,
        /// Print UCI instead of long algebraic notation
        #[arg(long)]
        uci: bool,
        /// Input contains move numbers ("1 e4 e5 2 Nf3 ...")
        #[arg(long)]
        numbered: bool,
    },
    /// Print the board and every move available after the given moves
    Moves {
        /// Moves in short algebraic notation
        moves: Vec<String>,
    },
    /// Evaluate every position of a game and print the result as JSON
    Eval {
        #[command(flatten)]
        engine: EngineArgs,
        /// Moves in short algebraic notation
        moves: Vec<String>,
        /// Input contains move numbers ("1 e4 e5 2 Nf3 ...")
        #[arg(long)]
        numbered: bool,
    },
}

/// Engine settings; flags override the config file.
#[derive(Args)]
struct EngineArgs {
    /// TOML engine config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Engine executable
    #[arg(long)]
    engine: Option<PathBuf>,
    /// Maximum search depth per position
    #[arg(long)]
    depth: Option<u32>,
    /// Search time per position in milliseconds
    #[arg(long)]
    movetime: Option<u64>,
    /// Engine search threads
    #[arg(long)]
    threads: Option<u32>,
    /// Hash table size in MB
    #[arg(long)]
    hash: Option<u32>,
    /// Number of principal variations per position
    #[arg(long)]
    multipv: Option<u32>,
    /// Syzygy tablebase directories
    #[arg(long)]
    syzygy: Option<PathBuf>,
}

impl EngineArgs {
    fn resolve(self) -> anyhow::Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => EngineConfig::default(),
        };
        if let Some(path) = self.engine {
            config.path = path;
        }
        if let Some(depth) = self.depth {
            config.depth = depth;
        }
        if let Some(ms) = self.movetime {
            config.movetime_ms = ms;
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        if let Some(hash) = self.hash {
            config.hash_mb = hash;
        }
        if let Some(k) = self.multipv {
            config.multi_pv = k;
        }
        if self.syzygy.is_some() {
            config.syzygy_path = self.syzygy;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            moves,
            uci,
            numbered,
        } => {
            let moves = unnumbered(moves, numbered);
            let converted = if uci {
                uci_moves(&moves)?
            } else {
                convert_notation(&moves)?
            };
            println!("{}", converted.join(" "));
        }
        Commands::Moves { moves } => {
            let mut game = Game::new();
            game.make_moves(&moves)?;
            println!("{}", game.board());
            println!("{} to move", game.turn());
            for (notation, _) in game.possible_notations() {
                println!("{notation}");
            }
        }
        Commands::Eval {
            engine,
            moves,
            numbered,
        } => {
            let config = engine.resolve()?;
            let moves = uci_moves(&unnumbered(moves, numbered))?;
            tracing::info!("Evaluating {} plies with {}", moves.len(), config.path.display());

            let mut engine = ProcessEngine::start(config).context("starting engine")?;
            let evaluation = engine.eval_game(&moves)?;
            let (scores, depth) = encode_scores(&evaluation);
            engine.close()?;

            let output = serde_json::json!({
                "moves": moves,
                "scores": scores,
                "depth": depth,
                "evaluation": evaluation,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn unnumbered(moves: Vec<String>, numbered: bool) -> Vec<String> {
    if numbered {
        strip_move_numbers(&moves)
    } else {
        moves
    }
}
