//! Game analysis with a UCI engine such as Stockfish.
//!
//! # Overview
//!
//! - [`EngineConfig`] - Engine settings, loadable from TOML
//! - [`Engine`] - A UCI engine subprocess after its handshake
//! - [`MoveEval`] / [`GameEvaluation`] - Per-ply search results
//! - [`store`] - Persistence contract and score string codec
//!
//! # Example
//!
//! ```ignore
//! use chess_analysis::{EngineConfig, ProcessEngine};
//!
//! let moves = chess_engine::uci_moves(&["e4", "e5", "Nf3"])?;
//! let mut engine = ProcessEngine::start(EngineConfig::new("stockfish"))?;
//! let evaluation = engine.eval_game(&moves)?;
//! assert_eq!(evaluation.len(), moves.len() + 1);
//! ```

pub mod config;
pub mod engine;
pub mod evaluation;
pub mod evaluator;
pub mod store;

pub use config::{ConfigError, EngineConfig};
pub use engine::{Engine, EngineError, ProcessEngine, MAX_UCI_LINES};
pub use evaluation::{get_eval_by_pv, GameEvaluation, MoveEval};
pub use evaluator::parse_response;
pub use store::{MemoryStore, MoveStore, StoreError, StoredMoves};
pub use uci::Score;
