//! Chess rules and notation.
//!
//! This crate provides:
//! - [`Board`] - an 8×8 grid of pieces with occupancy-checked placement
//! - [`movegen`] - per-piece candidate move generation
//! - [`notation`] - short algebraic parsing, disambiguation and long-to-UCI
//!   conversion
//! - [`Game`] - turn order, history and resolution of move text
//!
//! Legality here means occupancy only: moves that leave the king in check
//! are not filtered out.
//!
//! # Example
//!
//! ```
//! use chess_engine::Game;
//!
//! let mut game = Game::new();
//! game.make_moves(&["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5", "O-O"]).unwrap();
//! assert_eq!(game.history_uci().last().unwrap(), "e1g1");
//! assert_eq!(game.history_long_algebraic()[2], "Ng1f3");
//! ```

mod board;
mod game;
pub mod movegen;
pub mod notation;

pub use board::{Board, BoardError};
pub use game::{convert_notation, resolve_move, uci_moves, Game, GameError};
