//! Core types for chess.
//!
//! This crate provides the fundamental types shared by the rules engine and
//! the analysis driver:
//! - [`Piece`], [`PieceType`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`MovePattern`] and [`ResolvedMove`] for moves, with long algebraic,
//!   short algebraic and UCI rendering

mod color;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use mov::{
    CastleMove, CastleSide, CheckSuffix, MovePattern, NotationError, ResolvedMove, StandardMove,
};
pub use piece::{Piece, PieceType};
pub use square::{File, Rank, Square};
