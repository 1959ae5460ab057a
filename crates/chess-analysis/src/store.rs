//! Persistence contract for games, moves and their evaluations.
//!
//! Moves are stored as long algebraic notation and scores as short strings:
//! `"35"` / `"-120"` for centipawns, `"M3"` / `"M-2"` for mate distances.

use crate::evaluation::{get_eval_by_pv, GameEvaluation};
use chess_core::{Color, NotationError};
use chess_engine::notation::long_to_uci;
use chess_engine::{convert_notation, GameError};
use std::collections::HashMap;
use thiserror::Error;
use uci::Score;

/// Errors from a [`MoveStore`].
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("game not found: {0}")]
    GameNotFound(String),
    #[error("game has no moves")]
    NoMoves,
    #[error("no move record with id {0}")]
    UnknownRecord(u64),
}

/// The latest move record of a game.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoredMoves {
    /// Record id, used by [`MoveStore::update_eval`].
    pub id: u64,
    /// Long algebraic moves.
    pub moves: Vec<String>,
    /// Cached scores from the last evaluation, one per scored ply.
    pub scores: Vec<String>,
    /// Deepest search among the cached scores.
    pub depth: u32,
}

/// Storage for move lists and their cached evaluations.
pub trait MoveStore {
    /// Convert `moves` (numbered short notation) and append them as the latest
    /// record of the game with `external_id`, creating the game if needed.
    /// Returns the new record id.
    fn insert_moves(
        &mut self,
        moves: &[String],
        external_id: &str,
        player_is_white: bool,
    ) -> Result<u64, StoreError>;

    /// The latest record of the game with `external_id`.
    fn moves_by_external_id(&self, external_id: &str) -> Result<StoredMoves, StoreError>;

    /// Cache the principal-line scores of `evaluation` on a record.
    fn update_eval(
        &mut self,
        record_id: u64,
        evaluation: &GameEvaluation,
    ) -> Result<(), StoreError>;
}

/// Drop the move numbers from a `["1", "e4", "e5", "2", "Nf3", ...]` list.
pub fn strip_move_numbers<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    tokens
        .iter()
        .enumerate()
        .filter(|(i, _)| i % 3 != 0)
        .map(|(_, t)| t.as_ref().to_string())
        .collect()
}

/// Strip move numbers and convert to long algebraic by replaying the game.
pub fn prepare_moves<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<String>, GameError> {
    convert_notation(&strip_move_numbers(tokens))
}

/// Convert stored long algebraic moves to UCI, alternating the mover from
/// White.
pub fn uci_from_long<S: AsRef<str>>(moves: &[S]) -> Result<Vec<String>, NotationError> {
    moves
        .iter()
        .enumerate()
        .map(|(i, mv)| {
            let mover = match i % 2 {
                0 => Color::White,
                _ => Color::Black,
            };
            long_to_uci(mv.as_ref(), mover)
        })
        .collect()
}

/// Render a score for storage.
pub fn format_score(score: Score) -> String {
    match score {
        Score::Cp(cp) => cp.to_string(),
        Score::Mate(m) => format!("M{m}"),
    }
}

/// Parse a stored score string.
pub fn parse_score(text: &str) -> Option<Score> {
    match text.strip_prefix('M') {
        Some(mate) => mate.parse().ok().map(Score::Mate),
        None => text.parse().ok().map(Score::Cp),
    }
}

/// The principal-line score of every scored ply, and the deepest search
/// among them. Unscored plies are skipped.
pub fn encode_scores(evaluation: &GameEvaluation) -> (Vec<String>, u32) {
    let mut depth = 0;
    let scores = evaluation
        .iter()
        .filter_map(|evals| evals.as_deref().and_then(|e| get_eval_by_pv(e, 1)))
        .map(|e| {
            depth = depth.max(e.depth);
            format_score(e.score)
        })
        .collect();
    (scores, depth)
}

#[derive(Debug, Clone)]
struct GameRecord {
    player_is_white: bool,
    records: Vec<u64>,
}

/// In-process [`MoveStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    games: HashMap<String, GameRecord>,
    moves: HashMap<u64, StoredMoves>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Side the player had in the game with `external_id`.
    pub fn player_is_white(&self, external_id: &str) -> Option<bool> {
        self.games.get(external_id).map(|g| g.player_is_white)
    }
}

impl MoveStore for MemoryStore {
    fn insert_moves(
        &mut self,
        moves: &[String],
        external_id: &str,
        player_is_white: bool,
    ) -> Result<u64, StoreError> {
        let moves = prepare_moves(moves)?;
        self.next_id += 1;
        let id = self.next_id;
        self.moves.insert(
            id,
            StoredMoves {
                id,
                moves,
                ..StoredMoves::default()
            },
        );
        self.games
            .entry(external_id.to_string())
            .or_insert_with(|| GameRecord {
                player_is_white,
                records: Vec::new(),
            })
            .records
            .push(id);
        Ok(id)
    }

    fn moves_by_external_id(&self, external_id: &str) -> Result<StoredMoves, StoreError> {
        let game = self
            .games
            .get(external_id)
            .ok_or_else(|| StoreError::GameNotFound(external_id.to_string()))?;
        game.records
            .last()
            .and_then(|id| self.moves.get(id))
            .cloned()
            .ok_or(StoreError::NoMoves)
    }

    fn update_eval(
        &mut self,
        record_id: u64,
        evaluation: &GameEvaluation,
    ) -> Result<(), StoreError> {
        let record = self
            .moves
            .get_mut(&record_id)
            .ok_or(StoreError::UnknownRecord(record_id))?;
        let (scores, depth) = encode_scores(evaluation);
        record.scores = scores;
        record.depth = depth;
        Ok(())
    }
}
