//! Game state: turn order, move history and move resolution.
//!
//! [`Game::make_move`] turns human move text into a [`ResolvedMove`]:
//!
//! 1. the text is parsed into a [`MovePattern`],
//! 2. every candidate for the side to move is generated (piece moves plus
//!    castling),
//! 3. [`resolve_move`] narrows the candidates down to exactly one,
//! 4. the move is applied to the board and appended to the history.

use crate::movegen::side_moves;
use crate::notation::{disambiguate, parse_move};
use crate::{Board, BoardError};
use chess_core::{
    CastleMove, CastleSide, Color, File, MovePattern, NotationError, PieceType, Rank,
    ResolvedMove, Square, StandardMove,
};
use thiserror::Error;

/// Error type for game operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The move text does not match the notation grammar.
    #[error(transparent)]
    Parse(#[from] NotationError),
    /// No candidate move matches.
    #[error("invalid move: {0}")]
    InvalidMove(String),
    /// More than one candidate move matches.
    #[error("ambiguous move: {0}")]
    AmbiguousMove(String),
    /// The board rejected the move.
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// A game in progress.
///
/// Cloning produces an independent snapshot: board, turn and history are
/// owned values, so later moves on either copy never affect the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    turn: Color,
    history: Vec<ResolvedMove>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position, White to move.
    pub fn new() -> Self {
        Self::from_board(Board::new(), Color::White)
    }

    /// Creates a game from an arbitrary board with an empty history.
    pub fn from_board(board: Board, turn: Color) -> Self {
        Game {
            board,
            turn,
            history: Vec::new(),
        }
    }

    /// Resets to a new game in place.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access, for setting up positions by hand.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// The side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Moves played so far, oldest first.
    pub fn history(&self) -> &[ResolvedMove] {
        &self.history
    }

    /// All candidate moves for the side to move: piece moves scanned from
    /// a1 rank by rank, then castling (short before long).
    pub fn possible_moves(&self) -> Vec<ResolvedMove> {
        let mut moves: Vec<ResolvedMove> = side_moves(&self.board, self.turn, self.history.last())
            .into_iter()
            .map(ResolvedMove::Standard)
            .collect();
        moves.extend(self.possible_castles().map(ResolvedMove::Castle));
        moves
    }

    /// Candidate moves labelled with disambiguated short notation.
    pub fn possible_notations(&self) -> Vec<(String, ResolvedMove)> {
        disambiguate(&self.possible_moves())
    }

    fn possible_castles(&self) -> impl Iterator<Item = CastleMove> + '_ {
        let rank = self.turn.home_rank();
        let unmoved = move |file: File, kind: PieceType| {
            self.board
                .get(Square::new(file, rank))
                .is_some_and(|p| p.kind == kind && p.color == self.turn && !p.moved)
        };
        let king_ready = unmoved(File::E, PieceType::King);
        [CastleSide::Short, CastleSide::Long]
            .into_iter()
            .filter(move |side| {
                king_ready
                    && unmoved(side.rook_from(), PieceType::Rook)
                    && side
                        .empty_files()
                        .iter()
                        .all(|&f| self.board.get(Square::new(f, rank)).is_none())
            })
            .map(move |side| CastleMove {
                side,
                rank,
                check: None,
            })
    }

    /// Plays a move given in short algebraic notation.
    ///
    /// The returned move carries the check suffix written in `text`, if any.
    ///
    /// # Errors
    ///
    /// - [`GameError::Parse`] if `text` is not valid notation
    /// - [`GameError::InvalidMove`] if no candidate matches
    /// - [`GameError::AmbiguousMove`] if several candidates match
    /// - [`GameError::Board`] if the board rejects the move
    pub fn make_move(&mut self, text: &str) -> Result<ResolvedMove, GameError> {
        let pattern = parse_move(text)?;
        let mut mv = resolve_move(&pattern, &self.possible_moves())?;
        if pattern.check.is_some() {
            mv = mv.with_check(pattern.check);
        }
        self.play(mv)?;
        Ok(mv)
    }

    /// Plays moves in order, stopping at the first error. Moves applied
    /// before the error stay in the history.
    pub fn make_moves<S: AsRef<str>>(&mut self, moves: &[S]) -> Result<(), GameError> {
        for text in moves {
            self.make_move(text.as_ref())?;
        }
        Ok(())
    }

    fn play(&mut self, mv: ResolvedMove) -> Result<(), GameError> {
        match &mv {
            ResolvedMove::Standard(m) => self.board.move_piece(m)?,
            ResolvedMove::Castle(c) => self.castle(c)?,
        }
        self.history.push(mv);
        self.turn = self.turn.opposite();
        Ok(())
    }

    /// Moves the king, then the rook. If the rook cannot move, the king is
    /// put back unmoved before the error is returned.
    fn castle(&mut self, castle: &CastleMove) -> Result<(), BoardError> {
        let rank = castle.rank;
        let king_from = Square::new(File::E, rank);
        let king_to = Square::new(castle.side.king_to(), rank);
        let king_before = self.board.get(king_from).copied();

        self.board
            .move_piece(&StandardMove::new(PieceType::King, king_from, king_to))?;
        let rook = StandardMove::new(
            PieceType::Rook,
            Square::new(castle.side.rook_from(), rank),
            Square::new(castle.side.rook_to(), rank),
        );
        if let Err(e) = self.board.move_piece(&rook) {
            self.board.set(king_to, None);
            self.board.set(king_from, king_before);
            return Err(e);
        }
        Ok(())
    }

    /// The history in long algebraic notation.
    pub fn history_long_algebraic(&self) -> Vec<String> {
        self.history.iter().map(ResolvedMove::long_algebraic).collect()
    }

    /// The history in UCI notation, ready for a `position startpos moves` command.
    pub fn history_uci(&self) -> Vec<String> {
        self.history.iter().map(ResolvedMove::uci).collect()
    }
}

/// Picks the single candidate that matches `pattern`.
///
/// Filters run in order and stop as soon as one candidate is left:
///
/// 1. castling side for castling patterns, otherwise piece type,
///    destination and capture flag (always applied)
/// 2. source file, if given
/// 3. source rank, if given
/// 4. promotion piece, if given
/// 5. check suffix, if given (candidates without a suffix still match)
///
/// # Errors
///
/// [`GameError::InvalidMove`] if a filter leaves nothing,
/// [`GameError::AmbiguousMove`] if more than one candidate survives them all.
pub fn resolve_move(
    pattern: &MovePattern,
    candidates: &[ResolvedMove],
) -> Result<ResolvedMove, GameError> {
    type Filter = fn(&MovePattern, &ResolvedMove) -> Option<bool>;
    const FILTERS: [Filter; 5] = [
        |p, m| Some(mandatory_match(p, m)),
        |p, m| p.from_file.map(|f| source(m).map(Square::file) == Some(f)),
        |p, m| p.from_rank.map(|r| source_rank(m) == Some(r)),
        |p, m| p.promotion.map(|promo| promotion(m) == Some(promo)),
        |p, m| p.check.map(|c| m.check().map_or(true, |mc| mc == c)),
    ];

    let mut remaining: Vec<&ResolvedMove> = candidates.iter().collect();
    for filter in FILTERS {
        remaining.retain(|m| filter(pattern, m).unwrap_or(true));
        match remaining.as_slice() {
            [] => return Err(GameError::InvalidMove(describe(pattern))),
            [only] => return Ok(**only),
            _ => {}
        }
    }
    Err(GameError::AmbiguousMove(describe(pattern)))
}

fn mandatory_match(pattern: &MovePattern, mv: &ResolvedMove) -> bool {
    match (pattern.castle, mv) {
        (Some(side), ResolvedMove::Castle(c)) => c.side == side,
        (None, ResolvedMove::Standard(m)) => {
            m.piece == pattern.piece
                && Some(m.to) == pattern.to_square()
                && m.capture == pattern.capture
        }
        _ => false,
    }
}

fn source(mv: &ResolvedMove) -> Option<Square> {
    match mv {
        ResolvedMove::Standard(m) => Some(m.from),
        ResolvedMove::Castle(_) => None,
    }
}

fn source_rank(mv: &ResolvedMove) -> Option<Rank> {
    match mv {
        ResolvedMove::Standard(m) => Some(m.from.rank()),
        ResolvedMove::Castle(c) => Some(c.rank),
    }
}

fn promotion(mv: &ResolvedMove) -> Option<PieceType> {
    match mv {
        ResolvedMove::Standard(m) => m.promotion,
        ResolvedMove::Castle(_) => None,
    }
}

fn describe(pattern: &MovePattern) -> String {
    pattern
        .short_algebraic(pattern.from_file.is_some(), pattern.from_rank.is_some())
        .unwrap_or_else(|_| format!("{pattern:?}"))
}

/// Plays short algebraic moves on a new game and returns the history in
/// long algebraic notation.
///
/// # Example
///
/// ```
/// use chess_engine::convert_notation;
///
/// let long = convert_notation(&["e4", "e5", "Nf3"]).unwrap();
/// assert_eq!(long, ["e2e4", "e7e5", "Ng1f3"]);
/// ```
pub fn convert_notation<S: AsRef<str>>(moves: &[S]) -> Result<Vec<String>, GameError> {
    let mut game = Game::new();
    game.make_moves(moves)?;
    Ok(game.history_long_algebraic())
}

/// Plays short algebraic moves on a new game and returns the history in
/// UCI notation.
pub fn uci_moves<S: AsRef<str>>(moves: &[S]) -> Result<Vec<String>, GameError> {
    let mut game = Game::new();
    game.make_moves(moves)?;
    Ok(game.history_uci())
}
