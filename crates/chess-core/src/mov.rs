//! Move representation.
//!
//! Two shapes exist. [`MovePattern`] is what a human wrote down: every field
//! except the destination may be missing. [`ResolvedMove`] is what actually
//! happened on the board, with its source square always known. Only the game
//! state machine turns the former into the latter.

use crate::{File, PieceType, Rank, Square};
use std::fmt;
use thiserror::Error;

/// Errors raised while parsing or rendering move notation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// The text does not match the move grammar.
    #[error("cannot parse move: {0:?}")]
    Parse(String),
    /// The move lacks a field the requested notation needs.
    #[error("not enough information to render move notation")]
    NotEnoughInfo,
}

/// King-side (`O-O`) or queen-side (`O-O-O`) castling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Short,
    Long,
}

impl CastleSide {
    /// The literal notation token.
    pub const fn notation(self) -> &'static str {
        match self {
            CastleSide::Short => "O-O",
            CastleSide::Long => "O-O-O",
        }
    }

    /// The file the king lands on.
    pub const fn king_to(self) -> File {
        match self {
            CastleSide::Short => File::G,
            CastleSide::Long => File::C,
        }
    }

    /// The file the castling rook starts on.
    pub const fn rook_from(self) -> File {
        match self {
            CastleSide::Short => File::H,
            CastleSide::Long => File::A,
        }
    }

    /// The file the castling rook lands on.
    pub const fn rook_to(self) -> File {
        match self {
            CastleSide::Short => File::F,
            CastleSide::Long => File::D,
        }
    }

    /// Files between king and rook that must be empty.
    pub const fn empty_files(self) -> &'static [File] {
        match self {
            CastleSide::Short => &[File::F, File::G],
            CastleSide::Long => &[File::B, File::C, File::D],
        }
    }
}

/// Trailing `+` or `#` on a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckSuffix {
    Check,
    Mate,
}

impl CheckSuffix {
    pub const fn as_char(self) -> char {
        match self {
            CheckSuffix::Check => '+',
            CheckSuffix::Mate => '#',
        }
    }

    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(CheckSuffix::Check),
            '#' => Some(CheckSuffix::Mate),
            _ => None,
        }
    }
}

/// A partially specified move, as parsed from notation.
///
/// `piece` defaults to [`PieceType::Pawn`], since algebraic notation writes
/// no letter for pawns. Castling patterns carry `castle` and at most a
/// `from_rank`; everything else stays empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MovePattern {
    pub piece: PieceType,
    pub from_file: Option<File>,
    pub from_rank: Option<Rank>,
    pub capture: bool,
    pub to_file: Option<File>,
    pub to_rank: Option<Rank>,
    pub promotion: Option<PieceType>,
    pub check: Option<CheckSuffix>,
    pub castle: Option<CastleSide>,
}

impl MovePattern {
    /// A castling pattern.
    pub const fn castle(side: CastleSide) -> Self {
        MovePattern {
            piece: PieceType::Pawn,
            from_file: None,
            from_rank: None,
            capture: false,
            to_file: None,
            to_rank: None,
            promotion: None,
            check: None,
            castle: Some(side),
        }
    }

    /// Returns the destination square if both its file and rank are known.
    pub fn to_square(&self) -> Option<Square> {
        Some(Square::new(self.to_file?, self.to_rank?))
    }

    /// Renders long algebraic notation (`Nb1c3`, `e5xf4`, `h7h8=Q`).
    ///
    /// # Errors
    ///
    /// [`NotationError::NotEnoughInfo`] unless both squares are fully known.
    pub fn long_algebraic(&self) -> Result<String, NotationError> {
        if let Some(side) = self.castle {
            return Ok(side.notation().to_string());
        }
        let (Some(from_file), Some(from_rank), Some(to)) =
            (self.from_file, self.from_rank, self.to_square())
        else {
            return Err(NotationError::NotEnoughInfo);
        };
        Ok(render(
            self.piece,
            Some(from_file),
            Some(from_rank),
            self.capture,
            to,
            self.promotion,
            self.check,
        ))
    }

    /// Renders short algebraic notation, optionally with the source file
    /// and/or rank for disambiguation.
    ///
    /// Pawn captures always include the source file.
    ///
    /// # Errors
    ///
    /// [`NotationError::NotEnoughInfo`] if the destination, or a requested
    /// source coordinate, is missing.
    pub fn short_algebraic(
        &self,
        include_file: bool,
        include_rank: bool,
    ) -> Result<String, NotationError> {
        if let Some(side) = self.castle {
            return Ok(side.notation().to_string());
        }
        let to = self.to_square().ok_or(NotationError::NotEnoughInfo)?;
        let include_file = include_file || (self.capture && self.piece == PieceType::Pawn);
        let from_file = if include_file {
            Some(self.from_file.ok_or(NotationError::NotEnoughInfo)?)
        } else {
            None
        };
        let from_rank = if include_rank {
            Some(self.from_rank.ok_or(NotationError::NotEnoughInfo)?)
        } else {
            None
        };
        Ok(render(
            self.piece,
            from_file,
            from_rank,
            self.capture,
            to,
            self.promotion,
            self.check,
        ))
    }

    /// Renders UCI notation (`e2e4`, `e7e8q`, `e1g1`).
    ///
    /// # Errors
    ///
    /// [`NotationError::NotEnoughInfo`] if the source rank is unknown, or, for
    /// non-castling moves, any square coordinate is unknown.
    pub fn uci(&self) -> Result<String, NotationError> {
        let from_rank = self.from_rank.ok_or(NotationError::NotEnoughInfo)?;
        if let Some(side) = self.castle {
            return Ok(castle_uci(side, from_rank));
        }
        let (Some(from_file), Some(to)) = (self.from_file, self.to_square()) else {
            return Err(NotationError::NotEnoughInfo);
        };
        Ok(standard_uci(Square::new(from_file, from_rank), to, self.promotion))
    }
}

/// A non-castling move with both squares known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StandardMove {
    pub piece: PieceType,
    pub from: Square,
    pub to: Square,
    pub capture: bool,
    /// The captured pawn sits beside `from`, not on `to`.
    pub en_passant: bool,
    pub promotion: Option<PieceType>,
    pub check: Option<CheckSuffix>,
}

impl StandardMove {
    /// A quiet move of `piece` between two squares.
    pub const fn new(piece: PieceType, from: Square, to: Square) -> Self {
        StandardMove {
            piece,
            from,
            to,
            capture: false,
            en_passant: false,
            promotion: None,
            check: None,
        }
    }

    /// Returns the same move flagged as a capture.
    pub const fn capturing(mut self) -> Self {
        self.capture = true;
        self
    }

    /// Returns the same move with a promotion choice.
    pub const fn promoting(mut self, piece: PieceType) -> Self {
        self.promotion = Some(piece);
        self
    }
}

/// A castling move for the side whose home rank is `rank`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleMove {
    pub side: CastleSide,
    pub rank: Rank,
    pub check: Option<CheckSuffix>,
}

/// A move that has been matched against the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolvedMove {
    Standard(StandardMove),
    Castle(CastleMove),
}

impl ResolvedMove {
    /// Returns the check suffix recorded for this move.
    pub const fn check(&self) -> Option<CheckSuffix> {
        match self {
            ResolvedMove::Standard(m) => m.check,
            ResolvedMove::Castle(c) => c.check,
        }
    }

    /// Returns a copy carrying the given check suffix.
    pub fn with_check(mut self, check: Option<CheckSuffix>) -> Self {
        match &mut self {
            ResolvedMove::Standard(m) => m.check = check,
            ResolvedMove::Castle(c) => c.check = check,
        }
        self
    }

    /// Renders long algebraic notation. Castling renders as `O-O`/`O-O-O`.
    pub fn long_algebraic(&self) -> String {
        match self {
            ResolvedMove::Standard(m) => render(
                m.piece,
                Some(m.from.file()),
                Some(m.from.rank()),
                m.capture,
                m.to,
                m.promotion,
                m.check,
            ),
            ResolvedMove::Castle(c) => c.side.notation().to_string(),
        }
    }

    /// Renders short algebraic notation with optional disambiguation.
    pub fn short_algebraic(&self, include_file: bool, include_rank: bool) -> String {
        match self {
            ResolvedMove::Standard(m) => {
                let include_file = include_file || (m.capture && m.piece == PieceType::Pawn);
                render(
                    m.piece,
                    include_file.then(|| m.from.file()),
                    include_rank.then(|| m.from.rank()),
                    m.capture,
                    m.to,
                    m.promotion,
                    m.check,
                )
            }
            ResolvedMove::Castle(c) => c.side.notation().to_string(),
        }
    }

    /// Renders UCI notation. Castling is the king's two-square step.
    pub fn uci(&self) -> String {
        match self {
            ResolvedMove::Standard(m) => standard_uci(m.from, m.to, m.promotion),
            ResolvedMove::Castle(c) => castle_uci(c.side, c.rank),
        }
    }
}

impl From<&ResolvedMove> for MovePattern {
    fn from(mv: &ResolvedMove) -> Self {
        match mv {
            ResolvedMove::Standard(m) => MovePattern {
                piece: m.piece,
                from_file: Some(m.from.file()),
                from_rank: Some(m.from.rank()),
                capture: m.capture,
                to_file: Some(m.to.file()),
                to_rank: Some(m.to.rank()),
                promotion: m.promotion,
                check: m.check,
                castle: None,
            },
            ResolvedMove::Castle(c) => MovePattern {
                from_rank: Some(c.rank),
                check: c.check,
                ..MovePattern::castle(c.side)
            },
        }
    }
}

impl fmt::Display for ResolvedMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.long_algebraic())
    }
}

fn render(
    piece: PieceType,
    from_file: Option<File>,
    from_rank: Option<Rank>,
    capture: bool,
    to: Square,
    promotion: Option<PieceType>,
    check: Option<CheckSuffix>,
) -> String {
    let mut out = String::with_capacity(8);
    if let Some(c) = piece.symbol() {
        out.push(c);
    }
    if let Some(file) = from_file {
        out.push(file.to_char());
    }
    if let Some(rank) = from_rank {
        out.push(rank.to_char());
    }
    if capture {
        out.push('x');
    }
    out.push_str(&to.to_algebraic());
    if let Some(c) = promotion.and_then(PieceType::symbol) {
        out.push('=');
        out.push(c);
    }
    if let Some(check) = check {
        out.push(check.as_char());
    }
    out
}

fn standard_uci(from: Square, to: Square, promotion: Option<PieceType>) -> String {
    let mut out = format!("{}{}", from, to);
    if let Some(c) = promotion.and_then(PieceType::uci_char) {
        out.push(c);
    }
    out
}

fn castle_uci(side: CastleSide, rank: Rank) -> String {
    format!("{}{}{}{}", File::E, rank, side.king_to(), rank)
}
