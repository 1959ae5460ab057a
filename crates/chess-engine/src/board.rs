//! The 8×8 board and its placement primitives.
//!
//! A [`Board`] knows nothing about chess rules. It only keeps squares
//! consistent: a move must start on an occupied square, a capture must hit
//! something, and a quiet move must land on an empty square.

use chess_core::{Color, File, Piece, PieceType, Rank, Square, StandardMove};
use std::fmt;
use thiserror::Error;

/// Errors raised by board primitives.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// The file is outside `a..=h` or the rank outside `1..=8`.
    #[error("square {file}{rank} is off the board")]
    OutOfRange { file: char, rank: u8 },
    /// Occupancy does not match what the move claims.
    #[error("occupancy conflict on {square}: {reason}")]
    Occupancy {
        square: Square,
        reason: &'static str,
    },
    /// Promotion was requested for a piece that is not a pawn.
    #[error("piece on {0} is not a pawn")]
    NotAPawn(Square),
}

/// Piece placement plus the list of captured pieces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    captured: Vec<Piece>,
}

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates a board in the standard starting setup.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for color in [Color::White, Color::Black] {
            for (file, kind) in File::ALL.into_iter().zip(BACK_RANK) {
                board.set(
                    Square::new(file, color.home_rank()),
                    Some(Piece::new(kind, color)),
                );
                board.set(
                    Square::new(file, color.pawn_rank()),
                    Some(Piece::new(PieceType::Pawn, color)),
                );
            }
        }
        board
    }

    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        Board {
            squares: [None; 64],
            captured: Vec::new(),
        }
    }

    /// Creates a board from a grid indexed `[rank][file]`, rank 1 first.
    pub fn from_grid(grid: [[Option<Piece>; 8]; 8]) -> Self {
        let mut board = Self::empty();
        for (rank, row) in Rank::ALL.into_iter().zip(grid) {
            for (file, cell) in File::ALL.into_iter().zip(row) {
                board.set(Square::new(file, rank), cell);
            }
        }
        board
    }

    /// Looks up a square given as a file letter and a rank number.
    ///
    /// # Errors
    ///
    /// [`BoardError::OutOfRange`] if either coordinate is off the board.
    pub fn piece_at(&self, file: char, rank: u8) -> Result<Option<&Piece>, BoardError> {
        let out_of_range = BoardError::OutOfRange { file, rank };
        let file = File::from_char(file)
            .filter(|_| file.is_ascii_lowercase())
            .ok_or(out_of_range)?;
        let rank = rank
            .checked_sub(1)
            .and_then(Rank::from_index)
            .ok_or(out_of_range)?;
        Ok(self.get(Square::new(file, rank)))
    }

    /// Returns the piece on a square, if any.
    #[inline]
    pub fn get(&self, square: Square) -> Option<&Piece> {
        self.squares[square.index() as usize].as_ref()
    }

    /// Places (or clears) a square without any checks.
    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.index() as usize] = piece;
    }

    /// Iterates over occupied squares, a1 first, rank by rank.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, &Piece)> + '_ {
        Square::all().filter_map(|sq| self.get(sq).map(|p| (sq, p)))
    }

    /// Applies a move, checking only that occupancy agrees with it.
    ///
    /// A capture removes the target piece (the pawn beside `from` for en
    /// passant), marks it inactive and records it in the captured list. The
    /// moving piece is flagged as moved and promoted if the move says so.
    ///
    /// # Errors
    ///
    /// [`BoardError::Occupancy`] if `from` is empty, a capture finds nothing
    /// to take, or a quiet move lands on an occupied square.
    pub fn move_piece(&mut self, mv: &StandardMove) -> Result<(), BoardError> {
        let mut piece = *self.get(mv.from).ok_or(BoardError::Occupancy {
            square: mv.from,
            reason: "no piece to move",
        })?;

        let target = if mv.en_passant {
            Square::new(mv.to.file(), mv.from.rank())
        } else {
            mv.to
        };
        match (mv.capture, self.get(target)) {
            (true, None) => {
                return Err(BoardError::Occupancy {
                    square: target,
                    reason: "nothing to capture",
                })
            }
            (false, Some(_)) => {
                return Err(BoardError::Occupancy {
                    square: target,
                    reason: "destination is occupied",
                })
            }
            _ => {}
        }
        if mv.en_passant && self.get(mv.to).is_some() {
            return Err(BoardError::Occupancy {
                square: mv.to,
                reason: "destination is occupied",
            });
        }

        if let Some(mut taken) = self.squares[target.index() as usize].take() {
            taken.active = false;
            self.captured.push(taken);
        }
        self.set(mv.from, None);
        piece.moved = true;
        if let Some(kind) = mv.promotion {
            piece.kind = kind;
        }
        self.set(mv.to, Some(piece));
        Ok(())
    }

    /// Replaces the pawn on `square` with a piece of `kind`.
    ///
    /// # Errors
    ///
    /// [`BoardError::Occupancy`] if the square is empty,
    /// [`BoardError::NotAPawn`] if it holds anything but a pawn.
    pub fn promote_pawn(&mut self, square: Square, kind: PieceType) -> Result<(), BoardError> {
        let piece = self.squares[square.index() as usize]
            .as_mut()
            .ok_or(BoardError::Occupancy {
                square,
                reason: "no piece to promote",
            })?;
        if piece.kind != PieceType::Pawn {
            return Err(BoardError::NotAPawn(square));
        }
        piece.kind = kind;
        Ok(())
    }

    /// All captured pieces, in capture order.
    pub fn captured(&self) -> &[Piece] {
        &self.captured
    }

    /// Pieces captured by `color`, i.e. captured pieces of the other color.
    pub fn captured_by(&self, color: Color) -> Vec<Piece> {
        self.captured
            .iter()
            .filter(|p| p.color != color)
            .copied()
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.into_iter().rev() {
            write!(f, "{}", rank)?;
            for file in File::ALL {
                let glyph = self.get(Square::new(file, rank)).map_or('·', Piece::glyph);
                write!(f, " {}", glyph)?;
            }
            writeln!(f)?;
        }
        write!(f, " ")?;
        for file in File::ALL {
            write!(f, " {}", file)?;
        }
        writeln!(f)
    }
}
