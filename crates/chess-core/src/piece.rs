//! Chess piece representation.

use crate::Color;

/// The six types of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum PieceType {
    King = 0,
    Queen = 1,
    Rook = 2,
    Bishop = 3,
    Knight = 4,
    #[default]
    Pawn = 5,
}

impl PieceType {
    /// Promotion choices, in the order they are enumerated by move generation.
    pub const PROMOTIONS: [PieceType; 4] = [
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
    ];

    /// Returns the notation letter for this piece type (`None` for pawns).
    #[inline]
    pub const fn symbol(self) -> Option<char> {
        match self {
            PieceType::King => Some('K'),
            PieceType::Queen => Some('Q'),
            PieceType::Rook => Some('R'),
            PieceType::Bishop => Some('B'),
            PieceType::Knight => Some('N'),
            PieceType::Pawn => None,
        }
    }

    /// Parses a notation letter (`K`, `Q`, `R`, `B`, `N`).
    ///
    /// Pawns have no letter in algebraic notation, so `'P'` is rejected.
    pub const fn from_symbol(c: char) -> Option<Self> {
        match c {
            'K' => Some(PieceType::King),
            'Q' => Some(PieceType::Queen),
            'R' => Some(PieceType::Rook),
            'B' => Some(PieceType::Bishop),
            'N' => Some(PieceType::Knight),
            _ => None,
        }
    }

    /// Returns the lowercase promotion suffix used by UCI (`q`, `r`, `b`, `n`).
    #[inline]
    pub const fn uci_char(self) -> Option<char> {
        match self.symbol() {
            Some(c) => Some(c.to_ascii_lowercase()),
            None => None,
        }
    }

    /// Returns the Unicode glyph for this piece with the given color.
    pub const fn glyph(self, color: Color) -> char {
        match (self, color) {
            (PieceType::King, Color::White) => '♔',
            (PieceType::Queen, Color::White) => '♕',
            (PieceType::Rook, Color::White) => '♖',
            (PieceType::Bishop, Color::White) => '♗',
            (PieceType::Knight, Color::White) => '♘',
            (PieceType::Pawn, Color::White) => '♙',
            (PieceType::King, Color::Black) => '♚',
            (PieceType::Queen, Color::Black) => '♛',
            (PieceType::Rook, Color::Black) => '♜',
            (PieceType::Bishop, Color::Black) => '♝',
            (PieceType::Knight, Color::Black) => '♞',
            (PieceType::Pawn, Color::Black) => '♟',
        }
    }
}

impl std::fmt::Display for PieceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceType::Pawn => "Pawn",
            PieceType::Knight => "Knight",
            PieceType::Bishop => "Bishop",
            PieceType::Rook => "Rook",
            PieceType::Queen => "Queen",
            PieceType::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// A piece on (or captured from) the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceType,
    pub color: Color,
    /// False once the piece has been captured.
    pub active: bool,
    /// True once the piece has moved at least once.
    pub moved: bool,
}

impl Piece {
    /// Creates an active, unmoved piece.
    #[inline]
    pub const fn new(kind: PieceType, color: Color) -> Self {
        Piece {
            kind,
            color,
            active: true,
            moved: false,
        }
    }

    /// Returns the Unicode glyph for this piece.
    #[inline]
    pub const fn glyph(&self) -> char {
        self.kind.glyph(self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_symbols() {
        assert_eq!(PieceType::King.symbol(), Some('K'));
        assert_eq!(PieceType::Knight.symbol(), Some('N'));
        assert_eq!(PieceType::Pawn.symbol(), None);
    }

    #[test]
    fn piece_from_symbol() {
        assert_eq!(PieceType::from_symbol('Q'), Some(PieceType::Queen));
        assert_eq!(PieceType::from_symbol('N'), Some(PieceType::Knight));
        assert_eq!(PieceType::from_symbol('P'), None);
        assert_eq!(PieceType::from_symbol('q'), None);
    }

    #[test]
    fn uci_promotion_chars() {
        assert_eq!(PieceType::Queen.uci_char(), Some('q'));
        assert_eq!(PieceType::Knight.uci_char(), Some('n'));
        assert_eq!(PieceType::Pawn.uci_char(), None);
    }

    #[test]
    fn glyphs_differ_by_color() {
        assert_eq!(PieceType::King.glyph(Color::White), '♔');
        assert_eq!(PieceType::Pawn.glyph(Color::Black), '♟');
        assert_ne!(
            PieceType::Rook.glyph(Color::White),
            PieceType::Rook.glyph(Color::Black)
        );
    }

    #[test]
    fn new_piece_is_active_and_unmoved() {
        let p = Piece::new(PieceType::Rook, Color::Black);
        assert!(p.active);
        assert!(!p.moved);
        assert_eq!(p.glyph(), '♜');
    }
}
