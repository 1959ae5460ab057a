//! King and knight moves: fixed offset sets.

use crate::Board;
use chess_core::{Color, PieceType, Square, StandardMove};

/// King offsets as `(file, rank)` deltas.
pub(super) const KING: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Knight offsets as `(file, rank)` deltas.
pub(super) const KNIGHT: [(i8, i8); 8] = [
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
    (1, -2),
    (2, -1),
    (2, 1),
    (1, 2),
];

pub(super) fn generate(
    board: &Board,
    from: Square,
    color: Color,
    kind: PieceType,
    offsets: &[(i8, i8)],
    moves: &mut Vec<StandardMove>,
) {
    for &(df, dr) in offsets {
        let Some(to) = from.offset(df, dr) else {
            continue;
        };
        match board.get(to) {
            Some(target) if target.color == color => {}
            Some(_) => moves.push(StandardMove::new(kind, from, to).capturing()),
            None => moves.push(StandardMove::new(kind, from, to)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Piece;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn targets(moves: &[StandardMove]) -> Vec<String> {
        let mut out: Vec<String> = moves.iter().map(|m| m.to.to_algebraic()).collect();
        out.sort();
        out
    }

    #[test]
    fn knight_in_the_centre() {
        let mut board = Board::empty();
        board.set(sq("d4"), Some(Piece::new(PieceType::Knight, Color::White)));
        let mut moves = Vec::new();
        generate(&board, sq("d4"), Color::White, PieceType::Knight, &KNIGHT, &mut moves);
        assert_eq!(
            targets(&moves),
            ["b3", "b5", "c2", "c6", "e2", "e6", "f3", "f5"]
        );
    }

    #[test]
    fn knight_on_the_rim() {
        let board = Board::new();
        let mut moves = Vec::new();
        generate(&board, Square::B1, Color::White, PieceType::Knight, &KNIGHT, &mut moves);
        // d2 is blocked by our own pawn.
        assert_eq!(targets(&moves), ["a3", "c3"]);
    }

    #[test]
    fn king_captures_but_skips_own_pieces() {
        let mut board = Board::empty();
        board.set(sq("e4"), Some(Piece::new(PieceType::King, Color::Black)));
        board.set(sq("e5"), Some(Piece::new(PieceType::Pawn, Color::Black)));
        board.set(sq("d3"), Some(Piece::new(PieceType::Rook, Color::White)));
        let mut moves = Vec::new();
        generate(&board, sq("e4"), Color::Black, PieceType::King, &KING, &mut moves);

        assert_eq!(moves.len(), 7);
        let captures: Vec<_> = moves.iter().filter(|m| m.capture).collect();
        assert_eq!(captures.len(), 1);
        assert_eq!(captures[0].to, sq("d3"));
        assert!(moves.iter().all(|m| m.to != sq("e5")));
    }

    #[test]
    fn king_in_the_corner() {
        let mut board = Board::empty();
        board.set(Square::H8, Some(Piece::new(PieceType::King, Color::White)));
        let mut moves = Vec::new();
        generate(&board, Square::H8, Color::White, PieceType::King, &KING, &mut moves);
        assert_eq!(targets(&moves), ["g7", "g8", "h7"]);
    }
}
