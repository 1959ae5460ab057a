//! Rook, bishop and queen moves: rays cast until blocked.

use crate::Board;
use chess_core::{Color, PieceType, Square, StandardMove};

/// Forward, backward, left, right.
pub(super) const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (0, -1), (-1, 0), (1, 0)];

/// Forward-right, forward-left, backward-right, backward-left.
pub(super) const DIAGONAL: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

pub(super) fn generate(
    board: &Board,
    from: Square,
    color: Color,
    kind: PieceType,
    directions: &[(i8, i8)],
    moves: &mut Vec<StandardMove>,
) {
    for &(df, dr) in directions {
        let mut current = from;
        while let Some(to) = current.offset(df, dr) {
            match board.get(to) {
                None => moves.push(StandardMove::new(kind, from, to)),
                Some(target) => {
                    if target.color != color {
                        moves.push(StandardMove::new(kind, from, to).capturing());
                    }
                    break;
                }
            }
            current = to;
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

    #[test]
    fn rook_on_empty_board() {
        let mut board = Board::empty();
        board.set(sq("d4"), Some(Piece::new(PieceType::Rook, Color::White)));
        let mut moves = Vec::new();
        generate(&board, sq("d4"), Color::White, PieceType::Rook, &ORTHOGONAL, &mut moves);
        assert_eq!(moves.len(), 14);
        // Rays are walked in a fixed order: forward first.
        assert_eq!(moves[0].to, sq("d5"));
        assert_eq!(moves[3].to, sq("d8"));
        assert_eq!(moves[4].to, sq("d3"));
    }

    #[test]
    fn rook_stops_at_blockers() {
        let mut board = Board::empty();
        board.set(sq("a3"), Some(Piece::new(PieceType::Rook, Color::White)));
        board.set(sq("a7"), Some(Piece::new(PieceType::Pawn, Color::Black)));
        board.set(sq("a2"), Some(Piece::new(PieceType::Pawn, Color::White)));
        board.set(sq("h3"), Some(Piece::new(PieceType::Rook, Color::White)));
        let mut moves = Vec::new();
        generate(&board, sq("a3"), Color::White, PieceType::Rook, &ORTHOGONAL, &mut moves);

        let to: Vec<String> = moves.iter().map(|m| m.to.to_algebraic()).collect();
        assert_eq!(
            to,
            ["a4", "a5", "a6", "a7", "b3", "c3", "d3", "e3", "f3", "g3"]
        );
        assert!(moves[3].capture);
        assert_eq!(moves.iter().filter(|m| m.capture).count(), 1);
    }

    #[test]
    fn bishop_from_starting_square() {
        let board = Board::new();
        let mut moves = Vec::new();
        generate(&board, Square::C1, Color::White, PieceType::Bishop, &DIAGONAL, &mut moves);
        assert!(moves.is_empty());
    }

    #[test]
    fn bishop_captures_enemy_piece() {
        let mut board = Board::empty();
        board.set(sq("b2"), Some(Piece::new(PieceType::Bishop, Color::White)));
        board.set(sq("g7"), Some(Piece::new(PieceType::Pawn, Color::Black)));
        let mut moves = Vec::new();
        generate(&board, sq("b2"), Color::White, PieceType::Bishop, &DIAGONAL, &mut moves);

        let captures: Vec<_> = moves.iter().filter(|m| m.capture).collect();
        assert_eq!(captures.len(), 1);
        assert_eq!(captures[0].to, sq("g7"));
        assert!(moves.iter().all(|m| m.to != sq("h8")));
        assert_eq!(moves.len(), 5 + 1 + 1 + 1);
    }
}
