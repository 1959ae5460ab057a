//! Pawn moves: pushes, captures, en passant and promotions.

use super::push_with_promotions;
use crate::Board;
use chess_core::{Color, PieceType, ResolvedMove, Square, StandardMove};

pub(super) fn generate(
    board: &Board,
    from: Square,
    color: Color,
    last_move: Option<&ResolvedMove>,
    moves: &mut Vec<StandardMove>,
) {
    let dir = color.pawn_direction();

    if let Some(one) = from.offset(0, dir).filter(|&sq| board.get(sq).is_none()) {
        push_with_promotions(StandardMove::new(PieceType::Pawn, from, one), moves);
        if from.rank() == color.pawn_rank() {
            if let Some(two) = from.offset(0, 2 * dir).filter(|&sq| board.get(sq).is_none()) {
                moves.push(StandardMove::new(PieceType::Pawn, from, two));
            }
        }
    }

    for df in [-1, 1] {
        let Some(to) = from.offset(df, dir) else {
            continue;
        };
        if board.get(to).is_some_and(|target| target.color != color) {
            push_with_promotions(StandardMove::new(PieceType::Pawn, from, to).capturing(), moves);
        }
        if from.rank() == color.en_passant_rank()
            && just_double_stepped_beside(from, to, dir, last_move)
        {
            moves.push(StandardMove {
                en_passant: true,
                ..StandardMove::new(PieceType::Pawn, from, to).capturing()
            });
        }
    }
}

/// True if `last_move` was a pawn's double step that passed over `to` and
/// ended beside `from`. Before any move has been played this is never true.
fn just_double_stepped_beside(
    from: Square,
    to: Square,
    dir: i8,
    last_move: Option<&ResolvedMove>,
) -> bool {
    let Some(ResolvedMove::Standard(prev)) = last_move else {
        return false;
    };
    prev.piece == PieceType::Pawn
        && !prev.capture
        && Some(prev.from) == to.offset(0, dir)
        && prev.to == Square::new(to.file(), from.rank())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{CastleMove, CastleSide, Piece, Rank};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn pawn_moves(board: &Board, from: &str, last: Option<&ResolvedMove>) -> Vec<StandardMove> {
        let from = sq(from);
        let color = board.get(from).unwrap().color;
        let mut moves = Vec::new();
        generate(board, from, color, last, &mut moves);
        moves
    }

    fn double_step(from: &str, to: &str) -> ResolvedMove {
        ResolvedMove::Standard(StandardMove::new(PieceType::Pawn, sq(from), sq(to)))
    }

    #[test]
    fn single_and_double_push_from_start() {
        let board = Board::new();
        let moves = pawn_moves(&board, "e2", None);
        let to: Vec<Square> = moves.iter().map(|m| m.to).collect();
        assert_eq!(to, [sq("e3"), sq("e4")]);

        let moves = pawn_moves(&board, "d7", None);
        let to: Vec<Square> = moves.iter().map(|m| m.to).collect();
        assert_eq!(to, [sq("d6"), sq("d5")]);
    }

    #[test]
    fn double_push_needs_both_squares_empty() {
        let mut board = Board::new();
        board.set(sq("e4"), Some(Piece::new(PieceType::Knight, Color::Black)));
        assert_eq!(pawn_moves(&board, "e2", None).len(), 1);

        board.set(sq("e3"), Some(Piece::new(PieceType::Knight, Color::Black)));
        assert!(pawn_moves(&board, "e2", None).is_empty());
    }

    #[test]
    fn no_double_push_after_leaving_start_rank() {
        let mut board = Board::empty();
        board.set(sq("e3"), Some(Piece::new(PieceType::Pawn, Color::White)));
        let moves = pawn_moves(&board, "e3", None);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to, sq("e4"));
    }

    #[test]
    fn diagonal_captures_only_enemies() {
        let mut board = Board::empty();
        board.set(sq("e4"), Some(Piece::new(PieceType::Pawn, Color::White)));
        board.set(sq("d5"), Some(Piece::new(PieceType::Pawn, Color::Black)));
        board.set(sq("f5"), Some(Piece::new(PieceType::Pawn, Color::White)));
        let moves = pawn_moves(&board, "e4", None);
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().any(|m| m.to == sq("d5") && m.capture));
        assert!(moves.iter().all(|m| m.to != sq("f5")));
    }

    #[test]
    fn promotion_push_yields_four_variants() {
        let mut board = Board::empty();
        board.set(sq("h7"), Some(Piece::new(PieceType::Pawn, Color::White)));
        let moves = pawn_moves(&board, "h7", None);
        let promotions: Vec<_> = moves.iter().map(|m| m.promotion).collect();
        assert_eq!(
            promotions,
            [
                Some(PieceType::Knight),
                Some(PieceType::Bishop),
                Some(PieceType::Rook),
                Some(PieceType::Queen),
            ]
        );
    }

    #[test]
    fn promotion_with_capture_yields_eight_variants() {
        let mut board = Board::empty();
        board.set(sq("b2"), Some(Piece::new(PieceType::Pawn, Color::Black)));
        board.set(sq("a1"), Some(Piece::new(PieceType::Rook, Color::White)));
        let moves = pawn_moves(&board, "b2", None);
        assert_eq!(moves.len(), 8);
        assert_eq!(moves.iter().filter(|m| m.capture).count(), 4);
        assert!(moves.iter().all(|m| m.to.rank() == Rank::R1));
        assert!(moves.iter().all(|m| m.promotion.is_some()));
    }

    #[test]
    fn en_passant_after_adjacent_double_step() {
        let mut board = Board::empty();
        board.set(sq("e5"), Some(Piece::new(PieceType::Pawn, Color::White)));
        board.set(sq("d5"), Some(Piece::new(PieceType::Pawn, Color::Black)));
        let last = double_step("d7", "d5");
        let moves = pawn_moves(&board, "e5", Some(&last));

        let ep: Vec<_> = moves.iter().filter(|m| m.en_passant).collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].to, sq("d6"));
        assert!(ep[0].capture);
    }

    #[test]
    fn en_passant_for_black() {
        let mut board = Board::empty();
        board.set(sq("d4"), Some(Piece::new(PieceType::Pawn, Color::Black)));
        board.set(sq("c4"), Some(Piece::new(PieceType::Pawn, Color::White)));
        let last = double_step("c2", "c4");
        let moves = pawn_moves(&board, "d4", Some(&last));
        assert!(moves.iter().any(|m| m.en_passant && m.to == sq("c3")));
    }

    #[test]
    fn no_en_passant_without_matching_last_move() {
        let mut board = Board::empty();
        board.set(sq("e5"), Some(Piece::new(PieceType::Pawn, Color::White)));
        board.set(sq("d5"), Some(Piece::new(PieceType::Pawn, Color::Black)));

        assert!(pawn_moves(&board, "e5", None).iter().all(|m| !m.en_passant));

        let single = double_step("d6", "d5");
        assert!(pawn_moves(&board, "e5", Some(&single))
            .iter()
            .all(|m| !m.en_passant));

        let castle = ResolvedMove::Castle(CastleMove {
            side: CastleSide::Short,
            rank: Rank::R8,
            check: None,
        });
        assert!(pawn_moves(&board, "e5", Some(&castle))
            .iter()
            .all(|m| !m.en_passant));
    }
}
