//! Candidate move generation.
//!
//! Moves produced here are consistent with occupancy only: a piece never
//! lands on its own colour and sliders stop at the first blocker. Whether a
//! move leaves the king in check is not considered. Castling is not a piece
//! move and is generated by [`crate::Game`].

mod leaper;
mod pawn;
mod slider;

use crate::Board;
use chess_core::{Color, PieceType, ResolvedMove, Square, StandardMove};

/// Generates the candidate moves of the piece on `from`.
///
/// `last_move` is the most recent move in the game, needed for en passant.
/// Empty and inactive squares yield no moves.
pub fn piece_moves(
    board: &Board,
    from: Square,
    last_move: Option<&ResolvedMove>,
) -> Vec<StandardMove> {
    let mut moves = Vec::new();
    let Some(piece) = board.get(from).filter(|p| p.active) else {
        return moves;
    };
    let color = piece.color;
    match piece.kind {
        PieceType::Pawn => pawn::generate(board, from, color, last_move, &mut moves),
        PieceType::Knight => {
            leaper::generate(board, from, color, PieceType::Knight, &leaper::KNIGHT, &mut moves)
        }
        PieceType::King => {
            leaper::generate(board, from, color, PieceType::King, &leaper::KING, &mut moves)
        }
        PieceType::Bishop => slider::generate(
            board,
            from,
            color,
            PieceType::Bishop,
            &slider::DIAGONAL,
            &mut moves,
        ),
        PieceType::Rook => slider::generate(
            board,
            from,
            color,
            PieceType::Rook,
            &slider::ORTHOGONAL,
            &mut moves,
        ),
        PieceType::Queen => {
            slider::generate(board, from, color, PieceType::Queen, &slider::ORTHOGONAL, &mut moves);
            slider::generate(board, from, color, PieceType::Queen, &slider::DIAGONAL, &mut moves);
        }
    }
    moves
}

/// Generates the candidate moves of every piece of `color`, scanning the
/// board from a1 rank by rank.
pub fn side_moves(
    board: &Board,
    color: Color,
    last_move: Option<&ResolvedMove>,
) -> Vec<StandardMove> {
    board
        .pieces()
        .filter(|(_, piece)| piece.color == color)
        .flat_map(|(from, _)| piece_moves(board, from, last_move))
        .collect()
}

/// Pushes a move to the last rank once per promotion choice, or just the
/// move itself when it does not reach a back rank.
fn push_with_promotions(mv: StandardMove, moves: &mut Vec<StandardMove>) {
    let rank = mv.to.rank();
    if rank == Color::White.home_rank() || rank == Color::Black.home_rank() {
        moves.extend(PieceType::PROMOTIONS.iter().map(|&p| mv.promoting(p)));
    } else {
        moves.push(mv);
    }
}
