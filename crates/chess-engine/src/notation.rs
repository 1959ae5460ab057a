//! Algebraic notation parsing and disambiguation.
//!
//! Short algebraic input follows a single fixed grammar:
//!
//! ```text
//! [NBRQK]? [a-h]? [1-8]? x? [a-h][1-8] (=[NBRQK])? (+|#)?
//! ```
//!
//! or one of the literal castling tokens `O-O` and `O-O-O`. Anything else
//! is rejected; there is no fallback guessing.

use chess_core::{
    CastleSide, CheckSuffix, Color, File, MovePattern, NotationError, PieceType, Rank,
    ResolvedMove, Square,
};

/// Parses short algebraic notation into a move pattern.
///
/// # Errors
///
/// [`NotationError::Parse`] if `text` does not match the grammar.
///
/// # Example
///
/// ```
/// use chess_core::{File, PieceType, Rank};
/// use chess_engine::notation::parse_move;
///
/// let pattern = parse_move("Rhh3").unwrap();
/// assert_eq!(pattern.piece, PieceType::Rook);
/// assert_eq!(pattern.from_file, Some(File::H));
/// assert_eq!(pattern.to_rank, Some(Rank::R3));
/// ```
pub fn parse_move(text: &str) -> Result<MovePattern, NotationError> {
    let err = || NotationError::Parse(text.to_string());
    match text {
        "O-O" => return Ok(MovePattern::castle(CastleSide::Short)),
        "O-O-O" => return Ok(MovePattern::castle(CastleSide::Long)),
        _ => {}
    }
    if !text.is_ascii() {
        return Err(err());
    }
    let mut rest = text.as_bytes();

    let check = match rest.split_last() {
        Some((&last, head)) => match CheckSuffix::from_char(last as char) {
            Some(check) => {
                rest = head;
                Some(check)
            }
            None => None,
        },
        None => None,
    };

    let promotion = match rest {
        [head @ .., b'=', p] => {
            let piece = PieceType::from_symbol(*p as char).ok_or_else(err)?;
            rest = head;
            Some(piece)
        }
        _ => None,
    };

    let [head @ .., f, r] = rest else {
        return Err(err());
    };
    let to_file = lower_file(*f).ok_or_else(err)?;
    let to_rank = Rank::from_char(*r as char).ok_or_else(err)?;
    rest = head;

    let mut pattern = MovePattern {
        to_file: Some(to_file),
        to_rank: Some(to_rank),
        promotion,
        check,
        ..MovePattern::default()
    };

    if let Some((&first, tail)) = rest.split_first() {
        if let Some(piece) = PieceType::from_symbol(first as char) {
            pattern.piece = piece;
            rest = tail;
        }
    }
    if let Some((&first, tail)) = rest.split_first() {
        if let Some(file) = lower_file(first) {
            pattern.from_file = Some(file);
            rest = tail;
        }
    }
    if let Some((&first, tail)) = rest.split_first() {
        if let Some(rank) = Rank::from_char(first as char) {
            pattern.from_rank = Some(rank);
            rest = tail;
        }
    }
    if let [b'x', tail @ ..] = rest {
        pattern.capture = true;
        rest = tail;
    }

    if rest.is_empty() {
        Ok(pattern)
    } else {
        Err(err())
    }
}

/// `File::from_char` also accepts upper case; notation does not.
fn lower_file(b: u8) -> Option<File> {
    if b.is_ascii_lowercase() {
        File::from_char(b as char)
    } else {
        None
    }
}

/// Assigns each candidate a short algebraic label, adding the source file
/// or rank where two candidates would otherwise read the same.
///
/// Labels are built from the plain short notation of every candidate in
/// order. On a collision both the earlier and the new move are relabelled:
/// by rank if they start on the same file, otherwise by file. A third
/// candidate sharing the same plain label is not detected, since the first
/// collision retires that label.
pub fn disambiguate(candidates: &[ResolvedMove]) -> Vec<(String, ResolvedMove)> {
    let mut labelled: Vec<(String, ResolvedMove)> = Vec::with_capacity(candidates.len());
    for mv in candidates {
        let plain = mv.short_algebraic(false, false);
        let Some(pos) = labelled.iter().position(|(label, _)| *label == plain) else {
            labelled.push((plain, *mv));
            continue;
        };
        let other = labelled[pos].1;
        let same_file = from_file(&other) == from_file(mv);
        let (by_file, by_rank) = (!same_file, same_file);
        labelled[pos].0 = other.short_algebraic(by_file, by_rank);
        upsert(&mut labelled, mv.short_algebraic(by_file, by_rank), *mv);
    }
    labelled
}

fn upsert(labelled: &mut Vec<(String, ResolvedMove)>, label: String, mv: ResolvedMove) {
    match labelled.iter_mut().find(|(l, _)| *l == label) {
        Some(entry) => entry.1 = mv,
        None => labelled.push((label, mv)),
    }
}

fn from_file(mv: &ResolvedMove) -> Option<File> {
    match mv {
        ResolvedMove::Standard(m) => Some(m.from.file()),
        ResolvedMove::Castle(_) => None,
    }
}

/// Converts a long algebraic token (`Nb1c3`, `e5xf4`, `h7h8=Q+`, `O-O`) to
/// UCI. `mover` decides the rank for castling tokens.
///
/// # Errors
///
/// [`NotationError::Parse`] if the token is not long algebraic.
pub fn long_to_uci(token: &str, mover: Color) -> Result<String, NotationError> {
    let err = || NotationError::Parse(token.to_string());
    let rank = mover.home_rank();
    match token {
        "O-O" => return Ok(format!("e{rank}g{rank}")),
        "O-O-O" => return Ok(format!("e{rank}c{rank}")),
        _ => {}
    }
    if !token.is_ascii() {
        return Err(err());
    }
    let body = token.trim_end_matches(&['+', '#'][..]);
    let (body, promotion) = match body.split_once('=') {
        Some((head, p)) => {
            let mut chars = p.chars();
            let piece = chars
                .next()
                .and_then(PieceType::from_symbol)
                .filter(|_| chars.next().is_none())
                .ok_or_else(err)?;
            (head, piece.uci_char())
        }
        None => (body, None),
    };
    let body = match body.chars().next().and_then(PieceType::from_symbol) {
        Some(_) => &body[1..],
        None => body,
    };
    let squares = body.replacen('x', "", 1);
    if squares.len() != 4 {
        return Err(err());
    }
    let from = Square::from_algebraic(&squares[..2]).ok_or_else(err)?;
    let to = Square::from_algebraic(&squares[2..]).ok_or_else(err)?;
    let mut uci = format!("{from}{to}");
    uci.extend(promotion);
    Ok(uci)
}
