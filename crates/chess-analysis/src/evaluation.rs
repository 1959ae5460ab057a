//! Chess position evaluation types.

use serde::{Deserialize, Serialize};
use uci::{EngineInfo, Score};

/// One principal variation reported for a position.
///
/// Scores are from White's point of view: the evaluator flips the engine's
/// side-to-move scores when Black is to move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEval {
    /// Search depth in plies.
    pub depth: u32,
    /// Selective search depth, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seldepth: Option<u32>,
    /// Nodes searched, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<u64>,
    /// Centipawn or mate score (positive = White better).
    pub score: Score,
    /// Win/draw/loss per mille from White's point of view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wdl: Option<(u32, u32, u32)>,
    /// Principal variation in UCI notation.
    pub best_line: Vec<String>,
    /// 1-based index among the requested lines.
    pub pv_index: u32,
}

impl MoveEval {
    /// Build an evaluation from a parsed info line. Needs at least a depth
    /// and a score. A missing `multipv` token means the single line 1.
    pub fn from_info(info: &EngineInfo, black_to_move: bool) -> Option<Self> {
        let depth = info.depth?;
        let score = info.score?;
        let (score, wdl) = if black_to_move {
            (score.negated(), info.wdl.map(|(w, d, l)| (l, d, w)))
        } else {
            (score, info.wdl)
        };
        Some(Self {
            depth,
            seldepth: info.seldepth,
            nodes: info.nodes,
            score,
            wdl,
            best_line: info.pv.clone(),
            pv_index: info.multipv.unwrap_or(1),
        })
    }
}

/// Per-ply evaluations of a game, starting with the initial position.
///
/// `None` marks a ply whose engine output could not be parsed.
pub type GameEvaluation = Vec<Option<Vec<MoveEval>>>;

/// The entry for `pv_index`, or the first entry if none matches.
pub fn get_eval_by_pv(evals: &[MoveEval], pv_index: u32) -> Option<&MoveEval> {
    evals
        .iter()
        .find(|e| e.pv_index == pv_index)
        .or_else(|| evals.first())
}
