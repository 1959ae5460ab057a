//! UCI info line types.

use serde::{Deserialize, Serialize};

/// Score in centipawns or mate distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Score {
    /// Centipawn score (100 = 1 pawn advantage).
    Cp(i32),
    /// Mate in N moves (positive = side to move mates, negative = gets mated).
    Mate(i32),
}

impl Score {
    /// The same score seen from the other side.
    pub fn negated(self) -> Self {
        match self {
            Score::Cp(cp) => Score::Cp(-cp),
            Score::Mate(m) => Score::Mate(-m),
        }
    }
}

/// Search information from engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EngineInfo {
    /// Search depth in plies.
    pub depth: Option<u32>,
    /// Selective search depth.
    pub seldepth: Option<u32>,
    /// 1-based index of the principal variation this line reports.
    pub multipv: Option<u32>,
    /// Score evaluation.
    pub score: Option<Score>,
    /// Win/draw/loss per mille, reported when `UCI_ShowWDL` is on.
    pub wdl: Option<(u32, u32, u32)>,
    /// Nodes searched.
    pub nodes: Option<u64>,
    /// Nodes per second.
    pub nps: Option<u64>,
    /// Time spent in milliseconds.
    pub time: Option<u64>,
    /// Hash table usage (per mille).
    pub hashfull: Option<u32>,
    /// Principal variation (best line found).
    pub pv: Vec<String>,
    /// Current move being searched.
    pub currmove: Option<String>,
    /// Current move number.
    pub currmovenumber: Option<u32>,
    /// Arbitrary string info.
    pub string: Option<String>,
}

impl EngineInfo {
    /// Create a new empty info.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a UCI info line. Returns `None` if the line is not an info line.
    ///
    /// Unknown tokens are skipped and unparseable values leave their field
    /// unset, so `score cp abc` yields `score: None`.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().peekable();
        if parts.next() != Some("info") {
            return None;
        }

        let mut info = EngineInfo::new();
        while let Some(token) = parts.next() {
            match token {
                "depth" => info.depth = parts.next().and_then(|s| s.parse().ok()),
                "seldepth" => info.seldepth = parts.next().and_then(|s| s.parse().ok()),
                "multipv" => info.multipv = parts.next().and_then(|s| s.parse().ok()),
                "nodes" => info.nodes = parts.next().and_then(|s| s.parse().ok()),
                "nps" => info.nps = parts.next().and_then(|s| s.parse().ok()),
                "time" => info.time = parts.next().and_then(|s| s.parse().ok()),
                "hashfull" => info.hashfull = parts.next().and_then(|s| s.parse().ok()),
                "currmovenumber" => {
                    info.currmovenumber = parts.next().and_then(|s| s.parse().ok())
                }
                "currmove" => info.currmove = parts.next().map(str::to_string),
                "score" => {
                    let kind = parts.next();
                    let value = parts.next().and_then(|s| s.parse().ok());
                    info.score = match (kind, value) {
                        (Some("cp"), Some(cp)) => Some(Score::Cp(cp)),
                        (Some("mate"), Some(m)) => Some(Score::Mate(m)),
                        _ => None,
                    };
                    // Bound markers trail the score value.
                    while matches!(parts.peek(), Some(&"lowerbound") | Some(&"upperbound")) {
                        parts.next();
                    }
                }
                "wdl" => {
                    let mut next = || parts.next().and_then(|s| s.parse().ok());
                    info.wdl = match (next(), next(), next()) {
                        (Some(w), Some(d), Some(l)) => Some((w, d, l)),
                        _ => None,
                    };
                }
                "pv" => {
                    // Collect moves until another keyword or end of line.
                    while let Some(mv) = parts.next_if(|s| !is_info_keyword(s)) {
                        info.pv.push(mv.to_string());
                    }
                }
                "string" => {
                    // Rest of line is the string.
                    info.string = Some(parts.by_ref().collect::<Vec<_>>().join(" "));
                }
                _ => {}
            }
        }

        Some(info)
    }
}

fn is_info_keyword(s: &str) -> bool {
    matches!(
        s,
        "depth"
            | "seldepth"
            | "multipv"
            | "score"
            | "wdl"
            | "nodes"
            | "nps"
            | "time"
            | "hashfull"
            | "tbhits"
            | "pv"
            | "currmove"
            | "currmovenumber"
            | "string"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const STOCKFISH_LINE: &str = "info depth 20 seldepth 27 multipv 2 score cp -35 wdl 12 880 108 \
        nodes 1524871 nps 1521827 hashfull 512 tbhits 0 time 1002 pv e7e5 g1f3 b8c6";

    #[test]
    fn parse_info() {
        let line = "info depth 12 score cp 30 nodes 125000 nps 500000 pv e2e4 e7e5 g1f3";
        let info = EngineInfo::parse(line).unwrap();

        assert_eq!(info.depth, Some(12));
        assert_eq!(info.score, Some(Score::Cp(30)));
        assert_eq!(info.nodes, Some(125000));
        assert_eq!(info.nps, Some(500000));
        assert_eq!(info.pv, vec!["e2e4", "e7e5", "g1f3"]);
    }

    #[test]
    fn parse_stockfish_multipv_line() {
        let info = EngineInfo::parse(STOCKFISH_LINE).unwrap();

        assert_eq!(info.depth, Some(20));
        assert_eq!(info.seldepth, Some(27));
        assert_eq!(info.multipv, Some(2));
        assert_eq!(info.score, Some(Score::Cp(-35)));
        assert_eq!(info.wdl, Some((12, 880, 108)));
        assert_eq!(info.hashfull, Some(512));
        assert_eq!(info.time, Some(1002));
        assert_eq!(info.pv, vec!["e7e5", "g1f3", "b8c6"]);
    }

    #[test]
    fn parse_mate_score() {
        let line = "info depth 20 score mate -3 pv e2e4";
        let info = EngineInfo::parse(line).unwrap();

        assert_eq!(info.score, Some(Score::Mate(-3)));
    }

    #[test]
    fn parse_skips_bound_markers() {
        let info = EngineInfo::parse("info depth 5 score cp 17 lowerbound nodes 900").unwrap();
        assert_eq!(info.score, Some(Score::Cp(17)));
        assert_eq!(info.nodes, Some(900));
    }

    #[test]
    fn parse_string_consumes_rest() {
        let info = EngineInfo::parse("info string NNUE evaluation using nn.nnue").unwrap();
        assert_eq!(info.string.as_deref(), Some("NNUE evaluation using nn.nnue"));
    }

    #[test]
    fn parse_rejects_non_info_lines() {
        assert!(EngineInfo::parse("bestmove e2e4").is_none());
        assert!(EngineInfo::parse("information").is_none());
        assert!(EngineInfo::parse("").is_none());
    }

    #[test]
    fn parse_bad_numbers_leave_fields_unset() {
        let info = EngineInfo::parse("info depth x score cp abc pv").unwrap();
        assert_eq!(info.depth, None);
        assert_eq!(info.score, None);
        assert!(info.pv.is_empty());
    }

    #[test]
    fn negated_flips_both_kinds() {
        assert_eq!(Score::Cp(35).negated(), Score::Cp(-35));
        assert_eq!(Score::Mate(-2).negated(), Score::Mate(2));
    }
}
