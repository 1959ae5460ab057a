//! Position evaluator: walks a game's positions through an [`Engine`].

use crate::engine::{Engine, EngineError};
use crate::evaluation::{GameEvaluation, MoveEval};
use std::io::{BufRead, Write};
use uci::EngineInfo;

impl<R: BufRead, W: Write> Engine<R, W> {
    /// Evaluate the start position and the position after every move.
    ///
    /// The result has `moves.len() + 1` entries. A ply whose output cannot
    /// be parsed is `None`; the walk still continues. Pipe failures abort
    /// with an error.
    pub fn eval_game<S: AsRef<str>>(
        &mut self,
        moves: &[S],
    ) -> Result<GameEvaluation, EngineError> {
        self.new_game()?;
        let mut evaluation = Vec::with_capacity(moves.len() + 1);
        for ply in 0..=moves.len() {
            let evals = self.query(&moves[..ply])?;
            if evals.is_none() {
                tracing::warn!(ply, "no evaluation for position");
            }
            evaluation.push(evals);
        }
        tracing::debug!(
            plies = evaluation.len(),
            scored = evaluation.iter().filter(|e| e.is_some()).count(),
            "game evaluated"
        );
        Ok(evaluation)
    }

    /// Evaluate the single position after the space-separated UCI `moves`.
    pub fn eval_position(&mut self, moves: &str) -> Result<Option<Vec<MoveEval>>, EngineError> {
        self.new_game()?;
        let moves: Vec<&str> = moves.split_whitespace().collect();
        let evals = self.query(&moves)?;
        if evals.is_none() {
            tracing::warn!(ply = moves.len(), "no evaluation for position");
        }
        Ok(evals)
    }

    fn query<S: AsRef<str>>(
        &mut self,
        moves: &[S],
    ) -> Result<Option<Vec<MoveEval>>, EngineError> {
        let lines = self.search(moves)?;
        let black_to_move = moves.len() % 2 == 1;
        Ok(parse_response(&lines, self.config().multi_pv, black_to_move))
    }
}

/// Parse the `multi_pv` info lines directly before the final `bestmove`.
///
/// Returns `None` when the response did not end in `bestmove`, is too short,
/// or any of those lines lacks a depth or score. Entries are ordered by
/// `pv_index`.
pub fn parse_response(
    lines: &[String],
    multi_pv: u32,
    black_to_move: bool,
) -> Option<Vec<MoveEval>> {
    let (last, rest) = lines.split_last()?;
    if !last.trim_start().starts_with("bestmove") {
        return None;
    }
    let count = usize::try_from(multi_pv).ok()?;
    let start = rest.len().checked_sub(count)?;
    let mut evals = rest[start..]
        .iter()
        .map(|line| {
            EngineInfo::parse(line).and_then(|info| MoveEval::from_info(&info, black_to_move))
        })
        .collect::<Option<Vec<_>>>()?;
    evals.sort_by_key(|e| e.pv_index);
    Some(evals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::engine::tests::scripted;
    use uci::Score;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    const MULTI_PV_3: &str = "\
info string NNUE evaluation using nn-1111cefa1111.nnue
info depth 1 seldepth 1 multipv 1 score cp 18 nodes 20 nps 20000 time 1 pv e2e4
info depth 20 seldepth 27 multipv 1 score cp 35 wdl 60 900 40 nodes 1500000 time 998 pv e2e4 e7e5 g1f3
info depth 20 seldepth 25 multipv 2 score cp 30 wdl 50 910 40 nodes 1500000 time 998 pv d2d4 d7d5
info depth 19 seldepth 24 multipv 3 score cp 22 wdl 40 920 40 nodes 1500000 time 998 pv g1f3 g8f6
bestmove e2e4 ponder e7e5";

    #[test]
    fn parses_final_multipv_block() {
        let evals = parse_response(&lines(MULTI_PV_3), 3, false).unwrap();
        assert_eq!(evals.len(), 3);
        assert_eq!(
            evals.iter().map(|e| e.pv_index).collect::<Vec<_>>(),
            [1, 2, 3]
        );
        assert_eq!(evals[0].score, Score::Cp(35));
        assert_eq!(evals[0].depth, 20);
        assert_eq!(evals[0].best_line, ["e2e4", "e7e5", "g1f3"]);
        assert_eq!(evals[2].depth, 19);
        assert_eq!(evals[1].wdl, Some((50, 910, 40)));
    }

    #[test]
    fn single_pv_takes_last_info_line() {
        let evals = parse_response(&lines(MULTI_PV_3), 1, false).unwrap();
        assert_eq!(evals.len(), 1);
        assert_eq!(evals[0].pv_index, 3);
    }

    #[test]
    fn orders_lines_by_pv_index() {
        let response = lines(
            "info depth 8 multipv 2 score cp -10 pv a2a3\n\
             info depth 8 multipv 1 score cp 5 pv e2e4\n\
             bestmove e2e4",
        );
        let evals = parse_response(&response, 2, false).unwrap();
        assert_eq!(evals[0].best_line, ["e2e4"]);
        assert_eq!(evals[1].best_line, ["a2a3"]);
    }

    #[test]
    fn black_to_move_negates_scores() {
        let response = lines(
            "info depth 9 score mate 2 pv d8h4\n\
             info depth 9 score cp 120 pv e7e5\n\
             bestmove e7e5",
        );
        let evals = parse_response(&response, 1, true).unwrap();
        assert_eq!(evals[0].score, Score::Cp(-120));

        let response = lines("info depth 9 score mate 2 pv d8h4\nbestmove d8h4");
        let evals = parse_response(&response, 1, true).unwrap();
        assert_eq!(evals[0].score, Score::Mate(-2));
    }

    #[test]
    fn malformed_responses_are_none() {
        let parse = |text: &str, multi_pv| parse_response(&lines(text), multi_pv, false);
        // Too few lines for the requested PV count.
        assert!(parse("info depth 5 score cp 1 pv e2e4\nbestmove e2e4", 2).is_none());
        // Stream ended before bestmove.
        assert!(parse("info depth 5 score cp 1 pv e2e4", 1).is_none());
        // Line without a score.
        assert!(parse("info depth 5 currmove e2e4\nbestmove e2e4", 1).is_none());
        // Score value is not a number.
        assert!(parse("info depth 5 score cp x pv e2e4\nbestmove e2e4", 1).is_none());
        assert!(parse_response(&[], 1, false).is_none());
    }

    #[test]
    fn eval_game_walks_every_prefix() {
        let output = "\
info depth 10 score cp 30 pv e2e4
bestmove e2e4
info depth 10 score cp 40 pv e7e5
bestmove e7e5
garbage
bestmove g1f3
";
        let (mut engine, log) = scripted(EngineConfig::default(), output);
        let evaluation = engine.eval_game(&["e2e4", "e7e5"]).unwrap();

        assert_eq!(evaluation.len(), 3);
        assert_eq!(evaluation[0].as_ref().unwrap()[0].score, Score::Cp(30));
        // Black to move after 1. e4: the engine's +40 is bad for White.
        assert_eq!(evaluation[1].as_ref().unwrap()[0].score, Score::Cp(-40));
        assert!(evaluation[2].is_none());

        let sent = log.lines();
        let walk: Vec<&str> = sent
            .iter()
            .skip_while(|c| *c != "ucinewgame")
            .map(String::as_str)
            .collect();
        assert_eq!(
            walk,
            [
                "ucinewgame",
                "position startpos",
                "go depth 20 movetime 1000",
                "position startpos moves e2e4",
                "go depth 20 movetime 1000",
                "position startpos moves e2e4 e7e5",
                "go depth 20 movetime 1000",
            ]
        );
    }

    #[test]
    fn eval_game_after_engine_exit_is_all_none() {
        let (mut engine, _log) = scripted(EngineConfig::default(), "");
        let evaluation = engine.eval_game(&["e2e4"]).unwrap();
        assert_eq!(evaluation, vec![None, None]);
    }

    #[test]
    fn eval_position_uses_move_parity() {
        let (mut engine, log) = scripted(
            EngineConfig::default(),
            "info depth 14 multipv 1 score cp 25 pv g1f3\nbestmove g1f3\n",
        );
        let evals = engine.eval_position("e2e4 e7e5").unwrap().unwrap();
        assert_eq!(evals[0].score, Score::Cp(25));
        assert_eq!(evals[0].pv_index, 1);

        let sent = log.lines();
        assert_eq!(sent[sent.len() - 3], "ucinewgame");
        assert_eq!(sent[sent.len() - 2], "position startpos moves e2e4 e7e5");
    }
}
