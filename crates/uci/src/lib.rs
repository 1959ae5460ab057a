//! UCI (Universal Chess Interface) protocol library, host side.
//!
//! This crate provides types and parsing for driving a UCI engine from a GUI
//! or analysis tool, plus a blocking line channel over the engine's pipes.
//!
//! # Outbound commands
//!
//! - `uci` - Initialize engine, get id and options
//! - `setoption name <name> value <value>` - Configure the engine
//! - `isready` / `readyok` - Synchronization
//! - `ucinewgame` - Following positions belong to a new game
//! - `position startpos [moves <move>...]` - Set position
//! - `go [depth <d>] [movetime <ms>]` - Start search
//! - `quit` - Exit engine
//!
//! # Sentinels
//!
//! [`UciChannel::read_until_sentinel`] buffers engine output until a line
//! contains `uciok`, `readyok`, `bestmove` or the Stockfish startup banner.

mod command;
mod info;

pub use command::{GoOptions, GuiCommand};
pub use info::{EngineInfo, Score};

use std::io::{BufRead, Write};
use thiserror::Error;

/// Fragments that end a blocking read.
const SENTINELS: [&str; 4] = ["uciok", "readyok", "bestmove", "by the Stockfish developers"];

#[derive(Error, Debug)]
pub enum UciError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Engine closed its output")]
    Closed,
}

/// True if `line` ends a response: a handshake acknowledgement, a best move
/// or the startup banner.
pub fn is_sentinel(line: &str) -> bool {
    SENTINELS.iter().any(|s| line.contains(s))
}

/// Messages sent from engine to GUI.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineMessage {
    /// Engine identification.
    Id { name: Option<String>, author: Option<String> },
    /// UCI initialization complete.
    UciOk,
    /// Engine is ready.
    ReadyOk,
    /// Search information.
    Info(EngineInfo),
    /// Best move found.
    BestMove { mv: String, ponder: Option<String> },
    /// Anything else (banner, `option` declarations).
    Other(String),
}

impl EngineMessage {
    /// Classify one line of engine output.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("uciok") => EngineMessage::UciOk,
            Some("readyok") => EngineMessage::ReadyOk,
            Some("info") => match EngineInfo::parse(line) {
                Some(info) => EngineMessage::Info(info),
                None => EngineMessage::Other(line.to_string()),
            },
            Some("id") => {
                let rest = |prefix: &str| line.strip_prefix(prefix).map(|s| s.trim().to_string());
                EngineMessage::Id {
                    name: rest("id name "),
                    author: rest("id author "),
                }
            }
            Some("bestmove") => match parts.next() {
                Some(mv) => {
                    let ponder = match parts.next() {
                        Some("ponder") => parts.next().map(str::to_string),
                        _ => None,
                    };
                    EngineMessage::BestMove {
                        mv: mv.to_string(),
                        ponder,
                    }
                }
                None => EngineMessage::Other(line.to_string()),
            },
            _ => EngineMessage::Other(line.to_string()),
        }
    }
}

/// Blocking line channel to a UCI engine.
///
/// Every command is written as one line and flushed immediately. Reads
/// block the calling thread; there is no timeout.
pub struct UciChannel<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> UciChannel<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Send a command to the engine.
    pub fn send(&mut self, cmd: &GuiCommand) -> Result<(), UciError> {
        self.send_line(&cmd.to_uci())
    }

    /// Write `line` followed by a newline and flush.
    pub fn send_line(&mut self, line: &str) -> Result<(), UciError> {
        tracing::debug!(command = line, "uci >");
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Read one line without its terminator. `None` at end of stream.
    pub fn read_line(&mut self) -> Result<Option<String>, UciError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let len = line.trim_end_matches(&['\r', '\n'][..]).len();
        line.truncate(len);
        tracing::trace!(line = %line, "uci <");
        Ok(Some(line))
    }

    /// Read lines until one satisfies [`is_sentinel`] or the stream ends.
    ///
    /// The sentinel line is the last element. At end of stream whatever was
    /// buffered is returned, possibly nothing.
    pub fn read_until_sentinel(&mut self) -> Result<Vec<String>, UciError> {
        let mut lines = Vec::new();
        while let Some(line) = self.read_line()? {
            let done = is_sentinel(&line);
            lines.push(line);
            if done {
                tracing::debug!(sentinel = %lines[lines.len() - 1], "uci sentinel");
                break;
            }
        }
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn channel(script: &str) -> UciChannel<Cursor<Vec<u8>>, Vec<u8>> {
        UciChannel::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn sentinel_fragments() {
        assert!(is_sentinel("uciok"));
        assert!(is_sentinel("readyok"));
        assert!(is_sentinel("bestmove e2e4 ponder e7e5"));
        assert!(is_sentinel(
            "Stockfish 17 by the Stockfish developers (see AUTHORS file)"
        ));
        assert!(!is_sentinel("info depth 1 score cp 20 pv e2e4"));
        assert!(!is_sentinel("id name Stockfish 17"));
    }

    #[test]
    fn send_writes_line_and_newline() {
        let mut out = Vec::new();
        let mut ch = UciChannel::new(&b""[..], &mut out);
        ch.send(&GuiCommand::IsReady).unwrap();
        ch.send_line("position startpos moves e2e4").unwrap();
        drop(ch);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "isready\nposition startpos moves e2e4\n"
        );
    }

    #[test]
    fn reads_in_sentinel_batches() {
        let mut ch = channel(
            "Stockfish 17 by the Stockfish developers (see AUTHORS file)\n\
             id name Stockfish 17\r\n\
             option name Threads type spin default 1 min 1 max 1024\n\
             uciok\n\
             readyok\n",
        );
        assert_eq!(ch.read_until_sentinel().unwrap().len(), 1);

        let batch = ch.read_until_sentinel().unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0], "id name Stockfish 17");
        assert_eq!(batch[2], "uciok");

        assert_eq!(ch.read_until_sentinel().unwrap(), ["readyok"]);
        assert!(ch.read_until_sentinel().unwrap().is_empty());
    }

    #[test]
    fn end_of_stream_returns_partial_buffer() {
        let mut ch = channel("info depth 1 score cp 13 pv e2e4\ninfo depth 2");
        let batch = ch.read_until_sentinel().unwrap();
        assert_eq!(batch, ["info depth 1 score cp 13 pv e2e4", "info depth 2"]);
        assert_eq!(ch.read_line().unwrap(), None);
    }

    #[test]
    fn parse_engine_messages() {
        assert_eq!(EngineMessage::parse("uciok"), EngineMessage::UciOk);
        assert_eq!(EngineMessage::parse("readyok\n"), EngineMessage::ReadyOk);
        assert_eq!(
            EngineMessage::parse("id name Stockfish 17"),
            EngineMessage::Id {
                name: Some("Stockfish 17".to_string()),
                author: None,
            }
        );
        assert_eq!(
            EngineMessage::parse("bestmove g1f3 ponder b8c6"),
            EngineMessage::BestMove {
                mv: "g1f3".to_string(),
                ponder: Some("b8c6".to_string()),
            }
        );
        assert_eq!(
            EngineMessage::parse("bestmove (none)"),
            EngineMessage::BestMove {
                mv: "(none)".to_string(),
                ponder: None,
            }
        );
        match EngineMessage::parse("info depth 3 multipv 1 score mate 2 pv d1h5") {
            EngineMessage::Info(info) => assert_eq!(info.score, Some(Score::Mate(2))),
            other => panic!("expected info, got {other:?}"),
        }
        assert!(matches!(
            EngineMessage::parse("option name Hash type spin"),
            EngineMessage::Other(_)
        ));
    }
}
