//! UCI engine process driver.

use crate::config::EngineConfig;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, ExitStatus, Stdio};
use thiserror::Error;
use uci::{EngineMessage, GoOptions, GuiCommand, UciChannel, UciError};

/// Maximum number of lines to read before giving up on a handshake response.
pub const MAX_UCI_LINES: usize = 1000;

/// Errors that can occur when working with chess engines.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The configuration cannot start an engine.
    #[error("Invalid engine config: {0}")]
    Config(String),
    /// Failed to spawn or wait for the engine process.
    #[error("Failed to spawn engine: {0}")]
    Spawn(#[from] std::io::Error),
    /// Engine returned an unexpected or overlong response.
    #[error("Engine protocol error: {0}")]
    Protocol(String),
    /// Pipe I/O with the engine failed.
    #[error(transparent)]
    Uci(#[from] UciError),
}

/// An engine running as a child process.
pub type ProcessEngine = Engine<BufReader<ChildStdout>, ChildStdin>;

/// A UCI engine that has completed its handshake.
///
/// The driver is strictly request/response: each call sends its commands and
/// blocks until the engine's sentinel line. One instance serves one caller
/// at a time; evaluate concurrent games with one engine each.
pub struct Engine<R: BufRead, W: Write> {
    channel: UciChannel<R, W>,
    process: Option<Child>,
    config: EngineConfig,
    name: String,
    quit_sent: bool,
}

impl ProcessEngine {
    /// Spawn the configured executable and run the UCI handshake.
    ///
    /// # Errors
    ///
    /// - `EngineError::Config` if the config fails validation (e.g. empty path)
    /// - `EngineError::Spawn` if the process fails to start
    /// - `EngineError::Protocol` / `EngineError::Uci` if the handshake fails
    pub fn start(config: EngineConfig) -> Result<Self, EngineError> {
        config
            .validate()
            .map_err(|e| EngineError::Config(e.to_string()))?;

        let mut process = Command::new(&config.path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let pipes = process.stdin.take().zip(process.stdout.take());
        let Some((stdin, stdout)) = pipes else {
            let _ = process.kill();
            let _ = process.wait();
            return Err(EngineError::Protocol("engine pipes unavailable".to_string()));
        };

        tracing::info!(path = %config.path.display(), pid = process.id(), "engine started");
        let channel = UciChannel::new(BufReader::new(stdout), stdin);
        Self::handshake(channel, Some(process), config)
    }
}

impl<R: BufRead, W: Write> Engine<R, W> {
    /// Run the handshake over an existing channel, e.g. a scripted one.
    pub fn with_channel(
        channel: UciChannel<R, W>,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        config
            .validate()
            .map_err(|e| EngineError::Config(e.to_string()))?;
        Self::handshake(channel, None, config)
    }

    fn handshake(
        channel: UciChannel<R, W>,
        process: Option<Child>,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        let mut engine = Self {
            channel,
            process,
            config,
            name: String::new(),
            quit_sent: false,
        };

        engine.channel.send(&GuiCommand::Uci)?;
        let lines = engine.read_until("uciok")?;
        engine.name = lines
            .iter()
            .find_map(|line| match EngineMessage::parse(line) {
                EngineMessage::Id { name: Some(name), .. } => Some(name),
                _ => None,
            })
            .unwrap_or_else(|| "Unknown Engine".to_string());

        for option in engine.option_commands() {
            engine.channel.send(&option)?;
        }
        engine.channel.send(&GuiCommand::IsReady)?;
        engine.read_until("readyok")?;

        tracing::info!(
            engine = %engine.name,
            threads = engine.config.threads,
            hash_mb = engine.config.hash_mb,
            multi_pv = engine.config.multi_pv,
            "engine ready"
        );
        Ok(engine)
    }

    fn option_commands(&self) -> Vec<GuiCommand> {
        let mut options = vec![
            GuiCommand::set_option("Threads", self.config.threads),
            GuiCommand::set_option("Hash", self.config.hash_mb),
            GuiCommand::set_option("MultiPV", self.config.multi_pv),
        ];
        if let Some(path) = &self.config.syzygy_path {
            options.push(GuiCommand::set_option("SyzygyPath", path.display()));
        }
        options.push(GuiCommand::set_option("UCI_ShowWDL", true));
        options
    }

    /// Read sentinel batches until one ends with a line containing `token`.
    fn read_until(&mut self, token: &str) -> Result<Vec<String>, EngineError> {
        let mut lines = Vec::new();
        loop {
            let batch = self.channel.read_until_sentinel()?;
            let done = match batch.last() {
                Some(last) => last.contains(token),
                None => return Err(UciError::Closed.into()),
            };
            lines.extend(batch);
            if done {
                return Ok(lines);
            }
            if lines.len() > MAX_UCI_LINES {
                return Err(EngineError::Protocol(format!(
                    "no {token} within {MAX_UCI_LINES} lines"
                )));
            }
        }
    }

    /// Returns the engine's name as reported via `id name`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The settings currently in effect.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Update one setting and relay it to the engine as `setoption`.
    ///
    /// The handshake is not repeated.
    pub fn change_option(&mut self, name: &str, value: &str) -> Result<(), EngineError> {
        self.config = self
            .config
            .with_option(name, value)
            .map_err(|e| EngineError::Config(e.to_string()))?;
        self.channel.send(&GuiCommand::set_option(name, value))?;
        tracing::info!(option = name, value, "engine option changed");
        Ok(())
    }

    /// Tell the engine the following positions belong to a new game.
    pub fn new_game(&mut self) -> Result<(), EngineError> {
        self.channel.send(&GuiCommand::UciNewGame)?;
        Ok(())
    }

    /// Search the position after `moves` from the start position and return
    /// everything the engine printed, ending with the `bestmove` line unless
    /// the stream ended first.
    pub fn search<S: AsRef<str>>(&mut self, moves: &[S]) -> Result<Vec<String>, EngineError> {
        self.channel.send(&GuiCommand::Position {
            moves: moves.iter().map(|m| m.as_ref().to_string()).collect(),
        })?;
        self.channel.send(&GuiCommand::Go(GoOptions {
            depth: Some(self.config.depth),
            movetime: Some(self.config.movetime_ms),
        }))?;
        Ok(self.channel.read_until_sentinel()?)
    }

    /// Send `quit` and wait for the process to exit.
    ///
    /// Returns `None` for engines that are not child processes.
    pub fn close(mut self) -> Result<Option<ExitStatus>, EngineError> {
        self.quit_sent = true;
        self.channel.send(&GuiCommand::Quit)?;
        let status = match self.process.take() {
            Some(mut process) => Some(process.wait()?),
            None => None,
        };
        tracing::info!(engine = %self.name, ?status, "engine closed");
        Ok(status)
    }
}

impl<R: BufRead, W: Write> Drop for Engine<R, W> {
    fn drop(&mut self) {
        if !self.quit_sent {
            let _ = self.channel.send(&GuiCommand::Quit);
        }
        if let Some(mut process) = self.process.take() {
            let _ = process.wait();
        }
    }
}
