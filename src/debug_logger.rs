// Debug logging module for asynchronous decision logging
//
// Fire-and-forget: /move never waits on the disk. Each decision is written
// as one line of a JSONL file that the replay tool can read back.

use log::error;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::types::{Board, GameState, MoveDecision};

/// Strategy tag for turns answered with the fallback after the budget ran out
pub const TIMED_OUT: &str = "timeout";

/// One logged decision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub turn: i32,
    pub game_id: String,
    pub you_id: String,
    pub strategy: String,
    pub chosen_move: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shout: Option<String>,
    pub board: Board,
    pub timestamp: String,
}

impl LogEntry {
    pub fn new(state: &GameState, strategy: &str, decision: &MoveDecision) -> Self {
        LogEntry {
            turn: state.turn,
            game_id: state.game.id.clone(),
            you_id: state.you.id.clone(),
            strategy: strategy.to_string(),
            chosen_move: decision.direction.as_str().to_string(),
            shout: decision.shout.clone(),
            board: state.board.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Shared debug logger state
/// Uses Arc<Mutex<File>> so concurrent games append whole lines
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Logs a move decision without blocking the caller
    pub fn log_move(&self, state: &GameState, strategy: &str, decision: &MoveDecision) {
        if !self.enabled {
            return;
        }

        let entry = LogEntry::new(state, strategy, decision);
        let logger = self.clone();
        tokio::spawn(async move {
            logger.write_entry(&entry).await;
        });
    }

    /// Appends one entry and flushes
    pub async fn write_entry(&self, entry: &LogEntry) {
        let mut file_guard = self.file.lock().await;
        let Some(file) = file_guard.as_mut() else {
            return;
        };

        let json_line = match serde_json::to_string(entry) {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to serialize debug log entry: {}", e);
                return;
            }
        };

        if let Err(e) = file.write_all(format!("{}\n", json_line).as_bytes()).await {
            error!("Failed to write debug log entry: {}", e);
        } else if let Err(e) = file.flush().await {
            error!("Failed to flush debug log: {}", e);
        }
    }
}
