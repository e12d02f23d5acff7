// Replay module for re-running logged decisions
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Re-run the scored policy on each logged board
// 3. Compare logged vs replayed moves
// 4. Report match statistics
//
// Only entries logged by the scored strategy can be replayed; the other
// strategies depend on per-game history that the log does not capture.

use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::config::{Config, StrategyKind};
use crate::debug_logger::LogEntry;
use crate::selector::{self, Rule};
use crate::types::{Direction, Game, GameState};

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: i32,
    pub original_move: Direction,
    pub replayed_move: Direction,
    pub rule: Rule,
    pub matches: bool,
    pub computation_time_us: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    config: Config,
    verbose: bool,
}

impl ReplayEngine {
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine { config, verbose }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, String> {
        let file = File::open(log_path.as_ref())
            .map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Rebuilds the snapshot the logged decision was made on
    pub fn state_for(entry: &LogEntry) -> Result<GameState, String> {
        let you = entry
            .board
            .snakes
            .iter()
            .find(|s| s.id == entry.you_id)
            .ok_or_else(|| format!("Snake with id '{}' not found in board state", entry.you_id))?
            .clone();

        Ok(GameState {
            game: Game {
                id: entry.game_id.clone(),
                ruleset: Default::default(),
                timeout: 0,
                source: String::new(),
            },
            turn: entry.turn,
            board: entry.board.clone(),
            you,
        })
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &LogEntry) -> Result<ReplayResult, String> {
        if entry.strategy != StrategyKind::Scored.as_str() {
            return Err(format!(
                "turn {} was played by the '{}' strategy and cannot be replayed",
                entry.turn, entry.strategy
            ));
        }

        let original_move: Direction = entry.chosen_move.parse()?;
        let state = Self::state_for(entry)?;

        let start_time = Instant::now();
        let selection = selector::select(&state, &self.config.policy);
        let computation_time_us = start_time.elapsed().as_micros();

        let replayed_move = selection.decision.direction;
        let matches = original_move == replayed_move;

        if self.verbose {
            if matches {
                info!(
                    "Turn {}: MATCH - {} ({}, {}us)",
                    entry.turn,
                    replayed_move,
                    selection.rule.as_str(),
                    computation_time_us
                );
            } else {
                warn!(
                    "Turn {}: MISMATCH - Original: {}, Replayed: {} ({}, {}us)",
                    entry.turn,
                    original_move,
                    replayed_move,
                    selection.rule.as_str(),
                    computation_time_us
                );
            }
        }

        Ok(ReplayResult {
            turn: entry.turn,
            original_move,
            replayed_move,
            rule: selection.rule,
            matches,
            computation_time_us,
        })
    }

    /// Replays every entry, skipping (with a warning) those that fail
    pub fn replay_all(&self, entries: &[LogEntry]) -> Vec<ReplayResult> {
        entries
            .iter()
            .filter_map(|entry| match self.replay_entry(entry) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("Skipping turn {}: {}", entry.turn, e);
                    None
                }
            })
            .collect()
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(
        &self,
        entries: &[LogEntry],
        turn_numbers: &[i32],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for turn_num in turn_numbers {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn_num)
                .ok_or_else(|| format!("Turn {} not found in log file", turn_num))?;

            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => warn!("Skipping turn {}: {}", turn_num, e),
            }
        }

        Ok(results)
    }

    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_turns - matches;
        let match_rate = if total_turns > 0 {
            (matches as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            matches,
            mismatches,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:    {}", stats.total_turns);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_us as f64)
                .sum::<f64>()
                / results.len() as f64;
            println!("Average Decision Time:   {:.1}us\n", avg_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Turn {}: {} → {} (rule: {})",
                    result.turn,
                    result.original_move,
                    result.replayed_move,
                    result.rule.as_str()
                );
            }
            println!();
        }
    }

    /// Checks that the logged move at each listed turn is one of the
    /// acceptable ones
    pub fn validate_expected_moves(
        &self,
        entries: &[LogEntry],
        expected_moves: &[(i32, Vec<Direction>)],
    ) -> Result<(), String> {
        for (turn, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn)
                .ok_or_else(|| format!("Turn {} not found in log", turn))?;

            let actual_move: Direction = entry.chosen_move.parse()?;

            if !acceptable.contains(&actual_move) {
                return Err(format!(
                    "Turn {}: Expected one of {:?}, but got {}",
                    turn,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    actual_move
                ));
            }
        }

        Ok(())
    }
}
