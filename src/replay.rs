// Replay module for analyzing logged decisions
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Re-run the move selection on historical boards
// 3. Check that each logged move is still one the selector could pick
// 4. Generate analysis reports
//
// Choices are random, so a logged move is judged against the candidate set of
// the replayed tier rather than the single replayed move.

use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::bot::Bot;
use crate::config::Config;
use crate::debug_logger::DecisionLogEntry;
use crate::moves::{Decision, Tier};
use crate::types::Direction;

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: i32,
    pub original_move: Direction,
    pub original_tier: Tier,
    pub replayed: Decision,
    /// Replayed move equals the logged one
    pub matches: bool,
    /// Logged move belongs to the replayed tier's candidates
    pub consistent: bool,
    pub computation_time_us: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub consistent: usize,
    pub inconsistent: usize,
    pub exact_matches: usize,
    pub consistency_rate: f64,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    bot: Bot,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine {
            bot: Bot::new(config),
            verbose,
        }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<DecisionLogEntry>, String> {
        let file = File::open(log_path.as_ref())
            .map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: DecisionLogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &DecisionLogEntry) -> Result<ReplayResult, String> {
        if self.verbose {
            info!("Replaying turn {}...", entry.turn);
        }

        let you = entry
            .board
            .snakes
            .iter()
            .find(|s| s.id == entry.you_id)
            .ok_or_else(|| format!("Snake with id '{}' not found in board state", entry.you_id))?;

        let original_move = Direction::parse(&entry.chosen_move)?;

        let start_time = Instant::now();
        let replayed = self.bot.decide(&entry.board, you, entry.turn);
        let computation_time_us = start_time.elapsed().as_micros();

        let consistent = replayed.tier == entry.tier
            && match replayed.tier {
                Tier::Cornered => original_move == replayed.direction,
                Tier::Preferred | Tier::Safe => replayed.candidates.contains(original_move),
            };

        let result = ReplayResult {
            turn: entry.turn,
            original_move,
            original_tier: entry.tier,
            replayed,
            matches: original_move == replayed.direction,
            consistent,
            computation_time_us,
        };

        if self.verbose {
            if consistent {
                info!(
                    "Turn {}: ✓ CONSISTENT - {} ({:?} tier, candidates {:?})",
                    entry.turn,
                    original_move.as_str(),
                    replayed.tier,
                    replayed.candidates.to_vec()
                );
            } else {
                warn!(
                    "Turn {}: ✗ INCONSISTENT - Logged: {} ({:?}), Replayed: {:?} tier with candidates {:?}",
                    entry.turn,
                    original_move.as_str(),
                    entry.tier,
                    replayed.tier,
                    replayed.candidates.to_vec()
                );
            }
        }

        Ok(result)
    }

    /// Replays all entries in a log file
    pub fn replay_all(&self, entries: &[DecisionLogEntry]) -> Vec<ReplayResult> {
        let mut results = Vec::new();

        for entry in entries {
            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", entry.turn, e);
                }
            }
        }

        results
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(
        &self,
        entries: &[DecisionLogEntry],
        turn_numbers: &[i32],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for turn_num in turn_numbers {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn_num)
                .ok_or_else(|| format!("Turn {} not found in log file", turn_num))?;

            results.push(self.replay_entry(entry)?);
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let consistent = results.iter().filter(|r| r.consistent).count();
        let exact_matches = results.iter().filter(|r| r.matches).count();
        let consistency_rate = if total_turns > 0 {
            (consistent as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            consistent,
            inconsistent: total_turns - consistent,
            exact_matches,
            consistency_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:    {}", stats.total_turns);
        println!(
            "Consistent:     {} ({:.1}%)",
            stats.consistent, stats.consistency_rate
        );
        println!("Inconsistent:   {}", stats.inconsistent);
        println!("Exact matches:  {}", stats.exact_matches);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_us as f64)
                .sum::<f64>()
                / results.len() as f64;
            println!("Average Computation Time:   {:.1}us\n", avg_time);
        }

        let inconsistent: Vec<_> = results.iter().filter(|r| !r.consistent).collect();
        if !inconsistent.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                 DETAILED INCONSISTENCIES");
            println!("═══════════════════════════════════════════════════════════");

            for result in inconsistent {
                println!(
                    "Turn {}: {} ({:?}) → {:?} tier {:?}",
                    result.turn,
                    result.original_move.as_str(),
                    result.original_tier,
                    result.replayed.tier,
                    result
                        .replayed
                        .candidates
                        .iter()
                        .map(|d| d.as_str())
                        .collect::<Vec<_>>()
                );
            }
            println!();
        }
    }

    /// Validates that specific expected moves were made
    pub fn validate_expected_moves(
        &self,
        entries: &[DecisionLogEntry],
        expected_moves: &[(i32, Vec<Direction>)], // (turn, acceptable_moves)
    ) -> Result<(), String> {
        for (turn, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn)
                .ok_or_else(|| format!("Turn {} not found in log", turn))?;

            let actual_move = Direction::parse(&entry.chosen_move)?;

            if !acceptable.contains(&actual_move) {
                return Err(format!(
                    "Turn {}: Expected one of {:?}, but got {}",
                    turn,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    actual_move.as_str()
                ));
            }
        }

        Ok(())
    }
}
