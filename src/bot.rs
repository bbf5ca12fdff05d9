// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// This file is the home of the Battlesnake's endpoint logic. The move itself is
// picked by the filters in `moves`; this layer builds the grid, picks an rng and
// reports what happened.
// For more info see docs.battlesnake.com

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use std::time::Instant;

use crate::config::Config;
use crate::debug_logger::{DebugLogger, DecisionLogEntry};
use crate::grid::OccupancyGrid;
use crate::moves::{self, Decision, Tier};
use crate::types::{Battlesnake, Board, Game};

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration and no debug log
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Bot {
            config,
            debug_logger: DebugLogger::disabled(),
        }
    }

    /// Creates a Bot that records every decision through `debug_logger`
    pub fn with_debug_logger(config: Config, debug_logger: DebugLogger) -> Self {
        Bot {
            config,
            debug_logger,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        let appearance = &self.config.appearance;
        json!({
            "apiversion": appearance.apiversion,
            "author": appearance.author,
            "color": appearance.color,
            "head": appearance.head,
            "tail": appearance.tail,
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("{} START", game.id);
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, _turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("{} END", game.id);
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// # Arguments
    /// * `game` - Current game metadata
    /// * `turn` - Current turn number
    /// * `board` - Current board state
    /// * `you` - Your snake's current state
    ///
    /// # Returns
    /// * `Value` - JSON response containing the chosen move direction
    pub fn get_move(&self, game: &Game, turn: &i32, board: &Board, you: &Battlesnake) -> Value {
        let start_time = Instant::now();

        let decision = self.decide(board, you, *turn);

        match decision.tier {
            Tier::Cornered => info!(
                "{} MOVE {}: No safe moves detected! Moving {}",
                game.id,
                turn,
                decision.direction.as_str()
            ),
            Tier::Safe => info!(
                "{} MOVE {}: No desired moves detected! Making random safe move: {}",
                game.id,
                turn,
                decision.direction.as_str()
            ),
            Tier::Preferred => info!(
                "{} MOVE {}: Making random desired move: {}",
                game.id,
                turn,
                decision.direction.as_str()
            ),
        }
        log::debug!(
            "{} MOVE {}: candidates {:?} (time: {}us)",
            game.id,
            turn,
            decision.candidates.to_vec(),
            start_time.elapsed().as_micros()
        );

        if self.debug_logger.is_enabled() {
            self.debug_logger.log_decision(DecisionLogEntry::new(
                &game.id,
                *turn,
                &you.id,
                board.clone(),
                &decision,
            ));
        }

        json!({ "move": decision.direction.as_str() })
    }

    /// Runs the move selection for `you` on `board`
    ///
    /// The grid and rng live only for this call. With `rng_seed` set, the rng is
    /// derived from the seed and the turn so replays pick the same moves.
    pub fn decide(&self, board: &Board, you: &Battlesnake, turn: i32) -> Decision {
        let grid = OccupancyGrid::for_snake(board, you);
        let head = you.body.first().copied().unwrap_or(you.head);
        let heuristics = self.config.strategy.heuristics();

        match self.config.strategy.rng_seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed ^ turn as u64);
                moves::decide(&head, &board.food, &grid, &heuristics, &mut rng)
            }
            None => {
                let mut rng = rand::rng();
                moves::decide(&head, &board.food, &grid, &heuristics, &mut rng)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coord;
    use crate::types::Direction;

    fn me(body: &[(i32, i32)]) -> Battlesnake {
        let body: Vec<Coord> = body.iter().map(|&(x, y)| Coord::new(x, y)).collect();
        Battlesnake {
            id: "me".to_string(),
            name: "me".to_string(),
            health: 90,
            head: body[0],
            length: body.len() as i32,
            body,
            latency: "0".to_string(),
            shout: None,
            squad: None,
        }
    }

    #[test]
    fn test_info_uses_appearance_config() {
        let mut config = Config::default_hardcoded();
        config.appearance.author = "someone".to_string();
        let info = Bot::new(config).info();
        assert_eq!(info["apiversion"], "1");
        assert_eq!(info["author"], "someone");
        assert_eq!(info["color"], "#880088");
    }

    #[test]
    fn test_seeded_decisions_are_reproducible() {
        let mut config = Config::default_hardcoded();
        config.strategy.rng_seed = Some(1234);
        let bot = Bot::new(config);

        let you = me(&[(5, 5), (5, 4)]);
        let board = Board {
            height: 11,
            width: 11,
            food: vec![],
            snakes: vec![you.clone()],
            hazards: vec![],
        };

        for turn in 0..20 {
            assert_eq!(bot.decide(&board, &you, turn), bot.decide(&board, &you, turn));
        }
    }

    #[test]
    fn test_configured_default_move_when_cornered() {
        let mut config = Config::default_hardcoded();
        config.strategy.default_move = Direction::Left;
        let bot = Bot::new(config);

        // 1x1 board: every direction leaves the board
        let you = me(&[(0, 0)]);
        let board = Board {
            height: 1,
            width: 1,
            food: vec![],
            snakes: vec![you.clone()],
            hazards: vec![],
        };
        let decision = bot.decide(&board, &you, 0);
        assert_eq!(decision.tier, Tier::Cornered);
        assert_eq!(decision.direction, Direction::Left);
    }
}
