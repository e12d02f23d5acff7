// Bot: the API-facing side of the snake
//
// Each method corresponds to one Battlesnake endpoint. The move decision is
// CPU-bound, so it runs on Tokio's blocking pool and is raced against the
// response budget; if the budget runs out we answer with the fallback move.
// Session state only changes for moves that were actually sent.

use log::{info, warn};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::debug_logger::{DebugLogger, TIMED_OUT};
use crate::engine::Engine;
use crate::selector::FALLBACK_DIRECTION;
use crate::types::{Battlesnake, Board, Game, GameState, MoveDecision};

const OUT_OF_TIME: &str = "Out of time";

/// Battlesnake Bot with OOP-style API
/// Owns the engine (and with it every game session) plus the debug logger
pub struct Bot {
    engine: Arc<Engine>,
    logger: DebugLogger,
}

impl Bot {
    /// Creates a bot without decision logging
    pub fn new(config: Config) -> Self {
        Self::with_logger(config, DebugLogger::disabled())
    }

    pub fn with_logger(config: Config, logger: DebugLogger) -> Self {
        Bot {
            engine: Arc::new(Engine::new(config)),
            logger,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    fn config(&self) -> &Config {
        self.engine.config()
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        let appearance = &self.config().appearance;
        json!({
            "apiversion": "1",
            "author": appearance.author,
            "color": appearance.color,
            "head": appearance.head,
            "tail": appearance.tail,
            "version": appearance.version,
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, turn: &i32, board: &Board, you: &Battlesnake) {
        info!("[{}] GAME START", you.name);
        self.engine
            .on_game_start(&Self::snapshot(game, turn, board, you));
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, _turn: &i32, _board: &Board, you: &Battlesnake) {
        info!("[{}] GAME OVER", you.name);
        info!(
            "[{}] Ending position: {}, health {}, length {}",
            you.name, you.head, you.health, you.length
        );
        self.engine.on_game_end(&game.id);
    }

    /// Computes the next move within the configured time budget
    /// Corresponds to POST /move endpoint
    ///
    /// # Returns
    /// * `Value` - `{"move": ..., "shout": ...}`, shout omitted when absent
    pub async fn get_move(
        &self,
        game: &Game,
        turn: &i32,
        board: &Board,
        you: &Battlesnake,
    ) -> Value {
        let start_time = Instant::now();
        let state = Self::snapshot(game, turn, board, you);
        let (decision, strategy) = self.decide_within_budget(state.clone()).await;

        info!(
            "[{}] Turn {}: chose {} ({}ms)",
            you.name,
            turn,
            decision.direction,
            start_time.elapsed().as_millis()
        );

        self.logger.log_move(&state, strategy, &decision);

        serde_json::to_value(&decision)
            .unwrap_or_else(|_| json!({ "move": FALLBACK_DIRECTION.as_str() }))
    }

    /// Returns the decision together with the strategy tag it is logged under
    async fn decide_within_budget(&self, state: GameState) -> (MoveDecision, &'static str) {
        let budget = Duration::from_millis(self.config().timing.effective_budget_ms());
        let engine = Arc::clone(&self.engine);
        let game_id = state.game.id.clone();
        let turn = state.turn;
        let task = tokio::task::spawn_blocking(move || engine.propose(&state));

        match tokio::time::timeout(budget, task).await {
            Ok(Ok(proposal)) => (
                self.engine.commit(&game_id, proposal),
                self.config().strategy.kind.as_str(),
            ),
            Ok(Err(e)) => {
                warn!("Turn {}: move computation failed ({}), using fallback", turn, e);
                (MoveDecision::with_shout(FALLBACK_DIRECTION, OUT_OF_TIME), TIMED_OUT)
            }
            Err(_) => {
                warn!(
                    "Turn {}: no decision within {}ms, using fallback",
                    turn,
                    budget.as_millis()
                );
                (MoveDecision::with_shout(FALLBACK_DIRECTION, OUT_OF_TIME), TIMED_OUT)
            }
        }
    }

    fn snapshot(game: &Game, turn: &i32, board: &Board, you: &Battlesnake) -> GameState {
        GameState {
            game: game.clone(),
            turn: *turn,
            board: board.clone(),
            you: you.clone(),
        }
    }
}
