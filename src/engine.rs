// Strategy dispatch and game lifecycle
//
// The engine owns the configuration and the per-game session store. It is
// synchronous; the Bot decides how to schedule it.

use log::info;

use crate::config::{Config, StrategyKind};
use crate::perimeter::PerimeterController;
use crate::selector;
use crate::session::{GameSession, SessionStore};
use crate::types::{Direction, GameState, MoveDecision};
use crate::wanderer;

pub struct Engine {
    config: Config,
    sessions: SessionStore,
}

impl Engine {
    pub fn new(config: Config) -> Self {
        Engine {
            config,
            sessions: SessionStore::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    fn plan_perimeter(&self, state: &GameState) -> PerimeterController {
        PerimeterController::start(
            state.you.head,
            &state.board,
            self.config.perimeter.loop_length,
        )
    }

    /// Opens the session for a new game and plans its corner patrol
    pub fn on_game_start(&self, state: &GameState) -> PerimeterController {
        let controller = self.plan_perimeter(state);
        self.sessions.create(
            &state.game.id,
            GameSession {
                perimeter: Some(controller.clone()),
                last_move: None,
            },
        );
        info!(
            "[{}] Game {} started, corner {}",
            state.you.name,
            state.game.id,
            controller.corner()
        );
        controller
    }

    /// Forgets everything about `game_id`
    pub fn on_game_end(&self, game_id: &str) {
        if self.sessions.remove(game_id) {
            info!("Game {} session closed", game_id);
        }
    }

    /// Picks this turn's move with the configured strategy and commits it
    pub fn next_move(&self, state: &GameState) -> MoveDecision {
        let proposal = self.propose(state);
        self.commit(&state.game.id, proposal)
    }

    /// Works out this turn's move from a copy of the session. Nothing is
    /// stored until the proposal is passed to `commit`.
    pub fn propose(&self, state: &GameState) -> Proposal {
        match self.config.strategy.kind {
            StrategyKind::Scored => Proposal {
                decision: selector::decide_move(state, &self.config.policy),
                update: SessionUpdate::Nothing,
            },
            StrategyKind::Perimeter => {
                let mut controller = self
                    .sessions
                    .with_session(&state.game.id, |session| session.perimeter.clone())
                    .unwrap_or_else(|| self.plan_perimeter(state));
                let step = controller.next_move(state.you.head);
                info!(
                    "[{}] Turn {}: {:?} {}",
                    state.you.name, state.turn, step.state, step.direction
                );
                Proposal {
                    decision: MoveDecision::new(step.direction),
                    update: SessionUpdate::Perimeter(controller),
                }
            }
            StrategyKind::Wanderer => {
                let last_move = self
                    .sessions
                    .with_session(&state.game.id, |session| session.last_move);
                let direction =
                    wanderer::choose(&state.you, &state.board, last_move, &mut rand::rng());
                info!(
                    "[{}] Turn {}: wandering {}",
                    state.you.name, state.turn, direction
                );
                Proposal {
                    decision: MoveDecision::new(direction),
                    update: SessionUpdate::LastMove(direction),
                }
            }
        }
    }

    /// Stores the proposal's session changes and hands back its decision
    pub fn commit(&self, game_id: &str, proposal: Proposal) -> MoveDecision {
        let Proposal { decision, update } = proposal;
        match update {
            SessionUpdate::Nothing => {}
            SessionUpdate::Perimeter(controller) => self
                .sessions
                .with_session(game_id, |session| session.perimeter = Some(controller)),
            SessionUpdate::LastMove(direction) => self
                .sessions
                .with_session(game_id, |session| session.last_move = Some(direction)),
        }
        decision
    }
}

/// Session changes that go with a proposed move
#[derive(Debug, Clone)]
pub enum SessionUpdate {
    Nothing,
    Perimeter(PerimeterController),
    LastMove(Direction),
}

/// A decided but not yet sent move
#[derive(Debug, Clone)]
pub struct Proposal {
    pub decision: MoveDecision,
    pub update: SessionUpdate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Battlesnake, Board, Coord, Game};
    use std::collections::HashMap;

    fn state(game_id: &str, body: &[(i32, i32)]) -> GameState {
        let body: Vec<Coord> = body.iter().map(|&(x, y)| Coord::new(x, y)).collect();
        let you = Battlesnake {
            id: "me".to_string(),
            name: "me".to_string(),
            health: 100,
            head: body[0],
            length: body.len() as i32,
            body,
            latency: String::new(),
            shout: None,
        };
        GameState {
            game: Game {
                id: game_id.to_string(),
                ruleset: HashMap::new(),
                timeout: 500,
                source: String::new(),
            },
            turn: 0,
            board: Board {
                width: 7,
                height: 7,
                food: vec![],
                snakes: vec![you.clone()],
                hazards: vec![],
            },
            you,
        }
    }

    fn engine(kind: StrategyKind) -> Engine {
        let mut config = Config::default_hardcoded();
        config.strategy.kind = kind;
        Engine::new(config)
    }

    #[test]
    fn test_game_lifecycle() {
        let engine = engine(StrategyKind::Perimeter);
        let s = state("g1", &[(1, 1), (1, 2), (1, 3)]);

        let controller = engine.on_game_start(&s);
        assert_eq!(controller.corner(), Coord::new(0, 0));
        assert!(engine.sessions().contains("g1"));

        assert_eq!(engine.next_move(&s).direction, Direction::Left);

        engine.on_game_end("g1");
        assert!(!engine.sessions().contains("g1"));
    }

    #[test]
    fn test_perimeter_without_start_plans_lazily() {
        let engine = engine(StrategyKind::Perimeter);
        let s = state("late", &[(1, 1), (1, 2), (1, 3)]);
        assert_eq!(engine.next_move(&s).direction, Direction::Left);
        assert!(engine.sessions().contains("late"));
    }

    #[test]
    fn test_wanderer_remembers_per_game() {
        let engine = engine(StrategyKind::Wanderer);
        let a = state("a", &[(3, 3), (3, 2), (3, 1)]);
        let first = engine.next_move(&a).direction;

        // With three open moves the first choice sticks
        for _ in 0..5 {
            assert_eq!(engine.next_move(&a).direction, first);
        }
        assert_eq!(
            engine.sessions().with_session("a", |s| s.last_move),
            Some(first)
        );
        assert_eq!(engine.sessions().with_session("b", |s| s.last_move), None);
    }

    #[test]
    fn test_scored_strategy_uses_policy() {
        let engine = engine(StrategyKind::Scored);
        let s = state("g", &[(0, 0), (1, 0), (2, 0)]);
        assert_eq!(engine.next_move(&s), selector::decide_move(&s, &engine.config().policy));
        assert_eq!(engine.next_move(&s).direction, Direction::Up);
    }

    #[test]
    fn test_uncommitted_proposal_leaves_session_alone() {
        let engine = engine(StrategyKind::Perimeter);
        let s = state("dropped", &[(4, 4), (4, 5), (4, 6)]);
        engine.on_game_start(&s);
        let before = engine
            .sessions()
            .with_session("dropped", |session| session.perimeter.clone())
            .unwrap();

        let first = engine.propose(&s);
        let again = engine.propose(&s);
        assert_eq!(first.decision, again.decision);

        let after = engine
            .sessions()
            .with_session("dropped", |session| session.perimeter.clone())
            .unwrap();
        assert_eq!(before.cursor(), after.cursor());

        engine.commit("dropped", first);
        let committed = engine
            .sessions()
            .with_session("dropped", |session| session.perimeter.clone())
            .unwrap();
        assert_eq!(committed.corner(), before.corner());
    }

    #[test]
    fn test_uncommitted_wander_is_not_remembered() {
        let engine = engine(StrategyKind::Wanderer);
        let s = state("w", &[(3, 3), (3, 2), (3, 1)]);

        let proposal = engine.propose(&s);
        assert_eq!(engine.sessions().with_session("w", |session| session.last_move), None);

        let direction = engine.commit("w", proposal).direction;
        assert_eq!(
            engine.sessions().with_session("w", |session| session.last_move),
            Some(direction)
        );
    }
}
