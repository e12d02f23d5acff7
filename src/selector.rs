// Move selection policy
//
// Turns the four scored candidates and the opponents' threat zones into one
// committed direction. Rules are tried in priority order and the first one
// that applies wins:
//
//   1. attack   - step into the zone of a strictly shorter opponent
//   2. forage   - early game or hungry: follow the nearest clear food path
//   3. crowded  - many snakes on the board: take the roomiest move
//   4. default  - hungry: most food; otherwise roam
//
// Stateless: every call is a pure function of the snapshot and config.

use log::{debug, info, warn};

use crate::config::PolicyConfig;
use crate::evaluator::{evaluate_moves, CandidateSet};
use crate::grid::manhattan_distance;
use crate::path::nearest_foods;
use crate::reachability::{threat_zones, Zone};
use crate::types::{Battlesnake, Board, Direction, GameState, MoveDecision};

/// Answer when every direction is certain death
pub const FALLBACK_DIRECTION: Direction = Direction::Down;

/// Which policy rule produced a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Attack,
    Forage,
    Crowded,
    HeadToHead,
    NoSafeMove,
}

impl Rule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::Attack => "attack",
            Rule::Forage => "forage",
            Rule::Crowded => "crowded",
            Rule::HeadToHead => "head-to-head",
            Rule::NoSafeMove => "no-safe-move",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub decision: MoveDecision,
    pub rule: Rule,
}

impl Selection {
    fn new(rule: Rule, decision: MoveDecision) -> Self {
        Selection { decision, rule }
    }
}

/// Picks this turn's move with the scored policy
pub fn decide_move(state: &GameState, config: &PolicyConfig) -> MoveDecision {
    select(state, config).decision
}

/// Like `decide_move`, but also reports which rule fired
pub fn select(state: &GameState, config: &PolicyConfig) -> Selection {
    let you = &state.you;
    let board = &state.board;

    let candidates = evaluate_moves(you, board, config.depth_for(you.length));
    if candidates.all_certain_death() {
        warn!(
            "[{}] Turn {}: no safe moves, falling back to {}",
            you.name, state.turn, FALLBACK_DIRECTION
        );
        return Selection::new(
            Rule::NoSafeMove,
            MoveDecision::with_shout(FALLBACK_DIRECTION, "No safe moves"),
        );
    }

    let zones = threat_zones(state.opponents(), board, config.threat_zone_depth);
    for zone in &zones {
        debug!(
            "[{}] {} (length {}) threatens {} cells",
            you.name,
            zone.snake_name,
            zone.length,
            zone.len()
        );
    }

    if let Some(direction) = attack_move(&candidates, &zones, you) {
        info!("[{}] Turn {}: attacking {}", you.name, state.turn, direction);
        return Selection::new(
            Rule::Attack,
            MoveDecision::with_shout(direction, "I'm coming after you"),
        );
    }

    if state.turn < config.early_turn_threshold || you.health < config.forage_health_threshold {
        if let Some(direction) = forage_move(&candidates, &zones, you, board) {
            info!("[{}] Turn {}: foraging {}", you.name, state.turn, direction);
            return Selection::new(Rule::Forage, MoveDecision::new(direction));
        }
        debug!("[{}] No clear food path, falling through", you.name);
    }

    if board.snakes.len() > config.population_threshold {
        if you.health < config.population_hunger_threshold {
            debug!(
                "[{}] Crowded and hungry, food move would be {:?}",
                you.name,
                candidates.best_for_food().map(|m| m.direction)
            );
        } else if you.health > config.population_hunger_threshold {
            debug!(
                "[{}] Crowded and fed, food-avoiding move would be {:?}",
                you.name,
                candidates.best_to_avoid_food().map(|m| m.direction)
            );
        }

        // Room to roam has the final say in a crowd
        if let Some(roam) = candidates.best_for_roaming() {
            info!("[{}] Turn {}: crowded, roaming {}", you.name, state.turn, roam.direction);
            return Selection::new(Rule::Crowded, MoveDecision::new(roam.direction));
        }
    }

    head_to_head(&candidates, you, config, state.turn)
}

/// A live candidate landing inside a shorter opponent's zone. When several
/// qualify, the one closest to that opponent's head wins.
fn attack_move(candidates: &CandidateSet, zones: &[Zone], you: &Battlesnake) -> Option<Direction> {
    candidates
        .live()
        .filter_map(|candidate| {
            zones
                .iter()
                .filter(|zone| zone.length < you.length && zone.contains(&candidate.root))
                .map(|zone| manhattan_distance(candidate.root, zone.head))
                .min()
                .map(|distance| (distance, candidate.direction))
        })
        .fold(None, |best: Option<(i32, Direction)>, (distance, direction)| match best {
            Some((closest, _)) if closest <= distance => best,
            _ => Some((distance, direction)),
        })
        .map(|(_, direction)| direction)
}

/// First step of the nearest collision-free food path, provided that step is
/// live, not a corner, and not inside the zone of an opponent at least as long
fn forage_move(
    candidates: &CandidateSet,
    zones: &[Zone],
    you: &Battlesnake,
    board: &Board,
) -> Option<Direction> {
    nearest_foods(you, board)
        .iter()
        .filter(|path| !path.collision)
        .find_map(|path| {
            let first = *path.coords.first()?;
            let direction = path.first_step()?;
            let candidate = candidates.get(direction);
            if !candidate.is_alive() || candidate.moving_to_corner {
                return None;
            }

            let contested = zones
                .iter()
                .any(|zone| zone.length >= you.length && zone.contains(&first));
            if contested {
                debug!("[{}] Food at {} is contested", you.name, path.target);
                return None;
            }

            Some(direction)
        })
}

fn head_to_head(candidates: &CandidateSet, you: &Battlesnake, config: &PolicyConfig, turn: i32) -> Selection {
    let (Some(starving), Some(roaming)) = (candidates.best_to_avoid_food(), candidates.best_for_roaming())
    else {
        return Selection::new(
            Rule::NoSafeMove,
            MoveDecision::with_shout(FALLBACK_DIRECTION, "No safe moves"),
        );
    };

    if you.health < config.low_health_threshold {
        if let Some(food) = candidates.best_for_food() {
            info!(
                "[{}] Turn {}: looking for food, {:?} moves away",
                you.name, turn, food.distance_to_food
            );
            return Selection::new(
                Rule::HeadToHead,
                MoveDecision::with_shout(food.direction, "Looking for food"),
            );
        }
    }

    let shout = if starving.root == roaming.root {
        "Avoiding food"
    } else {
        "Roaming"
    };
    info!("[{}] Turn {}: roaming {}", you.name, turn, roaming.direction);
    Selection::new(Rule::HeadToHead, MoveDecision::with_shout(roaming.direction, shout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{has_snake_collision, in_bounds};
    use crate::types::{Coord, Game};
    use std::collections::HashMap;

    fn snake(id: &str, health: i32, body: &[(i32, i32)]) -> Battlesnake {
        let body: Vec<Coord> = body.iter().map(|&(x, y)| Coord::new(x, y)).collect();
        Battlesnake {
            id: id.to_string(),
            name: id.to_string(),
            health,
            head: body[0],
            length: body.len() as i32,
            body,
            latency: String::new(),
            shout: None,
        }
    }

    fn state(
        size: i32,
        turn: i32,
        food: &[(i32, i32)],
        you: Battlesnake,
        others: Vec<Battlesnake>,
    ) -> GameState {
        let mut snakes = vec![you.clone()];
        snakes.extend(others);
        GameState {
            game: Game {
                id: "game".to_string(),
                ruleset: HashMap::new(),
                timeout: 500,
                source: String::new(),
            },
            turn,
            board: Board {
                width: size,
                height: size,
                food: food.iter().map(|&(x, y)| Coord::new(x, y)).collect(),
                snakes,
                hazards: vec![],
            },
            you,
        }
    }

    #[test]
    fn test_attack_shorter_neighbour() {
        let me = snake("me", 90, &[(2, 2), (1, 2), (1, 1), (1, 0)]);
        let prey = snake("prey", 90, &[(3, 2), (4, 2)]);
        let s = state(5, 100, &[], me, vec![prey]);
        let selection = select(&s, &PolicyConfig::default());
        assert_eq!(selection.rule, Rule::Attack);
        assert_eq!(selection.decision.direction, Direction::Right);
    }

    #[test]
    fn test_no_attack_on_equal_length() {
        let me = snake("me", 90, &[(2, 2), (1, 2)]);
        let rival = snake("rival", 90, &[(4, 2), (4, 1)]);
        let s = state(7, 100, &[], me, vec![rival]);
        let selection = select(&s, &PolicyConfig::default());
        assert_ne!(selection.rule, Rule::Attack);
    }

    #[test]
    fn test_trapped_returns_fallback() {
        let me = snake("me", 90, &[(0, 0), (0, 1), (1, 1), (1, 0)]);
        let s = state(2, 5, &[], me, vec![]);
        let decision = decide_move(&s, &PolicyConfig::default());
        assert_eq!(decision.direction, FALLBACK_DIRECTION);
        assert!(decision.shout.is_some());
    }

    #[test]
    fn test_early_game_forages_along_clear_path() {
        let me = snake("me", 100, &[(5, 5), (5, 4), (5, 3)]);
        let s = state(11, 3, &[(8, 5)], me, vec![]);
        let selection = select(&s, &PolicyConfig::default());
        assert_eq!(selection.rule, Rule::Forage);
        assert_eq!(selection.decision.direction, Direction::Right);
    }

    #[test]
    fn test_forage_skips_blocked_first_path() {
        // Horizontal leg runs into a longer snake; the vertical leg is clear
        let me = snake("me", 100, &[(2, 2), (2, 1), (2, 0)]);
        let wall = snake("wall", 100, &[(3, 1), (3, 2), (3, 3), (3, 4), (4, 4)]);
        let s = state(11, 3, &[(5, 5)], me, vec![wall]);
        let selection = select(&s, &PolicyConfig::default());
        assert_eq!(selection.rule, Rule::Forage);
        assert_eq!(selection.decision.direction, Direction::Up);
    }

    #[test]
    fn test_forage_refuses_corner_step() {
        // Food sits in the corner next to us; stepping there is never a forage move
        let me = snake("me", 100, &[(1, 0), (2, 0), (3, 0)]);
        let s = state(11, 3, &[(0, 0)], me, vec![]);
        let selection = select(&s, &PolicyConfig::default());
        assert_ne!(selection.rule, Rule::Forage);
        assert_ne!(selection.decision.direction, Direction::Left);
    }

    #[test]
    fn test_forage_avoids_contested_food() {
        let me = snake("me", 100, &[(3, 5), (2, 5), (1, 5)]);
        let bully = snake("bully", 100, &[(6, 5), (7, 5), (8, 5), (9, 5)]);
        // The only food path starts right next to the bully's reach
        let s = state(11, 3, &[(5, 5)], me, vec![bully]);
        let selection = select(&s, &PolicyConfig::default());
        assert_ne!(selection.rule, Rule::Forage);
    }

    #[test]
    fn test_open_board_never_picks_certain_death() {
        let me = snake("me", 100, &[(5, 5), (5, 4), (5, 3)]);
        let config = PolicyConfig {
            depth_limit: Some(3),
            ..PolicyConfig::default()
        };
        let s = state(11, 100, &[], me, vec![]);
        let decision = decide_move(&s, &config);
        let target = decision.direction.apply(&Coord::new(5, 5));
        assert!(in_bounds(&target, &s.board));
        assert!(!has_snake_collision(&target, &s.board));
    }

    #[test]
    fn test_head_to_head_hungry_seeks_food() {
        let me = snake("me", 20, &[(5, 5), (5, 6), (5, 7)]);
        let rival = snake("rival", 80, &[(9, 9), (9, 8), (9, 7), (9, 6)]);
        let s = state(11, 200, &[(5, 2)], me, vec![rival]);
        // Keep the forage rule out of the way so the default branch decides
        let config = PolicyConfig {
            forage_health_threshold: 10,
            ..PolicyConfig::default()
        };
        let selection = select(&s, &config);
        assert_eq!(selection.rule, Rule::HeadToHead);
        assert_eq!(selection.decision.direction, Direction::Down);
        assert_eq!(selection.decision.shout.as_deref(), Some("Looking for food"));
    }

    #[test]
    fn test_head_to_head_fed_roams() {
        let me = snake("me", 90, &[(1, 5), (0, 5), (0, 4)]);
        let rival = snake("rival", 90, &[(9, 9), (9, 8), (9, 7), (9, 6)]);
        let s = state(11, 200, &[], me, vec![rival]);
        let selection = select(&s, &PolicyConfig::default());
        assert_eq!(selection.rule, Rule::HeadToHead);
        assert_eq!(selection.decision.direction, Direction::Right);
    }

    #[test]
    fn test_crowded_board_roams() {
        let me = snake("me", 90, &[(1, 5), (0, 5), (0, 4)]);
        let mut others = Vec::new();
        for i in 0..7 {
            let x = 3 + i;
            others.push(snake(&format!("s{}", i), 90, &[(x, 10), (x, 9), (x, 8), (x, 7)]));
        }
        let s = state(11, 200, &[], me, others);
        assert_eq!(s.board.snakes.len(), 8);
        let selection = select(&s, &PolicyConfig::default());
        assert_eq!(selection.rule, Rule::Crowded);
        assert_eq!(selection.decision.direction, Direction::Right);
    }
}
