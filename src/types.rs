// Battlesnake API Types
// See https://docs.battlesnake.com/api

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Game metadata including ID, ruleset, and timeout
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Game {
    pub id: String,
    #[serde(default)]
    pub ruleset: HashMap<String, Value>,
    #[serde(default)]
    pub timeout: u32,
    #[serde(default)]
    pub source: String,
}

/// Board state including dimensions, food, snakes, and hazards
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Board {
    pub height: i32,
    pub width: i32,
    pub food: Vec<Coord>,
    pub snakes: Vec<Battlesnake>,
    #[serde(default)]
    pub hazards: Vec<Coord>,
}

/// Snake representation with all state information
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Battlesnake {
    pub id: String,
    pub name: String,
    pub health: i32,
    pub body: Vec<Coord>,
    pub head: Coord,
    pub length: i32,
    #[serde(default)]
    pub latency: String,
    #[serde(default)]
    pub shout: Option<String>,
}

impl Battlesnake {
    /// Body without the head; empty for a freshly spawned or malformed snake
    pub fn tail_segments(&self) -> &[Coord] {
        self.body.get(1..).unwrap_or(&[])
    }

    /// The segment directly behind the head, if the body has one
    pub fn neck(&self) -> Option<Coord> {
        self.body.get(1).copied()
    }
}

/// 2D coordinate on the board
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Represents the four possible movement directions for a Battlesnake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed order used for every flood fill expansion and every tie-break.
    /// Reordering this changes which move wins a tie.
    pub const ORDER: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Converts direction to string representation for API response
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Calculates the next coordinate when moving in this direction
    pub fn apply(&self, coord: &Coord) -> Coord {
        match self {
            Direction::Up => Coord { x: coord.x, y: coord.y + 1 },
            Direction::Down => Coord { x: coord.x, y: coord.y - 1 },
            Direction::Left => Coord { x: coord.x - 1, y: coord.y },
            Direction::Right => Coord { x: coord.x + 1, y: coord.y },
        }
    }

    /// Direction of a single step from `from` to `to`, or None when the two
    /// coordinates are not orthogonally adjacent
    pub fn between(from: Coord, to: Coord) -> Option<Direction> {
        Self::ORDER.into_iter().find(|dir| dir.apply(&from) == to)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(format!("Invalid direction: {}", s)),
        }
    }
}

/// The engine's answer for one turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveDecision {
    #[serde(rename = "move")]
    pub direction: Direction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shout: Option<String>,
}

impl MoveDecision {
    pub fn new(direction: Direction) -> Self {
        MoveDecision {
            direction,
            shout: None,
        }
    }

    pub fn with_shout(direction: Direction, shout: impl Into<String>) -> Self {
        MoveDecision {
            direction,
            shout: Some(shout.into()),
        }
    }
}

/// Complete game state received from the API.
/// This is the per-turn snapshot the engine decides on.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GameState {
    pub game: Game,
    pub turn: i32,
    pub board: Board,
    pub you: Battlesnake,
}

impl GameState {
    /// Every snake on the board other than `you`
    pub fn opponents(&self) -> impl Iterator<Item = &Battlesnake> {
        self.board.snakes.iter().filter(move |s| s.id != self.you.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_direction() {
        assert_eq!("up".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!("down".parse::<Direction>().unwrap(), Direction::Down);
        assert_eq!("left".parse::<Direction>().unwrap(), Direction::Left);
        assert_eq!("right".parse::<Direction>().unwrap(), Direction::Right);

        // Case insensitive
        assert_eq!("UP".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!("Down".parse::<Direction>().unwrap(), Direction::Down);

        assert!("invalid".parse::<Direction>().is_err());
    }

    #[test]
    fn test_between_adjacent_and_distant() {
        let c = Coord::new(3, 3);
        assert_eq!(Direction::between(c, Coord::new(3, 4)), Some(Direction::Up));
        assert_eq!(Direction::between(c, Coord::new(4, 3)), Some(Direction::Right));
        assert_eq!(Direction::between(c, Coord::new(3, 2)), Some(Direction::Down));
        assert_eq!(Direction::between(c, Coord::new(2, 3)), Some(Direction::Left));
        assert_eq!(Direction::between(c, Coord::new(4, 4)), None);
        assert_eq!(Direction::between(c, c), None);
    }

    #[test]
    fn test_order_is_clockwise_from_up() {
        assert_eq!(
            Direction::ORDER,
            [Direction::Up, Direction::Right, Direction::Down, Direction::Left]
        );
    }

    #[test]
    fn test_short_body_has_no_neck() {
        let snake = Battlesnake {
            id: "a".to_string(),
            name: "a".to_string(),
            health: 100,
            body: vec![Coord::new(1, 1)],
            head: Coord::new(1, 1),
            length: 1,
            latency: String::new(),
            shout: None,
        };
        assert_eq!(snake.neck(), None);
        assert!(snake.tail_segments().is_empty());
    }

    #[test]
    fn test_move_decision_wire_shape() {
        let plain = serde_json::to_value(MoveDecision::new(Direction::Left)).unwrap();
        assert_eq!(plain, serde_json::json!({ "move": "left" }));

        let loud = serde_json::to_value(MoveDecision::with_shout(Direction::Up, "hi")).unwrap();
        assert_eq!(loud, serde_json::json!({ "move": "up", "shout": "hi" }));
    }

    #[test]
    fn test_game_state_deserializes_without_optional_fields() {
        let raw = r#"{
            "game": {"id": "g1"},
            "turn": 3,
            "board": {"height": 7, "width": 7, "food": [], "snakes": []},
            "you": {"id": "me", "name": "me", "health": 90,
                    "body": [{"x": 1, "y": 1}, {"x": 1, "y": 0}],
                    "head": {"x": 1, "y": 1}, "length": 2}
        }"#;
        let state: GameState = serde_json::from_str(raw).unwrap();
        assert_eq!(state.game.id, "g1");
        assert!(state.board.hazards.is_empty());
        assert_eq!(state.you.neck(), Some(Coord::new(1, 0)));
    }
}
