// Board geometry and cell occupancy
//
// Pure functions over a single turn's Board. Nothing here keeps state.

use crate::types::{Battlesnake, Board, Coord};

/// What sits on a cell, as seen by a particular snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupant {
    /// Any snake segment, including heads we cannot win a collision with
    SnakeBody,
    /// An opponent head strictly shorter than the viewer
    VulnerableHead,
    Food,
    Hazard,
    Empty,
}

/// Checks whether a coordinate lies on the board
pub fn in_bounds(coord: &Coord, board: &Board) -> bool {
    coord.x >= 0 && coord.y >= 0 && coord.x < board.width && coord.y < board.height
}

/// Classifies a cell for `viewer`.
///
/// Snake occupancy masks food and hazards on the same cell, so a body segment
/// sitting on a hazard reports `SnakeBody`.
pub fn occupant(coord: &Coord, board: &Board, viewer: &Battlesnake) -> Occupant {
    let mut vulnerable_head = false;

    for snake in &board.snakes {
        let Some(index) = snake.body.iter().position(|c| c == coord) else {
            continue;
        };
        if index == 0 && snake.id != viewer.id && snake.length < viewer.length {
            vulnerable_head = true;
        } else {
            return Occupant::SnakeBody;
        }
    }

    if vulnerable_head {
        Occupant::VulnerableHead
    } else if board.food.contains(coord) {
        Occupant::Food
    } else if board.hazards.contains(coord) {
        Occupant::Hazard
    } else {
        Occupant::Empty
    }
}

/// True when any snake (the viewer included) has a segment on the cell
pub fn has_snake_collision(coord: &Coord, board: &Board) -> bool {
    board.snakes.iter().any(|s| s.body.contains(coord))
}

/// The four board corners, in a fixed order
pub fn corners(board: &Board) -> [Coord; 4] {
    let (max_x, max_y) = (board.width - 1, board.height - 1);
    [
        Coord::new(0, 0),
        Coord::new(max_x, 0),
        Coord::new(max_x, max_y),
        Coord::new(0, max_y),
    ]
}

pub fn is_corner(coord: &Coord, board: &Board) -> bool {
    corners(board).contains(coord)
}

/// True for on-board cells touching an edge
pub fn is_on_border(coord: &Coord, board: &Board) -> bool {
    in_bounds(coord, board)
        && (coord.x == 0 || coord.y == 0 || coord.x == board.width - 1 || coord.y == board.height - 1)
}

/// Calculates Manhattan distance between two coordinates
pub fn manhattan_distance(a: Coord, b: Coord) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}
