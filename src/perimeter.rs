// Corner-hugging patrol
//
// At game start we pick the corner of our quadrant, lay a closed loop along
// that corner's wall, and plot a transit path from the head to the corner.
// Each turn: if the head is on the loop, step to the next loop cell;
// otherwise take the next transit cell. The controller never finishes; it
// lives until the game's session is dropped.

use log::{debug, info};
use std::collections::VecDeque;

use crate::path::vertical_first;
use crate::selector::FALLBACK_DIRECTION;
use crate::types::{Board, Coord, Direction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatrolState {
    /// On the loop, following it
    Patrolling,
    /// Off the loop, walking toward the corner
    Transiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerimeterStep {
    pub state: PatrolState,
    pub direction: Direction,
}

#[derive(Debug, Clone)]
pub struct PerimeterController {
    corner: Coord,
    patrol: Vec<Coord>,
    cursor: Option<usize>,
    transit: VecDeque<Coord>,
}

/// Corner of the quadrant `head` is in. The middle column and row count
/// toward the low side.
pub fn nearest_corner(head: Coord, board: &Board) -> Coord {
    let x = if head.x > board.width / 2 { board.width - 1 } else { 0 };
    let y = if head.y > board.height / 2 { board.height - 1 } else { 0 };
    Coord::new(x, y)
}

/// A closed loop two rows deep hugging the wall at `corner`: out along the
/// wall for `loop_length` cells, then back one row in.
fn patrol_loop(corner: Coord, board: &Board, loop_length: usize) -> Vec<Coord> {
    let step_x = if corner.x == 0 { 1 } else { -1 };
    let step_y = if corner.y == 0 { 1 } else { -1 };
    let max_len = usize::try_from(board.width).unwrap_or(0).max(2);
    let len = loop_length.clamp(2, max_len) as i32;

    let along_wall = (0..len).map(|i| Coord::new(corner.x + i * step_x, corner.y));
    let back_inside = (0..len)
        .rev()
        .map(|i| Coord::new(corner.x + i * step_x, corner.y + step_y));

    along_wall.chain(back_inside).collect()
}

impl PerimeterController {
    /// Plans the patrol for a game where our head starts at `head`
    pub fn start(head: Coord, board: &Board, loop_length: usize) -> Self {
        let corner = nearest_corner(head, board);
        let patrol = patrol_loop(corner, board, loop_length);
        let transit: VecDeque<Coord> = vertical_first(head, corner).into();

        info!(
            "Perimeter plan on {}x{}: corner {}, loop of {}, transit of {}",
            board.width,
            board.height,
            corner,
            patrol.len(),
            transit.len()
        );
        debug!("Patrol loop: {:?}", patrol);

        let cursor = patrol_index(&patrol, head);
        PerimeterController {
            corner,
            patrol,
            cursor,
            transit,
        }
    }

    pub fn corner(&self) -> Coord {
        self.corner
    }

    pub fn patrol(&self) -> &[Coord] {
        &self.patrol
    }

    /// Index of the loop cell we are heading to, while patrolling
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Advances one turn from the current head position
    pub fn next_move(&mut self, head: Coord) -> PerimeterStep {
        if let Some(index) = patrol_index(&self.patrol, head) {
            let next_index = (index + 1) % self.patrol.len();
            self.cursor = Some(next_index);
            let next = self.patrol[next_index];
            return PerimeterStep {
                state: PatrolState::Patrolling,
                direction: Direction::between(head, next).unwrap_or(FALLBACK_DIRECTION),
            };
        }

        self.cursor = None;

        // Replan if we ran out of transit or got pushed off it
        let on_track = self
            .transit
            .front()
            .is_some_and(|next| Direction::between(head, *next).is_some());
        if !on_track {
            debug!("Replanning transit from {} to {}", head, self.corner);
            self.transit = vertical_first(head, self.corner).into();
        }

        let direction = self
            .transit
            .pop_front()
            .and_then(|next| Direction::between(head, next))
            .unwrap_or(FALLBACK_DIRECTION);

        PerimeterStep {
            state: PatrolState::Transiting,
            direction,
        }
    }
}

fn patrol_index(patrol: &[Coord], head: Coord) -> Option<usize> {
    patrol.iter().position(|c| *c == head)
}
