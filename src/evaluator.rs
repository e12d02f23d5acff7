// Per-direction candidate scoring
//
// Each of the four first steps from our head gets its own bounded flood fill.
// The fill's visitor tallies open cells, obstacles, food and opponent heads;
// the selector ranks the resulting candidates.

use log::debug;
use std::cmp::Reverse;

use crate::grid::{has_snake_collision, in_bounds, is_corner, is_on_border, occupant, Occupant};
use crate::reachability::{explore, Visitor};
use crate::types::{Battlesnake, Board, Coord, Direction};

/// Steps from our head at which an opponent body counts as pressing on a move
pub const DMZ_DISTANCE: usize = 2;

/// Closest opponent head met while filling from a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpponentSighting {
    /// Steps from our head
    pub distance: usize,
    pub length: i32,
    pub head: Coord,
}

/// One candidate first step and everything its flood fill saw
#[derive(Debug, Clone)]
pub struct WeightedMove {
    pub direction: Direction,
    /// The cell this move lands on
    pub root: Coord,
    /// Every cell accepted by the fill, in visit order
    pub open: Vec<Coord>,
    /// Distinct snake cells the fill ran into
    pub obstacles: usize,
    pub food: usize,
    /// Steps from our head to the first food the fill met, if any
    pub distance_to_food: Option<usize>,
    pub heads: usize,
    pub nearest_opponent: Option<OpponentSighting>,
    /// Root is off the board or on a snake we cannot beat head-on
    pub certain_death: bool,
    pub opponent_in_dmz: bool,
    pub moving_to_corner: bool,
    pub on_border: bool,
}

impl WeightedMove {
    fn new(direction: Direction, head: Coord) -> Self {
        WeightedMove {
            direction,
            root: direction.apply(&head),
            open: Vec::new(),
            obstacles: 0,
            food: 0,
            distance_to_food: None,
            heads: 0,
            nearest_opponent: None,
            certain_death: false,
            opponent_in_dmz: false,
            moving_to_corner: false,
            on_border: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.certain_death
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }
}

struct Tally<'a> {
    board: &'a Board,
    you: &'a Battlesnake,
    candidate: &'a mut WeightedMove,
}

impl Visitor for Tally<'_> {
    fn visit(&mut self, coord: Coord, depth: usize) {
        self.candidate.open.push(coord);

        if self.board.food.contains(&coord) {
            self.candidate.food += 1;
            self.candidate.distance_to_food.get_or_insert(depth + 1);
        }
    }

    fn blocked(&mut self, coord: Coord, depth: usize) {
        let distance = depth + 1;
        self.candidate.obstacles += 1;

        for snake in self.board.snakes.iter().filter(|s| s.id != self.you.id) {
            if snake.body.first() == Some(&coord) {
                self.candidate.heads += 1;
                let nearer = self
                    .candidate
                    .nearest_opponent
                    .map_or(true, |seen| distance < seen.distance);
                if nearer {
                    self.candidate.nearest_opponent = Some(OpponentSighting {
                        distance,
                        length: snake.length,
                        head: coord,
                    });
                }
            }

            if distance == DMZ_DISTANCE && snake.body.contains(&coord) {
                self.candidate.opponent_in_dmz = true;
            }
        }
    }
}

fn evaluate_move(direction: Direction, you: &Battlesnake, board: &Board, depth_limit: usize) -> WeightedMove {
    let head = you.body.first().copied().unwrap_or(you.head);
    let mut candidate = WeightedMove::new(direction, head);
    let root = candidate.root;

    if !in_bounds(&root, board) || occupant(&root, board, you) == Occupant::SnakeBody {
        candidate.certain_death = true;
        debug!("Not moving {} to {} because of certain death", direction, root);
    }
    candidate.moving_to_corner = is_corner(&root, board);
    candidate.on_border = is_on_border(&root, board);

    let mut tally = Tally {
        board,
        you,
        candidate: &mut candidate,
    };
    explore(root, depth_limit, board, |c| has_snake_collision(c, board), &mut tally);

    candidate
}

/// The four scored first steps for one turn, in `Direction::ORDER`
#[derive(Debug, Clone)]
pub struct CandidateSet {
    moves: [WeightedMove; 4],
}

impl CandidateSet {
    pub fn moves(&self) -> &[WeightedMove] {
        &self.moves
    }

    pub fn get(&self, direction: Direction) -> &WeightedMove {
        // ORDER covers every variant, so the lookup always succeeds
        let index = Direction::ORDER
            .iter()
            .position(|d| *d == direction)
            .unwrap_or_default();
        &self.moves[index]
    }

    /// Candidates that do not die on the spot
    pub fn live(&self) -> impl Iterator<Item = &WeightedMove> {
        self.moves.iter().filter(|m| m.is_alive())
    }

    pub fn all_certain_death(&self) -> bool {
        self.live().next().is_none()
    }

    /// Highest key among live candidates; ties go to the earlier direction
    fn best_by<K, F>(&self, key: F) -> Option<&WeightedMove>
    where
        K: Ord,
        F: Fn(&WeightedMove) -> K,
    {
        self.live().fold(None, |best, candidate| match best {
            Some(current) if key(candidate) <= key(current) => Some(current),
            _ => Some(candidate),
        })
    }

    /// Most food in reach, then the closest first sighting
    pub fn best_for_food(&self) -> Option<&WeightedMove> {
        self.best_by(|m| (m.food, Reverse(m.distance_to_food.unwrap_or(usize::MAX))))
    }

    /// Least food in reach, then the most room
    pub fn best_to_avoid_food(&self) -> Option<&WeightedMove> {
        self.best_by(|m| (Reverse(m.food), m.open_count()))
    }

    /// Most open cells
    pub fn best_for_roaming(&self) -> Option<&WeightedMove> {
        self.best_by(WeightedMove::open_count)
    }
}

/// Scores all four first steps from `you`'s head with fills `depth_limit` deep
pub fn evaluate_moves(you: &Battlesnake, board: &Board, depth_limit: usize) -> CandidateSet {
    let moves = Direction::ORDER.map(|dir| evaluate_move(dir, you, board, depth_limit));

    for m in &moves {
        debug!(
            "{}: root {} open {} obstacles {} food {} (first at {:?}) heads {} dead {}",
            m.direction,
            m.root,
            m.open_count(),
            m.obstacles,
            m.food,
            m.distance_to_food,
            m.heads,
            m.certain_death
        );
    }

    CandidateSet { moves }
}
