// Bounded breadth-first reachability
//
// One traversal routine serves two callers: opponent threat zones (shallow
// fill from an opponent head through everything but that opponent's body)
// and candidate scoring in the evaluator (fill from a candidate cell through
// everything but snake bodies, with a visitor collecting counters).

use std::collections::{HashSet, VecDeque};

use crate::grid::in_bounds;
use crate::types::{Battlesnake, Board, Coord, Direction};

/// Observer for a traversal. Depth is the number of steps from the seed.
pub trait Visitor {
    /// Called once per coordinate accepted into the visited set
    fn visit(&mut self, _coord: Coord, _depth: usize) {}

    /// Called once per distinct on-board coordinate rejected as impassable,
    /// at the shallowest depth it was reached
    fn blocked(&mut self, _coord: Coord, _depth: usize) {}
}

/// Visitor that ignores everything
impl Visitor for () {}

/// Breadth-first expansion from `seed`, never going deeper than `depth_limit`.
///
/// Off-board and impassable cells are skipped without ending the search, so
/// sibling branches keep expanding. Neighbours are queued in
/// `Direction::ORDER`; the returned cells are in visit order, which is stable
/// for identical inputs.
pub fn explore<F, V>(
    seed: Coord,
    depth_limit: usize,
    board: &Board,
    impassable: F,
    visitor: &mut V,
) -> Vec<Coord>
where
    F: Fn(&Coord) -> bool,
    V: Visitor + ?Sized,
{
    let mut visited = Vec::new();
    let mut seen = HashSet::new();
    let mut rejected = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back((seed, 0usize));

    while let Some((coord, depth)) = queue.pop_front() {
        if depth > depth_limit || seen.contains(&coord) || !in_bounds(&coord, board) {
            continue;
        }

        if impassable(&coord) {
            if rejected.insert(coord) {
                visitor.blocked(coord, depth);
            }
            continue;
        }

        seen.insert(coord);
        visited.push(coord);
        visitor.visit(coord, depth);

        if depth < depth_limit {
            for dir in Direction::ORDER {
                queue.push_back((dir.apply(&coord), depth + 1));
            }
        }
    }

    visited
}

/// Cells an opponent could reach within a few moves, ignoring everyone else
#[derive(Debug, Clone)]
pub struct Zone {
    pub snake_id: String,
    pub snake_name: String,
    pub head: Coord,
    pub length: i32,
    members: HashSet<Coord>,
}

impl Zone {
    pub fn contains(&self, coord: &Coord) -> bool {
        self.members.contains(coord)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Builds the zone around one snake's head. Its own body (head excluded)
/// is the only obstacle.
pub fn threat_zone(snake: &Battlesnake, board: &Board, depth_limit: usize) -> Zone {
    let head = snake.body.first().copied().unwrap_or(snake.head);
    let tail = snake.tail_segments();

    let cells = explore(
        head,
        depth_limit,
        board,
        |c| *c != head && tail.contains(c),
        &mut (),
    );

    Zone {
        snake_id: snake.id.clone(),
        snake_name: snake.name.clone(),
        head,
        length: snake.length,
        members: cells.into_iter().collect(),
    }
}

pub fn threat_zones<'a, I>(snakes: I, board: &Board, depth_limit: usize) -> Vec<Zone>
where
    I: IntoIterator<Item = &'a Battlesnake>,
{
    snakes
        .into_iter()
        .map(|s| threat_zone(s, board, depth_limit))
        .collect()
}
