// L-shaped paths between two cells
//
// Every (source, target) pair yields two candidates: one that covers the
// horizontal delta first and one that covers the vertical delta first.
// Paths are not searched, only checked: a path that crosses any snake is
// flagged, not rerouted.

use crate::grid::manhattan_distance;
use crate::types::{Battlesnake, Board, Coord, Direction};

/// A straight-line-then-turn route from `source` to `target`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub source: Coord,
    pub target: Coord,
    /// Cells stepped on, excluding `source` and ending at `target`
    pub coords: Vec<Coord>,
    /// Set when any cell is occupied by a snake
    pub collision: bool,
}

impl Path {
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Direction of the first step, if the path has one
    pub fn first_step(&self) -> Option<Direction> {
        self.coords
            .first()
            .and_then(|next| Direction::between(self.source, *next))
    }
}

fn steps(from: Coord, to: Coord, horizontal_first: bool) -> Vec<Coord> {
    let bend = if horizontal_first {
        Coord::new(to.x, from.y)
    } else {
        Coord::new(from.x, to.y)
    };

    let mut coords = Vec::with_capacity(manhattan_distance(from, to) as usize);
    let mut cursor = from;
    // Each leg is axis-aligned, so only one component moves per step
    for waypoint in [bend, to] {
        while cursor != waypoint {
            cursor.x += (waypoint.x - cursor.x).signum();
            cursor.y += (waypoint.y - cursor.y).signum();
            coords.push(cursor);
        }
    }

    coords
}

/// Cells laid out vertical-then-horizontal from `from` to `to`, excluding
/// `from`. Used for the perimeter controller's transit leg.
pub fn vertical_first(from: Coord, to: Coord) -> Vec<Coord> {
    steps(from, to, false)
}

/// Builds both bend orderings between `source` and `target`.
///
/// A cell counts as a collision when it belongs to any snake's body; `you`'s
/// head is exempt since it is where the path starts.
pub fn make_paths(source: Coord, target: Coord, board: &Board, you: &Battlesnake) -> [Path; 2] {
    let own_head = you.body.first().copied().unwrap_or(you.head);
    let collides = |coords: &[Coord]| {
        coords.iter().any(|c| {
            *c != own_head && board.snakes.iter().any(|s| s.body.contains(c))
        })
    };

    [true, false].map(|horizontal_first| {
        let coords = steps(source, target, horizontal_first);
        Path {
            source,
            target,
            collision: collides(&coords),
            coords,
        }
    })
}

/// Two paths per food item, in board order
pub fn all_food(you: &Battlesnake, board: &Board) -> Vec<Path> {
    board
        .food
        .iter()
        .flat_map(|food| make_paths(you.head, *food, board, you))
        .collect()
}

/// All food paths, shortest first. Equal lengths keep board order.
pub fn nearest_foods(you: &Battlesnake, board: &Board) -> Vec<Path> {
    let mut paths = all_food(you, board);
    paths.sort_by_key(Path::len);
    paths
}

/// The shortest food path, or None when the board has no food
pub fn nearest_food(you: &Battlesnake, board: &Board) -> Option<Path> {
    nearest_foods(you, board).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake(id: &str, body: &[(i32, i32)]) -> Battlesnake {
        let body: Vec<Coord> = body.iter().map(|&(x, y)| Coord::new(x, y)).collect();
        Battlesnake {
            id: id.to_string(),
            name: id.to_string(),
            health: 100,
            head: body[0],
            length: body.len() as i32,
            body,
            latency: String::new(),
            shout: None,
        }
    }

    fn board(food: &[(i32, i32)], snakes: Vec<Battlesnake>) -> Board {
        Board {
            width: 11,
            height: 11,
            food: food.iter().map(|&(x, y)| Coord::new(x, y)).collect(),
            snakes,
            hazards: vec![],
        }
    }

    #[test]
    fn test_both_orderings() {
        let me = snake("me", &[(1, 1), (0, 1)]);
        let b = board(&[], vec![me.clone()]);
        let [horizontal, vertical] = make_paths(Coord::new(1, 1), Coord::new(3, 3), &b, &me);

        assert_eq!(
            horizontal.coords,
            vec![
                Coord::new(2, 1),
                Coord::new(3, 1),
                Coord::new(3, 2),
                Coord::new(3, 3)
            ]
        );
        assert_eq!(
            vertical.coords,
            vec![
                Coord::new(1, 2),
                Coord::new(1, 3),
                Coord::new(2, 3),
                Coord::new(3, 3)
            ]
        );
        assert_eq!(horizontal.first_step(), Some(Direction::Right));
        assert_eq!(vertical.first_step(), Some(Direction::Up));
    }

    #[test]
    fn test_length_and_endpoint_for_every_pair() {
        let me = snake("me", &[(5, 5), (5, 4)]);
        let b = board(&[], vec![me.clone()]);
        for sx in 0..4 {
            for sy in 0..4 {
                for tx in 0..4 {
                    for ty in 0..4 {
                        let (s, t) = (Coord::new(sx, sy), Coord::new(tx, ty));
                        for p in make_paths(s, t, &b, &me) {
                            assert_eq!(p.len() as i32, manhattan_distance(s, t));
                            if s != t {
                                assert_eq!(p.coords.last(), Some(&t));
                                assert!(!p.coords.contains(&s));
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_collision_flags_only_blocked_ordering() {
        let me = snake("me", &[(1, 1), (0, 1)]);
        let other = snake("other", &[(2, 1), (2, 0)]);
        let b = board(&[(3, 3)], vec![me.clone(), other]);
        let [horizontal, vertical] = make_paths(Coord::new(1, 1), Coord::new(3, 3), &b, &me);
        assert!(horizontal.collision);
        assert!(!vertical.collision);
    }

    #[test]
    fn test_own_body_counts_as_collision() {
        let me = snake("me", &[(1, 1), (1, 2), (1, 3)]);
        let b = board(&[(1, 4)], vec![me.clone()]);
        let paths = all_food(&me, &b);
        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.collision));
    }

    #[test]
    fn test_nearest_foods_sorted_and_stable() {
        let me = snake("me", &[(5, 5), (5, 4)]);
        // Two foods at distance 2, one at distance 1, listed far-first
        let b = board(&[(7, 5), (5, 7), (6, 5)], vec![me.clone()]);
        let paths = nearest_foods(&me, &b);

        assert_eq!(paths.len(), 6);
        assert!(paths.windows(2).all(|w| w[0].len() <= w[1].len()));
        assert_eq!(paths[0].target, Coord::new(6, 5));
        assert_eq!(paths[1].target, Coord::new(6, 5));
        // Ties keep board order
        assert_eq!(paths[2].target, Coord::new(7, 5));
        assert_eq!(paths[4].target, Coord::new(5, 7));
    }

    #[test]
    fn test_nearest_food_empty_board() {
        let me = snake("me", &[(5, 5), (5, 4)]);
        let b = board(&[], vec![me.clone()]);
        assert!(nearest_foods(&me, &b).is_empty());
        assert_eq!(nearest_food(&me, &b), None);
    }

    #[test]
    fn test_vertical_first_transit() {
        let coords = vertical_first(Coord::new(3, 2), Coord::new(0, 0));
        assert_eq!(
            coords,
            vec![
                Coord::new(3, 1),
                Coord::new(3, 0),
                Coord::new(2, 0),
                Coord::new(1, 0),
                Coord::new(0, 0)
            ]
        );
        assert!(vertical_first(Coord::new(1, 1), Coord::new(1, 1)).is_empty());
    }
}
