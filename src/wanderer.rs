// Random wandering with a little momentum
//
// A move is safe when it stays on the board, does not turn back into the
// neck and does not land on any snake's body, ours or an opponent's.

use log::{debug, warn};
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::grid::{has_snake_collision, in_bounds};
use crate::selector::FALLBACK_DIRECTION;
use crate::types::{Battlesnake, Board, Direction};

/// Safe directions from `you`'s head, in `Direction::ORDER`
pub fn safe_moves(you: &Battlesnake, board: &Board) -> Vec<Direction> {
    // Bodies shorter than two segments have no neck to infer
    let neck = if you.body.len() >= 2 { you.neck() } else { None };

    Direction::ORDER
        .into_iter()
        .filter(|dir| {
            let next = dir.apply(&you.head);
            in_bounds(&next, board)
                && Some(next) != neck
                && !has_snake_collision(&next, board)
        })
        .collect()
}

/// Picks this turn's move. Repeats `last_move` while it is still safe and
/// there is some other option; otherwise draws uniformly from the safe set.
pub fn choose<R: Rng + ?Sized>(
    you: &Battlesnake,
    board: &Board,
    last_move: Option<Direction>,
    rng: &mut R,
) -> Direction {
    let safe = safe_moves(you, board);
    debug!("Wanderer safe moves: {:?}", safe);

    if safe.is_empty() {
        warn!("Wanderer has no safe move, going {}", FALLBACK_DIRECTION);
        return FALLBACK_DIRECTION;
    }

    if let Some(prior) = last_move {
        if safe.len() > 1 && safe.contains(&prior) {
            return prior;
        }
    }

    safe.choose(rng).copied().unwrap_or(FALLBACK_DIRECTION)
}
