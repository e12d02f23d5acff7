// Per-game state, keyed by game id
//
// Each live game gets its own GameSession; nothing is shared between games.
// A session is created at /start, or lazily on the first /move if the start
// request was missed, and dropped at /end.

use log::{debug, warn};
use parking_lot::Mutex;
use std::collections::HashMap;

use crate::perimeter::PerimeterController;
use crate::types::Direction;

#[derive(Debug, Clone, Default)]
pub struct GameSession {
    /// Corner patrol plan, when the perimeter strategy is in use
    pub perimeter: Option<PerimeterController>,
    /// Last move the wanderer made in this game
    pub last_move: Option<Direction>,
}

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, GameSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) the session for `game_id`
    pub fn create(&self, game_id: &str, session: GameSession) {
        let replaced = self
            .sessions
            .lock()
            .insert(game_id.to_string(), session)
            .is_some();
        if replaced {
            warn!("Game {} started twice, previous session discarded", game_id);
        }
    }

    /// Drops the session; returns whether one existed
    pub fn remove(&self, game_id: &str) -> bool {
        let removed = self.sessions.lock().remove(game_id).is_some();
        debug!("Session {} removed: {}", game_id, removed);
        removed
    }

    pub fn contains(&self, game_id: &str) -> bool {
        self.sessions.lock().contains_key(game_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs `f` against the session for `game_id` while holding the lock,
    /// creating an empty session first if none exists
    pub fn with_session<R>(&self, game_id: &str, f: impl FnOnce(&mut GameSession) -> R) -> R {
        let mut sessions = self.sessions.lock();
        let session = sessions.entry(game_id.to_string()).or_insert_with(|| {
            debug!("No session for game {}, creating one", game_id);
            GameSession::default()
        });
        f(session)
    }
}
