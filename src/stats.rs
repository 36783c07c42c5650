//! Per-session tallies reported when the binary exits.

use std::fmt;

use crate::core::GameSnapshot;
use crate::types::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStats {
    pub games: u32,
    pub pieces_locked: u32,
    pub lines_cleared: u32,
    pub power_modes: u32,
    pub game_overs: u32,
    pub best_score: u32,
}

impl SessionStats {
    pub fn record_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::PieceLocked(_) => self.pieces_locked += 1,
            GameEvent::LinesCleared { count, .. } => self.lines_cleared += count,
            GameEvent::PowerModeActivated => self.power_modes += 1,
            GameEvent::GameOver => self.game_overs += 1,
        }
    }

    pub fn record_events(&mut self, events: &[GameEvent]) {
        for event in events {
            self.record_event(event);
        }
    }

    /// Track the episode count and best score seen so far.
    pub fn observe(&mut self, snap: &GameSnapshot) {
        self.games = self.games.max(snap.episode_id);
        if let Some(engine) = &snap.engine {
            self.best_score = self.best_score.max(engine.score);
        }
    }
}

impl fmt::Display for SessionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "games={} best_score={} lines={} pieces={} power_modes={} game_overs={}",
            self.games,
            self.best_score,
            self.lines_cleared,
            self.pieces_locked,
            self.power_modes,
            self.game_overs
        )
    }
}
