//! Per-match bookkeeping: score, lives, flags, outcome, best score
//!
//! No timers live here; the round driver decides when things happen.

use crate::consts::TIME_BONUS_RATE;
use crate::highscores::ScoreStore;

pub struct Session {
    score: u64,
    lives: u32,
    initial_lives: u32,
    markers_collected: u32,
    markers_total: u32,
    victory: bool,
    defeat: bool,
    best_score: u64,
    /// Set when this match pushed the best score up
    beat_best: bool,
    store: Box<dyn ScoreStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("score", &self.score)
            .field("lives", &self.lives)
            .field("markers", &(self.markers_collected, self.markers_total))
            .field("victory", &self.victory)
            .field("defeat", &self.defeat)
            .field("best_score", &self.best_score)
            .finish()
    }
}

impl Session {
    /// Start a session; the best score is read from the store here, once
    pub fn new(lives: u32, store: Box<dyn ScoreStore>) -> Self {
        let best_score = store.load();
        Self {
            score: 0,
            lives,
            initial_lives: lives,
            markers_collected: 0,
            markers_total: 0,
            victory: false,
            defeat: false,
            best_score,
            beat_best: false,
            store,
        }
    }

    /// Back to a fresh match with the same lives and store
    pub fn reset(&mut self, markers_total: u32) {
        self.score = 0;
        self.lives = self.initial_lives;
        self.markers_collected = 0;
        self.markers_total = markers_total;
        self.victory = false;
        self.defeat = false;
        self.beat_best = false;
    }

    pub fn add_score(&mut self, points: u64) {
        self.score += points;
    }

    /// One flag collected, worth `points`
    pub fn add_marker(&mut self, points: u64) {
        self.markers_collected += 1;
        self.add_score(points);
    }

    /// Bonus for whole seconds left on the clock; returns the bonus
    pub fn add_time_bonus(&mut self, seconds_left: f32) -> u64 {
        let bonus = seconds_left.max(0.0).floor() as u64 * TIME_BONUS_RATE;
        self.add_score(bonus);
        bonus
    }

    /// Lose a life; true when that was the last one
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.defeat = true;
            self.check_best_score();
            return true;
        }
        false
    }

    pub fn declare_victory(&mut self, bonus: u64) {
        self.victory = true;
        self.add_score(bonus);
        self.check_best_score();
    }

    pub fn on_time_expired(&mut self) {
        self.defeat = true;
        self.check_best_score();
    }

    /// Ratchet the best score; only a strictly higher score is persisted
    fn check_best_score(&mut self) -> bool {
        if self.score <= self.best_score {
            return false;
        }
        self.best_score = self.score;
        self.beat_best = true;
        if let Err(err) = self.store.save(self.best_score) {
            log::error!("Failed to persist best score {}: {err}", self.best_score);
        }
        true
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn initial_lives(&self) -> u32 {
        self.initial_lives
    }

    pub fn markers_collected(&self) -> u32 {
        self.markers_collected
    }

    pub fn markers_total(&self) -> u32 {
        self.markers_total
    }

    pub fn is_victory(&self) -> bool {
        self.victory
    }

    pub fn is_defeat(&self) -> bool {
        self.defeat
    }

    pub fn is_over(&self) -> bool {
        self.victory || self.defeat
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    /// True if this match set a new best
    pub fn is_new_best(&self) -> bool {
        self.beat_best
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::highscores::MemoryScoreStore;
    use crate::persistence::PersistError;

    fn session(best: u64) -> Session {
        Session::new(3, Box::new(MemoryScoreStore::with_best(best)))
    }

    #[test]
    fn test_lose_life_sequence() {
        let mut s = session(0);
        assert!(!s.lose_life());
        assert!(!s.lose_life());
        assert!(s.lose_life());
        assert_eq!(s.lives(), 0);
        assert!(s.is_defeat());
        // Already at zero: stays there
        assert!(s.lose_life());
        assert_eq!(s.lives(), 0);
    }

    #[test]
    fn test_add_marker_and_bonus() {
        let mut s = session(0);
        s.add_marker(100);
        s.add_marker(100);
        assert_eq!(s.markers_collected(), 2);
        assert_eq!(s.score(), 200);
        assert_eq!(s.add_time_bonus(12.9), 60);
        assert_eq!(s.score(), 260);
        assert_eq!(s.add_time_bonus(-3.0), 0);
    }

    #[test]
    fn test_tie_does_not_update_best() {
        let mut s = session(500);
        s.add_score(500);
        s.declare_victory(0);
        assert_eq!(s.best_score(), 500);
        assert!(!s.is_new_best());
    }

    #[test]
    fn test_beating_best_updates() {
        let mut s = session(500);
        s.add_score(501);
        s.on_time_expired();
        assert_eq!(s.best_score(), 501);
        assert!(s.is_new_best());
        assert!(s.is_defeat());
    }

    #[test]
    fn test_victory_adds_bonus() {
        let mut s = session(0);
        s.declare_victory(500);
        assert!(s.is_victory());
        assert_eq!(s.score(), 500);
        assert_eq!(s.best_score(), 500);
    }

    #[test]
    fn test_reset() {
        let mut s = session(0);
        s.add_marker(100);
        s.lose_life();
        s.reset(4);
        assert_eq!(s.score(), 0);
        assert_eq!(s.lives(), 3);
        assert_eq!(s.markers_total(), 4);
        assert!(!s.is_over());
        assert_eq!(s.best_score(), 0, "a lost life alone never touches the best");
    }

    struct FailingStore;

    impl ScoreStore for FailingStore {
        fn load(&self) -> u64 {
            0
        }

        fn save(&mut self, _best: u64) -> Result<(), PersistError> {
            Err(PersistError::Io {
                path: "nowhere".into(),
                source: std::io::Error::other("disk full"),
            })
        }
    }

    /// Counts saves through a handle the test keeps
    struct CountingStore {
        best: u64,
        writes: Rc<Cell<u32>>,
    }

    impl ScoreStore for CountingStore {
        fn load(&self) -> u64 {
            self.best
        }

        fn save(&mut self, best: u64) -> Result<(), PersistError> {
            self.best = best;
            self.writes.set(self.writes.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn test_store_written_only_on_strict_improvement() {
        let writes = Rc::new(Cell::new(0));
        let store = CountingStore {
            best: 500,
            writes: Rc::clone(&writes),
        };
        let mut s = Session::new(3, Box::new(store));

        s.add_score(500);
        s.on_time_expired();
        assert_eq!(writes.get(), 0, "a tie is not a new best");

        s.add_score(1);
        s.on_time_expired();
        assert_eq!(writes.get(), 1);
        assert_eq!(s.best_score(), 501);

        s.declare_victory(0);
        assert_eq!(writes.get(), 1);
    }

    #[test]
    fn test_store_failure_is_not_fatal() {
        let mut s = Session::new(1, Box::new(FailingStore));
        s.add_score(10);
        assert!(s.lose_life());
        assert_eq!(s.best_score(), 10);
    }
}
