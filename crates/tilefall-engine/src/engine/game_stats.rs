use serde::Serialize;

use super::SessionConfig;

/// Game statistics: score, gravity speed, and piece and row counters.
///
/// # Speed-up
///
/// Each time the score reaches the next multiple of
/// [`SessionConfig::speedup_score_step`], the gravity threshold drops by one
/// frame, down to [`SessionConfig::fast_speed`]. Only one step is taken per
/// score addition, however many thresholds it passes.
///
/// # Example
///
/// ```
/// use tilefall_engine::{GameStats, SessionConfig};
///
/// let mut stats = GameStats::new(&SessionConfig::default());
/// stats.add_score(16);
/// stats.add_score(9);
///
/// assert_eq!(stats.score(), 25);
/// assert_eq!(stats.speed(), 49);
/// assert_eq!(stats.speed_level(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStats {
    score: u32,
    speed: u32,
    speedup_score: u32,
    start_speed: u32,
    fast_speed: u32,
    speedup_score_step: u32,
    spawned_pieces: usize,
    cleared_rows: usize,
}

impl GameStats {
    /// Creates a new statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new(config: &SessionConfig) -> Self {
        Self {
            score: 0,
            speed: config.start_speed,
            speedup_score: config.speedup_score_step,
            start_speed: config.start_speed,
            fast_speed: config.fast_speed,
            speedup_score_step: config.speedup_score_step,
            spawned_pieces: 0,
            cleared_rows: 0,
        }
    }

    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Current gravity threshold in frames.
    #[must_use]
    pub const fn speed(&self) -> u32 {
        self.speed
    }

    /// Speed as shown to the player, starting at 1.
    #[must_use]
    pub const fn speed_level(&self) -> u32 {
        self.start_speed.saturating_sub(self.speed) + 1
    }

    #[must_use]
    pub const fn fast_speed(&self) -> u32 {
        self.fast_speed
    }

    /// Number of pieces dealt since the game started.
    #[must_use]
    pub const fn spawned_pieces(&self) -> usize {
        self.spawned_pieces
    }

    #[must_use]
    pub const fn cleared_rows(&self) -> usize {
        self.cleared_rows
    }

    pub fn add_score(&mut self, delta: u32) {
        self.score = self.score.saturating_add(delta);
        if self.speed > self.fast_speed && self.score >= self.speedup_score {
            self.speed -= 1;
            self.speedup_score = self.speedup_score.saturating_add(self.speedup_score_step);
        }
    }

    pub(crate) fn record_spawn(&mut self) {
        self.spawned_pieces += 1;
    }

    pub(crate) fn record_cleared_rows(&mut self, rows: usize) {
        self.cleared_rows += rows;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_start_at_configured_speed() {
        let stats = GameStats::new(&SessionConfig::default());
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.speed(), 50);
        assert_eq!(stats.speed_level(), 1);
        assert_eq!(stats.spawned_pieces(), 0);
    }

    #[test]
    fn test_speed_up_once_per_addition() {
        let mut stats = GameStats::new(&SessionConfig::default());
        stats.add_score(19);
        assert_eq!(stats.speed(), 50);

        stats.add_score(1);
        assert_eq!(stats.speed(), 49);

        // 80 points passes three more thresholds but only speeds up once.
        stats.add_score(80);
        assert_eq!(stats.speed(), 48);
        assert_eq!(stats.score(), 100);
    }

    #[test]
    fn test_speed_never_passes_fast_speed() {
        let config = SessionConfig {
            start_speed: 3,
            fast_speed: 2,
            speedup_score_step: 1,
        };
        let mut stats = GameStats::new(&config);
        for _ in 0..10 {
            stats.add_score(1);
        }
        assert_eq!(stats.speed(), 2);
        assert_eq!(stats.speed_level(), 2);
    }
}
