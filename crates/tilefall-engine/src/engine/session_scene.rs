use std::mem;

use serde::Serialize;

use crate::{Cell, level::SceneSink};

use super::{GameStats, SessionConfig};

/// A cell change reported by a level, waiting to be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellUpdate {
    pub x: usize,
    pub y: usize,
    pub value: Cell,
}

/// Scene sink used by [`GameSession`](super::GameSession).
///
/// Score additions feed the session's [`GameStats`]; cell changes are queued
/// until a presenter drains them.
#[derive(Debug, Clone)]
pub struct SessionScene {
    stats: GameStats,
    updates: Vec<CellUpdate>,
}

impl SessionScene {
    #[must_use]
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            stats: GameStats::new(config),
            updates: vec![],
        }
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut GameStats {
        &mut self.stats
    }

    /// Number of queued cell updates.
    #[must_use]
    pub fn pending_updates(&self) -> usize {
        self.updates.len()
    }

    /// Takes every queued cell update, oldest first.
    pub fn drain_cell_updates(&mut self) -> Vec<CellUpdate> {
        mem::take(&mut self.updates)
    }
}

impl Default for SessionScene {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}

impl SceneSink for SessionScene {
    fn update_cell(&mut self, x: usize, y: usize, value: Cell) {
        self.updates.push(CellUpdate { x, y, value });
    }

    fn add_score(&mut self, delta: u32) {
        self.stats.add_score(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_updates_are_drained_in_order() {
        let mut scene = SessionScene::default();
        scene.update_cell(1, 2, Cell::falling(3));
        scene.update_cell(1, 3, Cell::settled(3));
        assert_eq!(scene.pending_updates(), 2);

        let updates = scene.drain_cell_updates();
        assert_eq!(
            updates,
            [
                CellUpdate {
                    x: 1,
                    y: 2,
                    value: Cell::falling(3)
                },
                CellUpdate {
                    x: 1,
                    y: 3,
                    value: Cell::settled(3)
                },
            ]
        );
        assert_eq!(scene.pending_updates(), 0);
    }

    #[test]
    fn test_score_goes_to_stats() {
        let mut scene = SessionScene::default();
        scene.add_score(16);
        scene.add_score(4);
        assert_eq!(scene.stats().score(), 20);
        assert_eq!(scene.stats().speed(), 49);
    }
}
