use std::mem;

use arrayvec::ArrayVec;
use serde::Serialize;

use super::{Level, SceneSink};

/// How completed rows are cleared and scored after a piece locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum ClearRule {
    /// Every completed row among `scan_rows` rows is cleared. Clearing
    /// `n` rows at once awards `n²` points.
    Quadratic { scan_rows: usize },
    /// Among `scan_rows` rows, only vertically adjacent pairs of completed
    /// rows are cleared, each pair for a flat `pair_score`. A completed row
    /// without a completed neighbour stays.
    AdjacentPairs { scan_rows: usize, pair_score: u32 },
}

impl<S> Level<S>
where
    S: SceneSink,
{
    /// Clears completed rows near a freshly locked piece.
    ///
    /// `from_row` is the top row of the piece's bounding box. Returns the
    /// number of rows removed; points go to the scene sink.
    pub fn remove_rows(&mut self, from_row: usize) -> usize {
        match self.rules.clear_rule {
            ClearRule::Quadratic { scan_rows } => self.remove_all_rows(from_row, scan_rows),
            ClearRule::AdjacentPairs {
                scan_rows,
                pair_score,
            } => self.remove_row_pairs(from_row, scan_rows, pair_score),
        }
    }

    fn remove_all_rows(&mut self, from_row: usize, scan_rows: usize) -> usize {
        self.find_completed_rows(from_row, scan_rows);
        let count = self.completed_rows.len();
        if count > 0 {
            let rows = mem::take(&mut self.completed_rows);
            self.shift_rows_down(&rows);
            self.completed_rows = rows;
            let count32 = u32::try_from(count).unwrap_or(u32::MAX);
            self.add_score(count32.saturating_mul(count32));
        }
        count
    }

    fn remove_row_pairs(&mut self, from_row: usize, scan_rows: usize, pair_score: u32) -> usize {
        self.find_completed_rows(from_row, scan_rows);
        if self.completed_rows.len() < 2 {
            return 0;
        }

        let rows = mem::take(&mut self.completed_rows);
        let mut removed = 0;
        let mut prev: Option<usize> = None;
        for &row in &rows {
            if prev.is_some_and(|prev| prev + 1 == row) {
                let pair: ArrayVec<usize, 2> = [row - 1, row].into();
                self.shift_rows_down(&pair);
                self.add_score(pair_score);
                removed += pair.len();
                prev = None;
            } else {
                prev = Some(row);
            }
        }
        self.completed_rows = rows;
        removed
    }
}
