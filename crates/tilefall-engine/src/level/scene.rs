use crate::Cell;

/// Receiver of level changes, implemented by the presentation side.
///
/// A level calls [`SceneSink::update_cell`] every time a stored cell is
/// written, and [`SceneSink::add_score`] when rows are cleared. Cell
/// coordinates passed to `update_cell` are always inside the grid.
pub trait SceneSink {
    fn update_cell(&mut self, x: usize, y: usize, value: Cell);

    fn add_score(&mut self, delta: u32);
}

/// Discards all notifications.
impl SceneSink for () {
    fn update_cell(&mut self, _x: usize, _y: usize, _value: Cell) {}

    fn add_score(&mut self, _delta: u32) {}
}
