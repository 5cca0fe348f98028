use super::cell::Cell;

/// Read/write access to a playfield, as seen by a falling piece.
///
/// Coordinates are signed so that a piece's 4×4 bounding box may hang over
/// the playfield edges. How out-of-range coordinates resolve is up to the
/// implementation: a walled playfield reports [`Cell::WALL`], a wrapping one
/// maps `x` back into range.
pub trait Canvas {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    fn get_pixel(&self, x: isize, y: isize) -> Cell;

    /// Writes a cell. Writes that resolve outside the playfield are ignored.
    fn set_pixel(&mut self, x: isize, y: isize, value: Cell);
}
