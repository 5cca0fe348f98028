use serde::{Deserialize, Serialize};

/// A single playfield cell value.
///
/// The value is a signed color index:
///
/// - `0`: empty
/// - `> 0`: settled block of that color
/// - `< 0`: block of the falling piece (negated color)
/// - [`Cell::WALL`]: outside the playfield
///
/// The sign lets collision detection tell settled blocks apart from the
/// falling piece's own blocks without a separate flag. Walls are never
/// stored in a level; they are only returned by out-of-bounds reads.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize,
)]
#[serde(transparent)]
pub struct Cell(i32);

impl Cell {
    pub const EMPTY: Self = Self(0);
    pub const WALL: Self = Self(1000);

    /// A settled block of the given color.
    #[must_use]
    pub const fn settled(color: u8) -> Self {
        Self(color as i32)
    }

    /// A block of the falling piece with the given color.
    #[must_use]
    pub const fn falling(color: u8) -> Self {
        Self(-(color as i32))
    }

    #[must_use]
    pub const fn from_raw(value: i32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_wall(self) -> bool {
        self.0 == Self::WALL.0
    }

    /// Returns `true` if a falling piece may not enter this cell.
    ///
    /// Settled blocks and walls block; empty cells and the falling piece's
    /// own blocks do not.
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        self.0 > 0
    }

    #[must_use]
    pub const fn is_falling(self) -> bool {
        self.0 < 0
    }

    /// Color index regardless of whether the block is settled or falling.
    #[must_use]
    pub const fn color(self) -> u32 {
        self.0.unsigned_abs()
    }
}
