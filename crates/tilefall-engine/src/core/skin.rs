use serde::{Deserialize, Serialize};

use crate::InvalidRotationError;

/// Rotation state of a skin.
///
/// Only the four right angles exist. Conversions from arbitrary degree
/// values fail instead of falling back to a default.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Self; 4] = [Self::Deg0, Self::Deg90, Self::Deg180, Self::Deg270];

    #[must_use]
    pub const fn degrees(self) -> i32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Converts a degree value into a rotation.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilefall_engine::Rotation;
    ///
    /// assert_eq!(Rotation::from_degrees(180), Ok(Rotation::Deg180));
    /// assert!(Rotation::from_degrees(45).is_err());
    /// ```
    pub const fn from_degrees(degrees: i32) -> Result<Self, InvalidRotationError> {
        match degrees {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            _ => Err(InvalidRotationError { degrees }),
        }
    }

    /// Rotates 90° clockwise, wrapping 270° back to 0°.
    #[must_use]
    pub const fn rotated_cw(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg90,
            Self::Deg90 => Self::Deg180,
            Self::Deg180 => Self::Deg270,
            Self::Deg270 => Self::Deg0,
        }
    }

    /// Rotates 90° counterclockwise, wrapping 0° to 270°.
    #[must_use]
    pub const fn rotated_ccw(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg270,
            Self::Deg90 => Self::Deg0,
            Self::Deg180 => Self::Deg90,
            Self::Deg270 => Self::Deg180,
        }
    }

    const fn as_usize(self) -> usize {
        self as usize
    }
}

impl TryFrom<i32> for Rotation {
    type Error = InvalidRotationError;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        Self::from_degrees(degrees)
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

/// One rotation state of a skin: 4 rows of 4 cells, indexed `[y][x]`.
///
/// `0` is no block, `1` the primary color, `2` the secondary color. The two
/// colors only matter for display; any non-zero cell is solid.
pub type SkinGrid = [[u8; 4]; 4];

/// Cell pattern of one piece shape at all four rotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skin {
    kind: SkinKind,
    grids: [SkinGrid; 4],
}

impl Skin {
    #[must_use]
    pub const fn kind(&self) -> SkinKind {
        self.kind
    }

    #[must_use]
    pub const fn cells(&self, rotation: Rotation) -> &SkinGrid {
        &self.grids[rotation.as_usize()]
    }

    /// Returns the non-empty cells at the given rotation as `(x, y, value)`.
    pub fn occupied(&self, rotation: Rotation) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.cells(rotation)
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .filter(|&(_, &value)| value != 0)
                    .map(move |(x, &value)| (x, y, value))
            })
    }
}

/// The predefined piece shapes.
///
/// The first seven are the usual tetrominoes. `X`, `N` and `W` are
/// five-block shapes only some levels deal out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum SkinKind {
    J = 0,
    I = 1,
    O = 2,
    Z = 3,
    S = 4,
    L = 5,
    T = 6,
    /// Plus sign.
    X = 7,
    /// U shape.
    N = 8,
    /// Staircase.
    W = 9,
}

impl SkinKind {
    /// Number of skin kinds.
    pub const LEN: usize = 10;

    pub const ALL: [Self; Self::LEN] = [
        Self::J,
        Self::I,
        Self::O,
        Self::Z,
        Self::S,
        Self::L,
        Self::T,
        Self::X,
        Self::N,
        Self::W,
    ];

    #[must_use]
    pub fn skin(self) -> &'static Skin {
        &SKINS[self as usize]
    }

    /// Returns the single character representation of this skin kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilefall_engine::SkinKind;
    ///
    /// assert_eq!(SkinKind::T.as_char(), 'T');
    /// assert_eq!(SkinKind::from_char('W'), Some(SkinKind::W));
    /// assert_eq!(SkinKind::from_char('Q'), None);
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::J => 'J',
            Self::I => 'I',
            Self::O => 'O',
            Self::Z => 'Z',
            Self::S => 'S',
            Self::L => 'L',
            Self::T => 'T',
            Self::X => 'X',
            Self::N => 'N',
            Self::W => 'W',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'J' => Some(Self::J),
            'I' => Some(Self::I),
            'O' => Some(Self::O),
            'Z' => Some(Self::Z),
            'S' => Some(Self::S),
            'L' => Some(Self::L),
            'T' => Some(Self::T),
            'X' => Some(Self::X),
            'N' => Some(Self::N),
            'W' => Some(Self::W),
            _ => None,
        }
    }
}

const fn skin(kind: SkinKind, grids: [SkinGrid; 4]) -> Skin {
    Skin { kind, grids }
}

const EMPTY_ROW: [u8; 4] = [0; 4];

static SKINS: [Skin; SkinKind::LEN] = {
    const O_0: SkinGrid = [[1, 2, 0, 0], [2, 1, 0, 0], EMPTY_ROW, EMPTY_ROW];
    const O_90: SkinGrid = [[2, 1, 0, 0], [1, 2, 0, 0], EMPTY_ROW, EMPTY_ROW];
    const X_0: SkinGrid = [[0, 1, 0, 0], [1, 2, 1, 0], [0, 1, 0, 0], EMPTY_ROW];

    [
        skin(
            SkinKind::J,
            [
                [[1, 0, 0, 0], [2, 1, 2, 0], EMPTY_ROW, EMPTY_ROW],
                [[0, 2, 1, 0], [0, 1, 0, 0], [0, 2, 0, 0], EMPTY_ROW],
                [EMPTY_ROW, [2, 1, 2, 0], [0, 0, 1, 0], EMPTY_ROW],
                [[0, 2, 0, 0], [0, 1, 0, 0], [1, 2, 0, 0], EMPTY_ROW],
            ],
        ),
        skin(
            SkinKind::I,
            [
                [EMPTY_ROW, [2, 1, 2, 1], EMPTY_ROW, EMPTY_ROW],
                [[0, 2, 0, 0], [0, 1, 0, 0], [0, 2, 0, 0], [0, 1, 0, 0]],
                [EMPTY_ROW, [1, 2, 1, 2], EMPTY_ROW, EMPTY_ROW],
                [[0, 1, 0, 0], [0, 2, 0, 0], [0, 1, 0, 0], [0, 2, 0, 0]],
            ],
        ),
        skin(SkinKind::O, [O_0, O_90, O_0, O_90]),
        skin(
            SkinKind::Z,
            [
                [[2, 1, 0, 0], [0, 2, 1, 0], EMPTY_ROW, EMPTY_ROW],
                [[0, 2, 0, 0], [2, 1, 0, 0], [1, 0, 0, 0], EMPTY_ROW],
                [[1, 2, 0, 0], [0, 1, 2, 0], EMPTY_ROW, EMPTY_ROW],
                [[0, 1, 0, 0], [1, 2, 0, 0], [2, 0, 0, 0], EMPTY_ROW],
            ],
        ),
        skin(
            SkinKind::S,
            [
                [[0, 1, 2, 0], [1, 2, 0, 0], EMPTY_ROW, EMPTY_ROW],
                [[1, 0, 0, 0], [2, 1, 0, 0], [0, 2, 0, 0], EMPTY_ROW],
                [[0, 2, 1, 0], [2, 1, 0, 0], EMPTY_ROW, EMPTY_ROW],
                [[2, 0, 0, 0], [1, 2, 0, 0], [0, 1, 0, 0], EMPTY_ROW],
            ],
        ),
        skin(
            SkinKind::L,
            [
                [[0, 0, 1, 0], [2, 1, 2, 0], EMPTY_ROW, EMPTY_ROW],
                [[0, 2, 0, 0], [0, 1, 0, 0], [0, 2, 1, 0], EMPTY_ROW],
                [EMPTY_ROW, [2, 1, 2, 0], [1, 0, 0, 0], EMPTY_ROW],
                [[1, 2, 0, 0], [0, 1, 0, 0], [0, 2, 0, 0], EMPTY_ROW],
            ],
        ),
        skin(
            SkinKind::T,
            [
                [[0, 1, 0, 0], [1, 2, 1, 0], EMPTY_ROW, EMPTY_ROW],
                [[0, 1, 0, 0], [0, 2, 1, 0], [0, 1, 0, 0], EMPTY_ROW],
                [[1, 2, 1, 0], [0, 1, 0, 0], EMPTY_ROW, EMPTY_ROW],
                [[0, 1, 0, 0], [1, 2, 0, 0], [0, 1, 0, 0], EMPTY_ROW],
            ],
        ),
        skin(SkinKind::X, [X_0, X_0, X_0, X_0]),
        skin(
            SkinKind::N,
            [
                [[1, 2, 1, 0], [2, 0, 2, 0], EMPTY_ROW, EMPTY_ROW],
                [[2, 1, 0, 0], [0, 2, 0, 0], [2, 1, 0, 0], EMPTY_ROW],
                [[2, 0, 2, 0], [1, 2, 1, 0], EMPTY_ROW, EMPTY_ROW],
                [[1, 2, 0, 0], [2, 0, 0, 0], [1, 2, 0, 0], EMPTY_ROW],
            ],
        ),
        skin(
            SkinKind::W,
            [
                [[2, 0, 0, 0], [1, 2, 0, 0], [0, 1, 2, 0], EMPTY_ROW],
                [[0, 1, 2, 0], [1, 2, 0, 0], [2, 0, 0, 0], EMPTY_ROW],
                [[2, 1, 0, 0], [0, 2, 1, 0], [0, 0, 2, 0], EMPTY_ROW],
                [[0, 0, 2, 0], [0, 2, 1, 0], [2, 1, 0, 0], EMPTY_ROW],
            ],
        ),
    ]
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_wraps_in_both_directions() {
        assert_eq!(Rotation::Deg270.rotated_cw(), Rotation::Deg0);
        assert_eq!(Rotation::Deg0.rotated_ccw(), Rotation::Deg270);
        for rotation in Rotation::ALL {
            assert_eq!(rotation.rotated_cw().rotated_ccw(), rotation);
        }
    }

    #[test]
    fn test_rotation_rejects_other_angles() {
        for degrees in [-90, 1, 45, 360, 450] {
            let err = Rotation::from_degrees(degrees).unwrap_err();
            assert_eq!(err.degrees(), degrees);
        }
        for rotation in Rotation::ALL {
            assert_eq!(Rotation::try_from(rotation.degrees()), Ok(rotation));
        }
    }

    #[test]
    fn test_rotation_serde_uses_degrees() {
        assert_eq!(serde_json::to_string(&Rotation::Deg90).unwrap(), "90");
        assert!(serde_json::from_str::<Rotation>("91").is_err());
    }

    #[test]
    fn test_skin_table_matches_kind() {
        for kind in SkinKind::ALL {
            assert_eq!(kind.skin().kind(), kind);
            assert_eq!(SkinKind::from_char(kind.as_char()), Some(kind));
        }
    }

    #[test]
    fn test_skin_cells_are_two_tone() {
        for kind in SkinKind::ALL {
            for rotation in Rotation::ALL {
                for (_, _, value) in kind.skin().occupied(rotation) {
                    assert!(value == 1 || value == 2, "{kind:?} {rotation:?}: {value}");
                }
            }
        }
    }

    #[test]
    fn test_skin_block_counts() {
        let standard = [
            SkinKind::J,
            SkinKind::I,
            SkinKind::O,
            SkinKind::Z,
            SkinKind::S,
            SkinKind::L,
            SkinKind::T,
        ];
        for kind in standard {
            for rotation in Rotation::ALL {
                assert_eq!(kind.skin().occupied(rotation).count(), 4, "{kind:?}");
            }
        }
        for kind in [SkinKind::X, SkinKind::N, SkinKind::W] {
            for rotation in Rotation::ALL {
                assert_eq!(kind.skin().occupied(rotation).count(), 5, "{kind:?}");
            }
        }
    }

    #[test]
    fn test_symmetric_skins_repeat_grids() {
        let o = SkinKind::O.skin();
        assert_eq!(o.cells(Rotation::Deg0), o.cells(Rotation::Deg180));
        assert_eq!(o.cells(Rotation::Deg90), o.cells(Rotation::Deg270));

        let x = SkinKind::X.skin();
        for rotation in Rotation::ALL {
            assert_eq!(x.cells(rotation), x.cells(Rotation::Deg0));
        }
    }

    #[test]
    fn test_occupied_positions_of_vertical_i() {
        let cells: Vec<_> = SkinKind::I
            .skin()
            .occupied(Rotation::Deg90)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert_eq!(cells, [(1, 0), (1, 1), (1, 2), (1, 3)]);
    }
}
