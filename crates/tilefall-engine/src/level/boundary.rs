use serde::{Deserialize, Serialize};

/// How a level maps coordinates outside its grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Boundary {
    /// Walls on all four sides. Anything outside the grid is a wall.
    Walled,
    /// The left and right edges are joined. `x` wraps around with a floor
    /// modulo, while rows above or below the grid are still walls.
    Wraparound,
}

impl Boundary {
    /// Resolves a signed coordinate into a grid index.
    ///
    /// Returns `None` when the coordinate lies outside the grid under this
    /// policy.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilefall_engine::Boundary;
    ///
    /// assert_eq!(Boundary::Walled.resolve(-1, 0, 10, 20), None);
    /// assert_eq!(Boundary::Wraparound.resolve(-1, 0, 10, 20), Some((9, 0)));
    /// assert_eq!(Boundary::Wraparound.resolve(3, -1, 10, 20), None);
    /// ```
    #[must_use]
    pub fn resolve(
        self,
        x: isize,
        y: isize,
        width: usize,
        height: usize,
    ) -> Option<(usize, usize)> {
        let y = usize::try_from(y).ok().filter(|&y| y < height)?;
        let x = match self {
            Self::Walled => usize::try_from(x).ok().filter(|&x| x < width)?,
            Self::Wraparound => {
                let width = isize::try_from(width).ok().filter(|&w| w > 0)?;
                usize::try_from(x.rem_euclid(width)).ok()?
            }
        };
        Some((x, y))
    }
}
