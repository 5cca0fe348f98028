use super::{
    canvas::Canvas,
    cell::Cell,
    skin::{Rotation, SkinKind},
};

/// The falling piece.
///
/// A piece is bound to a skin while it falls and becomes empty once it
/// locks. It does not own the playfield: every operation takes the
/// [`Canvas`] it acts on.
///
/// While falling, the piece's cells are drawn on the canvas with negative
/// values, so its own blocks never count as collisions. Each movement
/// follows the same sequence: erase, update the state, test collisions,
/// then either draw at the new position or restore and redraw at the old one.
/// Callers therefore never observe the piece in two places.
///
/// # Example
///
/// ```
/// use tilefall_engine::{Level, LevelId, Piece, SkinKind};
///
/// let mut level = Level::new(LevelId::Classic);
/// level.init(10, 20, ());
///
/// let mut piece = Piece::new();
/// piece.init(&mut level, SkinKind::T);
/// assert!(piece.move_left(&mut level));
/// assert!(piece.rotate_cw(&mut level));
///
/// while piece.move_down(&mut level) {}
/// assert!(piece.is_empty());
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Piece {
    left: isize,
    top: isize,
    rotation: Rotation,
    skin: Option<SkinKind>,
}

/// A non-empty cell of a piece's footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FootprintCell {
    /// Position inside the skin's 4×4 grid.
    pub local: (usize, usize),
    /// Position on the canvas.
    pub canvas: (isize, isize),
    /// Raw skin value (color).
    pub value: u8,
}

#[expect(clippy::cast_possible_wrap)]
const fn offset(origin: isize, delta: usize) -> isize {
    origin + delta as isize
}

impl Piece {
    /// Creates an empty piece.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            left: 0,
            top: 0,
            rotation: Rotation::Deg0,
            skin: None,
        }
    }

    #[must_use]
    pub const fn left(&self) -> isize {
        self.left
    }

    #[must_use]
    pub const fn top(&self) -> isize {
        self.top
    }

    #[must_use]
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[must_use]
    pub const fn skin(&self) -> Option<SkinKind> {
        self.skin
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.skin.is_none()
    }

    /// Places a new piece at the top center of the canvas.
    ///
    /// If the spawn position is already blocked, the piece is locked in
    /// place at once and the piece becomes empty again.
    pub fn init<C>(&mut self, canvas: &mut C, skin: SkinKind)
    where
        C: Canvas + ?Sized,
    {
        self.skin = Some(skin);
        self.rotation = Rotation::Deg0;
        self.left = isize::try_from(canvas.width() / 2).unwrap_or(isize::MAX);
        self.top = 0;
        if self.has_collisions(canvas) {
            self.lock(canvas);
        } else {
            self.draw(canvas);
        }
    }

    /// Detaches the skin without touching the canvas.
    pub fn clear(&mut self) {
        self.skin = None;
    }

    pub fn move_left<C>(&mut self, canvas: &mut C) -> bool
    where
        C: Canvas + ?Sized,
    {
        !self.is_empty() && self.set_position(canvas, self.left - 1, self.top)
    }

    pub fn move_right<C>(&mut self, canvas: &mut C) -> bool
    where
        C: Canvas + ?Sized,
    {
        !self.is_empty() && self.set_position(canvas, self.left + 1, self.top)
    }

    /// Moves the piece one row down.
    ///
    /// When the move is blocked, the piece is locked onto the canvas with
    /// positive values, becomes empty, and `false` is returned.
    pub fn move_down<C>(&mut self, canvas: &mut C) -> bool
    where
        C: Canvas + ?Sized,
    {
        if self.is_empty() {
            return false;
        }
        if self.set_position(canvas, self.left, self.top + 1) {
            return true;
        }
        self.lock(canvas);
        false
    }

    pub fn rotate_cw<C>(&mut self, canvas: &mut C) -> bool
    where
        C: Canvas + ?Sized,
    {
        !self.is_empty() && self.set_rotation(canvas, self.rotation.rotated_cw())
    }

    pub fn rotate_ccw<C>(&mut self, canvas: &mut C) -> bool
    where
        C: Canvas + ?Sized,
    {
        !self.is_empty() && self.set_rotation(canvas, self.rotation.rotated_ccw())
    }

    /// Returns the non-empty cells of the current skin rotation.
    ///
    /// Empty for an empty piece.
    pub fn footprint(&self) -> impl Iterator<Item = FootprintCell> + '_ {
        self.skin
            .into_iter()
            .flat_map(move |kind| kind.skin().occupied(self.rotation))
            .map(move |(x, y, value)| FootprintCell {
                local: (x, y),
                canvas: (offset(self.left, x), offset(self.top, y)),
                value,
            })
    }

    fn has_collisions<C>(&self, canvas: &C) -> bool
    where
        C: Canvas + ?Sized,
    {
        self.footprint().any(|cell| {
            let (x, y) = cell.canvas;
            canvas.get_pixel(x, y).is_blocking()
        })
    }

    fn set_position<C>(&mut self, canvas: &mut C, left: isize, top: isize) -> bool
    where
        C: Canvas + ?Sized,
    {
        self.erase(canvas);
        let saved = (self.left, self.top);
        (self.left, self.top) = (left, top);
        let collides = self.has_collisions(canvas);
        if collides {
            (self.left, self.top) = saved;
        }
        self.draw(canvas);
        !collides
    }

    fn set_rotation<C>(&mut self, canvas: &mut C, rotation: Rotation) -> bool
    where
        C: Canvas + ?Sized,
    {
        self.erase(canvas);
        let saved = self.rotation;
        self.rotation = rotation;
        let collides = self.has_collisions(canvas);
        if collides {
            self.rotation = saved;
        }
        self.draw(canvas);
        !collides
    }

    fn paint<C, F>(&self, canvas: &mut C, color: F)
    where
        C: Canvas + ?Sized,
        F: Fn(u8) -> Cell,
    {
        for cell in self.footprint() {
            let (x, y) = cell.canvas;
            canvas.set_pixel(x, y, color(cell.value));
        }
    }

    fn erase<C>(&self, canvas: &mut C)
    where
        C: Canvas + ?Sized,
    {
        self.paint(canvas, |_| Cell::EMPTY);
    }

    fn draw<C>(&self, canvas: &mut C)
    where
        C: Canvas + ?Sized,
    {
        self.paint(canvas, Cell::falling);
    }

    fn lock<C>(&mut self, canvas: &mut C)
    where
        C: Canvas + ?Sized,
    {
        self.paint(canvas, Cell::settled);
        self.skin = None;
    }
}
