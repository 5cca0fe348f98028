//! Playfields and their rules.
//!
//! A [`Level`] owns the cell grid, the skin sequence and the row-clearing
//! policy of one playable level:
//!
//! - [`Boundary`] - how coordinates outside the grid resolve
//! - [`ClearRule`] - which completed rows are removed and how they score
//! - [`SkinBag`] - weighted random sequencing of upcoming skins
//! - [`LevelId`] - the closed set of levels and their table entries
//! - [`SceneSink`] - notifications towards the presentation side

pub use self::{boundary::*, clear_rule::*, registry::*, scene::*, skin_bag::*};

use crate::{Canvas, Cell, SkinKind};

mod boundary;
mod clear_rule;
mod registry;
mod scene;
mod skin_bag;

/// One playable level: a cell grid with its boundary policy, skin sequence
/// and clearing rule.
///
/// A level starts uninitialized (empty grid, no scene sink) and becomes
/// ready with [`Level::init`]. `init` may be called again for every restart;
/// the grid is only reallocated when the dimensions change.
///
/// All writes to stored cells go through one path, which also notifies the
/// scene sink. The sink therefore always mirrors the grid.
#[derive(Debug, Clone)]
pub struct Level<S> {
    id: LevelId,
    rules: LevelRules,
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    skin_bag: SkinBag,
    completed_rows: Vec<usize>,
    scene: Option<S>,
}

impl<S> Level<S> {
    /// Creates an uninitialized level whose skin sequence is seeded randomly.
    #[must_use]
    pub fn new(id: LevelId) -> Self {
        let rules = (id.entry().rules)();
        let skin_bag = SkinBag::new(rules.skins);
        Self::with_parts(id, rules, skin_bag)
    }

    /// Like [`Self::new`], but with a deterministic skin sequence.
    #[must_use]
    pub fn with_seed(id: LevelId, seed: SkinSeed) -> Self {
        let rules = (id.entry().rules)();
        let skin_bag = SkinBag::with_seed(rules.skins, seed);
        Self::with_parts(id, rules, skin_bag)
    }

    fn with_parts(id: LevelId, rules: LevelRules, skin_bag: SkinBag) -> Self {
        Self {
            id,
            rules,
            width: 0,
            height: 0,
            cells: vec![],
            skin_bag,
            completed_rows: vec![],
            scene: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> LevelId {
        self.id
    }

    #[must_use]
    pub fn rules(&self) -> &LevelRules {
        &self.rules
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.scene.is_some()
    }

    #[must_use]
    pub fn scene(&self) -> Option<&S> {
        self.scene.as_ref()
    }

    pub fn scene_mut(&mut self) -> Option<&mut S> {
        self.scene.as_mut()
    }

    /// Detaches the scene sink, returning the level to the uninitialized
    /// state. The grid contents are kept until the next [`Self::init`].
    pub fn release_scene(&mut self) -> Option<S> {
        self.scene.take()
    }

    /// Stored value of an in-range cell.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the grid.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.row(y)[x]
    }

    /// Cells of row `y`, left to right.
    ///
    /// # Panics
    ///
    /// Panics if `y` lies outside the grid.
    #[must_use]
    pub fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * self.width..][..self.width]
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        // `chunks_exact(0)` panics, and a zero-width grid has no cells anyway.
        self.cells.chunks_exact(self.width.max(1))
    }

    /// Row indices found by the last [`Self::find_completed_rows`] call.
    #[must_use]
    pub fn completed_rows(&self) -> &[usize] {
        &self.completed_rows
    }

    /// Skins left in the current cycle of the draw queue.
    pub fn upcoming_skins(&self) -> impl Iterator<Item = SkinKind> + '_ {
        self.skin_bag.upcoming()
    }

    /// Deals the next skin from the weighted draw queue.
    pub fn next_skin(&mut self) -> Option<SkinKind> {
        self.skin_bag.next_skin()
    }

    /// Records every row in `[from_row, from_row + row_count)` (clipped to
    /// the grid) whose cells are all non-empty.
    ///
    /// The result replaces the previous contents of
    /// [`Self::completed_rows`].
    pub fn find_completed_rows(&mut self, from_row: usize, row_count: usize) {
        self.completed_rows.clear();
        let end = from_row.saturating_add(row_count).min(self.height);
        for y in from_row..end {
            if self.row(y).iter().all(|cell| !cell.is_empty()) {
                self.completed_rows.push(y);
            }
        }
    }
}

impl<S> Level<S>
where
    S: SceneSink,
{
    /// Prepares the level for a new game and attaches the scene sink.
    ///
    /// Every cell is reset to empty (and reported to the sink), and the
    /// current draw-queue cycle is discarded.
    pub fn init(&mut self, width: usize, height: usize, scene: S) {
        self.scene = Some(scene);
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.cells = vec![Cell::EMPTY; width * height];
        }
        for y in 0..self.height {
            for x in 0..self.width {
                self.update_pixel(x, y, Cell::EMPTY);
            }
        }
        self.skin_bag.reset();
        self.completed_rows.clear();
    }

    /// Removes each listed row by pulling every row above it down by one.
    ///
    /// Rows are processed independently, in list order. The copy stops at
    /// row 2, which receives row 1; rows 0 and 1 themselves are never
    /// overwritten. Rows outside the grid are skipped.
    pub fn shift_rows_down(&mut self, rows: &[usize]) {
        let height = self.height;
        for &row in rows.iter().filter(|&&row| row < height) {
            for y in (2..=row).rev() {
                for x in 0..self.width {
                    let above = self.cell(x, y - 1);
                    self.update_pixel(x, y, above);
                }
            }
        }
    }

    pub fn add_score(&mut self, delta: u32) {
        if let Some(scene) = &mut self.scene {
            scene.add_score(delta);
        }
    }

    /// Writes an in-range cell and notifies the scene sink.
    pub(crate) fn update_pixel(&mut self, x: usize, y: usize, value: Cell) {
        self.cells[y * self.width + x] = value;
        if let Some(scene) = &mut self.scene {
            scene.update_cell(x, y, value);
        }
    }
}

impl<S> Canvas for Level<S>
where
    S: SceneSink,
{
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn get_pixel(&self, x: isize, y: isize) -> Cell {
        match self.rules.boundary.resolve(x, y, self.width, self.height) {
            Some((x, y)) => self.cell(x, y),
            None => Cell::WALL,
        }
    }

    fn set_pixel(&mut self, x: isize, y: isize, value: Cell) {
        if let Some((x, y)) = self.rules.boundary.resolve(x, y, self.width, self.height) {
            self.update_pixel(x, y, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Recorder {
        updates: Vec<(usize, usize, Cell)>,
        score: u32,
    }

    impl SceneSink for Recorder {
        fn update_cell(&mut self, x: usize, y: usize, value: Cell) {
            self.updates.push((x, y, value));
        }

        fn add_score(&mut self, delta: u32) {
            self.score += delta;
        }
    }

    fn ready(id: LevelId) -> Level<Recorder> {
        let entry = id.entry();
        let mut level = Level::new(id);
        level.init(entry.width, entry.height, Recorder::default());
        level
    }

    #[test]
    fn test_uninitialized_level_is_all_wall() {
        let level: Level<()> = Level::new(LevelId::Classic);
        assert!(!level.is_initialized());
        assert_eq!(level.get_pixel(0, 0), Cell::WALL);
        assert_eq!(level.rows().count(), 0);
    }

    #[test]
    fn test_init_reports_every_cell() {
        let level = ready(LevelId::Classic);
        let scene = level.scene().unwrap();
        assert_eq!(scene.updates.len(), 200);
        assert!(scene.updates.iter().all(|&(_, _, v)| v == Cell::EMPTY));
    }

    #[test]
    fn test_reinit_clears_in_place() {
        let mut level = ready(LevelId::Classic);
        level.set_pixel(3, 4, Cell::settled(1));
        level.next_skin();
        assert!(level.upcoming_skins().count() > 0);

        level.init(10, 20, Recorder::default());
        assert_eq!(level.cell(3, 4), Cell::EMPTY);
        assert_eq!(level.upcoming_skins().count(), 0);
        assert_eq!(level.rows().count(), 20);
    }

    #[test]
    fn test_reinit_with_new_dimensions() {
        let mut level = ready(LevelId::Classic);
        level.init(6, 8, Recorder::default());
        assert_eq!((level.width(), level.height()), (6, 8));
        assert_eq!(level.rows().count(), 8);
        assert!(level.rows().all(|row| row.len() == 6));
    }

    #[test]
    fn test_walled_pixels() {
        let level = ready(LevelId::Classic);
        for y in 0..20 {
            assert_eq!(level.get_pixel(-1, y), Cell::WALL);
            assert_eq!(level.get_pixel(10, y), Cell::WALL);
        }
        assert_eq!(level.get_pixel(4, -1), Cell::WALL);
        assert_eq!(level.get_pixel(4, 20), Cell::WALL);
    }

    #[test]
    fn test_wraparound_pixels() {
        let mut level = ready(LevelId::Wraparound);
        level.set_pixel(11, 5, Cell::settled(1));
        level.set_pixel(0, 7, Cell::settled(2));
        for y in 0..20 {
            assert_eq!(level.get_pixel(-1, y), level.get_pixel(11, y));
            assert_eq!(level.get_pixel(12, y), level.get_pixel(0, y));
        }
        assert_eq!(level.get_pixel(-1, 5), Cell::settled(1));
        assert_eq!(level.get_pixel(12, 7), Cell::settled(2));
        assert_eq!(level.get_pixel(0, -1), Cell::WALL);
    }

    #[test]
    fn test_out_of_range_writes_are_ignored() {
        let mut level = ready(LevelId::Classic);
        let before = level.scene().unwrap().updates.len();
        level.set_pixel(-1, 0, Cell::settled(1));
        level.set_pixel(10, 0, Cell::settled(1));
        level.set_pixel(0, -1, Cell::settled(1));
        level.set_pixel(0, 20, Cell::settled(1));
        assert_eq!(level.scene().unwrap().updates.len(), before);
        assert!(level.rows().flatten().all(|c| c.is_empty()));
    }

    #[test]
    fn test_set_pixel_notifies_scene_with_wrapped_coordinate() {
        let mut level = ready(LevelId::Wraparound);
        level.set_pixel(-2, 3, Cell::falling(2));
        let scene = level.scene().unwrap();
        assert_eq!(scene.updates.last(), Some(&(10, 3, Cell::falling(2))));
    }

    #[test]
    fn test_find_completed_rows_clips_to_height() {
        let mut level = ready(LevelId::Classic);
        for y in [17, 19] {
            for x in 0..10 {
                level.set_pixel(x, y, Cell::settled(1));
            }
        }
        level.find_completed_rows(16, 10);
        assert_eq!(level.completed_rows(), [17, 19]);

        level.find_completed_rows(18, 1);
        assert!(level.completed_rows().is_empty());
    }

    #[test]
    fn test_falling_cells_count_as_filled() {
        let mut level = ready(LevelId::Classic);
        for x in 0..10 {
            level.set_pixel(x, 19, Cell::falling(1));
        }
        level.find_completed_rows(19, 1);
        assert_eq!(level.completed_rows(), [19]);
    }

    #[test]
    fn test_shift_never_overwrites_top_two_rows() {
        let mut level = ready(LevelId::Classic);
        level.set_pixel(0, 0, Cell::settled(1));
        level.set_pixel(1, 1, Cell::settled(2));
        level.set_pixel(2, 2, Cell::settled(1));

        level.shift_rows_down(&[3]);

        assert_eq!(level.cell(0, 0), Cell::settled(1));
        assert_eq!(level.cell(1, 1), Cell::settled(2));
        // Row 1 is copied into row 2 but also stays in place.
        assert_eq!(level.cell(1, 2), Cell::settled(2));
        assert_eq!(level.cell(2, 2), Cell::EMPTY);
        assert_eq!(level.cell(2, 3), Cell::settled(1));
        assert_eq!(level.cell(0, 1), Cell::EMPTY);
    }

    #[test]
    fn test_shift_of_top_rows_is_noop() {
        let mut level = ready(LevelId::Classic);
        level.set_pixel(5, 0, Cell::settled(1));
        level.set_pixel(5, 1, Cell::settled(2));
        let before = level.scene().unwrap().updates.len();
        level.shift_rows_down(&[0, 1]);
        assert_eq!(level.scene().unwrap().updates.len(), before);
        assert_eq!(level.cell(5, 1), Cell::settled(2));
    }

    #[test]
    fn test_shift_skips_rows_outside_grid() {
        let mut level = ready(LevelId::Classic);
        level.set_pixel(4, 18, Cell::settled(1));
        let before = level.scene().unwrap().updates.len();

        level.shift_rows_down(&[20, usize::MAX]);
        assert_eq!(level.scene().unwrap().updates.len(), before);

        level.shift_rows_down(&[25, 19]);
        assert_eq!(level.cell(4, 19), Cell::settled(1));
        assert_eq!(level.cell(4, 18), Cell::EMPTY);
    }

    #[test]
    fn test_add_score_reaches_scene() {
        let mut level = ready(LevelId::Classic);
        level.add_score(7);
        level.add_score(9);
        assert_eq!(level.scene().unwrap().score, 16);
    }

    #[test]
    fn test_release_scene_detaches() {
        let mut level = ready(LevelId::Classic);
        assert!(level.release_scene().is_some());
        assert!(!level.is_initialized());
        level.add_score(5);
        level.set_pixel(0, 0, Cell::settled(1));
        assert_eq!(level.cell(0, 0), Cell::settled(1));
    }

    #[test]
    fn test_seeded_levels_deal_the_same_skins() {
        let seed = SkinSeed::from_bytes([7; 16]);
        let mut a: Level<()> = Level::with_seed(LevelId::Wraparound, seed);
        let mut b: Level<()> = Level::with_seed(LevelId::Wraparound, seed);
        for _ in 0..120 {
            assert_eq!(a.next_skin(), b.next_skin());
        }
    }
}
