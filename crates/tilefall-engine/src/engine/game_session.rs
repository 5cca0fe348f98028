use std::{collections::HashMap, mem};

use serde::{Deserialize, Serialize};

use crate::{
    Piece,
    level::{Level, LevelId, SkinSeed},
};

use super::{CellUpdate, GameStats, SessionConfig, SessionScene};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    /// A piece is falling.
    Playing,
    /// No active piece; waiting for [`GameSession::start`].
    Idle,
}

/// What a call to [`GameSession::fixed_update`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickEvent {
    /// No active piece.
    Idle,
    /// Counting frames towards the next gravity step.
    Waiting,
    /// The piece moved one row down.
    Moved,
    /// The piece locked, completed rows were cleared and the next piece was
    /// dealt.
    Locked { cleared_rows: usize },
}

/// Player input applied to the falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputCommand {
    RotateCw,
    RotateCcw,
    MoveLeft,
    MoveRight,
}

impl InputCommand {
    pub const ALL: [Self; 4] = [
        Self::RotateCw,
        Self::RotateCcw,
        Self::MoveLeft,
        Self::MoveRight,
    ];
}

/// A game: the selected level, the falling piece and the gravity clock.
///
/// Levels are created on first selection and kept for the lifetime of the
/// session, so switching back to a level reuses its grid and skin sequence.
/// The active level is always initialized.
///
/// # Example
///
/// ```
/// use tilefall_engine::{GameSession, SessionConfig, TickEvent};
///
/// let mut session = GameSession::new(SessionConfig::default());
/// assert!(session.state().is_idle());
///
/// assert!(session.start());
/// assert!(session.state().is_playing());
///
/// // The piece falls one row every `speed + 1` frames.
/// for _ in 0..50 {
///     assert_eq!(session.fixed_update(false), TickEvent::Waiting);
/// }
/// assert_eq!(session.fixed_update(false), TickEvent::Moved);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    config: SessionConfig,
    seed: Option<SkinSeed>,
    level: Level<SessionScene>,
    parked: HashMap<LevelId, Level<SessionScene>>,
    piece: Piece,
    frames: u32,
}

impl GameSession {
    /// Creates a session on the default level, with random skin sequences.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self::build(config, None)
    }

    /// Creates a session whose levels deal skins from `seed`.
    #[must_use]
    pub fn with_seed(config: SessionConfig, seed: SkinSeed) -> Self {
        Self::build(config, Some(seed))
    }

    fn build(config: SessionConfig, seed: Option<SkinSeed>) -> Self {
        let mut session = Self {
            config,
            seed,
            level: create_level(LevelId::default(), seed),
            parked: HashMap::new(),
            piece: Piece::new(),
            frames: 0,
        };
        session.init_level();
        session
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn level(&self) -> &Level<SessionScene> {
        &self.level
    }

    #[must_use]
    pub fn level_id(&self) -> LevelId {
        self.level.id()
    }

    #[must_use]
    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.piece.is_empty() {
            SessionState::Idle
        } else {
            SessionState::Playing
        }
    }

    /// # Panics
    ///
    /// Panics if the active level has no scene, which cannot happen.
    #[must_use]
    pub fn stats(&self) -> &GameStats {
        self.level
            .scene()
            .expect("active level is initialized")
            .stats()
    }

    /// Takes the cell changes made since the last call, oldest first.
    pub fn drain_cell_updates(&mut self) -> Vec<CellUpdate> {
        self.scene_mut().drain_cell_updates()
    }

    /// Switches to the level at `index` and resets it for a new game.
    ///
    /// An index past the end of the level list selects the default level.
    pub fn select_level(&mut self, index: usize) {
        let id = LevelId::from_index(index).unwrap_or_default();
        if id != self.level.id() {
            let next = self
                .parked
                .remove(&id)
                .unwrap_or_else(|| create_level(id, self.seed));
            let mut previous = mem::replace(&mut self.level, next);
            previous.release_scene();
            self.parked.insert(previous.id(), previous);
        }
        self.init_level();
    }

    /// Selects the level after the current one, wrapping to the default.
    pub fn next_level(&mut self) {
        self.select_level(self.level.id().index() + 1);
    }

    /// Restarts the current level and deals the first piece.
    ///
    /// Does nothing and returns `false` while a piece is still falling.
    pub fn start(&mut self) -> bool {
        if !self.piece.is_empty() {
            return false;
        }
        self.init_level();
        self.spawn_piece();
        true
    }

    /// Applies one input to the falling piece. Returns whether it moved.
    pub fn handle_input(&mut self, command: InputCommand) -> bool {
        let level = &mut self.level;
        match command {
            InputCommand::RotateCw => self.piece.rotate_cw(level),
            InputCommand::RotateCcw => self.piece.rotate_ccw(level),
            InputCommand::MoveLeft => self.piece.move_left(level),
            InputCommand::MoveRight => self.piece.move_right(level),
        }
    }

    /// Advances the gravity clock by one frame.
    ///
    /// With `soft_drop` set, the piece falls at the configured fast speed.
    /// When the piece cannot move further down it locks, rows are cleared
    /// starting at the piece's top row, and the next piece is dealt.
    pub fn fixed_update(&mut self, soft_drop: bool) -> TickEvent {
        if self.piece.is_empty() {
            return TickEvent::Idle;
        }

        let threshold = if soft_drop {
            self.config.fast_speed
        } else {
            self.stats().speed()
        };
        self.frames += 1;
        if self.frames <= threshold {
            return TickEvent::Waiting;
        }

        self.frames = 0;
        if self.piece.move_down(&mut self.level) {
            return TickEvent::Moved;
        }

        let from_row = usize::try_from(self.piece.top()).unwrap_or(0);
        let cleared_rows = self.level.remove_rows(from_row);
        self.scene_mut().stats_mut().record_cleared_rows(cleared_rows);
        self.spawn_piece();
        TickEvent::Locked { cleared_rows }
    }

    fn init_level(&mut self) {
        let entry = self.level.id().entry();
        self.level
            .init(entry.width, entry.height, SessionScene::new(&self.config));
        self.piece.clear();
        self.frames = 0;
    }

    fn spawn_piece(&mut self) {
        if let Some(skin) = self.level.next_skin() {
            self.piece.init(&mut self.level, skin);
            self.scene_mut().stats_mut().record_spawn();
        }
    }

    fn scene_mut(&mut self) -> &mut SessionScene {
        self.level
            .scene_mut()
            .expect("active level is initialized")
    }
}

fn create_level(id: LevelId, seed: Option<SkinSeed>) -> Level<SessionScene> {
    match seed {
        Some(seed) => Level::with_seed(id, seed),
        None => Level::new(id),
    }
}
