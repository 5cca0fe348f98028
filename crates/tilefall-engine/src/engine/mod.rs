//! Game orchestration: gravity timing, scoring and level selection.

pub use self::{config::*, game_session::*, game_stats::*, session_scene::*};

mod config;
mod game_session;
mod game_stats;
mod session_scene;
