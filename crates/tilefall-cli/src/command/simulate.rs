use std::path::PathBuf;

use anyhow::bail;
use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::Serialize;
use tilefall_engine::{Cell, GameSession, GameStats, InputCommand, LevelId, SessionConfig, SkinSeed};

use crate::util;

const PROGRESS_INTERVAL: u64 = 100_000;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Level to play, by name or index
    #[arg(long, default_value_t)]
    level: LevelId,
    /// Number of fixed-update frames to run
    #[arg(long, default_value_t = 100_000)]
    frames: u64,
    /// Seed for the skin sequence and the bot's input (32 hex digits)
    #[arg(long)]
    seed: Option<SkinSeed>,
    /// Session configuration JSON file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the starting gravity threshold
    #[arg(long)]
    start_speed: Option<u32>,
    /// Override the soft-drop gravity threshold
    #[arg(long)]
    fast_speed: Option<u32>,
    /// Override the score step between speed-ups
    #[arg(long)]
    speedup_score_step: Option<u32>,
    /// Probability of an input command on each frame
    #[arg(long, default_value_t = 0.05)]
    input_rate: f64,
    /// Probability of holding soft drop on each frame
    #[arg(long, default_value_t = 0.5)]
    soft_drop_rate: f64,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct GameSummary {
    score: u32,
    speed_level: u32,
    spawned_pieces: usize,
    cleared_rows: usize,
}

impl GameSummary {
    fn new(stats: &GameStats) -> Self {
        Self {
            score: stats.score(),
            speed_level: stats.speed_level(),
            spawned_pieces: stats.spawned_pieces(),
            cleared_rows: stats.cleared_rows(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    level: LevelId,
    seed: SkinSeed,
    config: SessionConfig,
    frames: u64,
    finished_games: Vec<GameSummary>,
    best_score: u32,
    current_game: GameSummary,
    board: Vec<String>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let config = load_config(arg)?;
    for (name, rate) in [
        ("input-rate", arg.input_rate),
        ("soft-drop-rate", arg.soft_drop_rate),
    ] {
        if !(0.0..=1.0).contains(&rate) {
            bail!("--{name} must be between 0 and 1, got {rate}");
        }
    }

    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = Pcg32::from_seed(seed.to_bytes());
    let mut session = GameSession::with_seed(config, seed);
    session.select_level(arg.level.index());

    eprintln!(
        "Simulating {} frames on level {} (seed {seed})...",
        arg.frames, arg.level
    );

    let mut finished_games = vec![];
    session.start();
    for frame in 1..=arg.frames {
        if rng.random_bool(arg.input_rate) {
            let command = InputCommand::ALL[rng.random_range(0..InputCommand::ALL.len())];
            session.handle_input(command);
        }
        let soft_drop = rng.random_bool(arg.soft_drop_rate);
        let event = session.fixed_update(soft_drop);
        if event.is_locked() && session.state().is_idle() {
            let summary = GameSummary::new(session.stats());
            eprintln!(
                "Game {} over: score {}, {} pieces",
                finished_games.len() + 1,
                summary.score,
                summary.spawned_pieces,
            );
            finished_games.push(summary);
            session.start();
        }
        // Presentation is not simulated; keep the update queue from growing.
        session.drain_cell_updates();

        if frame.is_multiple_of(PROGRESS_INTERVAL) {
            eprintln!("{frame} frames, score {}", session.stats().score());
        }
    }

    let current_game = GameSummary::new(session.stats());
    let best_score = finished_games
        .iter()
        .chain([&current_game])
        .map(|game| game.score)
        .max()
        .unwrap_or(0);
    eprintln!(
        "Finished {} games, best score {best_score}.",
        finished_games.len()
    );

    let report = SimulationReport {
        level: session.level_id(),
        seed,
        config,
        frames: arg.frames,
        finished_games,
        best_score,
        current_game,
        board: session.level().rows().map(render_row).collect(),
    };
    util::save_json(&report, arg.output.as_deref())?;

    Ok(())
}

fn load_config(arg: &SimulateArg) -> anyhow::Result<SessionConfig> {
    let mut config = match &arg.config {
        Some(path) => util::read_json_file("session config", path)?,
        None => SessionConfig::default(),
    };
    if let Some(speed) = arg.start_speed {
        config.start_speed = speed;
    }
    if let Some(speed) = arg.fast_speed {
        config.fast_speed = speed;
    }
    if let Some(step) = arg.speedup_score_step {
        config.speedup_score_step = step;
    }
    Ok(config)
}

/// Renders a row as text: `.` for empty, `*` for the falling piece and the
/// color digit for settled blocks.
fn render_row(row: &[Cell]) -> String {
    row.iter()
        .map(|cell| {
            if cell.is_empty() {
                '.'
            } else if cell.is_falling() {
                '*'
            } else {
                char::from_digit(cell.color() % 10, 10).unwrap_or('#')
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_row() {
        let row = [
            Cell::EMPTY,
            Cell::settled(3),
            Cell::falling(2),
            Cell::settled(12),
        ];
        assert_eq!(render_row(&row), ".3*2");
    }
}
