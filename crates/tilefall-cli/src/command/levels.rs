use std::path::PathBuf;

use serde::Serialize;
use tilefall_engine::{LevelId, LevelRules};

use crate::util;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct LevelsArg {
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct LevelSummary {
    index: usize,
    id: LevelId,
    width: usize,
    height: usize,
    rules: LevelRules,
}

pub(crate) fn run(arg: &LevelsArg) -> anyhow::Result<()> {
    let LevelsArg { output } = arg;
    let levels = LevelId::ALL
        .into_iter()
        .map(|id| {
            let entry = id.entry();
            LevelSummary {
                index: id.index(),
                id,
                width: entry.width,
                height: entry.height,
                rules: (entry.rules)(),
            }
        })
        .collect::<Vec<_>>();
    util::save_json(&levels, output.as_deref())?;
    Ok(())
}
