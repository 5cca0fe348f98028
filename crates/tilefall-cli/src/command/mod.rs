use clap::{Parser, Subcommand};

use self::{levels::LevelsArg, simulate::SimulateArg};

mod levels;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play a level with a random-input bot and report the results
    Simulate(#[clap(flatten)] SimulateArg),
    /// List the playable levels and their rules
    Levels(#[clap(flatten)] LevelsArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::Levels(arg) => levels::run(&arg)?,
    }
    Ok(())
}
