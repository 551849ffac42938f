use clap::{Parser, Subcommand};

use self::{run::RunArg, show::ShowArg};

mod run;
mod show;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play (and train) episodes between a player and an environment
    Run(#[clap(flatten)] RunArg),
    /// Print a board with its estimated value and greedy move
    Show(#[clap(flatten)] ShowArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Run(arg) => run::run(&arg)?,
        Mode::Show(arg) => show::run(&arg)?,
    }
    Ok(())
}
