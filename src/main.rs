//! CLI entry point for step-wise maze generation

use cellmaze::io::cli::{Cli, MazeRunner};
use clap::Parser;

fn main() -> cellmaze::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let mut runner = MazeRunner::new(cli);
    runner.process()?;
    Ok(())
}
