use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

mod cli;
mod diff_cmd;
mod dump;
mod generate_cmd;
mod path_guard;
mod sections_cmd;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Generate(args) => generate_cmd::run_generate(args),
        Command::Diff(args) => diff_cmd::run_diff(args),
        Command::Sections(args) => sections_cmd::run_sections(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    // RUST_LOG, when set, wins over -v.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
