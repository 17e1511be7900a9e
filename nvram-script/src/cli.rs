use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "nvram-script")]
#[command(about = "Generate an nvram set script from a router NVRAM dump")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Write a script reproducing the settings that differ from the base.
    Generate(GenerateArgs),
    /// Print the settings that differ from the base in dump syntax.
    Diff(DiffArgs),
    /// Show how changed settings would be sectioned, without writing a script.
    Sections(SectionsArgs),
}

#[derive(Args, Debug)]
pub struct DumpArgs {
    /// NVRAM dump to convert (output of `nvram show`).
    #[arg(short, long, default_value = "nvram.txt")]
    pub input: PathBuf,
    /// Baseline dump, e.g. factory defaults. Without it every setting is kept.
    #[arg(short, long)]
    pub base: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Category rules TOML file. Defaults to the embedded rules.
    #[arg(long)]
    pub rules: Option<PathBuf>,
    /// Name-derived sections smaller than this merge into Other.
    #[arg(long, default_value_t = 3)]
    pub min_group_size: usize,
    /// Settings every instance must share before they are looped.
    #[arg(long, default_value_t = 3)]
    pub min_keys: usize,
    /// Do not fold repeated per-instance settings into loops.
    #[arg(long)]
    pub no_factor: bool,
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub dump: DumpArgs,
    #[command(flatten)]
    pub rules: RulesArgs,
    /// Script file to write.
    #[arg(short, long, default_value = "set-nvram.sh")]
    pub output: PathBuf,
    /// Also write the raw diff in dump syntax.
    #[arg(long)]
    pub diff_output: Option<PathBuf>,
    /// Output format for the run summary.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct DiffArgs {
    #[command(flatten)]
    pub dump: DumpArgs,
    /// Write the diff here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct SectionsArgs {
    #[command(flatten)]
    pub dump: DumpArgs,
    #[command(flatten)]
    pub rules: RulesArgs,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
