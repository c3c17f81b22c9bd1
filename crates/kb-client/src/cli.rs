use crate::commands::Commands;

use clap::Parser;

#[derive(Parser)]
#[command(name = "kb")]
#[command(about = "Kanban board command-line client")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// API root URL (defaults to api.base_url from config.toml)
    #[arg(long, global = true)]
    pub(crate) server: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub(crate) pretty: bool,

    /// Log at debug level and print the effective configuration
    #[arg(long, short, global = true)]
    pub(crate) verbose: bool,
}
