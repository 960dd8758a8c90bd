use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "codefeed",
    version,
    about = "Scroll a page with an animated live code generation panel"
)]
pub struct Cli {
    /// Write logs here instead of the default data directory location.
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the interactive page (default).
    Page,
    /// Stream the feed to stdout without a terminal UI.
    Print {
        /// Number of full passes over every sequence.
        #[arg(long, default_value_t = 1)]
        cycles: u32,
        /// Run on virtual time instead of sleeping between lines.
        #[arg(long)]
        instant: bool,
    },
    /// Show how a single line is coloured.
    Tokens { line: String },
}
