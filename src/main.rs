mod app;
mod cli;
mod logging;
mod paths;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let _log_guard = logging::init(cli.log_file.as_deref())?;
    app::run(cli)
}
