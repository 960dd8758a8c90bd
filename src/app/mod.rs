mod feed;
mod highlight;
mod page;
mod panel;
mod playback;
mod print;
mod timer;
mod tui;
mod typewriter;
mod visibility;


use anyhow::Result;

use crate::cli::{Cli, Command};

use self::print::{print_tokens, run_print};

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Command::Print { cycles, instant }) => run_print(cycles, instant)?,
        Some(Command::Tokens { line }) => print_tokens(&line)?,
        Some(Command::Page) | None => tui::run_tui()?,
    }

    Ok(())
}
