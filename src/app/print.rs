use std::collections::VecDeque;
use std::io::{self, Write};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::style::{self, Stylize};
use ratatui::style::Color;
use tracing::info;

use super::feed::{CODE_SEQUENCES, INITIAL_STATUS};
use super::highlight::{RenderedLine, highlight_line};
use super::playback::{LineId, OutputSurface, Playback, Wakeup};
use super::timer::TimerQueue;

/// Surface that renders to a text stream. Lines are queued as ANSI-styled
/// strings and written by the caller, so write errors surface there.
#[derive(Debug)]
pub(crate) struct StdoutSurface {
    status: String,
    live: VecDeque<LineId>,
    next_id: LineId,
    pending: Vec<String>,
}

impl Default for StdoutSurface {
    fn default() -> Self {
        Self {
            status: INITIAL_STATUS.to_string(),
            live: VecDeque::new(),
            next_id: 0,
            pending: Vec::new(),
        }
    }
}

impl StdoutSurface {
    pub(crate) fn drain(&mut self) -> std::vec::Drain<'_, String> {
        self.pending.drain(..)
    }
}

impl OutputSurface for StdoutSurface {
    fn status_text(&self) -> &str {
        &self.status
    }

    fn fade_status_out(&mut self) {}

    fn show_status(&mut self, text: &str) {
        text.clone_into(&mut self.status);
        let styled = format!("» {text}")
            .with(to_ansi(Color::Rgb(74, 222, 128)))
            .bold();
        self.pending.push(styled.to_string());
    }

    fn append_line(&mut self, line: RenderedLine) -> LineId {
        self.pending.push(format_line(&line));
        let id = self.next_id;
        self.next_id += 1;
        self.live.push_back(id);
        id
    }

    fn reveal_line(&mut self, _id: LineId) {}

    fn settle_line(&mut self, _id: LineId) {}

    fn live_line_count(&self) -> usize {
        self.live.len()
    }

    fn begin_evict_oldest(&mut self) -> Option<LineId> {
        self.live.pop_front()
    }

    fn remove_line(&mut self, _id: LineId) {}

    fn clear(&mut self) {
        self.live.clear();
    }
}

pub(crate) fn format_line(line: &RenderedLine) -> String {
    let gutter = format!("{:>3}", line.number_label()).with(to_ansi(Color::Rgb(82, 82, 82)));
    let body: String = line
        .tokens
        .iter()
        .map(|token| {
            token
                .text
                .as_str()
                .with(to_ansi(token.kind.color()))
                .to_string()
        })
        .collect();
    format!("{gutter}  {body}")
}

fn to_ansi(color: Color) -> style::Color {
    match color {
        Color::Rgb(r, g, b) => style::Color::Rgb { r, g, b },
        _ => style::Color::Reset,
    }
}

pub(crate) fn run_print(cycles: u32, instant: bool) -> Result<()> {
    let mut playback = Playback::new(CODE_SEQUENCES);
    let mut timers = TimerQueue::<Wakeup>::default();
    let mut surface = StdoutSurface::default();
    let mut out = io::stdout().lock();
    let origin = Instant::now();

    info!(cycles, instant, "printing feed");
    let mut completed = 0u32;
    let mut last_sequence = playback.state().active_sequence_index;
    if cycles > 0 {
        playback.start(&mut timers, &mut surface);
    }

    while playback.is_running() {
        for chunk in surface.drain() {
            writeln!(out, "{chunk}").context("failed to write to stdout")?;
        }
        out.flush().context("failed to flush stdout")?;

        let Some(deadline) = timers.next_deadline() else {
            break;
        };
        let now = if instant {
            deadline
        } else {
            thread::sleep(deadline.saturating_sub(origin.elapsed()));
            origin.elapsed().max(deadline)
        };

        while let Some(due) = timers.pop_due(now) {
            playback.handle(due, &mut timers, &mut surface);
            let sequence = playback.state().active_sequence_index;
            if sequence == 0 && last_sequence != 0 {
                completed += 1;
                if completed >= cycles {
                    playback.stop(&mut timers);
                    break;
                }
            }
            last_sequence = sequence;
        }
    }

    info!(completed, "feed finished");
    Ok(())
}

pub(crate) fn print_tokens(line: &str) -> Result<()> {
    let mut out = io::stdout().lock();
    for token in highlight_line(line) {
        writeln!(
            out,
            "{:<8} {}",
            token.kind.label(),
            format!("{:?}", token.text).with(to_ansi(token.kind.color()))
        )
        .context("failed to write to stdout")?;
    }
    Ok(())
}
