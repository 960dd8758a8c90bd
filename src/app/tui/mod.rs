mod render;
mod session;

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use tracing::info;

use super::page::Page;
use super::typewriter::Typewriter;
use super::visibility::intersection_ratio;

use self::render::draw_page;
use self::session::TuiSession;

#[cfg(test)]
pub(crate) use self::render::{blit_rows, render_page};

/// Upper bound on how long the loop blocks on input when no timer is due.
const IDLE_POLL: Duration = Duration::from_millis(200);
/// Rows reserved below the page for the key bar.
const BAR_HEIGHT: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScrollAction {
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
}

impl ScrollAction {
    pub(crate) fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Up | KeyCode::Char('k') => Some(Self::LineUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Self::LineDown),
            KeyCode::PageUp => Some(Self::PageUp),
            KeyCode::PageDown | KeyCode::Char(' ') => Some(Self::PageDown),
            KeyCode::Home | KeyCode::Char('g') => Some(Self::Top),
            KeyCode::End | KeyCode::Char('G') => Some(Self::Bottom),
            _ => None,
        }
    }

    /// New scroll offset, clamped to `0..=max_scroll`.
    pub(crate) fn apply(self, scroll: u16, viewport_height: u16, max_scroll: u16) -> u16 {
        let page = viewport_height.saturating_sub(1).max(1);
        let next = match self {
            Self::LineUp => scroll.saturating_sub(1),
            Self::LineDown => scroll.saturating_add(1),
            Self::PageUp => scroll.saturating_sub(page),
            Self::PageDown => scroll.saturating_add(page),
            Self::Top => 0,
            Self::Bottom => max_scroll,
        };
        next.min(max_scroll)
    }
}

/// Visible part of the page, in page coordinates.
pub(crate) fn page_viewport(width: u16, height: u16, scroll: u16) -> Rect {
    Rect::new(0, scroll, width, height.saturating_sub(BAR_HEIGHT))
}

/// How much of the code window is on screen; zero while the terminal is
/// unfocused.
pub(crate) fn panel_visibility(page: &Page, viewport: Rect, focused: bool) -> f64 {
    if !focused {
        return 0.0;
    }
    page.code_window(viewport.width)
        .map(|panel| intersection_ratio(panel, viewport))
        .unwrap_or(0.0)
}

/// Runs `body` with the mounted typewriter and tears it down afterwards,
/// whether `body` returned normally or bailed out with an error.
pub(crate) fn with_teardown<T>(
    typewriter: &mut Option<Typewriter>,
    body: impl FnOnce(&mut Option<Typewriter>) -> Result<T>,
) -> Result<T> {
    let result = body(typewriter);
    if let Some(tw) = typewriter.as_mut() {
        tw.teardown();
    }
    result
}

pub(crate) fn run_tui() -> Result<()> {
    let page = Page::landing();
    let mut typewriter = Typewriter::attach(&page);

    let mut session = TuiSession::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))
        .context("failed to initialize terminal backend")?;
    terminal.clear()?;
    info!(height = page.height(), "page opened");

    with_teardown(&mut typewriter, |typewriter| {
        page_loop(&mut terminal, &page, typewriter)
    })?;

    terminal.show_cursor()?;
    session.leave()?;
    Ok(())
}

fn page_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    page: &Page,
    typewriter: &mut Option<Typewriter>,
) -> Result<()> {
    let origin = Instant::now();
    let mut scroll = 0u16;
    let mut focused = true;

    loop {
        let size = terminal.size().context("failed to read terminal size")?;
        let viewport_height = size.height.saturating_sub(BAR_HEIGHT);
        let max_scroll = page.max_scroll(viewport_height);
        scroll = scroll.min(max_scroll);

        if let Some(tw) = typewriter.as_mut() {
            tw.advance(origin.elapsed());
            let viewport = page_viewport(size.width, size.height, scroll);
            tw.observe(panel_visibility(page, viewport, focused));
        }

        terminal.draw(|frame| draw_page(frame, page, typewriter.as_ref(), scroll))?;

        let elapsed = origin.elapsed();
        let timeout = typewriter
            .as_ref()
            .and_then(Typewriter::next_deadline)
            .map_or(IDLE_POLL, |deadline| {
                deadline.saturating_sub(elapsed).min(IDLE_POLL)
            });
        if !event::poll(timeout)? {
            continue;
        }

        let key = match event::read()? {
            Event::FocusGained => {
                focused = true;
                continue;
            }
            Event::FocusLost => {
                focused = false;
                continue;
            }
            Event::Key(key) => key,
            _ => continue,
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
            KeyCode::Char('r') => {
                if let Some(tw) = typewriter.as_mut() {
                    tw.reset();
                }
            }
            code => {
                if let Some(action) = ScrollAction::from_key(code) {
                    scroll = action.apply(scroll, viewport_height, max_scroll);
                }
            }
        }
    }
}
