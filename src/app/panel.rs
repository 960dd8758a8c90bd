use std::collections::VecDeque;

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

use super::feed::INITIAL_STATUS;
use super::highlight::RenderedLine;
use super::playback::{LineId, MAX_VISIBLE_LINES, OutputSurface};

/// Borders, status row, divider, the line cap and one row for a line that is
/// still fading out.
pub(crate) const PANEL_HEIGHT: u16 = 2 + 1 + 1 + MAX_VISIBLE_LINES as u16 + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LinePhase {
    Attached,
    Entering,
    Shown,
    Leaving,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PanelLine {
    pub(crate) id: LineId,
    pub(crate) line: RenderedLine,
    pub(crate) phase: LinePhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusPhase {
    Shown,
    FadingOut,
}

#[derive(Debug, Clone)]
pub(crate) struct CodePanel {
    lines: VecDeque<PanelLine>,
    next_id: LineId,
    status: String,
    status_phase: StatusPhase,
}

impl Default for CodePanel {
    fn default() -> Self {
        Self {
            lines: VecDeque::new(),
            next_id: 0,
            status: INITIAL_STATUS.to_string(),
            status_phase: StatusPhase::Shown,
        }
    }
}

impl CodePanel {
    #[cfg(test)]
    pub(crate) fn lines(&self) -> impl Iterator<Item = &PanelLine> {
        self.lines.iter()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.lines.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn status_phase(&self) -> StatusPhase {
        self.status_phase
    }

    fn find_mut(&mut self, id: LineId) -> Option<&mut PanelLine> {
        self.lines.iter_mut().find(|entry| entry.id == id)
    }
}

impl OutputSurface for CodePanel {
    fn status_text(&self) -> &str {
        &self.status
    }

    fn fade_status_out(&mut self) {
        self.status_phase = StatusPhase::FadingOut;
    }

    fn show_status(&mut self, text: &str) {
        text.clone_into(&mut self.status);
        self.status_phase = StatusPhase::Shown;
    }

    fn append_line(&mut self, line: RenderedLine) -> LineId {
        let id = self.next_id;
        self.next_id += 1;
        self.lines.push_back(PanelLine {
            id,
            line,
            phase: LinePhase::Attached,
        });
        id
    }

    fn reveal_line(&mut self, id: LineId) {
        if let Some(entry) = self.find_mut(id)
            && entry.phase == LinePhase::Attached
        {
            entry.phase = LinePhase::Entering;
        }
    }

    fn settle_line(&mut self, id: LineId) {
        if let Some(entry) = self.find_mut(id)
            && entry.phase == LinePhase::Entering
        {
            entry.phase = LinePhase::Shown;
        }
    }

    fn live_line_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|entry| entry.phase != LinePhase::Leaving)
            .count()
    }

    fn begin_evict_oldest(&mut self) -> Option<LineId> {
        let entry = self
            .lines
            .iter_mut()
            .find(|entry| entry.phase != LinePhase::Leaving)?;
        entry.phase = LinePhase::Leaving;
        Some(entry.id)
    }

    fn remove_line(&mut self, id: LineId) {
        self.lines.retain(|entry| entry.id != id);
    }

    fn clear(&mut self) {
        self.lines.clear();
    }
}

impl Widget for &CodePanel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(64, 64, 64)))
            .title(" step2.js ")
            .style(Style::default().bg(Color::Rgb(10, 10, 10)));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let status_style = match self.status_phase {
            StatusPhase::Shown => Style::default()
                .fg(Color::Rgb(74, 222, 128))
                .add_modifier(Modifier::BOLD),
            StatusPhase::FadingOut => Style::default()
                .fg(Color::Rgb(38, 90, 55))
                .add_modifier(Modifier::DIM),
        };
        Paragraph::new(Line::styled(format!("● {}", self.status), status_style))
            .render(rows[0], buf);
        Paragraph::new(Line::styled(
            "─".repeat(usize::from(rows[1].width)),
            Style::default().fg(Color::Rgb(38, 38, 38)),
        ))
        .render(rows[1], buf);

        let capacity = usize::from(rows[2].height);
        let skip = self.lines.len().saturating_sub(capacity);
        let gutter = Style::default().fg(Color::Rgb(82, 82, 82));
        let lines: Vec<Line> = self
            .lines
            .iter()
            .skip(skip)
            .map(|entry| match entry.phase {
                LinePhase::Attached => Line::default(),
                LinePhase::Entering => entry.line.to_line(gutter).patch_style(
                    Style::default().add_modifier(Modifier::DIM),
                ),
                LinePhase::Shown => entry.line.to_line(gutter),
                LinePhase::Leaving => entry.line.to_line(gutter).patch_style(
                    Style::default()
                        .fg(Color::Rgb(60, 60, 60))
                        .add_modifier(Modifier::DIM),
                ),
            })
            .collect();
        Paragraph::new(lines).render(rows[2], buf);
    }
}
