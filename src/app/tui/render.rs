use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Widget, Wrap};

use super::super::page::{Page, Section};
use super::super::typewriter::Typewriter;

pub(super) fn draw_page(
    frame: &mut Frame,
    page: &Page,
    typewriter: Option<&Typewriter>,
    scroll: u16,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());
    let viewport = chunks[0];

    let page_buf = render_page(page, typewriter, viewport.width);
    blit_rows(&page_buf, scroll, viewport, frame.buffer_mut());

    let max_scroll = page.max_scroll(viewport.height);
    let bar = Paragraph::new(Line::from(vec![
        Span::styled(
            " CODEFEED ",
            Style::default()
                .bg(Color::Rgb(110, 170, 255))
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  row {scroll}/{max_scroll}  "),
            Style::default().fg(Color::Rgb(185, 195, 210)),
        ),
        Span::styled(
            generator_state(typewriter),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            "   ↑/↓ scroll  r reset  q quit",
            Style::default().fg(Color::Rgb(125, 135, 150)),
        ),
    ]))
    .style(Style::default().bg(Color::Rgb(20, 22, 30)));
    frame.render_widget(bar, chunks[1]);
}

fn generator_state(typewriter: Option<&Typewriter>) -> &'static str {
    match typewriter {
        None => "no generator",
        Some(tw) if tw.playback().is_running() => "generating",
        Some(tw) if tw.panel().is_empty() => "waiting",
        Some(_) => "paused",
    }
}

/// Draws the whole page, offscreen, at its full height.
pub(crate) fn render_page(page: &Page, typewriter: Option<&Typewriter>, width: u16) -> Buffer {
    let mut buf = Buffer::empty(Rect::new(0, 0, width, page.height()));
    Block::default()
        .style(Style::default().bg(Color::Black))
        .render(buf.area, &mut buf);

    for (rect, section) in page.layout(width) {
        match section {
            Section::Hero { title, tagline } => {
                let hero = Paragraph::new(vec![
                    Line::styled(
                        *title,
                        Style::default()
                            .fg(Color::Rgb(110, 170, 255))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Line::default(),
                    Line::styled(*tagline, Style::default().fg(Color::Rgb(185, 195, 210))),
                ])
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(Block::default().padding(Padding::new(2, 2, 1, 1)));
                hero.render(rect, &mut buf);
            }
            Section::Text { title, body, .. } => {
                let text = Paragraph::new(*body)
                    .style(Style::default().fg(Color::Rgb(230, 230, 230)))
                    .wrap(Wrap { trim: true })
                    .block(panel_block(*title));
                text.render(rect, &mut buf);
            }
            Section::CodeWindow => match typewriter {
                Some(tw) => tw.panel().render(rect, &mut buf),
                None => panel_block("Step 2").render(rect, &mut buf),
            },
        }
    }
    buf
}

/// Copies page rows `scroll..` into `viewport` on the frame buffer.
pub(crate) fn blit_rows(page: &Buffer, scroll: u16, viewport: Rect, dest: &mut Buffer) {
    let width = viewport.width.min(page.area.width);
    for row in 0..viewport.height {
        let src_y = scroll.saturating_add(row);
        if src_y >= page.area.height {
            break;
        }
        for col in 0..width {
            dest[(viewport.x + col, viewport.y + row)] = page[(col, src_y)].clone();
        }
    }
}

fn panel_block(title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(125, 135, 150)))
        .title(title)
        .padding(Padding::horizontal(1))
}
