use flashquote_core::render::{FOCAL_COLUMN, Screen};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub fn draw(frame: &mut Frame, screen: &Screen<'_>, entry: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let title = Paragraph::new("flashquote")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(title, chunks[0]);

    draw_word_area(frame, chunks[1], screen);
    draw_status(frame, chunks[2], screen, entry);
}

fn draw_word_area(frame: &mut Frame, area: Rect, screen: &Screen<'_>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let center_y = inner.y + inner.height / 2;

    match screen {
        Screen::Idle { .. } => {
            centered_text(frame, inner, center_y, "Press space to start", Color::DarkGray);
        }
        Screen::Fetching { .. } => {
            centered_text(frame, inner, center_y, "Fetching quote...", Color::DarkGray);
        }
        Screen::Errored { message, .. } => {
            centered_text(frame, inner, center_y, message, Color::Red);
        }
        Screen::Reading { word, .. } => {
            let focal_x = inner.x + inner.width / 2;

            // Vertical guides marking the focal column.
            let marker = Style::default().fg(Color::DarkGray);
            if center_y > inner.y {
                frame.render_widget(
                    Paragraph::new("|").style(marker),
                    Rect::new(focal_x, center_y - 1, 1, 1),
                );
            }
            if center_y + 1 < inner.y + inner.height {
                frame.render_widget(
                    Paragraph::new("|").style(marker),
                    Rect::new(focal_x, center_y + 1, 1, 1),
                );
            }

            // The padded word starts a fixed number of columns before the
            // focal guide, so the focal letter never moves between frames.
            let start_x = focal_x.saturating_sub(FOCAL_COLUMN as u16);
            let line = Line::from(vec![
                Span::raw(" ".repeat(word.padding)),
                Span::styled(word.prefix, Style::default().fg(Color::White)),
                Span::styled(
                    word.focal,
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(word.suffix, Style::default().fg(Color::White)),
            ]);
            let width = line.width() as u16;
            let width = width.min(inner.right().saturating_sub(start_x));
            frame.render_widget(
                Paragraph::new(line),
                Rect::new(start_x, center_y, width.max(1), 1),
            );
        }
    }
}

fn centered_text(frame: &mut Frame, inner: Rect, y: u16, text: &str, color: Color) {
    let widget = Paragraph::new(text)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center);
    frame.render_widget(widget, Rect::new(inner.x, y, inner.width, 1));
}

fn draw_status(frame: &mut Frame, area: Rect, screen: &Screen<'_>, entry: Option<&str>) {
    let wpm = match screen {
        Screen::Idle { wpm }
        | Screen::Fetching { wpm }
        | Screen::Reading { wpm, .. }
        | Screen::Errored { wpm, .. } => *wpm,
    };

    let mut spans = vec![Span::styled(
        format!(" {wpm} wpm "),
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    )];

    if let Screen::Reading {
        word_index,
        word_total,
        ..
    } = screen
    {
        spans.push(Span::raw(format!("| {}/{} ", word_index + 1, word_total)));
    }

    if let Some(entry) = entry {
        spans.push(Span::styled(
            format!("| set: {entry}_ "),
            Style::default().fg(Color::Yellow),
        ));
    }

    spans.push(Span::styled(
        format!(
            "| space: {} | up/down: rate | digits+enter: set rate | q: quit",
            screen.button_label()
        ),
        Style::default().fg(Color::DarkGray),
    ));

    let status = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(status, area);
}
