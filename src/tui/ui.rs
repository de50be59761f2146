//! Rendering for the report form.

use crate::tui::{App, Focus, Outcome};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(5), // Form
            Constraint::Min(0),    // Log
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0]);
    draw_form(frame, app, chunks[1]);
    draw_log(frame, app, chunks[2]);
    draw_footer(frame, chunks[3]);

    if app.outcome != Outcome::Idle {
        draw_outcome_overlay(frame, app);
    }
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(Span::styled(
        " Motion Task Exporter ",
        Style::default().fg(Color::Cyan).bold(),
    )))
    .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(header, area);
}

fn selector_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

fn draw_form(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Report period ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(16),
            Constraint::Length(16),
            Constraint::Length(12),
            Constraint::Min(0),
        ])
        .split(inner);

    let month = Paragraph::new(vec![
        Line::from("Month"),
        Line::from(Span::styled(
            format!(" < {:02} > ", app.month),
            selector_style(app.focus == Focus::Month),
        )),
    ]);
    frame.render_widget(month, columns[0]);

    let year = Paragraph::new(vec![
        Line::from("Year"),
        Line::from(Span::styled(
            format!(" < {} > ", app.year),
            selector_style(app.focus == Focus::Year),
        )),
    ]);
    frame.render_widget(year, columns[1]);

    let run = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            " [ Run ] ",
            selector_style(app.focus == Focus::Run),
        )),
    ]);
    frame.render_widget(run, columns[2]);
}

fn draw_log(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Log ");
    let inner_height = block.inner(area).height as usize;

    // Keep the tail of the log visible.
    let start = app.log.len().saturating_sub(inner_height);
    let lines: Vec<Line> = app.log[start..]
        .iter()
        .map(|line| Line::from(line.as_str()))
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Cyan)),
        Span::raw(" focus  "),
        Span::styled("Up/Down", Style::default().fg(Color::Cyan)),
        Span::raw(" change  "),
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::raw(" run  "),
        Span::styled("q", Style::default().fg(Color::Cyan)),
        Span::raw(" quit"),
    ]))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, area);
}

fn draw_outcome_overlay(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let popup_width = (area.width * 6 / 10).clamp(30, 60).min(area.width);
    let popup_height = 5u16.min(area.height);
    let popup = Rect::new(
        (area.width - popup_width) / 2,
        (area.height - popup_height) / 2,
        popup_width,
        popup_height,
    );

    frame.render_widget(Clear, popup);

    let (title, message, color) = match &app.outcome {
        Outcome::Done { rows } => (
            " Done ",
            format!("Exported {rows} total tasks (incl. completed recurring tasks)"),
            Color::Green,
        ),
        Outcome::NoData => (" No Data ", "No tasks found.".to_string(), Color::Red),
        Outcome::Idle => return,
    };

    let body = Paragraph::new(vec![
        Line::from(message),
        Line::from(""),
        Line::from(Span::styled(
            "press any key",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(title),
    );
    frame.render_widget(body, popup);
}
