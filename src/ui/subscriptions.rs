use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use crate::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let table = &app.table;
    let widths = table.widths();

    let header = Row::new(vec!["", "Organization", "Repository"]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = table
        .visible()
        .map(|i| {
            let sub = &table.rows()[i];
            let mark = if table.is_marked(i) { "[x]" } else { "[ ]" };
            let style = if i == table.cursor() {
                Style::default()
                    .fg(Color::Yellow)
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else if table.is_marked(i) {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(mark),
                Cell::from(sub.organization.as_str()),
                Cell::from(sub.repository.as_str()),
            ])
            .style(style)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" Watched repositories ({}) ", table.len()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(if table.is_empty() {
            " no watched repositories ".to_string()
        } else {
            format!(
                " page {}/{} | {} marked ",
                table.page() + 1,
                table.page_count(),
                table.marked_count()
            )
        });

    let widget = Table::new(
        rows,
        [
            Constraint::Length(widths.mark),
            Constraint::Length(widths.organization),
            Constraint::Min(widths.repository),
        ],
    )
    .header(header)
    .block(block);

    frame.render_widget(widget, area);
}
