mod subscriptions;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{App, SessionState};
use crate::table::LEGEND_HEIGHT;

const KEY_LEGEND: &str = "space: toggle mark | x: unwatch | j/k: nav | h/l: page | q: quit";

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    match app.state {
        SessionState::Loading => render_progress(frame, app, "Loading subscriptions", area),
        SessionState::Unwatching => {
            render_progress(frame, app, "Unwatching marked subscriptions", area)
        }
        SessionState::Loaded => render_loaded(frame, app, area),
        SessionState::Error => render_error(frame, app, area),
    }
}

fn render_progress(frame: &mut Frame, app: &App, label: &str, area: Rect) {
    let line = Line::from(vec![
        Span::raw(format!("{} ", label)),
        Span::styled(app.spinner.frame(), Style::default().fg(Color::Yellow)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_loaded(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(LEGEND_HEIGHT)])
        .split(area);

    subscriptions::render(frame, app, chunks[0]);

    let legend = Paragraph::new(Line::from(Span::styled(
        KEY_LEGEND,
        Style::default().fg(Color::Gray),
    )));
    frame.render_widget(legend, chunks[1]);
}

fn render_error(frame: &mut Frame, app: &App, area: Rect) {
    let message = app
        .error
        .as_ref()
        .map(|e| e.to_string())
        .unwrap_or_else(|| "unknown error".to_string());

    let error = Paragraph::new(format!("Error: {}", message))
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: false });
    frame.render_widget(error, area);
}
