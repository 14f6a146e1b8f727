//! Layout components (controls row, summary, status bar)

use crate::app::App;
use crate::state::Focus;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Height of the picker and button row
const CONTROLS_HEIGHT: u16 = 3;

/// Create the main layout: controls on top, summary below
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(CONTROLS_HEIGHT), // Pickers and save button
            Constraint::Min(0),                  // Summary table
            Constraint::Length(1),               // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Sync status
    match app.state.last_synced {
        Some(at) => spans.push(Span::styled(
            format!(" ● synced {} ", at.format("%H:%M:%S")),
            Style::default().fg(Color::Green),
        )),
        None => spans.push(Span::styled(
            " ○ not synced ",
            Style::default().fg(Color::Red),
        )),
    }

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw("| "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(" "));
    }

    spans.push(Span::raw("| "));
    spans.push(Span::styled(
        get_hints(app),
        Style::default().fg(Color::Gray),
    ));

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Server on the right
    let server = format!(" {} ", app.base_url);
    let server_width = (server.chars().count() as u16).min(area.width);
    let server_area = Rect {
        x: area.width.saturating_sub(server_width),
        y: area.height.saturating_sub(1),
        width: server_width,
        height: 1,
    };
    let server_widget =
        Paragraph::new(server).style(Style::default().bg(Color::DarkGray).fg(Color::Blue));
    frame.render_widget(server_widget, server_area);
}

/// Keyboard hints for the focused control
fn get_hints(app: &App) -> &'static str {
    if app.state.group_picker.is_open {
        return "type:filter  ↑↓:nav  Enter:choose  Space:toggle  Esc:close";
    }
    if app.state.form_picker.is_open {
        return "type:filter  ↑↓:nav  Enter:choose  Esc:close";
    }
    match app.state.focus {
        Focus::FormPicker | Focus::GroupPicker => {
            "Tab:focus  Enter:open  Del:clear  ^S:save  r:reload  q:quit"
        }
        Focus::SaveButton => "Tab:focus  Enter:save  r:reload  q:quit",
        Focus::Summary => "Tab:focus  ↑↓:scroll  ^S:save  r:reload  q:quit",
    }
}
