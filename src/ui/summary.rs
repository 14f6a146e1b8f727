//! Group assignment summary table

use crate::app::App;
use crate::state::Focus;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Row, Table},
    Frame,
};

/// Draw the read-only table of groups and their forms
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let rows = app.state.assigner.group_summary();
    if rows.is_empty() {
        return;
    }

    let border_color = if app.state.focus == Focus::Summary {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let header = Row::new(vec!["Group", "Forms"]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let body: Vec<Row> = rows
        .into_iter()
        .skip(app.state.summary_scroll)
        .map(|row| Row::new(vec![row.group, row.forms]))
        .collect();

    let table = Table::new(body, [Constraint::Percentage(35), Constraint::Min(0)])
        .header(header)
        .column_spacing(2)
        .block(
            Block::default()
                .title(" Group Assignment Summary ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        );

    frame.render_widget(table, area);
}
