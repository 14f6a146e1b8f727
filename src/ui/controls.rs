//! Picker row and dropdown overlay

use crate::app::App;
use crate::state::{Focus, Picker};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::rc::Rc;

/// Split the controls row into form picker, group picker and save button
fn split_controls(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30), // Form picker
            Constraint::Min(0),         // Group picker
            Constraint::Length(10),     // Save button
        ])
        .split(area)
}

/// Draw the pickers and the save button
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = split_controls(area);
    let focus = app.state.focus;

    draw_picker_box(
        frame,
        chunks[0],
        " Form ",
        app.state.form_display(),
        app.state.form_picker.placeholder(),
        focus == Focus::FormPicker,
    );

    let group_label = app.state.group_display();
    draw_picker_box(
        frame,
        chunks[1],
        " Group ",
        group_label.as_deref(),
        app.state.group_picker.placeholder(),
        focus == Focus::GroupPicker,
    );

    draw_save_button(
        frame,
        chunks[2],
        app.state.assigner.has_unsaved_changes(),
        focus == Focus::SaveButton,
    );
}

/// `Save`, starred while the pending group list differs from the server's
fn draw_save_button(frame: &mut Frame, area: Rect, dirty: bool, is_focused: bool) {
    let color = match (is_focused, dirty) {
        (true, _) => Color::Cyan,
        (false, true) => Color::Yellow,
        (false, false) => Color::DarkGray,
    };
    let mut text_style = Style::default().fg(color);
    if is_focused {
        text_style = text_style.add_modifier(Modifier::BOLD);
    }

    let label = if dirty { "Save *" } else { "Save" };
    let button = Paragraph::new(label)
        .style(text_style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );

    frame.render_widget(button, area);
}

fn draw_picker_box(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: Option<&str>,
    placeholder: &str,
    is_focused: bool,
) {
    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let text = match value {
        Some(v) => Span::styled(v, Style::default().fg(Color::White)),
        None => Span::styled(placeholder, Style::default().fg(Color::DarkGray)),
    };

    let paragraph = Paragraph::new(Line::from(vec![text, Span::raw(" ▾")])).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );

    frame.render_widget(paragraph, area);
}

/// Draw whichever dropdown is open, anchored under its picker
pub fn draw_dropdown(frame: &mut Frame, controls_area: Rect, app: &App) {
    let chunks = split_controls(controls_area);

    if app.state.form_picker.is_open {
        render_dropdown(frame, chunks[0], &app.state.form_picker, |_| None);
    } else if app.state.group_picker.is_open {
        let assigner = &app.state.assigner;
        render_dropdown(frame, chunks[1], &app.state.group_picker, |id| {
            Some(assigner.is_group_pending(*id))
        });
    }
}

/// Render a picker's search line and filtered options
///
/// `mark` returns `Some(checked)` for options shown with a checkbox.
fn render_dropdown<V, F>(frame: &mut Frame, anchor: Rect, picker: &Picker<V>, mark: F)
where
    V: Clone + PartialEq,
    F: Fn(&V) -> Option<bool>,
{
    let screen = frame.area();
    let top = anchor.y + anchor.height;
    // Leave the status bar visible
    let available = screen.height.saturating_sub(top + 1);
    if available < 3 {
        return;
    }

    let filtered = picker.filtered();
    // Borders plus the search line
    let wanted = u16::try_from(filtered.len().max(1))
        .unwrap_or(u16::MAX)
        .saturating_add(3);
    let height = wanted.min(available);
    let visible = (height - 3) as usize;

    let dropdown_area = Rect {
        x: anchor.x,
        y: top,
        width: anchor.width,
        height,
    };

    frame.render_widget(Clear, dropdown_area);

    let mut content = vec![Line::from(vec![
        Span::styled("Search: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            if picker.query.is_empty() {
                "type to filter...".to_string()
            } else {
                picker.query.clone()
            },
            Style::default().fg(Color::Yellow),
        ),
    ])];

    if filtered.is_empty() {
        let message = if picker.options().is_empty() {
            "  No options"
        } else {
            "  No matches"
        };
        content.push(Line::from(Span::styled(
            message,
            Style::default().fg(Color::DarkGray),
        )));
    }

    let start = if picker.highlighted >= visible {
        picker.highlighted + 1 - visible
    } else {
        0
    };

    for (idx, option) in filtered.iter().enumerate().skip(start).take(visible) {
        let is_selected = idx == picker.highlighted;
        let prefix = if is_selected { " ▸ " } else { "   " };
        let checkbox = match mark(&option.value) {
            Some(true) => "[x] ",
            Some(false) => "[ ] ",
            None => "",
        };
        let style = if is_selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        content.push(Line::from(Span::styled(
            format!("{prefix}{checkbox}{}", option.label),
            style,
        )));
    }

    let dropdown = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::new().bg(Color::Black).fg(Color::White));

    frame.render_widget(dropdown, dropdown_area);
}
