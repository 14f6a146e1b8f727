//! UI module for rendering the TUI

mod controls;
mod layout;
mod summary;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let (controls_area, summary_area) = layout::create_layout(area);

    controls::draw(frame, controls_area, app);
    summary::draw(frame, summary_area, app);

    // Draw status bar
    layout::draw_status_bar(frame, app);

    // Open dropdown overlays everything below the controls
    if app.state.picker_open() {
        controls::draw_dropdown(frame, controls_area, app);
    }
}
