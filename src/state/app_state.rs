//! Application state definitions

use super::assigner::AssignerState;
use super::assignments::{Form, FormId, GroupId};
use super::picker::Picker;
use chrono::{DateTime, Local};

/// Focusable control in the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    FormPicker,
    GroupPicker,
    SaveButton,
    Summary,
}

impl Focus {
    pub fn next(&self) -> Self {
        match self {
            Self::FormPicker => Self::GroupPicker,
            Self::GroupPicker => Self::SaveButton,
            Self::SaveButton => Self::Summary,
            Self::Summary => Self::FormPicker,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::FormPicker => Self::Summary,
            Self::GroupPicker => Self::FormPicker,
            Self::SaveButton => Self::GroupPicker,
            Self::Summary => Self::SaveButton,
        }
    }
}

/// Main application state
pub struct AppState {
    pub assigner: AssignerState,

    // Controls
    pub focus: Focus,
    pub form_picker: Picker<FormId>,
    pub group_picker: Picker<GroupId>,

    // UI state
    pub summary_scroll: usize,
    pub status_message: Option<String>,
    pub last_synced: Option<DateTime<Local>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            assigner: AssignerState::default(),
            focus: Focus::default(),
            form_picker: Picker::new("Select a form..."),
            group_picker: Picker::new("Select a group..."),
            summary_scroll: 0,
            status_message: None,
            last_synced: None,
        }
    }
}

impl AppState {
    /// Rebuild picker options from the catalog
    pub fn refresh_options(&mut self) {
        self.form_picker.set_options(self.assigner.form_options());
        self.group_picker.set_options(self.assigner.group_options());
    }

    /// Whether a dropdown currently captures keys
    pub fn picker_open(&self) -> bool {
        self.form_picker.is_open || self.group_picker.is_open
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Text shown in the closed form picker
    pub fn form_display(&self) -> Option<&str> {
        self.assigner.selected_form().map(Form::name)
    }

    /// Text shown in the closed group picker
    pub fn group_display(&self) -> Option<String> {
        self.assigner.selected_group.as_ref().map(|g| g.label())
    }

    /// Scroll the summary table down, stopping at the last row
    pub fn scroll_summary_down(&mut self) {
        let rows = self.assigner.groups.len();
        if rows > 0 && self.summary_scroll < rows - 1 {
            self.summary_scroll += 1;
        }
    }

    pub fn scroll_summary_up(&mut self) {
        self.summary_scroll = self.summary_scroll.saturating_sub(1);
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn mark_synced(&mut self) {
        self.last_synced = Some(Local::now());
    }
}
