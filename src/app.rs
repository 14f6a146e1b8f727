//! Application state and core logic

use crate::api::FormsApi;
use crate::state::{AppState, Focus};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Forms server client
    pub api: Box<dyn FormsApi>,
    /// Server base URL, for display
    pub base_url: String,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(api: Box<dyn FormsApi>, base_url: impl Into<String>) -> Self {
        Self {
            state: AppState::default(),
            api,
            base_url: base_url.into(),
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Fetch the catalog, then the assignments
    pub async fn init(&mut self) {
        self.load_catalog().await;
        self.load_assignments().await;
    }

    /// Fetch forms and managed groups
    pub async fn load_catalog(&mut self) -> bool {
        let forms = match self.api.list_forms().await {
            Ok(forms) => forms,
            Err(e) => {
                tracing::warn!("Failed to list forms: {e}");
                self.state
                    .set_status(format!("Failed to load forms: {}", e.summary()));
                return false;
            }
        };

        let groups = match self.api.get_managed_groups().await {
            Ok(groups) => groups,
            Err(e) => {
                tracing::warn!("Failed to list managed groups: {e}");
                self.state
                    .set_status(format!("Failed to load groups: {}", e.summary()));
                return false;
            }
        };

        self.state.assigner.set_catalog(forms, groups);
        tracing::info!(
            "Loaded {} forms and {} groups",
            self.state.assigner.forms.len(),
            self.state.assigner.groups.len()
        );
        if self.state.assigner.forms.is_empty() {
            self.state.set_status("Server has no forms to assign");
        }
        self.state.refresh_options();
        true
    }

    /// Refetch the assignments, and the catalog too while it is incomplete
    pub async fn reload(&mut self) {
        let assigner = &self.state.assigner;
        let refetch_catalog = assigner.forms.is_empty() || assigner.groups.is_empty();
        if refetch_catalog && !self.load_catalog().await {
            return;
        }
        if !self.load_assignments().await {
            return;
        }

        if !refetch_catalog {
            self.state.set_status("Assignments reloaded");
        } else if !self.state.assigner.forms.is_empty() {
            self.state.set_status("Forms, groups and assignments reloaded");
        }
    }

    /// Fetch the assignment mapping, replacing local state on success
    pub async fn load_assignments(&mut self) -> bool {
        match self.api.get_form_assignments().await {
            Ok(assignments) => {
                if assignments.is_empty() {
                    tracing::info!("Server returned no assignments");
                } else {
                    tracing::info!("Loaded assignments for {} groups", assignments.len());
                }
                self.state.assigner.load(assignments);
                self.state.mark_synced();
                true
            }
            Err(e) => {
                tracing::warn!("Failed to load assignments: {e}");
                self.state
                    .set_status(format!("Failed to load assignments: {}", e.summary()));
                false
            }
        }
    }

    /// Post the current selection; the server's mapping replaces ours
    pub async fn save(&mut self) {
        let request = self.state.assigner.save_request();
        match self.api.save_form_assignment(&request).await {
            Ok(assignments) => {
                tracing::info!(
                    "Saved assignment of {:?} to groups {:?}",
                    request.form_id,
                    request.group_ids
                );
                self.state.assigner.apply_save_response(assignments);
                self.state.mark_synced();
                self.state.set_status("Assignment saved");
            }
            Err(e) => {
                tracing::warn!("Failed to save assignment: {e}");
                self.state
                    .set_status(format!("Save failed: {}", e.summary()));
            }
        }
    }

    /// Handle a key press
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Save works from anywhere, including an open dropdown
        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.close_pickers();
            self.save().await;
            return Ok(());
        }

        if self.state.form_picker.is_open {
            self.handle_form_picker_key(key);
        } else if self.state.group_picker.is_open {
            self.handle_group_picker_key(key);
        } else {
            self.handle_panel_key(key).await;
        }

        Ok(())
    }

    /// Handle keys while no dropdown is open
    async fn handle_panel_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => self.state.focus_next(),
            KeyCode::BackTab => self.state.focus_prev(),
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('r') => self.reload().await,
            KeyCode::Enter => match self.state.focus {
                Focus::FormPicker => self.state.form_picker.open(),
                Focus::GroupPicker => self.state.group_picker.open(),
                Focus::SaveButton => self.save().await,
                Focus::Summary => {}
            },
            KeyCode::Delete | KeyCode::Backspace => match self.state.focus {
                Focus::FormPicker => self.state.assigner.select_form(None),
                Focus::GroupPicker => self.state.assigner.select_group(None),
                _ => {}
            },
            KeyCode::Down if self.state.focus == Focus::Summary => {
                self.state.scroll_summary_down()
            }
            KeyCode::Up if self.state.focus == Focus::Summary => self.state.scroll_summary_up(),
            _ => {}
        }
    }

    /// Handle keys in the open form dropdown
    fn handle_form_picker_key(&mut self, key: KeyEvent) {
        let picker = &mut self.state.form_picker;
        match key.code {
            KeyCode::Esc => picker.close(),
            KeyCode::Up => picker.highlight_prev(),
            KeyCode::Down => picker.highlight_next(),
            KeyCode::Backspace => picker.backspace(),
            KeyCode::Enter => {
                if let Some(form_id) = picker.choose() {
                    self.state.assigner.select_form(Some(form_id.as_str()));
                }
            }
            KeyCode::Char(c) => picker.push_char(c),
            _ => {}
        }
    }

    /// Handle keys in the open group dropdown
    fn handle_group_picker_key(&mut self, key: KeyEvent) {
        let picker = &mut self.state.group_picker;
        match key.code {
            KeyCode::Esc => picker.close(),
            KeyCode::Up => picker.highlight_prev(),
            KeyCode::Down => picker.highlight_next(),
            KeyCode::Backspace => picker.backspace(),
            KeyCode::Enter => {
                if let Some(group_id) = picker.choose() {
                    self.state.assigner.select_group(Some(group_id));
                }
            }
            // A space after search text is part of the query
            KeyCode::Char(' ') if picker.query.is_empty() => {
                if let Some(group_id) = picker.highlighted_option().map(|o| o.value) {
                    self.state.assigner.toggle_group(group_id);
                }
            }
            KeyCode::Char(c) => picker.push_char(c),
            _ => {}
        }
    }

    fn close_pickers(&mut self) {
        self.state.form_picker.close();
        self.state.group_picker.close();
    }
}
