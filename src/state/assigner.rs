//! Assignment editor state

use super::assignments::{
    Assignments, Form, FormCatalog, FormId, Group, GroupId, GroupSummaryRow, SaveAssignment,
};
use super::picker::PickerOption;

/// Catalog, server mapping and the operator's current selection
#[derive(Debug, Clone, Default)]
pub struct AssignerState {
    pub forms: FormCatalog,
    pub groups: Vec<Group>,
    pub assignments: Assignments,

    // Selection
    pub form_id: Option<FormId>,
    pub selected_group: Option<Group>,
    /// Groups the selected form is (or will be) assigned to
    pub form_group_ids: Vec<GroupId>,
}

impl AssignerState {
    /// Replace the catalog of forms and groups
    pub fn set_catalog(&mut self, forms: Vec<Form>, groups: Vec<Group>) {
        self.forms = forms.into_iter().collect();
        self.groups = groups;
    }

    /// Replace local assignments wholesale
    pub fn load(&mut self, assignments: Assignments) {
        self.assignments = assignments;
    }

    /// Select a form by id, or clear the selection with `None`/empty
    pub fn select_form(&mut self, id: Option<&str>) {
        let Some(id) = id.filter(|id| !id.is_empty()) else {
            self.form_id = None;
            self.form_group_ids.clear();
            return;
        };

        let Some(form) = self.forms.find_by_id(id) else {
            tracing::debug!("Ignoring selection of unknown form {id}");
            return;
        };

        let form_id = form.id.clone();
        self.form_group_ids = self.assignments.groups_containing(&form_id);
        self.form_id = Some(form_id);
    }

    /// Record the chosen group; does not touch `form_group_ids`
    pub fn select_group(&mut self, id: Option<GroupId>) {
        self.selected_group = id.and_then(|id| self.groups.iter().find(|g| g.id == id).cloned());
    }

    /// Replace the pending group list wholesale
    pub fn select_groups(&mut self, ids: Vec<GroupId>) {
        self.form_group_ids = ids;
    }

    /// Add or remove one group from the pending group list
    pub fn toggle_group(&mut self, id: GroupId) {
        let mut ids = self.form_group_ids.clone();
        if let Some(pos) = ids.iter().position(|g| *g == id) {
            ids.remove(pos);
        } else {
            ids.push(id);
        }
        self.select_groups(ids);
    }

    pub fn is_group_pending(&self, id: GroupId) -> bool {
        self.form_group_ids.contains(&id)
    }

    pub fn selected_form(&self) -> Option<&Form> {
        self.form_id
            .as_ref()
            .and_then(|id| self.forms.find_by_id(id.as_str()))
    }

    /// Build the save payload from the current selection
    pub fn save_request(&self) -> SaveAssignment {
        SaveAssignment {
            form_id: self.form_id.clone(),
            group_ids: self.form_group_ids.clone(),
        }
    }

    /// Whether the pending group list differs from the saved mapping
    pub fn has_unsaved_changes(&self) -> bool {
        let Some(form_id) = &self.form_id else {
            return false;
        };
        let mut pending = self.form_group_ids.clone();
        pending.sort_unstable();
        pending.dedup();
        pending != self.assignments.groups_containing(form_id)
    }

    /// The server's mapping replaces ours after a save
    pub fn apply_save_response(&mut self, assignments: Assignments) {
        self.assignments = assignments;
    }

    /// One row per catalog group, in catalog order
    pub fn group_summary(&self) -> Vec<GroupSummaryRow> {
        self.groups
            .iter()
            .map(|group| GroupSummaryRow {
                group: group.label(),
                forms: self
                    .assignments
                    .forms_for(group.id)
                    .map(|forms| {
                        forms
                            .iter()
                            .map(FormId::as_str)
                            .collect::<Vec<_>>()
                            .join(", ")
                    })
                    .unwrap_or_default(),
            })
            .collect()
    }

    /// Form choices sorted by name
    pub fn form_options(&self) -> Vec<PickerOption<FormId>> {
        self.forms
            .iter()
            .map(|(name, form)| PickerOption::new(form.id.clone(), name))
            .collect()
    }

    /// Group choices labelled `name (id)`
    pub fn group_options(&self) -> Vec<PickerOption<GroupId>> {
        self.groups
            .iter()
            .map(|g| PickerOption::new(g.id, g.label()))
            .collect()
    }
}
