//! Domain types shared with the forms server

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Group identifier as used by the server
pub type GroupId = i64;

/// Form identifier
///
/// The server stores form ids as strings, but numeric ids on the wire are
/// accepted and kept as their decimal text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "RawFormId")]
#[serde(into = "String")]
pub struct FormId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFormId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawFormId> for FormId {
    fn from(raw: RawFormId) -> Self {
        match raw {
            RawFormId::Text(s) => Self::new(s),
            RawFormId::Number(n) => Self::new(n.to_string()),
        }
    }
}

impl From<FormId> for String {
    fn from(id: FormId) -> Self {
        id.0
    }
}

impl FormId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A form known to the server
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Form {
    pub id: FormId,
    #[serde(default)]
    pub name: Option<String>,
}

impl Form {
    /// Display name, falling back to the id for unnamed forms
    pub fn name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(self.id.as_str())
    }
}

/// A group the operator manages
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Group {
    pub id: GroupId,
    #[serde(default)]
    pub name: String,
}

impl Group {
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.id)
    }
}

/// Forms keyed by display name
#[derive(Debug, Clone, Default)]
pub struct FormCatalog {
    by_name: BTreeMap<String, Form>,
}

impl FormCatalog {
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Look a form up by its id
    pub fn find_by_id(&self, id: &str) -> Option<&Form> {
        self.by_name.values().find(|f| f.id.as_str() == id)
    }

    /// Iterate forms in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Form)> {
        self.by_name.iter().map(|(name, form)| (name.as_str(), form))
    }
}

impl FromIterator<Form> for FormCatalog {
    /// Later forms replace earlier ones with the same name
    fn from_iter<I: IntoIterator<Item = Form>>(iter: I) -> Self {
        let by_name = iter
            .into_iter()
            .map(|f| (f.name().to_string(), f))
            .collect();
        Self { by_name }
    }
}

/// Group to forms mapping, as returned by the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Assignments(BTreeMap<GroupId, Vec<FormId>>);

impl Assignments {
    pub fn forms_for(&self, group_id: GroupId) -> Option<&[FormId]> {
        self.0.get(&group_id).map(Vec::as_slice)
    }

    /// Groups whose list contains `form_id`, in ascending id order
    pub fn groups_containing(&self, form_id: &FormId) -> Vec<GroupId> {
        self.0
            .iter()
            .filter(|(_, forms)| forms.contains(form_id))
            .map(|(group_id, _)| *group_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Body of a save request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveAssignment {
    pub form_id: Option<FormId>,
    pub group_ids: Vec<GroupId>,
}

/// One row of the group summary table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummaryRow {
    pub group: String,
    pub forms: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(raw: &[&str]) -> Vec<FormId> {
        raw.iter().map(|s| FormId::new(*s)).collect()
    }

    #[test]
    fn test_assignments_parse_string_keys() {
        let json = r#"{"1": ["10", "20"], "2": ["20"]}"#;
        let parsed: Assignments = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.forms_for(1), Some(ids(&["10", "20"]).as_slice()));
        assert_eq!(parsed.forms_for(2), Some(ids(&["20"]).as_slice()));
        assert_eq!(parsed.forms_for(3), None);
    }

    #[test]
    fn test_numeric_form_ids_are_kept_as_text() {
        let json = r#"{"1": [10, 20]}"#;
        let parsed: Assignments = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.forms_for(1), Some(ids(&["10", "20"]).as_slice()));
    }

    #[test]
    fn test_groups_containing_example() {
        let json = r#"{"1": [10, 20], "2": [20]}"#;
        let parsed: Assignments = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.groups_containing(&FormId::new("20")), vec![1, 2]);
        assert_eq!(parsed.groups_containing(&FormId::new("10")), vec![1]);
        assert!(parsed.groups_containing(&FormId::new("99")).is_empty());
    }

    #[test]
    fn test_groups_containing_is_sorted_by_group_id() {
        let json = r#"{"10": ["a"], "2": ["a"], "7": ["b"]}"#;
        let parsed: Assignments = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.groups_containing(&FormId::new("a")), vec![2, 10]);
    }

    #[test]
    fn test_form_name_falls_back_to_id() {
        let form: Form = serde_json::from_str(r#"{"id": "intake"}"#).unwrap();
        assert_eq!(form.name(), "intake");

        let named: Form =
            serde_json::from_str(r#"{"id": "intake", "name": "Intake Form", "schema": {}}"#)
                .unwrap();
        assert_eq!(named.name(), "Intake Form");
    }

    #[test]
    fn test_group_label() {
        let group = Group {
            id: 3,
            name: "Lab".to_string(),
        };
        assert_eq!(group.label(), "Lab (3)");
    }

    #[test]
    fn test_catalog_iterates_in_name_order() {
        let catalog: FormCatalog = [
            Form {
                id: FormId::new("b"),
                name: Some("Zeta".to_string()),
            },
            Form {
                id: FormId::new("a"),
                name: Some("Alpha".to_string()),
            },
        ]
        .into_iter()
        .collect();

        let names: Vec<_> = catalog.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
        assert_eq!(catalog.find_by_id("b").map(Form::name), Some("Zeta"));
        assert!(catalog.find_by_id("c").is_none());
    }

    #[test]
    fn test_save_assignment_wire_shape() {
        let body = SaveAssignment {
            form_id: Some(FormId::new("intake")),
            group_ids: vec![1, 5],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"formId": "intake", "groupIds": [1, 5]})
        );
    }

    #[test]
    fn test_save_assignment_without_form_sends_null() {
        let body = SaveAssignment {
            form_id: None,
            group_ids: Vec::new(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"formId": null, "groupIds": []}));
    }
}
