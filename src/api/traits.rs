//! Trait abstraction for the forms server client to enable mocking in tests

use super::error::ApiResult;
use crate::state::{Assignments, Form, Group, SaveAssignment};
use async_trait::async_trait;

/// Operations the editor needs from the forms server
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FormsApi: Send + Sync {
    /// Fetch the full group to forms mapping
    async fn get_form_assignments(&self) -> ApiResult<Assignments>;

    /// Set the groups of one form; returns the updated mapping
    async fn save_form_assignment(&self, request: &SaveAssignment) -> ApiResult<Assignments>;

    /// Fetch the form catalog
    async fn list_forms(&self) -> ApiResult<Vec<Form>>;

    /// Fetch the groups the current user manages
    async fn get_managed_groups(&self) -> ApiResult<Vec<Group>>;
}
