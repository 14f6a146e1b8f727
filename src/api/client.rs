//! HTTP client for communicating with the forms server
//!
//! Endpoints live under a common base URL and are addressed as
//! `{base}<endpoint>/`. Authentication rides on the web session cookie.

use super::error::{ApiError, ApiResult};
use super::traits::FormsApi;
use crate::config::AssignerConfig;
use crate::state::{Assignments, Form, Group, SaveAssignment};
use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT, COOKIE};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

/// Name of the web session cookie
const SESSION_COOKIE: &str = "sessionid";

#[derive(Deserialize)]
struct AssignmentsResponse {
    assignments: Assignments,
}

#[derive(Deserialize)]
struct FormsResponse {
    forms: Vec<Form>,
}

#[derive(Deserialize)]
struct GroupsResponse {
    groups: Vec<Group>,
}

/// Client for the forms server REST endpoints
pub struct FormsClient {
    http: Client,
    base: Url,
    session_cookie: Option<HeaderValue>,
}

impl FormsClient {
    /// Create a new client from configuration
    pub fn new(config: &AssignerConfig) -> ApiResult<Self> {
        let base = normalize_base(config.base_url())?;

        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        // A session id that can't be sent as a header is treated as absent
        let session_cookie = config.session_id.as_deref().and_then(|id| {
            HeaderValue::from_str(&format!("{SESSION_COOKIE}={id}"))
                .inspect_err(|e| tracing::warn!("Ignoring unusable session id: {e}"))
                .ok()
        });

        Ok(Self {
            http,
            base,
            session_cookie,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    /// Build the URL for an endpoint name
    fn endpoint(&self, name: &str) -> ApiResult<Url> {
        Ok(self.base.join(&format!("{name}/"))?)
    }

    fn with_session(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(ACCEPT, "application/json");
        match &self.session_cookie {
            Some(cookie) => request.header(COOKIE, cookie.clone()),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, name: &str) -> ApiResult<T> {
        let url = self.endpoint(name)?;
        tracing::debug!("GET {url}");
        let response = self.with_session(self.http.get(url)).send().await?;
        read_json(response).await
    }
}

#[async_trait]
impl FormsApi for FormsClient {
    async fn get_form_assignments(&self) -> ApiResult<Assignments> {
        let body: AssignmentsResponse = self.get_json("get_form_assignments").await?;
        Ok(body.assignments)
    }

    async fn save_form_assignment(&self, request: &SaveAssignment) -> ApiResult<Assignments> {
        let url = self.endpoint("save_form_assignment")?;
        tracing::debug!("POST {url} {request:?}");
        let response = self
            .with_session(self.http.post(url))
            .json(request)
            .send()
            .await?;
        let body: AssignmentsResponse = read_json(response).await?;
        Ok(body.assignments)
    }

    async fn list_forms(&self) -> ApiResult<Vec<Form>> {
        let body: FormsResponse = self.get_json("list_forms").await?;
        Ok(body.forms)
    }

    async fn get_managed_groups(&self) -> ApiResult<Vec<Group>> {
        let body: GroupsResponse = self.get_json("get_managed_groups").await?;
        Ok(body.groups)
    }
}

/// Parse the base URL, making sure it ends in `/` so endpoints join under it
fn normalize_base(base: &str) -> ApiResult<Url> {
    let base = base.trim();
    if base.ends_with('/') {
        Ok(Url::parse(base)?)
    } else {
        Ok(Url::parse(&format!("{base}/"))?)
    }
}

/// Check the status and decode a JSON body
async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    let text = response.text().await?;
    decode_body(status, &text)
}

fn decode_body<T: DeserializeOwned>(status: reqwest::StatusCode, text: &str) -> ApiResult<T> {
    if !status.is_success() {
        return Err(ApiError::Status {
            status,
            body: text.trim().to_string(),
        });
    }
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FormId;
    use reqwest::StatusCode;

    fn client_for(base: &str) -> FormsClient {
        let config = AssignerConfig {
            base_url: Some(base.to_string()),
            ..Default::default()
        };
        FormsClient::new(&config).unwrap()
    }

    mod urls {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_base_without_trailing_slash_is_normalized() {
            let url = normalize_base("https://omero.example.org/omero_forms").unwrap();
            assert_eq!(url.as_str(), "https://omero.example.org/omero_forms/");
        }

        #[test]
        fn test_base_with_trailing_slash_is_kept() {
            let url = normalize_base(" https://omero.example.org/omero_forms/ ").unwrap();
            assert_eq!(url.as_str(), "https://omero.example.org/omero_forms/");
        }

        #[test]
        fn test_invalid_base_is_rejected() {
            let err = normalize_base("not a url").unwrap_err();
            assert!(matches!(err, ApiError::InvalidUrl(_)));
        }

        #[test]
        fn test_endpoints_join_under_base() {
            let client = client_for("https://omero.example.org/omero_forms");
            assert_eq!(
                client.endpoint("get_form_assignments").unwrap().as_str(),
                "https://omero.example.org/omero_forms/get_form_assignments/"
            );
            assert_eq!(
                client.endpoint("save_form_assignment").unwrap().as_str(),
                "https://omero.example.org/omero_forms/save_form_assignment/"
            );
        }
    }

    mod session {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_session_cookie_is_built_from_config() {
            let config = AssignerConfig {
                session_id: Some("abc123".to_string()),
                ..Default::default()
            };
            let client = FormsClient::new(&config).unwrap();
            assert_eq!(
                client.session_cookie,
                Some(HeaderValue::from_static("sessionid=abc123"))
            );
        }

        #[test]
        fn test_unusable_session_id_is_dropped() {
            let config = AssignerConfig {
                session_id: Some("bad\nvalue".to_string()),
                ..Default::default()
            };
            let client = FormsClient::new(&config).unwrap();
            assert!(client.session_cookie.is_none());
        }
    }

    mod decoding {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_assignments_body_is_decoded() {
            let body: AssignmentsResponse =
                decode_body(StatusCode::OK, r#"{"assignments": {"1": ["a"], "2": []}}"#).unwrap();
            assert_eq!(
                body.assignments.forms_for(1),
                Some(vec![FormId::new("a")].as_slice())
            );
            assert_eq!(body.assignments.forms_for(2).map(<[FormId]>::is_empty), Some(true));
        }

        #[test]
        fn test_forms_body_with_extra_fields() {
            let body: FormsResponse = decode_body(
                StatusCode::OK,
                r#"{"forms": [{"id": "intake", "objTypes": ["Dataset"]}, {"id": "qc", "name": "QC"}]}"#,
            )
            .unwrap();
            let names: Vec<_> = body.forms.iter().map(Form::name).collect();
            assert_eq!(names, vec!["intake", "QC"]);
        }

        #[test]
        fn test_groups_body_is_decoded() {
            let body: GroupsResponse = decode_body(
                StatusCode::OK,
                r#"{"groups": [{"id": 3, "name": "Lab", "permissions": "rwr---"}]}"#,
            )
            .unwrap();
            assert_eq!(
                body.groups,
                vec![Group {
                    id: 3,
                    name: "Lab".to_string()
                }]
            );
        }

        #[test]
        fn test_error_status_carries_body() {
            let err = decode_body::<AssignmentsResponse>(
                StatusCode::BAD_REQUEST,
                "Adding or updating a form requires a formId to be specified\n",
            )
            .err()
            .unwrap();
            match err {
                ApiError::Status { status, body } => {
                    assert_eq!(status, StatusCode::BAD_REQUEST);
                    assert_eq!(
                        body,
                        "Adding or updating a form requires a formId to be specified"
                    );
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }

        #[test]
        fn test_malformed_body_is_decode_error() {
            let err = decode_body::<AssignmentsResponse>(StatusCode::OK, r#"{"forms": []}"#)
                .err()
                .unwrap();
            assert!(matches!(err, ApiError::Decode(_)));
        }
    }
}
