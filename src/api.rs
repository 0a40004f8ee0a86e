//! Request descriptions and response classification for the bumper API.
//!
//! Nothing here touches the network: an [`ApiRequest`] says what to send and
//! [`classify_validated`] / [`classify_binary`] decide what a finished
//! response means. The browser transport lives in `http`.

use crate::config::{CONFIG_ENDPOINT, LAST_REQUEST_ENDPOINT, THREAD_ENDPOINT, USER_ENDPOINT};
use crate::error::PanelError;
use crate::model::{ConfigForm, ThreadDraft, ThreadId, UserForm};
use serde::Deserialize;

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// One request to the bumper API. POST fields are sent as multipart form
/// data in the order given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: &'static str,
    pub fields: Vec<(&'static str, String)>,
}

impl ApiRequest {
    fn post(path: &'static str, fields: Vec<(&'static str, String)>) -> Self {
        ApiRequest {
            method: HttpMethod::Post,
            path,
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// What the server sent back once the request completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        ApiResponse {
            status,
            body: body.into(),
        }
    }
}

/// JSON body of every config/user response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Outcome of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// 400 with a server-supplied, user-facing message.
    Rejected(String),
    /// Anything else; carries the raw body for diagnostics.
    Failed(String),
}

pub fn config_request(form: &ConfigForm) -> ApiRequest {
    ApiRequest::post(
        CONFIG_ENDPOINT,
        vec![
            ("bump_delay", form.bump_delay.clone()),
            ("post_delay", form.post_delay.clone()),
            ("default_message", form.default_message.clone()),
        ],
    )
}

pub fn user_request(form: &UserForm) -> ApiRequest {
    ApiRequest::post(
        USER_ENDPOINT,
        vec![
            ("username", form.username.clone()),
            ("old-password", form.old_password.clone()),
            ("new-password", form.new_password.clone()),
        ],
    )
}

pub fn edit_thread_request(id: &ThreadId, draft: &ThreadDraft) -> ApiRequest {
    ApiRequest::post(
        THREAD_ENDPOINT,
        vec![
            ("method", "edit".to_string()),
            ("thread", id.to_string()),
            ("message", draft.message.clone()),
            ("name", draft.name.clone()),
        ],
    )
}

pub fn delete_thread_request(id: &ThreadId) -> ApiRequest {
    ApiRequest::post(
        THREAD_ENDPOINT,
        vec![("method", "delete".to_string()), ("thread", id.to_string())],
    )
}

pub fn create_thread_request(id: &ThreadId, draft: &ThreadDraft) -> ApiRequest {
    ApiRequest::post(
        THREAD_ENDPOINT,
        vec![
            ("method", "create".to_string()),
            ("thread", id.to_string()),
            ("message", draft.message.clone()),
            ("name", draft.name.clone()),
        ],
    )
}

pub fn last_request_request() -> ApiRequest {
    ApiRequest {
        method: HttpMethod::Get,
        path: LAST_REQUEST_ENDPOINT,
        fields: Vec::new(),
    }
}

fn parse_body(response: &ApiResponse) -> Result<ApiBody, PanelError> {
    serde_json::from_str(&response.body).map_err(|source| PanelError::MalformedBody {
        status: response.status,
        source,
    })
}

/// Tri-way handling used by the config and user endpoints. The body is
/// parsed as JSON whatever the status; a parse failure is an error.
pub fn classify_validated(response: &ApiResponse) -> Result<Outcome, PanelError> {
    let body = parse_body(response)?;
    Ok(match response.status {
        STATUS_OK => {
            if let Some(message) = body.message {
                log::debug!("{}: {}", response.status, message);
            }
            Outcome::Success
        }
        STATUS_BAD_REQUEST => Outcome::Rejected(body.error.unwrap_or_default()),
        _ => Outcome::Failed(response.body.clone()),
    })
}

/// Success/failure handling used by the thread endpoint. The body is only
/// kept for diagnostics.
pub fn classify_binary(response: &ApiResponse) -> Outcome {
    if response.status == STATUS_OK {
        Outcome::Success
    } else {
        Outcome::Failed(response.body.clone())
    }
}

/// Pull the `error` string out of a failed response, if it has one.
pub fn error_message(response: &ApiResponse) -> Option<String> {
    parse_body(response).ok().and_then(|body| body.error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_fields_keep_form_order() {
        let form = ConfigForm {
            bump_delay: "60".into(),
            post_delay: "5".into(),
            default_message: "keep this alive".into(),
        };
        let req = config_request(&form);
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "/api/config");
        let names: Vec<_> = req.fields.iter().map(|(k, _)| *k).collect();
        assert_eq!(names, ["bump_delay", "post_delay", "default_message"]);
    }

    #[test]
    fn user_fields_use_dashed_names() {
        let form = UserForm {
            username: "admin".into(),
            old_password: "old".into(),
            new_password: "new".into(),
        };
        let req = user_request(&form);
        assert_eq!(req.path, "/api/user");
        assert_eq!(req.field("old-password"), Some("old"));
        assert_eq!(req.field("new-password"), Some("new"));
    }

    #[test]
    fn thread_requests_carry_method_and_id() {
        let id = ThreadId::new("42");
        let draft = ThreadDraft {
            name: "NewName".into(),
            message: "bump".into(),
        };
        let edit = edit_thread_request(&id, &draft);
        assert_eq!(edit.field("method"), Some("edit"));
        assert_eq!(edit.field("thread"), Some("42"));
        assert_eq!(edit.field("name"), Some("NewName"));

        let delete = delete_thread_request(&id);
        assert_eq!(delete.field("method"), Some("delete"));
        assert_eq!(delete.fields.len(), 2);

        assert_eq!(create_thread_request(&id, &draft).field("method"), Some("create"));
    }

    #[test]
    fn validated_400_surfaces_server_error() {
        let resp = ApiResponse::new(400, r#"{"success": false, "error": "bump_delay must be positive"}"#);
        assert_eq!(
            classify_validated(&resp).unwrap(),
            Outcome::Rejected("bump_delay must be positive".into())
        );
    }

    #[test]
    fn validated_success_reads_message_body() {
        let resp = ApiResponse::new(200, r#"{"success": true, "message": "Updated configuration"}"#);
        assert_eq!(classify_validated(&resp).unwrap(), Outcome::Success);
        assert_eq!(error_message(&resp), None);
    }

    #[test]
    fn validated_other_status_keeps_raw_body() {
        let body = r#"{"success": false}"#;
        let resp = ApiResponse::new(500, body);
        assert_eq!(classify_validated(&resp).unwrap(), Outcome::Failed(body.into()));
    }

    #[test]
    fn validated_rejects_non_json_even_on_success() {
        let resp = ApiResponse::new(200, "<html>ok</html>");
        assert!(matches!(
            classify_validated(&resp),
            Err(PanelError::MalformedBody { status: 200, .. })
        ));
    }

    #[test]
    fn binary_ignores_body_shape() {
        assert_eq!(classify_binary(&ApiResponse::new(200, "not json")), Outcome::Success);
        assert_eq!(
            classify_binary(&ApiResponse::new(400, "Thread does not exist")),
            Outcome::Failed("Thread does not exist".into())
        );
    }
}
