//! Connect response payloads.

use serde::Deserialize;

/// Successful connect payload.
///
/// `path` is the location the placeholder window navigates to. The backend
/// may additionally describe the kernel it attached to and the session it
/// created; both are optional and unknown extra fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectResponse {
    /// Redirect target for the placeholder window.
    pub path: String,
    /// Kernel the backend attached to, if reported.
    #[serde(default)]
    pub kernel: Option<KernelModel>,
    /// Session created for the new notebook, if reported.
    #[serde(default)]
    pub session: Option<SessionModel>,
}

/// Kernel description as reported by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct KernelModel {
    /// Backend-assigned kernel id.
    pub id: String,
    /// Kernel name, when the backend can determine one.
    #[serde(default)]
    pub name: Option<String>,
}

/// Session description as reported by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionModel {
    /// Backend-assigned session id.
    pub id: String,
}

/// Failure payload. The backend reports errors as `{"message": ...}`, but
/// the field is optional and anything else in the body is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_success_payload() {
        let response: ConnectResponse =
            serde_json::from_str(r#"{"path": "/notebooks/foo.ipynb"}"#).unwrap();

        assert_eq!(response.path, "/notebooks/foo.ipynb");
        assert!(response.kernel.is_none());
        assert!(response.session.is_none());
    }

    #[test]
    fn test_full_success_payload() {
        let body = r#"{
            "path": "/notebooks/Untitled.ipynb",
            "kernel": {"id": "8f7a", "name": "python3", "connections": 0},
            "session": {"id": "11d2", "type": "notebook"}
        }"#;
        let response: ConnectResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.kernel.unwrap().name.as_deref(), Some("python3"));
        assert_eq!(response.session.unwrap().id, "11d2");
    }

    #[test]
    fn test_error_body_without_message() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.message.is_none());
    }
}
