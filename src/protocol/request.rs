//! Request and Response message types.
//!
//! Defines the message format for command requests from the local end
//! (client) and responses from the remote end.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::identifiers::RequestId;

use super::SessionCommand;

// ============================================================================
// Request
// ============================================================================

/// A command request from local end to remote end.
///
/// # Format
///
/// ```json
/// {
///   "id": "uuid",
///   "method": "session.new",
///   "params": { ... }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Unique identifier for request/response correlation.
    pub id: RequestId,

    /// Command name in `module.methodName` format.
    pub method: String,

    /// Command parameters.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub params: Value,
}

impl Request {
    /// Creates a new request with auto-generated ID.
    #[inline]
    #[must_use]
    pub fn new(command: &SessionCommand) -> Self {
        Self::with_id(RequestId::generate(), command)
    }

    /// Creates a new request with specific ID.
    #[inline]
    #[must_use]
    pub fn with_id(id: RequestId, command: &SessionCommand) -> Self {
        Self {
            id,
            method: command.method().to_string(),
            params: command.params(),
        }
    }

    /// Decodes the command carried by this request.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownCommand`] if the method is not recognized
    /// - [`Error::InvalidArgument`] if the params are malformed
    pub fn command(&self) -> Result<SessionCommand> {
        SessionCommand::decode(&self.method, self.params.clone())
    }
}

// ============================================================================
// Response
// ============================================================================

/// A response from remote end to local end.
///
/// # Format
///
/// Success:
/// ```json
/// {
///   "id": "uuid",
///   "type": "success",
///   "result": { ... }
/// }
/// ```
///
/// Error:
/// ```json
/// {
///   "id": "uuid",
///   "type": "error",
///   "error": "session not created",
///   "message": "..."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Matches the request `id`.
    pub id: RequestId,

    /// Response type.
    #[serde(rename = "type")]
    pub response_type: ResponseType,

    /// Result data (if success).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    /// Error code (if error).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Error message (if error).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Response {
    /// Creates a success response.
    #[inline]
    #[must_use]
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            id,
            response_type: ResponseType::Success,
            result: Some(result),
            error: None,
            message: None,
        }
    }

    /// Creates an error response carrying the WebDriver error code.
    #[inline]
    #[must_use]
    pub fn error(id: RequestId, err: &Error) -> Self {
        Self {
            id,
            response_type: ResponseType::Error,
            result: None,
            error: Some(err.code().to_string()),
            message: Some(err.to_string()),
        }
    }

    /// Returns `true` if this is a success response.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.response_type == ResponseType::Success
    }

    /// Returns `true` if this is an error response.
    #[inline]
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.response_type == ResponseType::Error
    }
}

// ============================================================================
// ResponseType
// ============================================================================

/// Response type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    /// Successful response.
    Success,
    /// Error response.
    Error,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use crate::capabilities::{Capabilities, CapabilityValue};
    use crate::protocol::NewSessionParams;

    #[test]
    fn test_request_serialization() {
        let command = SessionCommand::New(
            NewSessionParams::new()
                .with_required(Capabilities::new().with("browserName", "Firefox")),
        );

        let request = Request::new(&command);
        let json = serde_json::to_string(&request).expect("serialize");

        assert!(json.contains("session.new"));
        assert!(json.contains("requiredCapabilities"));
    }

    #[test]
    fn test_unit_command_omits_params() {
        let request = Request::new(&SessionCommand::Status);
        let json = serde_json::to_value(&request).expect("serialize");
        assert!(json.get("params").is_none());
    }

    #[test]
    fn test_request_roundtrip_command() {
        let command = SessionCommand::New(NewSessionParams::new().with_session_id("ILoveCheese"));
        let request = Request::new(&command);

        let text = serde_json::to_string(&request).expect("serialize");
        let parsed: Request = serde_json::from_str(&text).expect("parse");
        assert_eq!(parsed.command().expect("decode"), command);
    }

    #[test]
    fn test_request_with_id() {
        let id = RequestId::generate();
        let request = Request::with_id(id, &SessionCommand::GetCapabilities);
        assert_eq!(request.id, id);
        assert_eq!(request.method, "session.getCapabilities");
    }

    #[test]
    fn test_request_without_params_parses() {
        let request: Request = serde_json::from_str(
            r#"{"id": "550e8400-e29b-41d4-a716-446655440000", "method": "session.new"}"#,
        )
        .expect("parse");

        assert!(request.params.is_null());
        assert!(matches!(
            request.command().expect("decode"),
            SessionCommand::New(_)
        ));
    }

    #[test]
    fn test_success_response() {
        let id = RequestId::generate();
        let response = Response::success(id, json!({"sessionId": "abc", "ready": true}));

        assert!(response.is_success());
        assert!(!response.is_error());
        let result = response.result.expect("result");
        assert_eq!(result["sessionId"], "abc");
        assert_eq!(result["ready"], true);
    }

    #[test]
    fn test_error_response() {
        let err = Error::capability_mismatch(
            "browserName",
            CapabilityValue::from("CookiesAndCream"),
            Some(CapabilityValue::from("Firefox")),
        );
        let response = Response::error(RequestId::nil(), &err);

        assert!(response.is_error());
        assert_eq!(response.error.as_deref(), Some("session not created"));

        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json["type"], "error");
        assert!(json.get("result").is_none());
        assert!(
            response
                .message
                .as_deref()
                .is_some_and(|m| m.contains("CookiesAndCream does not equal"))
        );
    }

    #[test]
    fn test_response_parses_null_result() {
        let json_str = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "type": "success",
            "result": null
        }"#;

        let response: Response = serde_json::from_str(json_str).expect("parse");
        assert!(response.is_success());
        assert!(response.result.is_none());
    }
}
