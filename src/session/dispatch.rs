//! Request dispatch.
//!
//! Decodes a [`Request`], runs it against a [`SessionManager`] and encodes
//! the outcome as a [`Response`]. Errors never escape: every request gets a
//! response with the same ID.

// ============================================================================
// Imports
// ============================================================================

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::Result;
use crate::protocol::{NewSessionResult, Request, Response, SessionCommand, StatusResult};

use super::SessionManager;

// ============================================================================
// Dispatch
// ============================================================================

/// Handles one request.
#[must_use]
pub fn dispatch(manager: &SessionManager, request: &Request) -> Response {
    trace!(id = %request.id, method = %request.method, "Dispatching request");

    match request.command().and_then(|command| execute(manager, command)) {
        Ok(result) => Response::success(request.id, result),
        Err(e) => {
            debug!(id = %request.id, method = %request.method, error = %e, "Request failed");
            Response::error(request.id, &e)
        }
    }
}

fn execute(manager: &SessionManager, command: SessionCommand) -> Result<Value> {
    match command {
        SessionCommand::New(params) => {
            let (session_id, capabilities) = manager.new_session(params)?.into_parts();
            let result = NewSessionResult {
                session_id,
                capabilities,
            };
            Ok(serde_json::to_value(result)?)
        }

        SessionCommand::Delete(params) => {
            manager.delete_session(&params.session_id)?;
            Ok(Value::Null)
        }

        SessionCommand::GetCapabilities => Ok(serde_json::to_value(manager.capabilities()?)?),

        SessionCommand::Status => {
            let status = match manager.current() {
                None => StatusResult {
                    ready: true,
                    message: "ready".to_string(),
                },
                Some(session) => StatusResult {
                    ready: false,
                    message: format!("session {} is live", session.id()),
                },
            };
            Ok(serde_json::to_value(status)?)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use crate::capabilities::Capabilities;
    use crate::identifiers::RequestId;
    use crate::protocol::{DeleteSessionParams, NewSessionParams};
    use crate::remote::BrowserInfo;

    fn manager() -> SessionManager {
        let info = BrowserInfo::new("Firefox", "48.0a1").with_platform("Linux", "4.4.0");
        SessionManager::from_info(&info).expect("valid info")
    }

    fn new_session(manager: &SessionManager, params: NewSessionParams) -> Response {
        dispatch(manager, &Request::new(&SessionCommand::New(params)))
    }

    #[test]
    fn test_new_session_response() {
        let manager = manager();
        let request = Request::new(&SessionCommand::New(NewSessionParams::new()));
        let response = dispatch(&manager, &request);

        assert_eq!(response.id, request.id);
        assert!(response.is_success());

        let result: NewSessionResult =
            serde_json::from_value(response.result.expect("result")).expect("parse");
        assert_eq!(result.capabilities.get_str("browserName"), Some("Firefox"));
        assert_eq!(manager.current().map(|s| s.id().clone()), Some(result.session_id));
    }

    #[test]
    fn test_pass_in_capabilities_on_session_start() {
        let manager = manager();
        let response = new_session(
            &manager,
            NewSessionParams::new()
                .with_desired(Capabilities::new().with("somethingAwesome", "cake")),
        );

        let result = response.result.expect("result");
        assert_eq!(result["capabilities"]["somethingAwesome"], "cake");
    }

    #[test]
    fn test_required_mismatch_response() {
        let manager = manager();
        let response = new_session(
            &manager,
            NewSessionParams::new()
                .with_required(Capabilities::new().with("browserName", "CookiesAndCream")),
        );

        assert!(response.is_error());
        assert_eq!(response.error.as_deref(), Some("session not created"));
        assert!(
            response
                .message
                .as_deref()
                .is_some_and(|m| m.contains("CookiesAndCream does not equal"))
        );

        assert!(new_session(&manager, NewSessionParams::new()).is_success());
    }

    #[test]
    fn test_delete_then_status() {
        let manager = manager();
        let response = new_session(&manager, NewSessionParams::new());
        let result: NewSessionResult =
            serde_json::from_value(response.result.expect("result")).expect("parse");
        let session_id = result.session_id.to_string();

        let status = dispatch(&manager, &Request::new(&SessionCommand::Status));
        assert_eq!(status.result.expect("result")["ready"], false);

        let delete = SessionCommand::Delete(DeleteSessionParams { session_id });
        let response = dispatch(&manager, &Request::new(&delete));
        assert!(response.is_success());
        assert_eq!(response.result, Some(Value::Null));

        let status = dispatch(&manager, &Request::new(&SessionCommand::Status));
        assert_eq!(status.result.expect("result")["ready"], true);
    }

    #[test]
    fn test_get_capabilities_without_session() {
        let response = dispatch(&manager(), &Request::new(&SessionCommand::GetCapabilities));
        assert_eq!(response.error.as_deref(), Some("invalid session id"));
    }

    #[test]
    fn test_get_capabilities_with_session() {
        let manager = manager();
        new_session(&manager, NewSessionParams::new());

        let response = dispatch(&manager, &Request::new(&SessionCommand::GetCapabilities));
        let result = response.result.expect("result");
        assert_eq!(result["specificationLevel"], json!(0));
    }

    #[test]
    fn test_unknown_command() {
        let request = Request {
            id: RequestId::generate(),
            method: "browsingContext.navigate".to_string(),
            params: json!({"url": "https://example.com"}),
        };

        let response = dispatch(&manager(), &request);
        assert_eq!(response.error.as_deref(), Some("unknown command"));
        assert_eq!(response.id, request.id);
    }
}
