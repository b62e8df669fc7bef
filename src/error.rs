//! Error types for the remote session end.
//!
//! This module defines all error types used throughout the crate.
//! Every variant maps to a WebDriver error code via [`Error::code`].
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use firefox_remote_session::{NewSessionParams, Result, SessionManager};
//!
//! fn example(manager: &SessionManager) -> Result<()> {
//!     let session = manager.new_session(NewSessionParams::default())?;
//!     manager.delete_session(session.id())?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`] |
//! | Session | [`Error::SessionNotCreated`], [`Error::InvalidSessionId`] |
//! | Protocol | [`Error::UnknownCommand`], [`Error::InvalidArgument`], [`Error::Protocol`] |
//! | External | [`Error::Io`], [`Error::Json`], [`Error::WebSocket`] |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;
use tokio_tungstenite::tungstenite::Error as WsError;

use crate::capabilities::CapabilityValue;
use crate::identifiers::SessionId;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Rejection
// ============================================================================

/// Reason a session could not be created.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    /// A required capability is absent or has a different value.
    ///
    /// The client-supplied value is named first.
    #[error("{requested} does not equal {}", display_actual(.actual))]
    Mismatch {
        /// Capability name.
        key: String,
        /// Value the client required.
        requested: CapabilityValue,
        /// Value the server would have used, if any.
        actual: Option<CapabilityValue>,
    },

    /// Another session is still live.
    #[error("Maximum number of active sessions reached (session {session_id} is live)")]
    SessionAlreadyActive {
        /// The live session.
        session_id: SessionId,
    },
}

fn display_actual(actual: &Option<CapabilityValue>) -> String {
    match actual {
        Some(value) => value.to_string(),
        None => "(not present)".to_string(),
    }
}

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when the remote end configuration is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Session Errors
    // ========================================================================
    /// Session creation was rejected.
    ///
    /// No session is created and the manager stays in its prior state.
    #[error("Session not created: {rejection}")]
    SessionNotCreated {
        /// Why the session was rejected.
        rejection: Rejection,
    },

    /// The given session ID does not name the live session.
    #[error("Invalid session id: {session_id}")]
    InvalidSessionId {
        /// The unknown session ID.
        session_id: String,
    },

    // ========================================================================
    // Protocol Errors
    // ========================================================================
    /// Unknown command method.
    #[error("Unknown command: {command}")]
    UnknownCommand {
        /// The unrecognized command method.
        command: String,
    },

    /// Invalid argument in command params.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument.
        message: String,
    },

    /// Protocol violation or unexpected message.
    #[error("Protocol error: {message}")]
    Protocol {
        /// Description of the protocol violation.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] WsError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a session-not-created error for a required capability mismatch.
    #[inline]
    pub fn capability_mismatch(
        key: impl Into<String>,
        requested: CapabilityValue,
        actual: Option<CapabilityValue>,
    ) -> Self {
        Self::SessionNotCreated {
            rejection: Rejection::Mismatch {
                key: key.into(),
                requested,
                actual,
            },
        }
    }

    /// Creates a session-not-created error for an already live session.
    #[inline]
    pub fn session_already_active(session_id: SessionId) -> Self {
        Self::SessionNotCreated {
            rejection: Rejection::SessionAlreadyActive { session_id },
        }
    }

    /// Creates an invalid session id error.
    #[inline]
    pub fn invalid_session_id(session_id: impl Into<String>) -> Self {
        Self::InvalidSessionId {
            session_id: session_id.into(),
        }
    }

    /// Creates an unknown command error.
    #[inline]
    pub fn unknown_command(command: impl Into<String>) -> Self {
        Self::UnknownCommand {
            command: command.into(),
        }
    }

    /// Creates an invalid argument error.
    #[inline]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a protocol error.
    #[inline]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Codes
// ============================================================================

impl Error {
    /// Returns the WebDriver error code sent to clients.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::SessionNotCreated { .. } => "session not created",
            Self::InvalidSessionId { .. } => "invalid session id",
            Self::UnknownCommand { .. } => "unknown command",
            Self::InvalidArgument { .. } | Self::Json(_) => "invalid argument",
            Self::Config { .. }
            | Self::Protocol { .. }
            | Self::Io(_)
            | Self::WebSocket(_) => "unknown error",
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a session lifecycle error.
    #[inline]
    #[must_use]
    pub fn is_session_error(&self) -> bool {
        matches!(
            self,
            Self::SessionNotCreated { .. } | Self::InvalidSessionId { .. }
        )
    }

    /// Returns the rejection if this is a session-not-created error.
    #[inline]
    #[must_use]
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::SessionNotCreated { rejection } => Some(rejection),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::ErrorKind;

    #[test]
    fn test_config_error() {
        let err = Error::config("browser name is empty");
        assert_eq!(err.to_string(), "Configuration error: browser name is empty");
    }

    #[test]
    fn test_mismatch_names_requested_value_first() {
        let err = Error::capability_mismatch(
            "browserName",
            CapabilityValue::from("CookiesAndCream"),
            Some(CapabilityValue::from("Firefox")),
        );

        let message = err.to_string();
        assert!(message.contains("CookiesAndCream does not equal Firefox"));
        assert!(message.starts_with("Session not created"));
    }

    #[test]
    fn test_mismatch_with_absent_value() {
        let err = Error::capability_mismatch("cake", CapabilityValue::Bool(true), None);
        assert!(err.to_string().contains("true does not equal (not present)"));
    }

    #[test]
    fn test_session_already_active_message() {
        let id = SessionId::new("abc").expect("non-empty");
        let err = Error::session_already_active(id);
        assert!(err.to_string().contains("session abc is live"));
    }

    #[test]
    fn test_error_codes() {
        let id = SessionId::generate();
        assert_eq!(Error::session_already_active(id).code(), "session not created");
        assert_eq!(Error::invalid_session_id("x").code(), "invalid session id");
        assert_eq!(Error::unknown_command("x.y").code(), "unknown command");
        assert_eq!(Error::invalid_argument("bad").code(), "invalid argument");
        assert_eq!(Error::config("bad").code(), "unknown error");
    }

    #[test]
    fn test_is_session_error() {
        assert!(Error::invalid_session_id("x").is_session_error());
        assert!(Error::session_already_active(SessionId::generate()).is_session_error());
        assert!(!Error::protocol("x").is_session_error());
    }

    #[test]
    fn test_rejection_accessor() {
        let err = Error::capability_mismatch("k", CapabilityValue::Integer(1), None);
        assert!(matches!(
            err.rejection(),
            Some(Rejection::Mismatch { key, .. }) if key == "k"
        ));
        assert!(Error::config("x").rejection().is_none());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = IoError::new(ErrorKind::AddrInUse, "address in use");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
        assert_eq!(err.code(), "invalid argument");
    }
}
