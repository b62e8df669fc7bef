//! Session command definitions.
//!
//! Commands follow the `module.methodName` format.
//!
//! | Method | Params | Result |
//! |--------|--------|--------|
//! | `session.new` | [`NewSessionParams`] | [`NewSessionResult`] |
//! | `session.delete` | [`DeleteSessionParams`] | `null` |
//! | `session.getCapabilities` | none | capability object |
//! | `session.status` | none | [`StatusResult`] |

// ============================================================================
// Imports
// ============================================================================

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::capabilities::Capabilities;
use crate::error::{Error, Result};
use crate::identifiers::SessionId;

// ============================================================================
// Method Names
// ============================================================================

/// Create a session.
pub const NEW_SESSION: &str = "session.new";

/// Delete the live session.
pub const DELETE_SESSION: &str = "session.delete";

/// Get the live session's capabilities.
pub const GET_CAPABILITIES: &str = "session.getCapabilities";

/// Report whether a new session can be created.
pub const STATUS: &str = "session.status";

// ============================================================================
// SessionCommand
// ============================================================================

/// Session module commands.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// Create a session.
    New(NewSessionParams),
    /// Delete a session.
    Delete(DeleteSessionParams),
    /// Get effective capabilities of the live session.
    GetCapabilities,
    /// Get remote end status.
    Status,
}

impl SessionCommand {
    /// Returns the wire method name.
    #[inline]
    #[must_use]
    pub const fn method(&self) -> &'static str {
        match self {
            Self::New(_) => NEW_SESSION,
            Self::Delete(_) => DELETE_SESSION,
            Self::GetCapabilities => GET_CAPABILITIES,
            Self::Status => STATUS,
        }
    }

    /// Returns the wire params.
    #[must_use]
    pub fn params(&self) -> Value {
        let params = match self {
            Self::New(params) => serde_json::to_value(params),
            Self::Delete(params) => serde_json::to_value(params),
            Self::GetCapabilities | Self::Status => return Value::Null,
        };
        params.unwrap_or_default()
    }

    /// Decodes a command from its wire method and params.
    ///
    /// Missing params (`null`) are treated as an empty object.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownCommand`] if `method` is not a session command
    /// - [`Error::InvalidArgument`] if `params` do not match the method
    pub fn decode(method: &str, params: Value) -> Result<Self> {
        match method {
            NEW_SESSION => Ok(Self::New(decode_params(method, params)?)),
            DELETE_SESSION => Ok(Self::Delete(decode_params(method, params)?)),
            GET_CAPABILITIES => Ok(Self::GetCapabilities),
            STATUS => Ok(Self::Status),
            other => Err(Error::unknown_command(other)),
        }
    }
}

fn decode_params<T: DeserializeOwned>(method: &str, params: Value) -> Result<T> {
    let params = match params {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };

    serde_json::from_value(params)
        .map_err(|e| Error::invalid_argument(format!("{method}: {e}")))
}

/// Deserializes `null` as `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// NewSessionParams
// ============================================================================

/// Parameters of `session.new`.
///
/// # Format
///
/// ```json
/// {
///   "sessionId": "optional",
///   "capabilities": {
///     "desiredCapabilities": { ... },
///     "requiredCapabilities": { ... }
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewSessionParams {
    /// Client-chosen session ID.
    #[serde(rename = "sessionId", default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Requested capabilities. `null` is the same as absent.
    #[serde(default, deserialize_with = "null_as_default")]
    pub capabilities: CapabilityRequest,
}

impl NewSessionParams {
    /// Creates params with no capabilities.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the client-chosen session ID.
    #[inline]
    #[must_use]
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Sets the desired capabilities.
    #[inline]
    #[must_use]
    pub fn with_desired(mut self, desired: Capabilities) -> Self {
        self.capabilities.desired = Some(desired);
        self
    }

    /// Sets the required capabilities.
    #[inline]
    #[must_use]
    pub fn with_required(mut self, required: Capabilities) -> Self {
        self.capabilities.required = Some(required);
        self
    }
}

// ============================================================================
// CapabilityRequest
// ============================================================================

/// Client capability request.
///
/// Keys other than `desiredCapabilities` and `requiredCapabilities` are
/// additional desired capabilities (flat legacy form).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapabilityRequest {
    /// Best-effort preferences.
    #[serde(
        rename = "desiredCapabilities",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub desired: Option<Capabilities>,

    /// Capabilities that must match exactly.
    #[serde(
        rename = "requiredCapabilities",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub required: Option<Capabilities>,

    /// Flat desired capabilities.
    #[serde(flatten)]
    pub flat: Capabilities,
}

impl CapabilityRequest {
    /// Returns the combined desired capabilities.
    ///
    /// Entries of `desiredCapabilities` win over flat entries.
    #[must_use]
    pub fn desired(&self) -> Option<Capabilities> {
        match (&self.desired, self.flat.is_empty()) {
            (None, true) => None,
            (None, false) => Some(self.flat.clone()),
            (Some(desired), true) => Some(desired.clone()),
            (Some(desired), false) => {
                let mut combined = self.flat.clone();
                combined.extend(desired.clone());
                Some(combined)
            }
        }
    }
}

// ============================================================================
// DeleteSessionParams
// ============================================================================

/// Parameters of `session.delete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteSessionParams {
    /// Session to delete.
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

// ============================================================================
// Results
// ============================================================================

/// Result of `session.new`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSessionResult {
    /// Assigned session ID.
    #[serde(rename = "sessionId")]
    pub session_id: SessionId,

    /// Effective capabilities.
    pub capabilities: Capabilities,
}

/// Result of `session.status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResult {
    /// `true` if a new session can be created.
    pub ready: bool,

    /// Human-readable state.
    pub message: String,
}

// ============================================================================
// Tests
// ============================================================================
