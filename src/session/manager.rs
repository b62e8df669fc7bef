//! Session manager.
//!
//! Holds the single live session of a client connection. Creation either
//! fully succeeds or leaves the manager untouched.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::capabilities::{Capabilities, missing_mandatory, negotiate};
use crate::error::{Error, Result};
use crate::identifiers::SessionId;
use crate::protocol::NewSessionParams;
use crate::remote::BrowserInfo;

use super::Session;

// ============================================================================
// SessionManager
// ============================================================================

/// Creates, tracks and deletes the live session.
///
/// # Example
///
/// ```ignore
/// use firefox_remote_session::{BrowserInfo, NewSessionParams, SessionManager};
///
/// let manager = SessionManager::from_info(&BrowserInfo::new("Firefox", "48.0"))?;
/// let session = manager.new_session(NewSessionParams::new())?;
/// manager.delete_session(session.id().as_str())?;
/// ```
pub struct SessionManager {
    /// Server defaults every session starts from.
    defaults: Arc<Capabilities>,

    /// The live session, if any.
    active: Mutex<Option<Session>>,
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("active", &self.current().map(|s| s.id().clone()))
            .finish_non_exhaustive()
    }
}

// ============================================================================
// SessionManager - Constructors
// ============================================================================

impl SessionManager {
    /// Creates a manager over validated server defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the defaults lack a mandatory capability.
    pub fn new(defaults: Arc<Capabilities>) -> Result<Self> {
        let missing = missing_mandatory(&defaults);
        if !missing.is_empty() {
            return Err(Error::config(format!(
                "default capabilities are incomplete: {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            defaults,
            active: Mutex::new(None),
        })
    }

    /// Creates a manager with defaults derived from `info`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `info` is incomplete.
    pub fn from_info(info: &BrowserInfo) -> Result<Self> {
        info.validate()?;
        Self::new(Arc::new(info.default_capabilities()))
    }
}

// ============================================================================
// SessionManager - Public API
// ============================================================================

impl SessionManager {
    /// Creates a session.
    ///
    /// Uses the client-supplied ID if present, otherwise a fresh UUID v4.
    ///
    /// # Errors
    ///
    /// - [`Error::SessionNotCreated`] if a session is already live
    /// - [`Error::SessionNotCreated`] if a required capability cannot be met
    /// - [`Error::InvalidArgument`] if the client-supplied ID is empty
    pub fn new_session(&self, params: NewSessionParams) -> Result<Session> {
        let mut active = self.active.lock();

        if let Some(live) = active.as_ref() {
            warn!(session_id = %live.id(), "Rejecting new session while one is live");
            return Err(Error::session_already_active(live.id().clone()));
        }

        let id = match params.session_id {
            Some(requested) => SessionId::new(requested)
                .ok_or_else(|| Error::invalid_argument("sessionId must not be empty"))?,
            None => SessionId::generate(),
        };

        let desired = params.capabilities.desired();
        let required = params.capabilities.required.as_ref();

        let capabilities = negotiate(&self.defaults, desired.as_ref(), required)
            .inspect_err(|e| debug!(session_id = %id, error = %e, "Capability negotiation failed"))?;

        let session = Session::new(id, capabilities);
        *active = Some(session.clone());

        info!(
            session_id = %session.id(),
            capability_count = session.capabilities().len(),
            "Session created"
        );

        Ok(session)
    }

    /// Deletes the live session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSessionId`] if `session_id` is not the live session.
    pub fn delete_session(&self, session_id: &str) -> Result<()> {
        let mut active = self.active.lock();

        match active.as_ref() {
            Some(live) if live.id().as_str() == session_id => {
                *active = None;
                info!(session_id, "Session deleted");
                Ok(())
            }
            _ => Err(Error::invalid_session_id(session_id)),
        }
    }

    /// Returns the live session's capabilities.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSessionId`] if no session is live.
    pub fn capabilities(&self) -> Result<Capabilities> {
        self.active
            .lock()
            .as_ref()
            .map(|s| s.capabilities().clone())
            .ok_or_else(|| Error::invalid_session_id("(no active session)"))
    }

    /// Returns a snapshot of the live session.
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.active.lock().clone()
    }

    /// Returns `true` if no session is live.
    #[inline]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.active.lock().is_none()
    }

    /// Returns the server defaults.
    #[inline]
    #[must_use]
    pub fn defaults(&self) -> &Capabilities {
        &self.defaults
    }

    /// Discards the live session, if any.
    ///
    /// Used when the owning connection goes away.
    pub fn clear(&self) -> Option<Session> {
        let previous = self.active.lock().take();
        if let Some(session) = &previous {
            debug!(session_id = %session.id(), "Session discarded");
        }
        previous
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use tokio_test::{assert_err, assert_ok};

    use crate::capabilities::keys::{BROWSER_NAME, PLATFORM, PLATFORM_NAME, SPECIFICATION_LEVEL};
    use crate::error::Rejection;

    fn manager() -> SessionManager {
        let info = BrowserInfo::new("Firefox", "48.0a1")
            .with_app_id("{ec8030f7-c20a-464f-9b0e-13a3a9e97384}")
            .with_build_id("20160315030230")
            .with_platform("Linux", "4.4.0");
        SessionManager::from_info(&info).expect("valid info")
    }

    #[test]
    fn test_new_session_returns_capabilities() {
        let manager = manager();
        let session = manager.new_session(NewSessionParams::new()).expect("session");

        let caps = session.capabilities();
        assert!(caps.contains_key("browserName"));
        assert!(caps.contains_key("platformName"));
        assert!(caps.contains_key("platformVersion"));
        assert!(caps.contains_key("rotatable"));
        assert!(caps.contains_key("takesScreenshot"));
        assert!(caps.contains_key("version"));
        assert!(!manager.is_idle());
    }

    #[test]
    fn test_platform_is_uppercase_platform_name() {
        let session = manager().new_session(NewSessionParams::new()).expect("session");
        let caps = session.capabilities();
        let expected = caps.get_str(PLATFORM_NAME).map(str::to_uppercase);
        assert_eq!(caps.get_str(PLATFORM).map(str::to_string), expected);
    }

    #[test]
    fn test_generated_id_is_valid_uuid4() {
        let session = manager().new_session(NewSessionParams::new()).expect("session");
        assert!(!session.id().as_str().contains('{'));
    }

    #[test]
    fn test_we_can_set_the_session_id() {
        let session = manager()
            .new_session(NewSessionParams::new().with_session_id("ILoveCheese"))
            .expect("session");
        assert_eq!(session.id().as_str(), "ILoveCheese");
    }

    #[test]
    fn test_empty_session_id_is_invalid_argument() {
        let manager = manager();
        let err = manager
            .new_session(NewSessionParams::new().with_session_id(""))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
        assert!(manager.is_idle());
    }

    #[test]
    fn test_only_one_active_session_at_a_time() {
        let manager = manager();
        let first = manager.new_session(NewSessionParams::new()).expect("session");

        let err = manager.new_session(NewSessionParams::new()).unwrap_err();
        assert!(matches!(
            err.rejection(),
            Some(Rejection::SessionAlreadyActive { session_id }) if session_id == first.id()
        ));
        assert_eq!(manager.current().map(|s| s.id().clone()), Some(first.id().clone()));
    }

    #[test]
    fn test_set_specification_level() {
        let session = manager()
            .new_session(
                NewSessionParams::new()
                    .with_desired(Capabilities::new().with(SPECIFICATION_LEVEL, 1_i64)),
            )
            .expect("session");
        assert_eq!(session.capabilities().get_integer(SPECIFICATION_LEVEL), Some(1));
    }

    #[test]
    fn test_we_dont_overwrite_server_capabilities() {
        let session = manager()
            .new_session(
                NewSessionParams::new()
                    .with_desired(Capabilities::new().with(BROWSER_NAME, "ChocolateCake")),
            )
            .expect("session");
        assert_eq!(session.capabilities().get_str(BROWSER_NAME), Some("Firefox"));
    }

    #[test]
    fn test_unfulfillable_required_leaves_manager_idle() {
        let manager = manager();
        let err = manager
            .new_session(
                NewSessionParams::new()
                    .with_required(Capabilities::new().with(BROWSER_NAME, "CookiesAndCream")),
            )
            .unwrap_err();

        assert!(err.to_string().contains("CookiesAndCream does not equal"));
        assert!(manager.is_idle());

        // A plain session still works afterwards
        manager.new_session(NewSessionParams::new()).expect("session");
    }

    #[test]
    fn test_delete_session() {
        let manager = manager();
        let session = assert_ok!(manager.new_session(NewSessionParams::new()));

        assert_ok!(manager.delete_session(session.id().as_str()));
        assert!(manager.is_idle());
        assert_err!(manager.capabilities());
    }

    #[test]
    fn test_delete_unknown_session() {
        let manager = manager();
        manager.new_session(NewSessionParams::new()).expect("session");

        let err = assert_err!(manager.delete_session("not-the-session"));
        assert!(matches!(err, Error::InvalidSessionId { .. }));
        assert!(!manager.is_idle());
    }

    #[test]
    fn test_clear_discards_session() {
        let manager = manager();
        manager.new_session(NewSessionParams::new()).expect("session");
        assert!(manager.clear().is_some());
        assert!(manager.is_idle());
        assert!(manager.clear().is_none());
    }

    #[test]
    fn test_incomplete_defaults_rejected() {
        let defaults = Capabilities::new().with(BROWSER_NAME, "Firefox");
        let err = SessionManager::new(Arc::new(defaults)).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("browserVersion"));
    }
}
