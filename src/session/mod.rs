//! Session lifecycle.
//!
//! A [`Session`] pairs an identifier with the capability set negotiated when
//! it was created. The [`SessionManager`] owns at most one live session.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `dispatch` | Request → Response routing |
//! | `manager` | Session creation and deletion |

// ============================================================================
// Submodules
// ============================================================================

/// Request dispatch onto a session manager.
pub mod dispatch;

/// Session creation and deletion.
pub mod manager;

// ============================================================================
// Imports
// ============================================================================

use crate::capabilities::Capabilities;
use crate::identifiers::SessionId;

// ============================================================================
// Re-exports
// ============================================================================

pub use dispatch::dispatch;
pub use manager::SessionManager;

// ============================================================================
// Session
// ============================================================================

/// A live session and its effective capabilities.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    id: SessionId,
    capabilities: Capabilities,
}

impl Session {
    #[inline]
    pub(crate) fn new(id: SessionId, capabilities: Capabilities) -> Self {
        Self { id, capabilities }
    }

    /// Returns the session ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the effective capabilities.
    #[inline]
    #[must_use]
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Consumes the session into its parts.
    #[inline]
    #[must_use]
    pub fn into_parts(self) -> (SessionId, Capabilities) {
        (self.id, self.capabilities)
    }
}
