//! Remote end entry point.
//!
//! The [`Remote`] ties the browser identity, the server defaults and the
//! transport together.
//!
//! # Example
//!
//! ```no_run
//! use firefox_remote_session::{BrowserInfo, Remote};
//!
//! # async fn example() -> firefox_remote_session::Result<()> {
//! let remote = Remote::builder()
//!     .browser(BrowserInfo::new("Firefox", "48.0a1"))
//!     .build()?;
//!
//! let server = remote.serve().await?;
//! println!("Listening on {}", server.ws_url());
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use crate::capabilities::Capabilities;
use crate::error::Result;
use crate::session::SessionManager;
use crate::transport::Server;

use super::builder::RemoteBuilder;
use super::info::BrowserInfo;

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for the remote end.
pub(crate) struct RemoteInner {
    /// Browser identity.
    pub info: BrowserInfo,

    /// Default capabilities of every session.
    pub defaults: Arc<Capabilities>,

    /// Address to listen on.
    pub bind_addr: SocketAddr,
}

// ============================================================================
// Remote
// ============================================================================

/// Configured remote end.
///
/// Cheap to clone; clones share configuration.
#[derive(Clone)]
pub struct Remote {
    /// Shared inner state.
    pub(crate) inner: Arc<RemoteInner>,
}

impl fmt::Debug for Remote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Remote")
            .field("browser", &self.inner.info.name)
            .field("version", &self.inner.info.version)
            .field("bind_addr", &self.inner.bind_addr)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Remote - Public API
// ============================================================================

impl Remote {
    /// Creates a configuration builder.
    #[inline]
    #[must_use]
    pub fn builder() -> RemoteBuilder {
        RemoteBuilder::new()
    }

    /// Returns the browser identity.
    #[inline]
    #[must_use]
    pub fn info(&self) -> &BrowserInfo {
        &self.inner.info
    }

    /// Returns the default capabilities.
    #[inline]
    #[must_use]
    pub fn defaults(&self) -> &Capabilities {
        &self.inner.defaults
    }

    /// Returns the configured listen address.
    #[inline]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.inner.bind_addr
    }

    /// Creates an in-process session manager over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] if the defaults are incomplete.
    pub fn session_manager(&self) -> Result<SessionManager> {
        SessionManager::new(Arc::clone(&self.inner.defaults))
    }

    /// Binds the WebSocket server and starts accepting clients.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if binding fails.
    pub async fn serve(&self) -> Result<Arc<Server>> {
        let addr = self.inner.bind_addr;
        let server = Server::bind(addr.ip(), addr.port(), Arc::clone(&self.inner.defaults)).await?;

        info!(
            browser = %self.inner.info.name,
            version = %self.inner.info.version,
            url = %server.ws_url(),
            "Remote end serving"
        );

        Ok(server)
    }
}

// ============================================================================
// Remote - Internal API
// ============================================================================

impl Remote {
    /// Creates a remote end from validated parts.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] if `defaults` are incomplete.
    pub(crate) fn new(
        info: BrowserInfo,
        defaults: Capabilities,
        bind_addr: SocketAddr,
    ) -> Result<Self> {
        let defaults = Arc::new(defaults);

        // Same check every session manager performs
        SessionManager::new(Arc::clone(&defaults))?;

        Ok(Self {
            inner: Arc::new(RemoteInner {
                info,
                defaults,
                bind_addr,
            }),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
