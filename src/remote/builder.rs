//! Builder pattern for remote end configuration.
//!
//! Provides a fluent API for configuring and creating [`Remote`] instances.
//!
//! # Example
//!
//! ```no_run
//! use firefox_remote_session::{BrowserInfo, Remote};
//!
//! # fn example() -> firefox_remote_session::Result<()> {
//! let remote = Remote::builder()
//!     .browser(BrowserInfo::new("Firefox", "48.0a1"))
//!     .port(2828)
//!     .build()?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::net::{IpAddr, SocketAddr};

use crate::capabilities::{Capabilities, CapabilityValue, keys};
use crate::error::{Error, Result};
use crate::transport::DEFAULT_BIND_IP;

use super::core::Remote;
use super::info::BrowserInfo;

// ============================================================================
// RemoteBuilder
// ============================================================================

/// Builder for configuring a [`Remote`] instance.
///
/// Use [`Remote::builder()`] to create a new builder.
#[derive(Debug, Clone)]
pub struct RemoteBuilder {
    /// Browser identity.
    browser: Option<BrowserInfo>,
    /// Address to listen on.
    ip: IpAddr,
    /// Port to listen on (0 for random).
    port: u16,
    /// Extra vendor capabilities added to the defaults.
    extra: Capabilities,
}

impl Default for RemoteBuilder {
    fn default() -> Self {
        Self {
            browser: None,
            ip: DEFAULT_BIND_IP,
            port: 0,
            extra: Capabilities::new(),
        }
    }
}

// ============================================================================
// RemoteBuilder Implementation
// ============================================================================

impl RemoteBuilder {
    /// Creates a new builder with no browser configured.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the browser identity.
    #[inline]
    #[must_use]
    pub fn browser(mut self, info: BrowserInfo) -> Self {
        self.browser = Some(info);
        self
    }

    /// Sets the address to listen on.
    #[inline]
    #[must_use]
    pub fn ip(mut self, ip: IpAddr) -> Self {
        self.ip = ip;
        self
    }

    /// Sets the port to listen on (0 for random).
    #[inline]
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Adds a vendor capability to the server defaults.
    ///
    /// Reserved capability names are rejected by [`RemoteBuilder::build`].
    #[inline]
    #[must_use]
    pub fn capability(mut self, key: impl Into<String>, value: impl Into<CapabilityValue>) -> Self {
        self.extra.insert(key, value);
        self
    }

    /// Builds the remote end with validation.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if no browser is set
    /// - [`Error::Config`] if the browser info has empty fields
    /// - [`Error::Config`] if an extra capability uses a reserved name
    pub fn build(self) -> Result<Remote> {
        let browser = self.validate_browser()?;
        self.validate_extra()?;

        let mut defaults = browser.default_capabilities();
        defaults.extend(self.extra);

        Remote::new(browser, defaults, SocketAddr::new(self.ip, self.port))
    }
}

// ============================================================================
// Validation
// ============================================================================

impl RemoteBuilder {
    /// Validates the browser configuration.
    fn validate_browser(&self) -> Result<BrowserInfo> {
        let browser = self.browser.clone().ok_or_else(|| {
            Error::config(
                "Browser info is required. Use .browser() to set it.\n\
                 Example: Remote::builder().browser(BrowserInfo::new(\"Firefox\", \"48.0\"))",
            )
        })?;

        browser.validate()?;
        Ok(browser)
    }

    /// Validates extra capabilities against the reserved names.
    fn validate_extra(&self) -> Result<()> {
        if let Some(reserved) = self
            .extra
            .sorted_keys()
            .into_iter()
            .find(|key| keys::policy(key).is_some())
        {
            return Err(Error::config(format!(
                "Capability '{reserved}' is reserved and derived from the browser info"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::net::Ipv4Addr;

    fn browser() -> BrowserInfo {
        BrowserInfo::new("Firefox", "48.0a1").with_platform("Linux", "4.4.0")
    }

    #[test]
    fn test_new_creates_empty_builder() {
        let builder = RemoteBuilder::new();
        assert!(builder.browser.is_none());
        assert_eq!(builder.ip, DEFAULT_BIND_IP);
        assert_eq!(builder.port, 0);
        assert!(builder.extra.is_empty());
    }

    #[test]
    fn test_build_fails_without_browser() {
        let err = RemoteBuilder::new().build().unwrap_err();
        assert!(err.to_string().contains("Browser info is required"));
    }

    #[test]
    fn test_build_fails_with_empty_version() {
        let err = RemoteBuilder::new()
            .browser(BrowserInfo::new("Firefox", ""))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("browser version"));
    }

    #[test]
    fn test_build_rejects_reserved_extra_capability() {
        let err = RemoteBuilder::new()
            .browser(browser())
            .capability("browserName", "ChocolateCake")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("'browserName' is reserved"));
    }

    #[test]
    fn test_extra_capability_lands_in_defaults() {
        let remote = RemoteBuilder::new()
            .browser(browser())
            .capability("moz:processID", 4242_i64)
            .build()
            .expect("build");
        assert_eq!(remote.defaults().get_integer("moz:processID"), Some(4242));
    }

    #[test]
    fn test_bind_address() {
        let remote = RemoteBuilder::new()
            .browser(browser())
            .ip(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
            .port(2828)
            .build()
            .expect("build");
        assert_eq!(remote.bind_addr().port(), 2828);
        assert_eq!(remote.bind_addr().ip(), IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    }

    #[test]
    fn test_builder_is_clone() {
        let builder = RemoteBuilder::new().port(2828);
        let cloned = builder.clone();
        assert_eq!(builder.port, cloned.port);
    }
}
