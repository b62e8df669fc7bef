//! Browser and platform identity.
//!
//! [`BrowserInfo`] describes the browser behind the remote end and derives
//! the default capability set every session starts from.
//!
//! # Example
//!
//! ```ignore
//! use firefox_remote_session::BrowserInfo;
//!
//! let info = BrowserInfo::new("Firefox", "48.0a1")
//!     .with_app_id("{ec8030f7-c20a-464f-9b0e-13a3a9e97384}")
//!     .with_build_id("20160315030230");
//!
//! let defaults = info.default_capabilities();
//! assert_eq!(defaults.get_str("platform"), Some(info.platform_name.to_uppercase().as_str()));
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fs;

use tracing::trace;

use crate::capabilities::Capabilities;
use crate::capabilities::keys::{
    ACCEPT_SSL_CERTS, APP_BUILD_ID, BROWSER_NAME, BROWSER_VERSION, DEFAULT_SPECIFICATION_LEVEL,
    PLATFORM, PLATFORM_NAME, PLATFORM_VERSION, ROTATABLE, SPECIFICATION_LEVEL,
    TAKES_ELEMENT_SCREENSHOT, TAKES_SCREENSHOT, VERSION, XUL_APP_ID,
};
use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Placeholder for values the host does not report.
const UNKNOWN: &str = "unknown";

/// Kernel release file on Linux.
const LINUX_OSRELEASE: &str = "/proc/sys/kernel/osrelease";

// ============================================================================
// Device
// ============================================================================

/// Form factor of the device the browser runs on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Device {
    /// Desktop browser.
    #[default]
    Desktop,
    /// Phone or tablet (B2G). Screen is rotatable.
    Mobile,
}

// ============================================================================
// BrowserInfo
// ============================================================================

/// Identity of the browser and host platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserInfo {
    /// Application name (e.g. "Firefox").
    pub name: String,

    /// Application version.
    pub version: String,

    /// Application ID.
    pub app_id: String,

    /// Application build ID.
    pub build_id: String,

    /// Operating system name as the browser reports it.
    pub platform_name: String,

    /// Operating system version.
    pub platform_version: String,

    /// Device form factor.
    pub device: Device,
}

// ============================================================================
// Constructors
// ============================================================================

impl BrowserInfo {
    /// Creates browser info with the host platform detected.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        let (platform_name, platform_version) = detect_platform();
        Self {
            name: name.into(),
            version: version.into(),
            app_id: String::new(),
            build_id: String::new(),
            platform_name,
            platform_version,
            device: Device::Desktop,
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl BrowserInfo {
    /// Sets the application ID.
    #[inline]
    #[must_use]
    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = app_id.into();
        self
    }

    /// Sets the application build ID.
    #[inline]
    #[must_use]
    pub fn with_build_id(mut self, build_id: impl Into<String>) -> Self {
        self.build_id = build_id.into();
        self
    }

    /// Overrides the detected platform.
    #[inline]
    #[must_use]
    pub fn with_platform(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.platform_name = name.into();
        self.platform_version = version.into();
        self
    }

    /// Sets the device form factor.
    #[inline]
    #[must_use]
    pub fn with_device(mut self, device: Device) -> Self {
        self.device = device;
        self
    }
}

// ============================================================================
// Capabilities
// ============================================================================

impl BrowserInfo {
    /// Checks that every field a mandatory capability is derived from is set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first empty field.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("browser name", &self.name),
            ("browser version", &self.version),
            ("platform name", &self.platform_name),
            ("platform version", &self.platform_version),
        ];

        for (label, value) in fields {
            if value.trim().is_empty() {
                return Err(Error::config(format!("{label} must not be empty")));
            }
        }

        Ok(())
    }

    /// Builds the default capability set.
    #[must_use]
    pub fn default_capabilities(&self) -> Capabilities {
        Capabilities::new()
            .with(BROWSER_NAME, self.name.as_str())
            .with(BROWSER_VERSION, self.version.as_str())
            .with(PLATFORM_NAME, self.platform_name.as_str())
            .with(PLATFORM_VERSION, self.platform_version.as_str())
            .with(SPECIFICATION_LEVEL, DEFAULT_SPECIFICATION_LEVEL)
            .with(ROTATABLE, self.device == Device::Mobile)
            .with(ACCEPT_SSL_CERTS, false)
            .with(TAKES_SCREENSHOT, true)
            .with(TAKES_ELEMENT_SCREENSHOT, true)
            .with(PLATFORM, self.platform_name.to_uppercase())
            .with(XUL_APP_ID, self.app_id.as_str())
            .with(APP_BUILD_ID, self.build_id.as_str())
            .with(VERSION, self.version.as_str())
    }
}

// ============================================================================
// Platform Detection
// ============================================================================

/// Returns the host OS name and version.
///
/// Names follow the browser convention (`Linux`, `Darwin`, `Windows_NT`).
#[must_use]
pub fn detect_platform() -> (String, String) {
    let name = match std::env::consts::OS {
        "linux" => "Linux",
        "macos" => "Darwin",
        "windows" => "Windows_NT",
        "android" => "Android",
        "freebsd" => "FreeBSD",
        other => other,
    };

    let release = if cfg!(target_os = "linux") {
        fs::read_to_string(LINUX_OSRELEASE)
            .map(|s| s.trim().to_string())
            .ok()
            .filter(|s| !s.is_empty())
    } else {
        None
    };
    let version = release.unwrap_or_else(|| UNKNOWN.to_string());

    trace!(name, version = %version, "Detected platform");
    (name.to_string(), version)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::capabilities::missing_mandatory;

    fn info() -> BrowserInfo {
        BrowserInfo::new("Firefox", "48.0a1")
            .with_app_id("{ec8030f7-c20a-464f-9b0e-13a3a9e97384}")
            .with_build_id("20160315030230")
            .with_platform("Linux", "4.4.0")
    }

    #[test]
    fn test_default_capabilities_are_complete() {
        let caps = info().default_capabilities();
        assert!(missing_mandatory(&caps).is_empty());
        assert_eq!(caps.get_str(BROWSER_NAME), Some("Firefox"));
        assert_eq!(caps.get_str(BROWSER_VERSION), Some("48.0a1"));
        assert_eq!(caps.get_str(PLATFORM_NAME), Some("Linux"));
        assert_eq!(caps.get_str(PLATFORM_VERSION), Some("4.4.0"));
        assert_eq!(caps.get_integer(SPECIFICATION_LEVEL), Some(0));
    }

    #[test]
    fn test_supported_features() {
        let caps = info().default_capabilities();
        assert_eq!(caps.get_bool(ROTATABLE), Some(false));
        assert_eq!(caps.get_bool(ACCEPT_SSL_CERTS), Some(false));
        assert_eq!(caps.get_bool(TAKES_SCREENSHOT), Some(true));
        assert_eq!(caps.get_bool(TAKES_ELEMENT_SCREENSHOT), Some(true));
    }

    #[test]
    fn test_mobile_device_is_rotatable() {
        let caps = info().with_device(Device::Mobile).default_capabilities();
        assert_eq!(caps.get_bool(ROTATABLE), Some(true));
    }

    #[test]
    fn test_selenium2_compat() {
        let caps = info().with_platform("Darwin", "15.4.0").default_capabilities();
        assert_eq!(caps.get_str(PLATFORM), Some("DARWIN"));
        assert_eq!(caps.get_str(VERSION), Some("48.0a1"));
    }

    #[test]
    fn test_extensions() {
        let caps = info().default_capabilities();
        assert_eq!(
            caps.get_str(XUL_APP_ID),
            Some("{ec8030f7-c20a-464f-9b0e-13a3a9e97384}")
        );
        assert_eq!(caps.get_str(APP_BUILD_ID), Some("20160315030230"));
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let err = BrowserInfo::new("", "1.0").validate().unwrap_err();
        assert!(err.to_string().contains("browser name"));
    }

    #[test]
    fn test_validate_rejects_empty_platform_version() {
        let err = info().with_platform("Linux", " ").validate().unwrap_err();
        assert!(err.to_string().contains("platform version"));
    }

    #[test]
    fn test_detect_platform_is_non_empty() {
        let (name, version) = detect_platform();
        assert!(!name.is_empty());
        assert!(!version.is_empty());
    }
}
