//! Reserved capability names and their merge policy.
//!
//! Every reserved key has a fixed [`CapabilityKind`] and an overridable flag.
//! Keys outside this table are client extensions.

use super::value::CapabilityKind;

// ============================================================================
// Mandatory Keys
// ============================================================================

/// Browser name.
pub const BROWSER_NAME: &str = "browserName";

/// Browser version.
pub const BROWSER_VERSION: &str = "browserVersion";

/// Operating system name.
pub const PLATFORM_NAME: &str = "platformName";

/// Operating system version.
pub const PLATFORM_VERSION: &str = "platformVersion";

/// Protocol specification level.
pub const SPECIFICATION_LEVEL: &str = "specificationLevel";

// ============================================================================
// Feature Flags
// ============================================================================

/// Screen orientation can be changed.
pub const ROTATABLE: &str = "rotatable";

/// Invalid TLS certificates are accepted.
pub const ACCEPT_SSL_CERTS: &str = "acceptSslCerts";

/// Page screenshots are supported.
pub const TAKES_SCREENSHOT: &str = "takesScreenshot";

/// Element screenshots are supported.
pub const TAKES_ELEMENT_SCREENSHOT: &str = "takesElementScreenshot";

// ============================================================================
// Legacy and Vendor Keys
// ============================================================================

/// Uppercase platform name (Selenium 2).
pub const PLATFORM: &str = "platform";

/// Browser version (Selenium 2).
pub const VERSION: &str = "version";

/// Application ID.
pub const XUL_APP_ID: &str = "XULappId";

/// Application build ID.
pub const APP_BUILD_ID: &str = "appBuildId";

/// Keys every effective capability set contains.
pub const MANDATORY: [&str; 5] = [
    BROWSER_NAME,
    BROWSER_VERSION,
    PLATFORM_NAME,
    PLATFORM_VERSION,
    SPECIFICATION_LEVEL,
];

/// Default specification level.
pub const DEFAULT_SPECIFICATION_LEVEL: i64 = 0;

// ============================================================================
// KeyPolicy
// ============================================================================

/// Merge policy of a reserved capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPolicy {
    /// Capability name.
    pub name: &'static str,
    /// Expected value type.
    pub kind: CapabilityKind,
    /// Whether a client value replaces the server default.
    pub overridable: bool,
}

impl KeyPolicy {
    const fn fixed(name: &'static str, kind: CapabilityKind) -> Self {
        Self {
            name,
            kind,
            overridable: false,
        }
    }

    const fn overridable(name: &'static str, kind: CapabilityKind) -> Self {
        Self {
            name,
            kind,
            overridable: true,
        }
    }
}

/// Policy table for all reserved keys.
pub const POLICIES: [KeyPolicy; 13] = [
    KeyPolicy::fixed(BROWSER_NAME, CapabilityKind::String),
    KeyPolicy::fixed(BROWSER_VERSION, CapabilityKind::String),
    KeyPolicy::fixed(PLATFORM_NAME, CapabilityKind::String),
    KeyPolicy::fixed(PLATFORM_VERSION, CapabilityKind::String),
    KeyPolicy::overridable(SPECIFICATION_LEVEL, CapabilityKind::Integer),
    KeyPolicy::fixed(ROTATABLE, CapabilityKind::Bool),
    KeyPolicy::fixed(ACCEPT_SSL_CERTS, CapabilityKind::Bool),
    KeyPolicy::fixed(TAKES_SCREENSHOT, CapabilityKind::Bool),
    KeyPolicy::fixed(TAKES_ELEMENT_SCREENSHOT, CapabilityKind::Bool),
    KeyPolicy::fixed(PLATFORM, CapabilityKind::String),
    KeyPolicy::fixed(VERSION, CapabilityKind::String),
    KeyPolicy::fixed(XUL_APP_ID, CapabilityKind::String),
    KeyPolicy::fixed(APP_BUILD_ID, CapabilityKind::String),
];

/// Looks up the policy for `name`.
///
/// Returns `None` for client extension keys.
#[inline]
#[must_use]
pub fn policy(name: &str) -> Option<&'static KeyPolicy> {
    POLICIES.iter().find(|p| p.name == name)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mandatory_keys_have_policies() {
        for key in MANDATORY {
            assert!(policy(key).is_some(), "missing policy for {key}");
        }
    }

    #[test]
    fn test_only_specification_level_is_overridable() {
        let overridable: Vec<_> = POLICIES
            .iter()
            .filter(|p| p.overridable)
            .map(|p| p.name)
            .collect();
        assert_eq!(overridable, vec![SPECIFICATION_LEVEL]);
    }

    #[test]
    fn test_unknown_key_has_no_policy() {
        assert!(policy("somethingAwesome").is_none());
    }

    #[test]
    fn test_policy_names_are_unique() {
        for (i, a) in POLICIES.iter().enumerate() {
            for b in &POLICIES[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }
}
