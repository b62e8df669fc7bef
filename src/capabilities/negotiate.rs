//! Capability negotiation.
//!
//! Resolves server defaults, desired and required capability sets into the
//! effective set of a new session.
//!
//! # Rules
//!
//! 1. Start from the server defaults.
//! 2. Merge desired entries. Fixed reserved keys present in the defaults
//!    keep the server value; values of the wrong kind are dropped.
//! 3. Every required entry must already hold in the merged set, checked in
//!    key order. The first failure rejects the session.
//! 4. Merge required entries under the same rule as step 2.

// ============================================================================
// Imports
// ============================================================================

use tracing::{debug, trace};

use crate::error::{Error, Result};

use super::keys::{self, MANDATORY, PLATFORM, PLATFORM_NAME};
use super::value::{Capabilities, CapabilityValue};

// ============================================================================
// Merge
// ============================================================================

/// How a single client entry is resolved against the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    /// Client value is stored.
    Accept,
    /// Server value is authoritative and kept.
    KeepServer,
    /// Client value has the wrong type for a reserved key.
    WrongKind,
}

fn resolve(key: &str, value: &CapabilityValue, defaults: &Capabilities) -> Resolution {
    match keys::policy(key) {
        Some(policy) if policy.kind != value.kind() => Resolution::WrongKind,
        Some(policy) if !policy.overridable && defaults.contains_key(key) => {
            Resolution::KeepServer
        }
        _ => Resolution::Accept,
    }
}

fn merge(effective: &mut Capabilities, entries: &Capabilities, defaults: &Capabilities) {
    for (key, value) in entries.iter() {
        match resolve(key, value, defaults) {
            Resolution::Accept => {
                effective.insert(key, value.clone());
            }
            Resolution::KeepServer => {
                debug!(key, requested = %value, "Ignoring client value for server capability");
            }
            Resolution::WrongKind => {
                debug!(key, kind = %value.kind(), "Ignoring capability value of wrong type");
            }
        }
    }
}

// ============================================================================
// Required Check
// ============================================================================

fn check_required(effective: &Capabilities, required: &Capabilities) -> Result<()> {
    for key in required.sorted_keys() {
        let Some(requested) = required.get(key) else {
            continue;
        };
        let actual = effective.get(key);

        if actual != Some(requested) {
            return Err(Error::capability_mismatch(
                key,
                requested.clone(),
                actual.cloned(),
            ));
        }
    }
    Ok(())
}

// ============================================================================
// Public API
// ============================================================================

/// Produces the effective capability set for a new session.
///
/// # Errors
///
/// Returns [`Error::SessionNotCreated`] naming the first required capability
/// that is absent or differs from the negotiated value.
pub fn negotiate(
    defaults: &Capabilities,
    desired: Option<&Capabilities>,
    required: Option<&Capabilities>,
) -> Result<Capabilities> {
    let mut effective = defaults.clone();

    if let Some(desired) = desired {
        merge(&mut effective, desired, defaults);
    }

    if let Some(required) = required {
        check_required(&effective, required)?;
        merge(&mut effective, required, defaults);
    }

    trace!(count = effective.len(), "Capabilities negotiated");
    Ok(effective)
}

fn is_present(value: Option<&CapabilityValue>) -> bool {
    match value {
        Some(CapabilityValue::String(s)) => !s.is_empty(),
        Some(_) => true,
        None => false,
    }
}

/// Returns the mandatory keys missing from `caps`.
///
/// Also reports `platform` when it is not the uppercase `platformName`.
#[must_use]
pub fn missing_mandatory(caps: &Capabilities) -> Vec<&'static str> {
    let mut missing: Vec<&'static str> = MANDATORY
        .into_iter()
        .filter(|key| !is_present(caps.get(key)))
        .collect();

    let expected_platform = caps.get_str(PLATFORM_NAME).map(str::to_uppercase);
    if caps.get_str(PLATFORM).map(str::to_string) != expected_platform {
        missing.push(PLATFORM);
    }

    missing
}

// ============================================================================
// Tests
// ============================================================================
