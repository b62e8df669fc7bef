//! Session capabilities and their negotiation.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `keys` | Reserved capability names and merge policy |
//! | `negotiate` | Merge of defaults, desired and required sets |
//! | `value` | [`CapabilityValue`] and [`Capabilities`] |

// ============================================================================
// Submodules
// ============================================================================

/// Reserved capability names and merge policy.
pub mod keys;

/// Capability negotiation.
pub mod negotiate;

/// Capability values and sets.
pub mod value;

// ============================================================================
// Re-exports
// ============================================================================

pub use keys::KeyPolicy;
pub use negotiate::{missing_mandatory, negotiate};
pub use value::{Capabilities, CapabilityKind, CapabilityValue};
