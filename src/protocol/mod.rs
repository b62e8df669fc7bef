//! JSON protocol message types.
//!
//! This module defines the message format for communication between the
//! local end (client) and the remote end (this crate).
//!
//! # Protocol Overview
//!
//! | Message Type | Direction | Purpose |
//! |--------------|-----------|---------|
//! | `Request` | Local → Remote | Command request |
//! | `Response` | Remote → Local | Command response |
//!
//! # Command Naming
//!
//! Commands follow `module.methodName` format:
//!
//! - `session.new`
//! - `session.delete`
//! - `session.getCapabilities`
//! - `session.status`
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `command` | Session command definitions |
//! | `request` | Request and Response types |

// ============================================================================
// Submodules
// ============================================================================

/// Session command definitions.
pub mod command;

/// Request and Response message types.
pub mod request;

// ============================================================================
// Re-exports
// ============================================================================

pub use command::{
    CapabilityRequest, DeleteSessionParams, NewSessionParams, NewSessionResult, SessionCommand,
    StatusResult,
};
pub use request::{Request, Response, ResponseType};
