//! Firefox Remote Session - session capability negotiation for a WebDriver-like remote end.
//!
//! This library implements the session lifecycle of a browser automation
//! remote end: creating sessions from negotiated capabilities, deleting
//! them, and reporting their state.
//!
//! # Architecture
//!
//! The crate follows a client-server model:
//!
//! - **Local End (client)**: Sends `session.*` commands over WebSocket
//! - **Remote End (Rust)**: Negotiates capabilities, owns the live session
//!
//! Key design principles:
//!
//! - Server identity fields are authoritative; clients cannot override them
//! - Required capabilities either all hold or the session is not created
//! - One live session per client connection
//! - Protocol uses `module.methodName` format
//!
//! # Quick Start
//!
//! ```no_run
//! use firefox_remote_session::{BrowserInfo, Remote, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let remote = Remote::builder()
//!         .browser(BrowserInfo::new("Firefox", "48.0a1"))
//!         .port(2828)
//!         .build()?;
//!
//!     let server = remote.serve().await?;
//!     println!("Listening on {}", server.ws_url());
//!
//!     tokio::signal::ctrl_c().await?;
//!     server.shutdown().await;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`capabilities`] | Capability sets and negotiation |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`protocol`] | Request/response message types |
//! | [`remote`] | Configuration and entry point |
//! | [`session`] | Session manager and dispatch |
//! | [`transport`] | WebSocket server |

// ============================================================================
// Modules
// ============================================================================

/// Capability sets and negotiation.
///
/// - [`Capabilities`] - Name → value map
/// - `negotiate` - Defaults + desired + required → effective set
pub mod capabilities;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers for sessions and requests.
pub mod identifiers;

/// JSON protocol message types.
pub mod protocol;

/// Remote end configuration and entry point.
///
/// Use [`Remote::builder()`] to create a configured remote end.
pub mod remote;

/// Session lifecycle.
pub mod session;

/// WebSocket transport layer.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Capability types
pub use capabilities::{Capabilities, CapabilityKind, CapabilityValue};

// Error types
pub use error::{Error, Rejection, Result};

// Identifier types
pub use identifiers::{RequestId, SessionId};

// Protocol types
pub use protocol::{NewSessionParams, Request, Response, SessionCommand};

// Remote types
pub use remote::{BrowserInfo, Device, Remote, RemoteBuilder};

// Session types
pub use session::{Session, SessionManager};

// Transport types
pub use transport::Server;
