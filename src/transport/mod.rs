//! WebSocket transport layer.
//!
//! This module accepts client connections and carries protocol messages
//! between clients and their session managers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐                              ┌─────────────────┐
//! │  Client         │                              │  Server (Rust)  │
//! │  (local end)    │         WebSocket            │                 │
//! │                 │◄────────────────────────────►│  Connection     │
//! │                 │      localhost:PORT          │  → Manager      │
//! └─────────────────┘                              └─────────────────┘
//! ```
//!
//! # Connection Lifecycle
//!
//! 1. `Server::bind` - Bind and start accepting
//! 2. Client connects, WebSocket upgrade
//! 3. `Connection` - Decode requests, dispatch, encode responses
//! 4. Client disconnects or `Server::shutdown` - session discarded
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `connection` | Per-client request loop |
//! | `server` | Listener and accept loop |

// ============================================================================
// Submodules
// ============================================================================

/// Per-client WebSocket request loop.
pub mod connection;

/// WebSocket server and accept loop.
pub mod server;

// ============================================================================
// Re-exports
// ============================================================================

pub use connection::Connection;
pub use server::{DEFAULT_BIND_IP, Server};
