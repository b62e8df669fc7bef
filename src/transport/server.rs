//! WebSocket server for client connections.
//!
//! # Connection Flow
//!
//! 1. [`Server::bind`] binds to `127.0.0.1:0` (random port) by default
//! 2. Client connects and upgrades to WebSocket
//! 3. The connection gets a fresh session manager over the server defaults
//! 4. Client sends `session.new`, other commands, `session.delete`
//! 5. On disconnect the client's session is discarded
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │                Server                   │
//! │             (single port)               │
//! │  ┌─────────────────────────────────┐    │
//! │  │ conn 1 → SessionManager (idle)  │    │
//! │  │ conn 2 → SessionManager (live)  │    │
//! │  └─────────────────────────────────┘    │
//! └─────────────────────────────────────────┘
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::capabilities::Capabilities;
use crate::error::{Error, Result};
use crate::session::SessionManager;

use super::Connection;

// ============================================================================
// Constants
// ============================================================================

/// Default bind address (localhost).
pub const DEFAULT_BIND_IP: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// Interval at which the accept loop checks the shutdown flag.
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(100);

// ============================================================================
// Server
// ============================================================================

/// WebSocket server serving session commands.
///
/// # Example
///
/// ```ignore
/// let server = Server::bind(DEFAULT_BIND_IP, 0, defaults).await?;
/// println!("WebSocket URL: {}", server.ws_url());
/// // ...
/// server.shutdown().await;
/// ```
pub struct Server {
    /// Bound address.
    local_addr: SocketAddr,

    /// Defaults shared by every connection's session manager.
    defaults: Arc<Capabilities>,

    /// Active connections by connection number.
    connections: RwLock<FxHashMap<u64, Connection>>,

    /// Next connection number.
    next_connection: AtomicU64,

    /// Shutdown flag.
    shutdown: AtomicBool,
}

// ============================================================================
// Server - Constructor
// ============================================================================

impl Server {
    /// Binds the server and starts the accept loop.
    ///
    /// Use port 0 to let the OS assign a random available port.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if `defaults` lack a mandatory capability
    /// - [`Error::Io`] if binding fails
    pub async fn bind(ip: IpAddr, port: u16, defaults: Arc<Capabilities>) -> Result<Arc<Self>> {
        // Validate defaults before binding
        SessionManager::new(Arc::clone(&defaults))?;

        let listener = TcpListener::bind(SocketAddr::new(ip, port)).await?;
        let local_addr = listener.local_addr()?;

        let server = Arc::new(Self {
            local_addr,
            defaults,
            connections: RwLock::new(FxHashMap::default()),
            next_connection: AtomicU64::new(1),
            shutdown: AtomicBool::new(false),
        });

        let server_clone = Arc::clone(&server);
        tokio::spawn(async move {
            server_clone.accept_loop(listener).await;
        });

        info!(addr = %local_addr, "Server started");

        Ok(server)
    }
}

// ============================================================================
// Server - Public API
// ============================================================================

impl Server {
    /// Returns the WebSocket URL for this server.
    ///
    /// Format: `ws://{ip}:{port}`
    #[inline]
    #[must_use]
    pub fn ws_url(&self) -> String {
        format!("ws://{}", self.local_addr)
    }

    /// Returns the port the server is bound to.
    #[inline]
    #[must_use]
    pub fn port(&self) -> u16 {
        self.local_addr.port()
    }

    /// Returns the bound socket address.
    #[inline]
    #[must_use]
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Returns the number of connected clients.
    #[inline]
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.connections.read().len()
    }

    /// Returns the number of clients with a live session.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.connections
            .read()
            .values()
            .filter(|c| c.session().is_some())
            .count()
    }

    /// Returns `true` once [`Server::shutdown`] has been called.
    #[inline]
    #[must_use]
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Stops accepting and closes all connections.
    pub async fn shutdown(&self) {
        info!("Server shutting down");

        // Signal accept loop to stop
        self.shutdown.store(true, Ordering::SeqCst);

        let connections: Vec<_> = {
            let mut map = self.connections.write();
            map.drain().collect()
        };

        for (number, connection) in connections {
            connection.shutdown();
            debug!(connection = number, addr = %connection.addr(), "Connection closed during shutdown");
        }

        info!("Server shutdown complete");
    }
}

// ============================================================================
// Server - Accept Loop
// ============================================================================

impl Server {
    /// Background task that accepts new connections.
    async fn accept_loop(self: Arc<Self>, listener: TcpListener) {
        debug!("Accept loop started");

        loop {
            if self.is_shutdown() {
                debug!("Accept loop shutting down");
                break;
            }

            // Accept with timeout to allow checking shutdown flag
            match timeout(ACCEPT_POLL_INTERVAL, listener.accept()).await {
                Ok(Ok((stream, addr))) => {
                    let server = Arc::clone(&self);
                    tokio::spawn(async move {
                        if let Err(e) = server.handle_connection(stream, addr).await {
                            warn!(error = %e, ?addr, "Connection handling failed");
                        }
                    });
                }
                Ok(Err(e)) => {
                    error!(error = %e, "Accept failed");
                }
                Err(_) => continue,
            }
        }

        debug!("Accept loop terminated");
    }

    /// Serves a single client until it disconnects.
    async fn handle_connection(&self, stream: TcpStream, addr: SocketAddr) -> Result<()> {
        debug!(?addr, "New TCP connection");

        let ws_stream = tokio_tungstenite::accept_async(stream)
            .await
            .map_err(|e| Error::protocol(format!("WebSocket upgrade failed: {e}")))?;

        let manager = SessionManager::new(Arc::clone(&self.defaults))?;
        let (connection, task) = Connection::spawn(ws_stream, addr, manager);

        let number = self.next_connection.fetch_add(1, Ordering::Relaxed);
        self.connections.write().insert(number, connection);

        info!(connection = number, ?addr, "WebSocket connection established");

        if let Err(e) = task.await {
            error!(connection = number, error = %e, "Request loop panicked");
        }

        self.connections.write().remove(&number);
        debug!(connection = number, "Connection removed");

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
