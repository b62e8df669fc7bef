//! WebSocket connection and request loop.
//!
//! Each accepted client gets a [`Connection`] with its own
//! [`SessionManager`]. Requests on one connection are handled strictly in
//! order, so session start and delete never overlap.
//!
//! # Request Loop
//!
//! The connection spawns a tokio task that handles:
//!
//! - Incoming text frames (decoded as [`Request`])
//! - Dispatch onto the session manager
//! - Outgoing [`Response`] frames
//! - Shutdown commands from the server

// ============================================================================
// Imports
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use serde_json::{from_str, to_string};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, trace, warn};

use crate::error::{Error, Result};
use crate::identifiers::RequestId;
use crate::protocol::{Request, Response};
use crate::session::{Session, SessionManager, dispatch};

// ============================================================================
// Types
// ============================================================================

/// Write half of a client WebSocket.
type WsSink = SplitSink<WebSocketStream<TcpStream>, Message>;

// ============================================================================
// ConnectionCommand
// ============================================================================

/// Internal commands for the request loop.
enum ConnectionCommand {
    /// Close the WebSocket and stop.
    Shutdown,
}

// ============================================================================
// Connection
// ============================================================================

/// Handle to a client connection.
///
/// Cloning the handle does not clone the connection; all clones control
/// the same request loop.
#[derive(Clone)]
pub struct Connection {
    /// Peer address.
    addr: SocketAddr,
    /// Channel for sending commands to the request loop.
    command_tx: mpsc::UnboundedSender<ConnectionCommand>,
    /// Session state of this client.
    manager: Arc<SessionManager>,
}

impl Connection {
    /// Spawns the request loop for an upgraded WebSocket.
    ///
    /// The returned task finishes when the client disconnects or
    /// [`Connection::shutdown`] is called.
    pub(crate) fn spawn(
        ws_stream: WebSocketStream<TcpStream>,
        addr: SocketAddr,
        manager: SessionManager,
    ) -> (Self, JoinHandle<()>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let manager = Arc::new(manager);

        let task = tokio::spawn(Self::run_request_loop(
            ws_stream,
            command_rx,
            Arc::clone(&manager),
        ));

        let connection = Self {
            addr,
            command_tx,
            manager,
        };

        (connection, task)
    }

    /// Returns the peer address.
    #[inline]
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the client's live session, if any.
    #[inline]
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.manager.current()
    }

    /// Asks the request loop to close the connection.
    pub fn shutdown(&self) {
        let _ = self.command_tx.send(ConnectionCommand::Shutdown);
    }

    /// Request loop that handles WebSocket I/O.
    async fn run_request_loop(
        ws_stream: WebSocketStream<TcpStream>,
        mut command_rx: mpsc::UnboundedReceiver<ConnectionCommand>,
        manager: Arc<SessionManager>,
    ) {
        let (mut ws_write, mut ws_read) = ws_stream.split();

        loop {
            tokio::select! {
                // Incoming messages from client
                message = ws_read.next() => {
                    match message {
                        Some(Ok(Message::Text(text))) => {
                            let response = Self::handle_incoming_message(&text, &manager);

                            if let Err(e) = Self::send_response(&mut ws_write, &response).await {
                                warn!(error = %e, "Failed to send response");
                                break;
                            }
                        }

                        Some(Ok(Message::Close(_))) => {
                            debug!("WebSocket closed by client");
                            break;
                        }

                        Some(Err(e)) => {
                            error!(error = %e, "WebSocket error");
                            break;
                        }

                        None => {
                            debug!("WebSocket stream ended");
                            break;
                        }

                        // Ignore Binary, Ping, Pong
                        _ => {}
                    }
                }

                // Commands from the server
                command = command_rx.recv() => {
                    match command {
                        Some(ConnectionCommand::Shutdown) => {
                            debug!("Shutdown command received");
                            let _ = ws_write.close().await;
                            break;
                        }

                        None => {
                            debug!("Command channel closed");
                            break;
                        }
                    }
                }
            }
        }

        // Sessions do not outlive their connection
        manager.clear();

        debug!("Request loop terminated");
    }

    /// Decodes and dispatches one text frame.
    fn handle_incoming_message(text: &str, manager: &SessionManager) -> Response {
        match from_str::<Request>(text) {
            Ok(request) => dispatch(manager, &request),
            Err(e) => {
                warn!(error = %e, "Failed to parse incoming message");
                Response::error(
                    RequestId::nil(),
                    &Error::invalid_argument(format!("malformed request: {e}")),
                )
            }
        }
    }

    /// Serializes and writes a response.
    async fn send_response(ws_write: &mut WsSink, response: &Response) -> Result<()> {
        let json = to_string(response)?;
        ws_write.send(Message::Text(json.into())).await?;
        trace!(id = %response.id, "Response sent");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::protocol::ResponseType;
    use crate::remote::BrowserInfo;

    fn manager() -> SessionManager {
        let info = BrowserInfo::new("Firefox", "48.0a1").with_platform("Linux", "4.4.0");
        SessionManager::from_info(&info).expect("valid info")
    }

    #[test]
    fn test_malformed_frame_gets_nil_error_response() {
        let response = Connection::handle_incoming_message("not json", &manager());

        assert!(response.id.is_nil());
        assert_eq!(response.response_type, ResponseType::Error);
        assert_eq!(response.error.as_deref(), Some("invalid argument"));
    }

    #[test]
    fn test_frame_is_dispatched() {
        let manager = manager();
        let text = r#"{"id": "550e8400-e29b-41d4-a716-446655440000", "method": "session.new"}"#;
        let response = Connection::handle_incoming_message(text, &manager);

        assert!(response.is_success());
        assert_eq!(
            response.id.to_string(),
            "550e8400-e29b-41d4-a716-446655440000"
        );
        assert!(!manager.is_idle());
    }

    #[test]
    fn test_connection_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Connection>();
    }
}
