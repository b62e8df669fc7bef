//! Serve session commands over WebSocket.
//!
//! Demonstrates:
//! - Configuring a remote end with the builder
//! - Binding the WebSocket server
//! - Graceful shutdown on Ctrl+C
//!
//! Usage:
//!   cargo run --example serve
//!   cargo run --example serve -- --debug
//!   cargo run --example serve -- --port 2828

// ============================================================================
// Imports
// ============================================================================

use anyhow::Context;
use firefox_remote_session::{BrowserInfo, Remote};
use tracing_subscriber::EnvFilter;

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let debug = args.iter().any(|a| a == "--debug");
    let port = match args.iter().position(|a| a == "--port") {
        Some(i) => args
            .get(i + 1)
            .context("--port needs a value")?
            .parse::<u16>()
            .context("--port must be a number")?,
        None => 0,
    };

    init_logging(debug);

    let remote = Remote::builder()
        .browser(
            BrowserInfo::new("Firefox", "48.0a1")
                .with_app_id("{ec8030f7-c20a-464f-9b0e-13a3a9e97384}")
                .with_build_id("20160315030230"),
        )
        .port(port)
        .build()?;

    let server = remote.serve().await?;
    println!("Listening on {}", server.ws_url());
    println!("Press Ctrl+C to exit...");

    tokio::signal::ctrl_c().await?;
    server.shutdown().await;

    Ok(())
}

/// Initialize tracing/logging.
fn init_logging(debug: bool) {
    let filter = if debug {
        "firefox_remote_session=debug"
    } else {
        "firefox_remote_session=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();
}
