//! Remote end configuration and entry point.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Remote`] | Configured remote end |
//! | [`RemoteBuilder`] | Fluent configuration builder |
//! | [`BrowserInfo`] | Browser and platform identity |
//! | [`Device`] | Device form factor |
//!
//! # Example
//!
//! ```no_run
//! use firefox_remote_session::{BrowserInfo, Remote};
//!
//! # async fn example() -> firefox_remote_session::Result<()> {
//! let remote = Remote::builder()
//!     .browser(BrowserInfo::new("Firefox", "48.0a1").with_build_id("20160315030230"))
//!     .port(2828)
//!     .build()?;
//!
//! let server = remote.serve().await?;
//! # server.shutdown().await;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder for remote end configuration.
pub mod builder;

/// Core remote end implementation.
pub mod core;

/// Browser and platform identity.
pub mod info;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::RemoteBuilder;
pub use self::core::Remote;
pub use info::{BrowserInfo, Device};
