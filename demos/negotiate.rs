//! In-process capability negotiation.
//!
//! Demonstrates:
//! - Desired capabilities that are accepted, ignored, or override defaults
//! - Required capabilities that match and that fail
//! - One live session at a time
//!
//! Usage:
//!   cargo run --example negotiate

// ============================================================================
// Imports
// ============================================================================

use firefox_remote_session::{BrowserInfo, Capabilities, NewSessionParams, Remote};

// ============================================================================
// Main
// ============================================================================

fn main() -> anyhow::Result<()> {
    println!("=== Capability Negotiation ===\n");

    let remote = Remote::builder()
        .browser(BrowserInfo::new("Firefox", "48.0a1"))
        .build()?;
    let manager = remote.session_manager()?;

    // ========================================================================
    // Desired
    // ========================================================================

    let desired = Capabilities::new()
        .with("somethingAwesome", "cake")
        .with("browserName", "ChocolateCake")
        .with("specificationLevel", 1_i64);

    let session = manager.new_session(NewSessionParams::new().with_desired(desired))?;
    println!("[Desired] session {}", session.id());
    for key in session.capabilities().sorted_keys() {
        if let Some(value) = session.capabilities().get(key) {
            println!("        {key} = {value}");
        }
    }

    // ========================================================================
    // One Session At A Time
    // ========================================================================

    if let Err(e) = manager.new_session(NewSessionParams::new()) {
        println!("\n[Second] {e}");
    }
    manager.delete_session(session.id().as_str())?;

    // ========================================================================
    // Required
    // ========================================================================

    let required = Capabilities::new().with("browserName", "CookiesAndCream");
    if let Err(e) = manager.new_session(NewSessionParams::new().with_required(required)) {
        println!("\n[Required] {e}");
    }

    let session = manager.new_session(NewSessionParams::new().with_session_id("ILoveCheese"))?;
    println!("\n[Plain] session {} created after rejection", session.id());

    Ok(())
}
