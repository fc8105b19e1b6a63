//! # Logging
//!
//! Structured logging for the studio client.
//!
//! - **File logging**: daily rolling `logs/studio.log.<date>`, non-blocking writes
//! - **Stderr mirror**: compact console output
//! - **Panic hook**: panics are logged before the default handler runs
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (default `studio=info,warn`)
//! - `STUDIO_LOG_DIR`: Log directory (default `logs`)
//! - `STUDIO_LOG_JSON`: JSON file output (1=on)
//! - `STUDIO_LOG_STDERR`: Stderr mirror (0=off)

pub mod config;
pub mod logger;

pub use config::DebugConfig;
pub use logger::init as init_logger;

/// Initialize logging. Call once at startup, before anything logs.
pub fn init() {
    init_logger();
}
