//! Logging setup for Shelf binaries.
//!
//! Library crates only emit `tracing` events. Binaries call [`init_logging`]
//! once at startup to install a subscriber that writes to stderr in either
//! JSON or human-readable form.

mod logging;

pub use logging::*;
