//! Console logging setup.

use tracing_subscriber::EnvFilter;

use crate::{AlogError, AlogResult};

/// Initializes a console `tracing` subscriber for the engine's own
/// diagnostics and operational echoes.
///
/// Respects `RUST_LOG`, defaulting to `info`. Call once near process
/// start; embedders that already install a subscriber can skip this.
///
/// # Errors
///
/// Returns [`AlogError::Console`] when a global subscriber is already
/// set.
pub fn init_console_logging() -> AlogResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|error| AlogError::Console(error.to_string()))
}
