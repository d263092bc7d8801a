//! Diagnostic logging
//!
//! Diagnostics go to stderr through `tracing` and stay quiet unless `RUST_LOG`
//! asks for more. Operator output is printed by [`crate::console`] instead.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Safe to call more than once.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(tracing::Level::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
