//! Shared setup for e2e scenarios.

use std::sync::Once;
use uniweb_harness::{HarnessConfig, Result, Sandbox};

/// Harness configuration pointing at the stub tool built with this package.
pub fn stub_config() -> HarnessConfig {
    HarnessConfig::with_tool(env!("CARGO_BIN_EXE_uniweb-stub"))
}

/// A fresh sandbox driving the stub tool.
pub async fn sandbox() -> Result<Sandbox> {
    init_tracing();
    Sandbox::setup(stub_config()).await
}

/// Install a test-friendly subscriber once (RUST_LOG=debug to see tool calls).
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}
