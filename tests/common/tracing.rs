//! Log output for integration tests.
//!
//! Records are formatted like the browser console sink (no timestamps, no
//! targets) so a failing test reads the same as a page's console. Set
//! `RUST_LOG=lumen=debug` to see every dispatch decision.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset: only degraded paths
const DEFAULT_TEST_FILTER: &str = "lumen=warn";

/// Install the test subscriber on first use; later calls are no-ops.
pub fn init_tracing_from_env() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TEST_FILTER));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .without_time()
            .with_target(false)
            .with_test_writer()
            .try_init();
    });
}
