use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::LocalTime;

/// Installs a `tracing` subscriber for hosts that do not set up their own.
///
/// `RUST_LOG` wins when present. Safe to call more than once; an already installed global
/// subscriber is left in place.
pub fn init_tracing() {
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                EnvFilter::new("warn,appactivator=debug")
            } else {
                EnvFilter::new("info")
            }
        });
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_timer(LocalTime::rfc_3339())
            .with_target(true)
            .with_thread_names(true)
            .try_init();
    });
}
