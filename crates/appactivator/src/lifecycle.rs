//! Process-wide entry points.
//!
//! The host calls [`run_pre_start`] before it begins normal operation and [`run_shutdown`] while
//! terminating. Both use one global [`ActivationContext`]: the one passed to [`install`], or
//! otherwise one built from [`ActivatorConfig::from_env`] on first use.

use std::sync::OnceLock;

use crate::config::ActivatorConfig;
use crate::engine::ActivationContext;
use crate::error::{Error, Result};

static GLOBAL: OnceLock<ActivationContext> = OnceLock::new();

/// Installs the context used by the free functions in this module.
///
/// Fails with [`Error::AlreadyInstalled`] once a context exists, including one created lazily
/// by an earlier entry point call.
pub fn install(context: ActivationContext) -> Result<()> {
    GLOBAL.set(context).map_err(|_| Error::AlreadyInstalled)
}

pub fn global() -> Result<&'static ActivationContext> {
    if let Some(context) = GLOBAL.get() {
        return Ok(context);
    }
    let context = ActivationContext::from_config(&ActivatorConfig::from_env())?;
    Ok(GLOBAL.get_or_init(|| context))
}

/// Runs pre-start activation methods; later calls are no-ops.
pub fn run_pre_start() -> Result<()> {
    global()?.run()
}

/// Runs all shutdown activation methods, every time it is called.
pub fn run_shutdown() -> Result<()> {
    global()?.run_shutdown_methods().map(|_| ())
}

/// Clears the global context's module cache and pre-start flag.
#[cfg(any(test, feature = "test-util"))]
pub fn reset() {
    if let Some(context) = GLOBAL.get() {
        context.reset();
    }
}
