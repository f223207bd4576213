//! Host side of the activation system.
//!
//! Activation modules are native libraries dropped into the host's deployment directory. Each
//! exports a table of markers built with `appactivator-sdk`; this crate enumerates the
//! directory, loads what it can, and invokes the markers of one lifecycle phase in ascending
//! `order`.
//!
//! Most hosts only need [`lifecycle::run_pre_start`] and [`lifecycle::run_shutdown`]. Hosts that
//! want explicit ownership construct an [`ActivationContext`] instead.

mod cache;
pub mod config;
pub mod discovery;
mod engine;
pub mod error;
pub mod lifecycle;
mod load;
pub mod logging;
mod marker;
mod registry;
mod util;

use appactivator_api::{APPACTIVATOR_API_VERSION, ActHostVTable, ActLogLevel, ActStr};

pub use cache::ModuleCache;
pub use config::ActivatorConfig;
pub use engine::{ActivationContext, ActivationReport};
pub use error::{Error, LoadError, Result, StatusError, UnsuitableReason};
pub use load::{DirectoryModuleSource, Module, ModuleCandidate, ModuleSource};
pub use marker::{ActivationKind, ActivationMarker, ActivationTarget};
pub use registry::{MarkerDecl, StaticModule, StaticModuleSource};

extern "C" fn default_host_log(_: *mut core::ffi::c_void, level: ActLogLevel, msg: ActStr) {
    let text = unsafe { util::actstr_to_string_lossy(msg) };
    match level {
        ActLogLevel::Error => tracing::error!(target: "appactivator::module", "{text}"),
        ActLogLevel::Warn => tracing::warn!(target: "appactivator::module", "{text}"),
        ActLogLevel::Info => tracing::info!(target: "appactivator::module", "{text}"),
        ActLogLevel::Debug => tracing::debug!(target: "appactivator::module", "{text}"),
        ActLogLevel::Trace => tracing::trace!(target: "appactivator::module", "{text}"),
    }
}

// Modules keep the pointer they receive on entry for as long as they stay loaded.
static HOST_VTABLE: ActHostVTable = ActHostVTable {
    api_version: APPACTIVATOR_API_VERSION,
    user_data: core::ptr::null_mut(),
    log_utf8: Some(default_host_log),
};

pub fn host_vtable() -> &'static ActHostVTable {
    &HOST_VTABLE
}
