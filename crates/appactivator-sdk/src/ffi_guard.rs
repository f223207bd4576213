//! FFI panic guard.
//!
//! Every `extern "C" fn` generated by `export_activation_module!` runs the user method through
//! [`guard_status`], so a panicking activation method surfaces as an `ACT_ERR_PANIC` status on
//! the host side instead of unwinding across the FFI boundary.

use crate::{ACT_ERR_PANIC, ActLogLevel, ActStatus, host_log, status_err_msg};

/// Extract a human-readable message from a panic payload.
pub fn panic_message(payload: Box<dyn core::any::Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        return (*msg).to_string();
    }
    if let Some(msg) = payload.downcast_ref::<String>() {
        return msg.clone();
    }
    "non-string panic payload".to_string()
}

pub fn guard_status(op: &'static str, f: impl FnOnce() -> ActStatus) -> ActStatus {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)) {
        Ok(status) => status,
        Err(payload) => {
            let msg = panic_message(payload);
            let bt = std::backtrace::Backtrace::force_capture();
            host_log(
                ActLogLevel::Error,
                &format!("panic in activation method `{op}`: {msg}\nbacktrace:\n{bt}"),
            );
            status_err_msg(
                ACT_ERR_PANIC,
                &format!("panic in activation method `{op}`: {msg}"),
            )
        }
    }
}
