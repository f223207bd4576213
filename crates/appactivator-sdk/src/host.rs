use core::sync::atomic::{AtomicPtr, Ordering};

use crate::{ActHostVTable, ActLogLevel, ActStr};

static HOST_VTABLE: AtomicPtr<ActHostVTable> = AtomicPtr::new(core::ptr::null_mut());

#[doc(hidden)]
pub unsafe fn __set_host_vtable(host: *const ActHostVTable) {
    HOST_VTABLE.store(host as *mut ActHostVTable, Ordering::Release);
}

pub fn host_vtable_raw() -> Option<*const ActHostVTable> {
    let p = HOST_VTABLE.load(Ordering::Acquire);
    if p.is_null() { None } else { Some(p as *const _) }
}

/// Log a message to the host, if the host provided a logger.
///
/// This is purely best-effort: before the entry point ran, or when the host passed no logger,
/// this is a no-op.
pub fn host_log(level: ActLogLevel, msg: &str) {
    let Some(host) = host_vtable_raw() else {
        return;
    };

    // Safety: the host owns the vtable and keeps it alive while the module is loaded.
    let cb = unsafe { (*host).log_utf8 };
    let Some(cb) = cb else {
        return;
    };

    let bytes = msg.as_bytes();
    let s = ActStr {
        ptr: bytes.as_ptr(),
        len: bytes.len(),
    };
    let user_data = unsafe { (*host).user_data };
    cb(user_data, level, s);
}
