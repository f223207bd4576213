#![allow(clippy::missing_safety_doc)]

mod module;

pub use module::*;

// Bump on any layout change of the types in this crate.
pub const APPACTIVATOR_API_VERSION: u32 = 1;
pub const APPACTIVATOR_ENTRY_SYMBOL: &str = "appactivator_module_entry";

// Status codes (non-exhaustive). Modules may use other non-zero codes, but the SDK uses these.
pub const ACT_ERR_INVALID_ARG: i32 = 1;
pub const ACT_ERR_UNSUPPORTED: i32 = 2;
pub const ACT_ERR_IO: i32 = 3;
pub const ACT_ERR_INTERNAL: i32 = 5;
pub const ACT_ERR_PANIC: i32 = 6;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActLogLevel {
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

/// Immutable UTF-8 bytes. Not NUL-terminated.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActStr {
    pub ptr: *const u8,
    pub len: usize,
}

impl ActStr {
    pub const fn empty() -> Self {
        Self {
            ptr: core::ptr::null(),
            len: 0,
        }
    }

    pub const fn from_static(s: &'static str) -> Self {
        Self {
            ptr: s.as_ptr(),
            len: s.len(),
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.ptr.is_null() || self.len == 0
    }
}

// Immutable byte view used across FFI boundaries. Callers are responsible for lifetime validity.
unsafe impl Send for ActStr {}
unsafe impl Sync for ActStr {}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActStatus {
    /// 0 = OK, non-zero = error.
    pub code: i32,
    /// Optional error message (module-owned; free via `module_free`).
    pub message: ActStr,
}

impl ActStatus {
    pub const fn ok() -> Self {
        Self {
            code: 0,
            message: ActStr::empty(),
        }
    }

    pub const fn is_ok(&self) -> bool {
        self.code == 0
    }
}
