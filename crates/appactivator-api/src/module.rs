use core::ffi::c_void;

use crate::{ActLogLevel, ActStatus, ActStr};

/// Lifecycle phase a marker is bound to.
///
/// Travels as a raw `u32` inside [`ActActivationMarker`] so that a module built against a
/// different enum cannot produce an invalid discriminant on the host side.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActActivationKind {
    PreStart = 1,
    Shutdown = 2,
}

impl ActActivationKind {
    pub const fn to_raw(self) -> u32 {
        self as u32
    }

    pub const fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            1 => Some(Self::PreStart),
            2 => Some(Self::Shutdown),
            _ => None,
        }
    }
}

/// One declared activation method.
///
/// The index of a marker inside its module table is its declaration order.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ActActivationMarker {
    /// Raw [`ActActivationKind`].
    pub kind: u32,
    /// Lower values run first.
    pub order: i32,
    pub run_in_designer_mode: bool,
    pub method_name_utf8: ActStr,
    pub invoke: extern "C" fn() -> ActStatus,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ActActivationModule {
    pub api_version: u32,
    pub module_name_utf8: ActStr,
    /// Releases module-owned bytes such as status messages.
    pub module_free: Option<extern "C" fn(ptr: *mut c_void, len: usize, align: usize)>,
    pub marker_count: extern "C" fn() -> usize,
    /// Returns null for out-of-range indices.
    pub marker_get: extern "C" fn(index: usize) -> *const ActActivationMarker,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ActHostVTable {
    pub api_version: u32,
    pub user_data: *mut c_void,
    pub log_utf8: Option<extern "C" fn(user_data: *mut c_void, level: ActLogLevel, msg: ActStr)>,
}

// Raw pointers make this not auto-Send/Sync. Host vtable is treated as immutable and requires
// `user_data` to be thread-safe when used across threads.
unsafe impl Send for ActHostVTable {}
unsafe impl Sync for ActHostVTable {}

pub type ActModuleEntry =
    unsafe extern "C" fn(host: *const ActHostVTable) -> *const ActActivationModule;
