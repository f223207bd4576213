use core::ffi::c_void;

use crate::{ActStatus, ActStr};

#[inline]
pub const fn actstr(s: &'static str) -> ActStr {
    ActStr::from_static(s)
}

#[inline]
pub fn status_ok() -> ActStatus {
    ActStatus::ok()
}

#[inline]
pub fn status_err(code: i32) -> ActStatus {
    ActStatus {
        code,
        message: ActStr::empty(),
    }
}

pub extern "C" fn module_free(ptr: *mut c_void, len: usize, align: usize) {
    if ptr.is_null() || len == 0 {
        return;
    }
    let align = align.max(1);
    // Safety: allocated by `alloc_utf8_bytes` with the same layout.
    unsafe {
        let layout = std::alloc::Layout::from_size_align_unchecked(len, align);
        std::alloc::dealloc(ptr as *mut u8, layout);
    }
}

pub fn alloc_utf8_bytes(s: &str) -> ActStr {
    if s.is_empty() {
        return ActStr::empty();
    }
    let bytes = s.as_bytes();
    let len = bytes.len();
    let Ok(layout) = std::alloc::Layout::from_size_align(len, 1) else {
        return ActStr::empty();
    };
    // Safety: layout is valid, and we copy exactly `len` bytes.
    unsafe {
        let ptr = std::alloc::alloc(layout);
        if ptr.is_null() {
            return ActStr::empty();
        }
        core::ptr::copy_nonoverlapping(bytes.as_ptr(), ptr, len);
        ActStr { ptr, len }
    }
}

pub fn status_err_msg(code: i32, msg: &str) -> ActStatus {
    ActStatus {
        code,
        message: alloc_utf8_bytes(msg),
    }
}

/// # Safety
///
/// The caller must ensure that the `ActStr` contains a valid pointer to a memory region
/// of at least `s.len` bytes.
pub unsafe fn actstr_to_str(s: &ActStr) -> Result<&str, String> {
    if s.is_empty() {
        return Ok("");
    }
    let bytes = unsafe { core::slice::from_raw_parts(s.ptr, s.len) };
    core::str::from_utf8(bytes).map_err(|_| "invalid utf-8".to_string())
}
