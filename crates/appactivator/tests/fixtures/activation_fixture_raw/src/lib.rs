//! Module table written against the raw ABI, without the export macro.
//!
//! `APPACTIVATOR_FIXTURE_RAW_TABLE` selects which table the entry point hands out, so one
//! library can present every well-formed and malformed shape the host must classify. It is
//! read on each entry call.

use core::ptr;

use appactivator_api::{
    APPACTIVATOR_API_VERSION, ActActivationKind, ActActivationMarker, ActActivationModule,
    ActHostVTable, ActStatus, ActStr,
};
use appactivator_sdk::{actstr, status_ok};

const TABLE_ENV: &str = "APPACTIVATOR_FIXTURE_RAW_TABLE";

const INVALID_UTF8: &[u8] = &[0xff, 0xfe, 0xfd];
const INVALID_UTF8_STR: ActStr = ActStr {
    ptr: INVALID_UTF8.as_ptr(),
    len: INVALID_UTF8.len(),
};

extern "C" fn ready() -> ActStatus {
    status_ok()
}

const fn marker(kind: u32, method_name_utf8: ActStr) -> ActActivationMarker {
    ActActivationMarker {
        kind,
        order: 0,
        run_in_designer_mode: false,
        method_name_utf8,
        invoke: ready,
    }
}

const fn module(
    api_version: u32,
    module_name_utf8: ActStr,
    marker_count: extern "C" fn() -> usize,
    marker_get: extern "C" fn(index: usize) -> *const ActActivationMarker,
) -> ActActivationModule {
    ActActivationModule {
        api_version,
        module_name_utf8,
        module_free: None,
        marker_count,
        marker_get,
    }
}

static READY: ActActivationMarker = marker(ActActivationKind::PreStart.to_raw(), actstr("ready"));
static UNKNOWN_KIND: ActActivationMarker = marker(9, actstr("mystery"));
static BAD_METHOD_NAME: ActActivationMarker =
    marker(ActActivationKind::PreStart.to_raw(), INVALID_UTF8_STR);

extern "C" fn one() -> usize {
    1
}

// Claims far more markers than it has; index 1 and beyond are null.
extern "C" fn unbounded() -> usize {
    usize::MAX
}

extern "C" fn ready_get(index: usize) -> *const ActActivationMarker {
    if index == 0 { &READY } else { ptr::null() }
}

extern "C" fn unknown_kind_get(index: usize) -> *const ActActivationMarker {
    if index == 0 { &UNKNOWN_KIND } else { ptr::null() }
}

extern "C" fn bad_method_name_get(index: usize) -> *const ActActivationMarker {
    if index == 0 { &BAD_METHOD_NAME } else { ptr::null() }
}

extern "C" fn null_get(_index: usize) -> *const ActActivationMarker {
    ptr::null()
}

// Empty name: the host names the module after its file.
static READY_MODULE: ActActivationModule =
    module(APPACTIVATOR_API_VERSION, ActStr::empty(), one, ready_get);
static FUTURE_API: ActActivationModule =
    module(APPACTIVATOR_API_VERSION + 1, actstr("fixture.raw"), one, ready_get);
static UNKNOWN_KIND_MODULE: ActActivationModule =
    module(APPACTIVATOR_API_VERSION, actstr("fixture.raw"), one, unknown_kind_get);
static NULL_MARKER: ActActivationModule =
    module(APPACTIVATOR_API_VERSION, actstr("fixture.raw"), one, null_get);
static BAD_MODULE_NAME: ActActivationModule =
    module(APPACTIVATOR_API_VERSION, INVALID_UTF8_STR, one, ready_get);
static BAD_METHOD_NAME_MODULE: ActActivationModule =
    module(APPACTIVATOR_API_VERSION, actstr("fixture.raw"), one, bad_method_name_get);
static UNBOUNDED_COUNT: ActActivationModule =
    module(APPACTIVATOR_API_VERSION, actstr("fixture.raw"), unbounded, ready_get);

/// # Safety
///
/// Called by the host loader only; `host` is not dereferenced.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn appactivator_module_entry(
    _host: *const ActHostVTable,
) -> *const ActActivationModule {
    let table = std::env::var(TABLE_ENV).unwrap_or_default();
    match table.as_str() {
        "null_module" => ptr::null(),
        "future_api" => &FUTURE_API,
        "unknown_kind" => &UNKNOWN_KIND_MODULE,
        "null_marker" => &NULL_MARKER,
        "bad_module_name" => &BAD_MODULE_NAME,
        "bad_method_name" => &BAD_METHOD_NAME_MODULE,
        "unbounded_count" => &UNBOUNDED_COUNT,
        _ => &READY_MODULE,
    }
}
