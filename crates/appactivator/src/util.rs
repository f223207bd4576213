use appactivator_api::ActStr;

pub unsafe fn actstr_to_string_lossy(s: ActStr) -> String {
    if s.is_empty() {
        return String::new();
    }
    let bytes = unsafe { core::slice::from_raw_parts(s.ptr, s.len) };
    String::from_utf8_lossy(bytes).into_owned()
}

pub unsafe fn actstr_to_string(s: ActStr) -> Option<String> {
    if s.is_empty() {
        return Some(String::new());
    }
    let bytes = unsafe { core::slice::from_raw_parts(s.ptr, s.len) };
    core::str::from_utf8(bytes).ok().map(ToOwned::to_owned)
}
