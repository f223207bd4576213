//! A native library that is not an activation module: it exports symbols, but not the entry.

#[unsafe(no_mangle)]
pub extern "C" fn native_fixture_plain_version() -> u32 {
    1
}
