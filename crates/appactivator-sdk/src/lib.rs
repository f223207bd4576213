pub use appactivator_api::*;

mod error;
mod export;
pub mod ffi_guard;
mod ffi_utils;
mod host;

pub use error::*;
pub use export::*;
pub use ffi_utils::*;
pub use host::*;
