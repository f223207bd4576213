//! Loader adapter: turns candidate files into [`Module`]s and classifies load failures.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use appactivator_api::{
    APPACTIVATOR_API_VERSION, ActActivationModule, ActModuleEntry, ActStatus, ActStr,
};
use libloading::{Library, Symbol};

use crate::config::ActivatorConfig;
use crate::discovery::enumerate_module_files;
use crate::error::{LoadError, Result, StatusError, UnsuitableReason};
use crate::marker::{ActivationKind, ActivationMarker, ActivationTarget};
use crate::util::{actstr_to_string, actstr_to_string_lossy};

/// Something a [`ModuleSource`] may be able to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleCandidate {
    origin: String,
    path: Option<PathBuf>,
    slot: usize,
}

impl ModuleCandidate {
    pub fn new(origin: impl Into<String>, path: Option<PathBuf>, slot: usize) -> Self {
        Self {
            origin: origin.into(),
            path,
            slot,
        }
    }

    pub fn from_path(path: PathBuf, slot: usize) -> Self {
        Self::new(path.display().to_string(), Some(path), slot)
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Source-defined position of the candidate.
    pub fn slot(&self) -> usize {
        self.slot
    }
}

/// A loaded module and the markers it declared, in declaration order.
pub struct Module {
    name: String,
    origin: String,
    markers: Vec<ActivationMarker>,
    _library: Option<Arc<Library>>,
}

impl Module {
    pub fn new(
        name: impl Into<String>,
        origin: impl Into<String>,
        markers: Vec<ActivationMarker>,
    ) -> Self {
        Self {
            name: name.into(),
            origin: origin.into(),
            markers,
            _library: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn markers(&self) -> &[ActivationMarker] {
        &self.markers
    }

    pub fn markers_of(&self, kind: ActivationKind) -> impl Iterator<Item = &ActivationMarker> {
        self.markers.iter().filter(move |marker| marker.kind() == kind)
    }
}

impl std::fmt::Debug for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.name)
            .field("origin", &self.origin)
            .field("markers", &self.markers)
            .field("native", &self._library.is_some())
            .finish()
    }
}

/// Enumerates candidates and loads them one at a time.
///
/// `load` must report every expected "this is not a module" condition as
/// [`LoadError::Unsuitable`]; anything reported as [`LoadError::Fatal`] aborts the scan.
pub trait ModuleSource: Send + Sync {
    fn enumerate(&self) -> Result<Vec<ModuleCandidate>>;

    fn load(&self, candidate: &ModuleCandidate) -> std::result::Result<Module, LoadError>;
}

/// Native libraries in one deployment directory.
#[derive(Debug, Clone)]
pub struct DirectoryModuleSource {
    dir: PathBuf,
    extensions: Vec<String>,
    entry_symbol: String,
}

impl DirectoryModuleSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let config = ActivatorConfig::default();
        Self {
            dir: dir.into(),
            extensions: config.resolved_extensions(),
            entry_symbol: config.entry_symbol().to_string(),
        }
    }

    pub fn from_config(config: &ActivatorConfig) -> Result<Self> {
        Ok(Self {
            dir: config.resolved_module_dir()?,
            extensions: config.resolved_extensions(),
            entry_symbol: config.entry_symbol().to_string(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ModuleSource for DirectoryModuleSource {
    fn enumerate(&self) -> Result<Vec<ModuleCandidate>> {
        Ok(enumerate_module_files(&self.dir, &self.extensions)?
            .into_iter()
            .enumerate()
            .map(|(slot, path)| ModuleCandidate::from_path(path, slot))
            .collect())
    }

    fn load(&self, candidate: &ModuleCandidate) -> std::result::Result<Module, LoadError> {
        let Some(path) = candidate.path() else {
            return Err(LoadError::unsuitable(
                candidate.origin(),
                UnsuitableReason::InvalidPath,
            ));
        };
        load_native_module(path, &self.entry_symbol)
    }
}

const PREALLOCATED_MARKERS: usize = 64;

pub(crate) fn load_native_module(
    path: &Path,
    entry_symbol: &str,
) -> std::result::Result<Module, LoadError> {
    let origin = path.display().to_string();

    if let Err(error) = std::fs::metadata(path) {
        return Err(classify_io_error(&origin, error));
    }

    // SAFETY: Loading a foreign library runs its initializers; the deployment directory is trusted.
    let lib = unsafe { Library::new(path) }.map_err(|e| classify_library_error(&origin, e))?;

    let module_ptr = {
        // SAFETY: Symbol type matches the ABI contract; null and version are checked below.
        let entry: Symbol<ActModuleEntry> = unsafe { lib.get(entry_symbol.as_bytes()) }
            .map_err(|e| match e {
                libloading::Error::DlSym { .. }
                | libloading::Error::DlSymUnknown
                | libloading::Error::GetProcAddress { .. }
                | libloading::Error::GetProcAddressUnknown => LoadError::unsuitable(
                    &origin,
                    UnsuitableReason::MissingEntrySymbol(entry_symbol.to_string()),
                ),
                other => classify_library_error(&origin, other),
            })?;
        // SAFETY: Entry point is trusted by ABI contract. The host vtable is a static.
        unsafe { (entry)(crate::host_vtable()) }
    };
    if module_ptr.is_null() {
        return Err(LoadError::fatal(&origin, "entry point returned null module"));
    }
    // SAFETY: Module table comes from the entry point and stays valid while the library is loaded.
    let module: ActActivationModule = unsafe { *module_ptr };
    if module.api_version != APPACTIVATOR_API_VERSION {
        return Err(LoadError::unsuitable(
            &origin,
            UnsuitableReason::IncompatibleApi {
                module: module.api_version,
                host: APPACTIVATOR_API_VERSION,
            },
        ));
    }

    let name = unsafe { actstr_to_string(module.module_name_utf8) }
        .ok_or_else(|| LoadError::fatal(&origin, "module name is not valid utf-8"))?;
    let name = if name.is_empty() {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| origin.clone())
    } else {
        name
    };

    let lib = Arc::new(lib);
    let marker_count = (module.marker_count)();
    // The count comes from the module; a broken table must not size the allocation.
    let mut markers = Vec::with_capacity(marker_count.min(PREALLOCATED_MARKERS));
    for index in 0..marker_count {
        let marker_ptr = (module.marker_get)(index);
        if marker_ptr.is_null() {
            return Err(LoadError::fatal(
                &origin,
                format!("marker_get({index}) returned null"),
            ));
        }
        // SAFETY: Marker table is static, read-only data of the loaded module.
        let raw = unsafe { *marker_ptr };
        let kind = ActivationKind::from_ffi(raw.kind).ok_or_else(|| {
            LoadError::fatal(&origin, format!("marker {index} has unknown kind {}", raw.kind))
        })?;
        let method = unsafe { actstr_to_string(raw.method_name_utf8) }.ok_or_else(|| {
            LoadError::fatal(&origin, format!("marker {index} method name is not valid utf-8"))
        })?;
        let target = NativeActivationTarget {
            invoke: raw.invoke,
            module_free: module.module_free,
            _library: Arc::clone(&lib),
        };
        markers.push(ActivationMarker::new(
            kind,
            raw.order,
            raw.run_in_designer_mode,
            &name,
            method,
            Arc::new(target),
        ));
    }

    Ok(Module {
        name,
        origin,
        markers,
        _library: Some(lib),
    })
}

struct NativeActivationTarget {
    invoke: extern "C" fn() -> ActStatus,
    module_free: Option<extern "C" fn(ptr: *mut core::ffi::c_void, len: usize, align: usize)>,
    _library: Arc<Library>,
}

impl ActivationTarget for NativeActivationTarget {
    fn invoke(&self) -> anyhow::Result<()> {
        let status = (self.invoke)();
        if status.is_ok() {
            return Ok(());
        }
        let message = take_module_str(status.message, self.module_free);
        Err(StatusError {
            code: status.code,
            message,
        }
        .into())
    }
}

fn take_module_str(
    s: ActStr,
    module_free: Option<extern "C" fn(ptr: *mut core::ffi::c_void, len: usize, align: usize)>,
) -> String {
    if s.is_empty() {
        return String::new();
    }
    let text = unsafe { actstr_to_string_lossy(s) };
    if let Some(free) = module_free {
        free(s.ptr as *mut core::ffi::c_void, s.len, 1);
    }
    text
}

pub(crate) fn classify_io_error(origin: &str, error: io::Error) -> LoadError {
    let reason = match error.kind() {
        io::ErrorKind::NotFound => UnsuitableReason::NotFound,
        io::ErrorKind::PermissionDenied => UnsuitableReason::AccessDenied,
        io::ErrorKind::InvalidInput => UnsuitableReason::InvalidPath,
        _ if is_name_too_long(&error) => UnsuitableReason::PathTooLong,
        _ => return LoadError::fatal(origin, error.to_string()),
    };
    LoadError::unsuitable(origin, reason)
}

pub(crate) fn classify_library_error(origin: &str, error: libloading::Error) -> LoadError {
    match error {
        libloading::Error::DlOpen { .. }
        | libloading::Error::DlOpenUnknown
        | libloading::Error::LoadLibraryExW { .. }
        | libloading::Error::LoadLibraryExWUnknown => {
            LoadError::unsuitable(origin, UnsuitableReason::NotLoadable(error.to_string()))
        }
        libloading::Error::CreateCString { .. }
        | libloading::Error::CreateCStringWithTrailing { .. } => {
            LoadError::unsuitable(origin, UnsuitableReason::InvalidPath)
        }
        other => LoadError::fatal(origin, other.to_string()),
    }
}

fn is_name_too_long(error: &io::Error) -> bool {
    #[cfg(target_os = "linux")]
    const NAME_TOO_LONG: i32 = 36;
    #[cfg(target_os = "macos")]
    const NAME_TOO_LONG: i32 = 63;
    #[cfg(target_os = "windows")]
    const NAME_TOO_LONG: i32 = 206;
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    const NAME_TOO_LONG: i32 = -1;

    error.raw_os_error() == Some(NAME_TOO_LONG)
}

#[cfg(test)]
#[path = "tests/load_tests.rs"]
mod tests;
