//! Flat listing of candidate module files.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

pub fn dynamic_library_ext() -> &'static str {
    match std::env::consts::OS {
        "windows" => "dll",
        "linux" => "so",
        "macos" => "dylib",
        _ => "",
    }
}

pub fn is_dynamic_library_file(path: &Path) -> bool {
    let ext = dynamic_library_ext();
    if ext.is_empty() {
        return false;
    }
    has_extension(path, &[ext])
}

pub fn has_extension<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    let Some(ext) = path.extension().and_then(|value| value.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|candidate| ext.eq_ignore_ascii_case(candidate.as_ref().trim_start_matches('.')))
}

/// Directory the host executable was started from.
pub fn host_base_directory() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(|e| Error::io_at("<current_exe>", e))?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| Error::invalid_config(format!("{} has no parent", exe.display())))
}

/// Regular files directly inside `dir` whose extension matches one of `extensions`.
///
/// Subdirectories are not visited. Entries come back sorted by file name; the activation order
/// of equal-`order` markers depends on it. A missing directory yields no candidates; any other
/// failure to stat it is an error.
pub fn enumerate_module_files<S: AsRef<str>>(dir: &Path, extensions: &[S]) -> Result<Vec<PathBuf>> {
    if !dir.try_exists().map_err(|e| Error::io_at(dir, e))? {
        debug!(dir = %dir.display(), "module directory does not exist");
        return Ok(Vec::new());
    }

    let mut out = Vec::new();
    for entry in walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            // Unreadable root is fatal, a single broken entry (e.g. dangling symlink) is not.
            Err(error) if error.depth() == 0 => return Err(error.into()),
            Err(error) => {
                debug!(dir = %dir.display(), error = %error, "skip unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if has_extension(entry.path(), extensions) {
            out.push(entry.into_path());
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "tests/discovery_tests.rs"]
mod tests;
