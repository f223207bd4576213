use std::path::{Path, PathBuf};

use appactivator_api::APPACTIVATOR_ENTRY_SYMBOL;
use serde::{Deserialize, Serialize};

use crate::discovery::{dynamic_library_ext, host_base_directory};
use crate::error::{Error, Result};

pub const MODULE_DIR_ENV: &str = "APPACTIVATOR_MODULE_DIR";
pub const EXTENSIONS_ENV: &str = "APPACTIVATOR_EXTENSIONS";

/// Where the host looks for activation modules.
///
/// Every field is optional; the defaults reproduce a plain host: the executable's own
/// directory, the platform's dynamic library extension and the standard entry symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivatorConfig {
    pub module_dir: Option<PathBuf>,
    pub extensions: Vec<String>,
    pub entry_symbol: Option<String>,
}

impl ActivatorConfig {
    pub fn from_env() -> Self {
        let module_dir = std::env::var_os(MODULE_DIR_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        let extensions = std::env::var(EXTENSIONS_ENV)
            .map(|value| parse_extensions(&value))
            .unwrap_or_default();
        Self {
            module_dir,
            extensions,
            entry_symbol: None,
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io_at(path, e))?;
        let config: Self = serde_json::from_str(&text).map_err(|e| Error::json_at(path, e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if matches!(&self.entry_symbol, Some(symbol) if symbol.trim().is_empty()) {
            return Err(Error::invalid_config("entry_symbol must not be empty"));
        }
        if self.extensions.iter().any(|ext| ext.trim().is_empty()) {
            return Err(Error::invalid_config("extensions must not contain empty values"));
        }
        Ok(())
    }

    pub fn resolved_module_dir(&self) -> Result<PathBuf> {
        match &self.module_dir {
            Some(dir) => Ok(dir.clone()),
            None => host_base_directory(),
        }
    }

    pub fn resolved_extensions(&self) -> Vec<String> {
        if !self.extensions.is_empty() {
            return self.extensions.clone();
        }
        let ext = dynamic_library_ext();
        if ext.is_empty() {
            Vec::new()
        } else {
            vec![ext.to_string()]
        }
    }

    pub fn entry_symbol(&self) -> &str {
        self.entry_symbol
            .as_deref()
            .unwrap_or(APPACTIVATOR_ENTRY_SYMBOL)
    }
}

fn parse_extensions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|ext| ext.trim().trim_start_matches('.'))
        .filter(|ext| !ext.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
