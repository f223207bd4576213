use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info};

use crate::error::{LoadError, Result};
use crate::load::{Module, ModuleSource};

/// Lazily populated list of loaded modules.
///
/// Population happens under the lock from a single enumeration pass, so callers observe either
/// an empty cache or the complete result of one pass.
#[derive(Debug, Default)]
pub struct ModuleCache {
    modules: Mutex<Option<Arc<[Module]>>>,
}

impl ModuleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached modules, scanning `sources` on first use.
    ///
    /// Repeated calls return the same `Arc` until [`ModuleCache::reset`].
    pub fn get_or_load(&self, sources: &[Box<dyn ModuleSource>]) -> Result<Arc<[Module]>> {
        let mut guard = self.modules.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(modules) = guard.as_ref() {
            return Ok(Arc::clone(modules));
        }
        let modules: Arc<[Module]> = scan_sources(sources)?.into();
        *guard = Some(Arc::clone(&modules));
        Ok(modules)
    }

    pub fn is_populated(&self) -> bool {
        self.modules
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn reset(&self) {
        self.modules
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

fn scan_sources(sources: &[Box<dyn ModuleSource>]) -> Result<Vec<Module>> {
    let mut modules = Vec::new();
    let mut skipped = 0usize;
    for source in sources {
        for candidate in source.enumerate()? {
            match source.load(&candidate) {
                Ok(module) => {
                    debug!(
                        module = module.name(),
                        origin = module.origin(),
                        markers = module.markers().len(),
                        "activation module loaded"
                    );
                    modules.push(module);
                }
                Err(LoadError::Unsuitable { origin, reason }) => {
                    debug!(origin = %origin, reason = %reason, "skip candidate");
                    skipped += 1;
                }
                Err(fatal) => return Err(fatal.into()),
            }
        }
    }
    info!(loaded = modules.len(), skipped, "activation module scan finished");
    Ok(modules)
}

#[cfg(test)]
#[path = "tests/cache_tests.rs"]
mod tests;
