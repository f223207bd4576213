use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use crate::cache::ModuleCache;
use crate::config::ActivatorConfig;
use crate::error::Result;
use crate::load::{DirectoryModuleSource, Module, ModuleSource};
use crate::marker::{ActivationKind, ActivationMarker};

/// Outcome of one activation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationReport {
    pub kind: ActivationKind,
    pub invoked: usize,
    pub skipped: usize,
}

/// Discovery and invocation state for one host process.
///
/// Owns the module sources, the module cache and the pre-start run flag. The host's startup
/// routine creates one and keeps it for the lifetime of the process; [`crate::lifecycle`] wraps
/// a process-wide instance for hosts that prefer free functions.
pub struct ActivationContext {
    sources: Vec<Box<dyn ModuleSource>>,
    cache: ModuleCache,
    pre_start_ran: AtomicBool,
}

impl ActivationContext {
    pub fn new(source: impl ModuleSource + 'static) -> Self {
        let source: Box<dyn ModuleSource> = Box::new(source);
        Self::from_sources(vec![source])
    }

    /// Modules are discovered source by source, in the given order.
    pub fn from_sources(sources: Vec<Box<dyn ModuleSource>>) -> Self {
        Self {
            sources,
            cache: ModuleCache::new(),
            pre_start_ran: AtomicBool::new(false),
        }
    }

    pub fn from_config(config: &ActivatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(DirectoryModuleSource::from_config(config)?))
    }

    pub fn modules(&self) -> Result<Arc<[Module]>> {
        self.cache.get_or_load(&self.sources)
    }

    pub fn has_run_pre_start(&self) -> bool {
        self.pre_start_ran.load(Ordering::Acquire)
    }

    /// Invokes every eligible marker of `kind`, lowest `order` first.
    ///
    /// Equal orders keep discovery order: module enumeration order, then declaration order
    /// inside the module. In designer mode only markers with `run_in_designer_mode` run. The
    /// first failing method aborts the pass and its error is returned.
    pub fn run_activation_methods(
        &self,
        kind: ActivationKind,
        designer_mode: bool,
    ) -> Result<ActivationReport> {
        let modules = self.modules()?;
        let markers = ordered_markers(&modules, kind);

        let mut report = ActivationReport {
            kind,
            invoked: 0,
            skipped: 0,
        };
        for marker in markers {
            if !marker.should_run(designer_mode) {
                debug!(
                    kind = %kind,
                    module = marker.module(),
                    method = marker.method(),
                    "skip marker in designer mode"
                );
                report.skipped += 1;
                continue;
            }
            debug!(
                kind = %kind,
                module = marker.module(),
                method = marker.method(),
                order = marker.order(),
                "invoke activation method"
            );
            marker.invoke()?;
            report.invoked += 1;
        }
        info!(
            kind = %kind,
            designer_mode,
            invoked = report.invoked,
            skipped = report.skipped,
            "activation pass finished"
        );
        Ok(report)
    }

    /// Runs the pre-start pass once per context.
    ///
    /// The flag is set before anything runs, so a pass that fails part way is not retried and a
    /// method that re-enters this call gets `Ok(None)`.
    pub fn run_pre_start_methods(&self, designer_mode: bool) -> Result<Option<ActivationReport>> {
        if self.pre_start_ran.swap(true, Ordering::AcqRel) {
            debug!("pre-start methods already ran");
            return Ok(None);
        }
        self.run_activation_methods(ActivationKind::PreStart, designer_mode)
            .map(Some)
    }

    /// Runs every shutdown marker; not guarded, each call is a full pass.
    pub fn run_shutdown_methods(&self) -> Result<ActivationReport> {
        self.run_activation_methods(ActivationKind::Shutdown, false)
    }

    /// Host startup hook: pre-start outside designer mode, once.
    pub fn run(&self) -> Result<()> {
        if self.has_run_pre_start() {
            return Ok(());
        }
        self.run_pre_start_methods(false).map(|_| ())
    }

    /// Forgets loaded modules and the pre-start flag.
    #[cfg(any(test, feature = "test-util"))]
    pub fn reset(&self) {
        self.cache.reset();
        self.pre_start_ran.store(false, Ordering::Release);
    }
}

fn ordered_markers(modules: &[Module], kind: ActivationKind) -> Vec<&ActivationMarker> {
    let mut markers: Vec<&ActivationMarker> = modules
        .iter()
        .flat_map(|module| module.markers_of(kind))
        .collect();
    // Stable: ties keep discovery order.
    markers.sort_by_key(|marker| marker.order());
    markers
}

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;
