//! In-process module registry.
//!
//! Lets a host (or a test) declare modules in code instead of shipping them as libraries. The
//! registry is just another [`ModuleSource`], so registered modules go through the same cache,
//! ordering and invocation path as native ones.

use std::sync::Arc;

use crate::error::{LoadError, Result, UnsuitableReason};
use crate::load::{Module, ModuleCandidate, ModuleSource};
use crate::marker::{ActivationKind, ActivationMarker, ActivationTarget};

/// One marker declaration; defaults match the native declaration surface.
#[derive(Clone)]
pub struct MarkerDecl {
    kind: ActivationKind,
    method: String,
    order: i32,
    run_in_designer_mode: bool,
    target: Arc<dyn ActivationTarget>,
}

impl MarkerDecl {
    pub fn new<F>(kind: ActivationKind, method: impl Into<String>, target: F) -> Self
    where
        F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self::with_target(kind, method, Arc::new(target))
    }

    pub fn with_target(
        kind: ActivationKind,
        method: impl Into<String>,
        target: Arc<dyn ActivationTarget>,
    ) -> Self {
        Self {
            kind,
            method: method.into(),
            order: 0,
            run_in_designer_mode: false,
            target,
        }
    }

    pub fn pre_start<F>(method: impl Into<String>, target: F) -> Self
    where
        F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self::new(ActivationKind::PreStart, method, target)
    }

    pub fn shutdown<F>(method: impl Into<String>, target: F) -> Self
    where
        F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self::new(ActivationKind::Shutdown, method, target)
    }

    pub fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    pub fn run_in_designer_mode(mut self, run_in_designer_mode: bool) -> Self {
        self.run_in_designer_mode = run_in_designer_mode;
        self
    }
}

#[derive(Clone)]
pub struct StaticModule {
    name: String,
    markers: Vec<MarkerDecl>,
}

impl StaticModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            markers: Vec::new(),
        }
    }

    pub fn marker(mut self, decl: MarkerDecl) -> Self {
        self.markers.push(decl);
        self
    }

    pub fn pre_start<F>(self, method: impl Into<String>, target: F) -> Self
    where
        F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.marker(MarkerDecl::pre_start(method, target))
    }

    pub fn shutdown<F>(self, method: impl Into<String>, target: F) -> Self
    where
        F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.marker(MarkerDecl::shutdown(method, target))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn origin(&self) -> String {
        format!("static:{}", self.name)
    }

    fn instantiate(&self) -> Module {
        let markers = self
            .markers
            .iter()
            .map(|decl| {
                ActivationMarker::new(
                    decl.kind,
                    decl.order,
                    decl.run_in_designer_mode,
                    &self.name,
                    &decl.method,
                    Arc::clone(&decl.target),
                )
            })
            .collect();
        Module::new(&self.name, self.origin(), markers)
    }
}

#[derive(Clone)]
enum Entry {
    Module(StaticModule),
    Unsuitable {
        origin: String,
        reason: UnsuitableReason,
    },
    Fatal {
        origin: String,
        details: String,
    },
}

impl Entry {
    fn origin(&self) -> String {
        match self {
            Self::Module(module) => module.origin(),
            Self::Unsuitable { origin, .. } | Self::Fatal { origin, .. } => origin.clone(),
        }
    }
}

/// Registered modules, enumerated in registration order.
#[derive(Clone, Default)]
pub struct StaticModuleSource {
    entries: Vec<Entry>,
}

impl StaticModuleSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, module: StaticModule) -> &mut Self {
        self.entries.push(Entry::Module(module));
        self
    }

    pub fn with_module(mut self, module: StaticModule) -> Self {
        self.register(module);
        self
    }

    /// Registers a candidate that fails to load for an expected reason.
    pub fn with_unsuitable(mut self, origin: impl Into<String>, reason: UnsuitableReason) -> Self {
        self.entries.push(Entry::Unsuitable {
            origin: origin.into(),
            reason,
        });
        self
    }

    /// Registers a candidate whose load failure aborts the scan.
    pub fn with_fatal(mut self, origin: impl Into<String>, details: impl Into<String>) -> Self {
        self.entries.push(Entry::Fatal {
            origin: origin.into(),
            details: details.into(),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ModuleSource for StaticModuleSource {
    fn enumerate(&self) -> Result<Vec<ModuleCandidate>> {
        Ok(self
            .entries
            .iter()
            .enumerate()
            .map(|(slot, entry)| ModuleCandidate::new(entry.origin(), None, slot))
            .collect())
    }

    fn load(&self, candidate: &ModuleCandidate) -> std::result::Result<Module, LoadError> {
        match self.entries.get(candidate.slot()) {
            Some(Entry::Module(module)) => Ok(module.instantiate()),
            Some(Entry::Unsuitable { origin, reason }) => {
                Err(LoadError::unsuitable(origin, reason.clone()))
            }
            Some(Entry::Fatal { origin, details }) => Err(LoadError::fatal(origin, details)),
            None => Err(LoadError::fatal(
                candidate.origin(),
                format!("no registered module at slot {}", candidate.slot()),
            )),
        }
    }
}
