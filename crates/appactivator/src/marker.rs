use std::fmt;
use std::sync::Arc;

use appactivator_api::ActActivationKind;

use crate::error::{Error, Result};

/// Lifecycle phase a marker belongs to. Markers of different kinds never share a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivationKind {
    PreStart,
    Shutdown,
}

impl ActivationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PreStart => "pre_start",
            Self::Shutdown => "shutdown",
        }
    }

    pub(crate) fn from_ffi(raw: u32) -> Option<Self> {
        ActActivationKind::from_raw(raw).map(Self::from)
    }
}

impl From<ActActivationKind> for ActivationKind {
    fn from(kind: ActActivationKind) -> Self {
        match kind {
            ActActivationKind::PreStart => Self::PreStart,
            ActActivationKind::Shutdown => Self::Shutdown,
        }
    }
}

impl fmt::Display for ActivationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zero-argument method bound to a marker at discovery time.
pub trait ActivationTarget: Send + Sync {
    fn invoke(&self) -> anyhow::Result<()>;
}

impl<F> ActivationTarget for F
where
    F: Fn() -> anyhow::Result<()> + Send + Sync,
{
    fn invoke(&self) -> anyhow::Result<()> {
        self()
    }
}

#[derive(Clone)]
pub struct ActivationMarker {
    kind: ActivationKind,
    order: i32,
    run_in_designer_mode: bool,
    module: String,
    method: String,
    target: Arc<dyn ActivationTarget>,
}

impl ActivationMarker {
    pub fn new(
        kind: ActivationKind,
        order: i32,
        run_in_designer_mode: bool,
        module: impl Into<String>,
        method: impl Into<String>,
        target: Arc<dyn ActivationTarget>,
    ) -> Self {
        Self {
            kind,
            order,
            run_in_designer_mode,
            module: module.into(),
            method: method.into(),
            target,
        }
    }

    pub fn kind(&self) -> ActivationKind {
        self.kind
    }

    pub fn order(&self) -> i32 {
        self.order
    }

    pub fn run_in_designer_mode(&self) -> bool {
        self.run_in_designer_mode
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Outside designer mode every marker runs; inside it only the ones that opted in.
    pub fn should_run(&self, designer_mode: bool) -> bool {
        !designer_mode || self.run_in_designer_mode
    }

    pub fn invoke(&self) -> Result<()> {
        self.target
            .invoke()
            .map_err(|source| Error::activation(&self.module, &self.method, source))
    }
}

impl fmt::Debug for ActivationMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivationMarker")
            .field("kind", &self.kind)
            .field("order", &self.order)
            .field("run_in_designer_mode", &self.run_in_designer_mode)
            .field("module", &self.module)
            .field("method", &self.method)
            .finish_non_exhaustive()
    }
}
