use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),
    /// An activation method returned an error.
    ///
    /// The method's own error is kept as-is in `source` (reachable through
    /// [`Error::activation_source`] or `std::error::Error::source`); downcast it to recover the
    /// concrete type. Native methods report a [`StatusError`].
    #[error("activation method `{module}::{method}` failed: {source}")]
    Activation {
        module: String,
        method: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("invalid config: {message}")]
    InvalidConfig { message: String },
    #[error("activation context already installed")]
    AlreadyInstalled,
    #[error("io failed at `{path}`: {source}")]
    IoAt {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("json failed at `{path}`: {source}")]
    JsonAt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Walkdir(#[from] walkdir::Error),
}

impl Error {
    pub fn activation(
        module: impl Into<String>,
        method: impl Into<String>,
        source: anyhow::Error,
    ) -> Self {
        Self::Activation {
            module: module.into(),
            method: method.into(),
            source,
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    pub fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoAt {
            path: path.into(),
            source,
        }
    }

    pub fn json_at(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::JsonAt {
            path: path.into(),
            source,
        }
    }

    /// The error raised by the activation method itself, if this is an activation failure.
    pub fn activation_source(&self) -> Option<&anyhow::Error> {
        match self {
            Self::Activation { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Why loading one candidate failed.
///
/// `Unsuitable` candidates are expected in a deployment directory (native libraries, tooling
/// binaries) and are dropped from the scan. `Fatal` ones abort it.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("`{origin}` is not an activation module: {reason}")]
    Unsuitable {
        origin: String,
        reason: UnsuitableReason,
    },
    #[error("failed to load activation module `{origin}`: {details}")]
    Fatal { origin: String, details: String },
}

impl LoadError {
    pub fn unsuitable(origin: impl Into<String>, reason: UnsuitableReason) -> Self {
        Self::Unsuitable {
            origin: origin.into(),
            reason,
        }
    }

    pub fn fatal(origin: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Fatal {
            origin: origin.into(),
            details: details.into(),
        }
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Unsuitable { .. })
    }

    pub fn origin(&self) -> &str {
        match self {
            Self::Unsuitable { origin, .. } | Self::Fatal { origin, .. } => origin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnsuitableReason {
    #[error("file not found")]
    NotFound,
    #[error("access denied")]
    AccessDenied,
    #[error("invalid path")]
    InvalidPath,
    #[error("path too long")]
    PathTooLong,
    #[error("rejected by the platform loader: {0}")]
    NotLoadable(String),
    #[error("missing entry symbol `{0}`")]
    MissingEntrySymbol(String),
    #[error("api_version mismatch: module={module}, host={host}")]
    IncompatibleApi { module: u32, host: u32 },
}

/// Non-zero status returned by a native activation method.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("status {code}: {message}")]
pub struct StatusError {
    pub code: i32,
    pub message: String,
}
