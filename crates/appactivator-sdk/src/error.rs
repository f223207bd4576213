use thiserror::Error;

use crate::{ACT_ERR_INTERNAL, ACT_ERR_INVALID_ARG, ACT_ERR_IO, ACT_ERR_UNSUPPORTED, ActStatus};

pub type SdkResult<T> = Result<T, SdkError>;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("invalid argument: {0}")]
    InvalidArg(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("unsupported: {0}")]
    Unsupported(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl SdkError {
    pub fn invalid_arg(message: impl Into<String>) -> Self {
        Self::InvalidArg(message.into())
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::InvalidArg(_) => ACT_ERR_INVALID_ARG,
            Self::Io(_) => ACT_ERR_IO,
            Self::Unsupported(_) => ACT_ERR_UNSUPPORTED,
            Self::Internal(_) => ACT_ERR_INTERNAL,
        }
    }
}

impl From<std::io::Error> for SdkError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

/// Return types accepted for activation methods.
pub trait IntoActivationStatus {
    fn into_status(self) -> ActStatus;
}

impl IntoActivationStatus for () {
    fn into_status(self) -> ActStatus {
        ActStatus::ok()
    }
}

impl IntoActivationStatus for SdkResult<()> {
    fn into_status(self) -> ActStatus {
        match self {
            Ok(()) => ActStatus::ok(),
            Err(error) => crate::status_err_msg(error.code(), &error.to_string()),
        }
    }
}
