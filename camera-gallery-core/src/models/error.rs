use thiserror::Error;

use super::permission::Capability;

/// Errors raised by capability providers and the session controller.
///
/// The taxonomy is flat: every variant is recoverable and ends up as a
/// one-shot notice for the user plus a log line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("{0} permission denied")]
    PermissionDenied(Capability),

    #[error("capture failed: {0}")]
    CaptureFailed(String),

    #[error("picker failed: {0}")]
    PickerFailed(String),

    #[error("storage error: {0}")]
    StorageError(String),

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),

    #[error("unknown error: {0}")]
    Unknown(String),
}
