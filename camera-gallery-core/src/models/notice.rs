use serde::{Deserialize, Serialize};

use super::permission::Capability;

/// Severity of a user-visible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Warning,
    Error,
    Success,
}

/// A one-shot message shown to the user (alert, toast, snackbar).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    fn new(kind: NoticeKind, title: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message: message.into(),
        }
    }

    pub fn gallery_permission_denied() -> Self {
        Self::new(NoticeKind::Warning, "Permission denied", "Gallery access was not granted")
    }

    pub fn media_library_permission_denied() -> Self {
        Self::new(
            NoticeKind::Warning,
            "Permission denied",
            "Photos cannot be saved to the gallery",
        )
    }

    pub fn permission_request_failed(capability: Capability) -> Self {
        Self::new(
            NoticeKind::Error,
            "Error",
            format!("Could not request {} access", capability),
        )
    }

    pub fn capture_failed() -> Self {
        Self::new(NoticeKind::Error, "Error", "Could not take the photo")
    }

    pub fn gallery_access_missing() -> Self {
        Self::new(
            NoticeKind::Error,
            "Error",
            "You do not have permission to access the gallery",
        )
    }

    pub fn picker_failed() -> Self {
        Self::new(NoticeKind::Error, "Error", "Could not open the gallery")
    }

    pub fn save_succeeded() -> Self {
        Self::new(NoticeKind::Success, "Success", "The photo was saved to the gallery")
    }

    pub fn save_failed() -> Self {
        Self::new(NoticeKind::Error, "Error", "Could not save the photo")
    }
}
