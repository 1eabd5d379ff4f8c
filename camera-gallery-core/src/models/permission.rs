use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw answer from a platform permission check or prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Camera access as seen by the screen.
///
/// `Unknown` means the platform has not answered yet. Once it has,
/// anything short of a grant counts as denied so the retry view is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraPermission {
    #[default]
    Unknown,
    Granted,
    Denied,
}

impl CameraPermission {
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

impl From<PermissionStatus> for CameraPermission {
    fn from(status: PermissionStatus) -> Self {
        if status.is_granted() {
            Self::Granted
        } else {
            Self::Denied
        }
    }
}

/// The platform capabilities the session depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Camera,
    Gallery,
    MediaLibrary,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Camera => "camera",
            Self::Gallery => "gallery",
            Self::MediaLibrary => "media library",
        };
        f.write_str(name)
    }
}
