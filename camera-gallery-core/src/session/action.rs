use serde::{Deserialize, Serialize};

/// A user-triggered operation, as sent by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    RequestCameraPermission,
    OpenCamera,
    ToggleFacing,
    Capture,
    CloseCamera,
    PickFromGallery,
    SaveToGallery,
    ClearImage,
}
