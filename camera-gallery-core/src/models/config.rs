use serde::{Deserialize, Serialize};

use super::media::{Facing, PickerOptions};

/// Name of the album saved photos are placed in.
pub const DEFAULT_ALBUM_NAME: &str = "CameraGalleryApp";

/// Configuration for a camera/gallery session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfiguration {
    /// Album that SaveToGallery appends to (created on first save).
    pub album_name: String,

    /// Quality requested from the camera, 0.0..=1.0 (default: 1.0).
    pub capture_quality: f32,

    /// Options handed to the gallery picker.
    pub picker: PickerOptions,

    /// Camera selected when the session starts (default: back).
    pub initial_facing: Facing,
}

impl SessionConfiguration {
    pub fn validate(&self) -> Result<(), String> {
        if self.album_name.trim().is_empty() {
            return Err("album name must not be empty".into());
        }
        if self.album_name.contains(['/', '\\']) {
            return Err(format!("album name contains a path separator: {}", self.album_name));
        }
        if !(0.0..=1.0).contains(&self.capture_quality) {
            return Err(format!("capture quality out of range: {}", self.capture_quality));
        }
        if !(0.0..=1.0).contains(&self.picker.quality) {
            return Err(format!("picker quality out of range: {}", self.picker.quality));
        }
        Ok(())
    }
}

impl Default for SessionConfiguration {
    fn default() -> Self {
        Self {
            album_name: DEFAULT_ALBUM_NAME.to_string(),
            capture_quality: 1.0,
            picker: PickerOptions::default(),
            initial_facing: Facing::Back,
        }
    }
}
