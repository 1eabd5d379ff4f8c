use std::fmt;

use serde::{Deserialize, Serialize};

/// Which physical camera is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Front,
    #[default]
    Back,
}

impl Facing {
    /// The other camera. Applying this twice yields the original value.
    pub fn toggled(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }
}

/// Opaque reference (usually a URI) to an image held by the platform.
///
/// The session never opens or decodes the referenced resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageRef {
    fn from(uri: &str) -> Self {
        Self::new(uri)
    }
}

impl From<String> for ImageRef {
    fn from(uri: String) -> Self {
        Self(uri)
    }
}

/// An image registered in the platform media library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub uri: ImageRef,
}

/// A named grouping of assets in the platform media library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub title: String,
}

/// Media kinds offered by the gallery picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaTypes {
    #[default]
    All,
    Images,
    Videos,
}

/// Parameters passed to the camera when taking a picture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaptureOptions {
    /// Compression quality, 0.0 (smallest) to 1.0 (best).
    pub quality: f32,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self { quality: 1.0 }
    }
}

/// Parameters passed to the gallery picker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickerOptions {
    pub media_types: MediaTypes,
    pub allows_editing: bool,
    pub quality: f32,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            media_types: MediaTypes::All,
            allows_editing: true,
            quality: 1.0,
        }
    }
}
