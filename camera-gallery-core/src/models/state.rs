use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::media::{Facing, ImageRef};
use super::permission::CameraPermission;

/// The asynchronous operations a session can have in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    CameraPermission,
    GalleryPermission,
    MediaLibraryPermission,
    Capture,
    Pick,
    Save,
}

/// Monotonic id handed to each async operation when it starts.
///
/// A completion is only applied while its token is still the latest one
/// issued for its operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestToken(pub u64);

/// The view the rendering layer should show.
///
/// Selected in strict priority order:
/// ```text
/// camera permission unknown → RequestingPermissions
/// camera permission denied  → PermissionDenied
/// camera shown              → Camera
/// otherwise                 → Home (preview + save/clear when an image is set)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ScreenView {
    RequestingPermissions,
    PermissionDenied,
    Camera { facing: Facing },
    Home { preview: Option<ImageRef> },
}

impl ScreenView {
    pub fn select(
        camera_permission: CameraPermission,
        show_camera: bool,
        facing: Facing,
        captured_image: Option<&ImageRef>,
    ) -> Self {
        match camera_permission {
            CameraPermission::Unknown => Self::RequestingPermissions,
            CameraPermission::Denied => Self::PermissionDenied,
            CameraPermission::Granted if show_camera => Self::Camera { facing },
            CameraPermission::Granted => Self::Home {
                preview: captured_image.cloned(),
            },
        }
    }

    /// Whether the Save and Clear controls are offered.
    pub fn shows_image_controls(&self) -> bool {
        matches!(self, Self::Home { preview: Some(_) })
    }
}

/// Read-only copy of everything the rendering layer may observe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub camera_permission: CameraPermission,
    /// `None` until the startup request settles.
    pub gallery_permission: Option<bool>,
    /// `None` until the startup request settles.
    pub media_library_permission: Option<bool>,
    pub facing: Facing,
    pub captured_image: Option<ImageRef>,
    pub show_camera: bool,
    /// Operations still awaiting the platform; drives the loading indicator.
    pub pending: BTreeSet<OperationKind>,
    pub view: ScreenView,
}

impl SessionSnapshot {
    pub fn is_busy(&self) -> bool {
        !self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PERMISSIONS: [CameraPermission; 3] = [
        CameraPermission::Unknown,
        CameraPermission::Granted,
        CameraPermission::Denied,
    ];

    #[test]
    fn permission_outranks_camera_flag() {
        let image = ImageRef::from("img1");
        for permission in ALL_PERMISSIONS {
            for show_camera in [false, true] {
                for captured in [None, Some(&image)] {
                    let view = ScreenView::select(permission, show_camera, Facing::Back, captured);
                    let expected = match (permission, show_camera) {
                        (CameraPermission::Unknown, _) => ScreenView::RequestingPermissions,
                        (CameraPermission::Denied, _) => ScreenView::PermissionDenied,
                        (CameraPermission::Granted, true) => ScreenView::Camera { facing: Facing::Back },
                        (CameraPermission::Granted, false) => ScreenView::Home {
                            preview: captured.cloned(),
                        },
                    };
                    assert_eq!(view, expected);
                }
            }
        }
    }

    #[test]
    fn image_controls_only_with_preview() {
        let image = ImageRef::from("img1");
        assert!(ScreenView::select(CameraPermission::Granted, false, Facing::Back, Some(&image))
            .shows_image_controls());
        assert!(!ScreenView::select(CameraPermission::Granted, false, Facing::Back, None)
            .shows_image_controls());
        assert!(!ScreenView::select(CameraPermission::Granted, true, Facing::Front, Some(&image))
            .shows_image_controls());
    }

    #[test]
    fn view_serializes_with_tag() {
        let view = ScreenView::Camera { facing: Facing::Front };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["view"], "camera");
        assert_eq!(json["facing"], "front");
    }
}
