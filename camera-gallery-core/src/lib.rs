//! # camera-gallery-core
//!
//! Platform-agnostic core of a single-screen camera/gallery app.
//!
//! Holds the screen state (permissions, facing, captured image, camera
//! visibility) and drives three platform capabilities: the live camera,
//! the gallery picker and the media library. Platform backends implement
//! the capability traits and plug into the generic `SessionController`.
//!
//! ## Architecture
//!
//! ```text
//! camera-gallery-core (this crate)
//! ├── traits/    ← CameraProvider, GalleryPicker, MediaLibrary, SessionDelegate
//! ├── models/    ← SessionError, SessionConfiguration, permissions, media refs, notices, views
//! └── session/   ← SessionController (state owner), Action (dispatch input)
//! ```
//!
//! The rendering layer reads [`SessionSnapshot`]s and sends [`Action`]s;
//! it never touches the state directly.

pub mod models;
pub mod session;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

// Re-export key types at crate root for convenience.
pub use models::config::{SessionConfiguration, DEFAULT_ALBUM_NAME};
pub use models::error::SessionError;
pub use models::media::{Album, Asset, CaptureOptions, Facing, ImageRef, MediaTypes, PickerOptions};
pub use models::notice::{Notice, NoticeKind};
pub use models::permission::{CameraPermission, Capability, PermissionStatus};
pub use models::state::{OperationKind, RequestToken, ScreenView, SessionSnapshot};
pub use session::action::Action;
pub use session::controller::SessionController;
pub use traits::camera_provider::CameraProvider;
pub use traits::gallery_picker::GalleryPicker;
pub use traits::media_library::MediaLibrary;
pub use traits::session_delegate::SessionDelegate;
