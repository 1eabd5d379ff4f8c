use std::future::Future;

use crate::models::error::SessionError;
use crate::models::media::{CaptureOptions, ImageRef};
use crate::models::permission::PermissionStatus;

/// Interface for the platform's live camera.
///
/// Implementations wrap the camera driver and its permission prompt.
/// All methods are asynchronous; none may block the UI thread.
pub trait CameraProvider: Send + Sync {
    /// Current permission without prompting the user.
    fn permission_status(&self) -> impl Future<Output = Result<PermissionStatus, SessionError>> + Send;

    /// Show the platform permission prompt.
    fn request_permission(&self) -> impl Future<Output = Result<PermissionStatus, SessionError>> + Send;

    /// Take a picture with the mounted camera view.
    fn capture(
        &self,
        options: CaptureOptions,
    ) -> impl Future<Output = Result<ImageRef, SessionError>> + Send;
}
