use std::future::Future;

use crate::models::error::SessionError;
use crate::models::media::{ImageRef, PickerOptions};
use crate::models::permission::PermissionStatus;

/// Interface for the platform's photo gallery picker.
pub trait GalleryPicker: Send + Sync {
    /// Ask for read access to the gallery.
    fn request_permission(&self) -> impl Future<Output = Result<PermissionStatus, SessionError>> + Send;

    /// Launch the picker.
    ///
    /// Resolves to `Ok(None)` when the user dismisses the picker without
    /// choosing anything.
    fn pick(
        &self,
        options: PickerOptions,
    ) -> impl Future<Output = Result<Option<ImageRef>, SessionError>> + Send;
}
