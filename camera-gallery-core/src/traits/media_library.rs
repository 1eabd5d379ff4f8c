use std::future::Future;

use crate::models::error::SessionError;
use crate::models::media::{Album, Asset, ImageRef};
use crate::models::permission::PermissionStatus;

/// Interface for the platform media library (persistent photo storage).
pub trait MediaLibrary: Send + Sync {
    /// Ask for write access to the media library.
    fn request_permission(&self) -> impl Future<Output = Result<PermissionStatus, SessionError>> + Send;

    /// Register the referenced image as a library asset.
    fn create_asset(&self, image: &ImageRef) -> impl Future<Output = Result<Asset, SessionError>> + Send;

    /// Look up an album by title.
    fn find_album(&self, title: &str) -> impl Future<Output = Result<Option<Album>, SessionError>> + Send;

    /// Create a new album containing `asset`.
    fn create_album(
        &self,
        title: &str,
        asset: &Asset,
    ) -> impl Future<Output = Result<Album, SessionError>> + Send;

    /// Append `asset` to an existing album.
    fn add_to_album(
        &self,
        album: &Album,
        asset: &Asset,
    ) -> impl Future<Output = Result<(), SessionError>> + Send;
}
