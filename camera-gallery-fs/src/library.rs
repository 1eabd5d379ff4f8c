//! Media library stored in a plain directory tree.
//!
//! ```text
//! <root>/
//! ├── assets/<uuid>.<ext>        ← copies of saved images
//! └── albums/<title>/album.json  ← AlbumManifest (id, title, created_at, asset ids)
//! ```
//!
//! Every filesystem call runs on tokio's blocking pool so awaiting the
//! library never stalls the executor driving the session.

use std::fs;
use std::path::{Path, PathBuf};

use camera_gallery_core::{Album, Asset, ImageRef, MediaLibrary, PermissionStatus, SessionError};

use crate::config::FsLibraryConfig;
use crate::manifest::{self, AlbumManifest};
use crate::permissions;

const FILE_SCHEME: &str = "file://";
const DEFAULT_EXTENSION: &str = "jpg";

/// Filesystem-backed implementation of [`MediaLibrary`].
///
/// Must be awaited inside a tokio runtime.
pub struct FsMediaLibrary {
    config: FsLibraryConfig,
}

impl FsMediaLibrary {
    /// Validate `config` and pin its root to an absolute path.
    pub fn new(config: FsLibraryConfig) -> Result<Self, SessionError> {
        config.validate().map_err(SessionError::ConfigurationFailed)?;
        let root = std::path::absolute(&config.root).map_err(|e| {
            SessionError::ConfigurationFailed(format!(
                "cannot resolve library root {}: {}",
                config.root.display(),
                e
            ))
        })?;
        Ok(Self {
            config: FsLibraryConfig::new(root),
        })
    }

    pub fn root(&self) -> &Path {
        &self.config.root
    }

    /// Asset ids of an album in insertion order, or `None` if it does not exist.
    pub async fn album_assets(&self, title: &str) -> Result<Option<Vec<String>>, SessionError> {
        let dir = self.album_dir(title)?;
        unblock(move || Ok(manifest::read_manifest(&dir)?.map(|m| m.assets))).await
    }

    /// Location of an asset's file inside the library.
    pub fn asset_path(&self, asset: &Asset) -> PathBuf {
        path_from_uri(&asset.uri)
    }

    fn album_dir(&self, title: &str) -> Result<PathBuf, SessionError> {
        if title.is_empty() || title.contains(['/', '\\']) || title == "." || title == ".." {
            return Err(SessionError::StorageError(format!("invalid album title: {:?}", title)));
        }
        Ok(self.config.albums_dir().join(title))
    }
}

impl MediaLibrary for FsMediaLibrary {
    async fn request_permission(&self) -> Result<PermissionStatus, SessionError> {
        let root = self.config.root.clone();
        unblock(move || Ok(permissions::check_library_access(&root))).await
    }

    async fn create_asset(&self, image: &ImageRef) -> Result<Asset, SessionError> {
        let source = path_from_uri(image);
        let assets_dir = self.config.assets_dir();

        let asset = unblock(move || store_asset(&source, &assets_dir)).await?;
        log::debug!("stored {} as asset {}", image, asset.id);
        Ok(asset)
    }

    async fn find_album(&self, title: &str) -> Result<Option<Album>, SessionError> {
        let dir = self.album_dir(title)?;
        unblock(move || Ok(manifest::read_manifest(&dir)?.map(|m| m.album()))).await
    }

    async fn create_album(&self, title: &str, asset: &Asset) -> Result<Album, SessionError> {
        let dir = self.album_dir(title)?;
        let manifest = AlbumManifest::new(title, &asset.id);

        let album = unblock(move || {
            if manifest::manifest_path(&dir).exists() {
                return Err(SessionError::StorageError(format!(
                    "album already exists: {}",
                    manifest.title
                )));
            }
            manifest::write_manifest(&manifest, &dir)?;
            Ok(manifest.album())
        })
        .await?;

        log::info!("created album '{}' ({})", album.title, album.id);
        Ok(album)
    }

    async fn add_to_album(&self, album: &Album, asset: &Asset) -> Result<(), SessionError> {
        let dir = self.album_dir(&album.title)?;
        let album = album.clone();
        let asset_id = asset.id.clone();

        unblock(move || {
            let mut manifest = manifest::read_manifest(&dir)?.ok_or_else(|| {
                SessionError::StorageError(format!("album not found: {}", album.title))
            })?;
            if manifest.id != album.id {
                return Err(SessionError::StorageError(format!(
                    "album '{}' was replaced (expected {}, found {})",
                    album.title, album.id, manifest.id
                )));
            }

            if manifest.push_asset(&asset_id) {
                manifest::write_manifest(&manifest, &dir)?;
            }
            Ok(())
        })
        .await
    }
}

/// Run blocking filesystem work on tokio's blocking pool.
async fn unblock<T, F>(task: F) -> Result<T, SessionError>
where
    F: FnOnce() -> Result<T, SessionError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| SessionError::StorageError(format!("storage task failed: {}", e)))?
}

/// Copy `source` into `assets_dir` under a fresh uuid name.
fn store_asset(source: &Path, assets_dir: &Path) -> Result<Asset, SessionError> {
    if !source.is_file() {
        return Err(SessionError::StorageError(format!(
            "image not found: {}",
            source.display()
        )));
    }

    let extension = source
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or(DEFAULT_EXTENSION)
        .to_ascii_lowercase();
    let id = uuid::Uuid::new_v4().to_string();

    fs::create_dir_all(assets_dir)
        .map_err(|e| SessionError::StorageError(format!("failed to create assets dir: {}", e)))?;

    let destination = assets_dir.join(format!("{}.{}", id, extension));
    fs::copy(source, &destination)
        .map_err(|e| SessionError::StorageError(format!("failed to copy image: {}", e)))?;

    Ok(Asset {
        id,
        uri: uri_from_path(&destination),
    })
}

/// Convert a `file://` URI (or a bare path) to a filesystem path.
pub fn path_from_uri(image: &ImageRef) -> PathBuf {
    let raw = image.as_str();
    PathBuf::from(raw.strip_prefix(FILE_SCHEME).unwrap_or(raw))
}

/// Build a `file://` URI. Relative paths are resolved against the working
/// directory so the URI never starts with a host component.
pub fn uri_from_path(path: &Path) -> ImageRef {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    ImageRef::new(format!("{}{}", FILE_SCHEME, absolute.display()))
}
