use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use camera_gallery_core::{Album, SessionError};

const MANIFEST_FILE: &str = "album.json";

/// On-disk description of an album: `<albums>/<title>/album.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumManifest {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    /// Asset ids in insertion order.
    pub assets: Vec<String>,
}

impl AlbumManifest {
    pub fn new(title: &str, first_asset: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.to_string(),
            created_at: Utc::now(),
            assets: vec![first_asset.to_string()],
        }
    }

    /// Append an asset id; returns false if it was already present.
    pub fn push_asset(&mut self, asset_id: &str) -> bool {
        if self.assets.iter().any(|a| a == asset_id) {
            return false;
        }
        self.assets.push(asset_id.to_string());
        true
    }

    pub fn album(&self) -> Album {
        Album {
            id: self.id.clone(),
            title: self.title.clone(),
        }
    }
}

pub fn manifest_path(album_dir: &Path) -> PathBuf {
    album_dir.join(MANIFEST_FILE)
}

/// Write the manifest into `album_dir`, creating the directory if needed.
pub fn write_manifest(manifest: &AlbumManifest, album_dir: &Path) -> Result<(), SessionError> {
    fs::create_dir_all(album_dir)
        .map_err(|e| SessionError::StorageError(format!("failed to create album dir: {}", e)))?;
    let json = serde_json::to_string_pretty(manifest)
        .map_err(|e| SessionError::StorageError(format!("failed to serialize album: {}", e)))?;
    fs::write(manifest_path(album_dir), json)
        .map_err(|e| SessionError::StorageError(format!("failed to write album: {}", e)))?;
    Ok(())
}

/// Read the manifest from `album_dir`, or `None` if the album does not exist.
pub fn read_manifest(album_dir: &Path) -> Result<Option<AlbumManifest>, SessionError> {
    let path = manifest_path(album_dir);
    if !path.exists() {
        return Ok(None);
    }
    let json = fs::read_to_string(&path)
        .map_err(|e| SessionError::StorageError(format!("failed to read album: {}", e)))?;
    let manifest = serde_json::from_str(&json)
        .map_err(|e| SessionError::StorageError(format!("failed to parse album: {}", e)))?;
    Ok(Some(manifest))
}
