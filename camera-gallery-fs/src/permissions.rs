//! Write-access check for a filesystem media library.
//!
//! There is no consent dialog for a plain directory: access counts as
//! granted when the library root exists (or can be created) and is writable.

use std::fs;
use std::path::Path;

use camera_gallery_core::PermissionStatus;

/// Check whether the library root can be written to, creating it if needed.
pub fn check_library_access(root: &Path) -> PermissionStatus {
    if let Err(e) = fs::create_dir_all(root) {
        log::warn!("cannot create library root {}: {}", root.display(), e);
        return PermissionStatus::Denied;
    }

    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() && !meta.permissions().readonly() => PermissionStatus::Granted,
        Ok(_) => {
            log::warn!("library root {} is not a writable directory", root.display());
            PermissionStatus::Denied
        }
        Err(e) => {
            log::warn!("cannot inspect library root {}: {}", root.display(), e);
            PermissionStatus::Denied
        }
    }
}
