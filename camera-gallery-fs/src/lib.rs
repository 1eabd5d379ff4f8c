//! # camera-gallery-fs
//!
//! Filesystem backend for camera-gallery.
//!
//! Provides:
//! - `FsMediaLibrary` — `MediaLibrary` over a directory tree, albums as JSON manifests
//! - `permissions` — write-access check for the library root
//!
//! ## Usage
//! ```ignore
//! use camera_gallery_core::{SessionConfiguration, SessionController};
//! use camera_gallery_fs::{FsLibraryConfig, FsMediaLibrary};
//!
//! let library = FsMediaLibrary::new(FsLibraryConfig::new("/home/me/Pictures/CameraGallery"))?;
//! let session = SessionController::new(camera, picker, library, SessionConfiguration::default())?;
//! ```

pub mod config;
pub mod library;
pub mod manifest;
pub mod permissions;

pub use config::FsLibraryConfig;
pub use library::FsMediaLibrary;
pub use manifest::AlbumManifest;
