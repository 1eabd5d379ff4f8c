use std::path::PathBuf;

/// Library root (relative to the working directory) when none is given.
pub const DEFAULT_LIBRARY_DIR: &str = "CameraGallery";

/// Configuration for a filesystem-backed media library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsLibraryConfig {
    /// Library root. Assets go to `<root>/assets`, albums to `<root>/albums`.
    pub root: PathBuf,
}

impl FsLibraryConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.root.join("assets")
    }

    pub fn albums_dir(&self) -> PathBuf {
        self.root.join("albums")
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.root.as_os_str().is_empty() {
            return Err("library root must not be empty".into());
        }
        if self.root.is_file() {
            return Err(format!("library root is a file: {}", self.root.display()));
        }
        Ok(())
    }
}

impl Default for FsLibraryConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LIBRARY_DIR)
    }
}
