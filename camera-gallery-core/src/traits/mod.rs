pub mod camera_provider;
pub mod gallery_picker;
pub mod media_library;
pub mod session_delegate;
