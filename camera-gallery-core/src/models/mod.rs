pub mod config;
pub mod error;
pub mod media;
pub mod notice;
pub mod permission;
pub mod state;
