//! Configuration module for pocketplan
//!
//! This module provides:
//! - base directory resolution
//! - user settings persistence

pub mod paths;
pub mod settings;

pub use paths::PocketPaths;
pub use settings::Settings;
