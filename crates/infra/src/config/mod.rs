//! Configuration loading
//!
//! Default [`glide_domain::Settings`] come from environment variables or a
//! JSON file; explicit settings are merged over them by the client.

pub mod loader;

pub use loader::{load_settings_from_env, load_settings_from_file, load_settings_with};
