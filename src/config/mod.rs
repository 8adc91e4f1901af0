//! Configuration module for quarry.
//!
//! Handles file-based render settings.

mod settings;

pub use settings::{RenderSettings, Settings, SettingsError};
