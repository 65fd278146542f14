//! UTMN Map Settings Crate
//!
//! Handles configuration files for the map engine and its command line tool.

pub mod config;
pub mod error;

pub use config::{
    AnimationSettings, ApiSettings, Config, EditorSettings, RenderSettings, ViewportSettings,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
