//! Configuration for UTMN Map
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats; the default location is
//! `<platform config dir>/utmn-map/config.toml`.
//!
//! Configuration is organized into logical sections:
//! - API endpoints and credentials
//! - Viewport limits and zoom steps
//! - Route animation timing
//! - Rendering (icon directory, output size)
//! - Editor defaults for created objects and polygons

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use utmn_map_core::constants;

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Backend endpoints and credentials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL of the public read API
    pub public_base_url: String,
    /// Base URL of the admin (mutation) API
    pub admin_base_url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    /// Bearer token sent with admin requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            public_base_url: "http://localhost:8080".to_string(),
            admin_base_url: "http://localhost:8081".to_string(),
            timeout_ms: 10_000,
            access_token: None,
        }
    }
}

/// Viewport limits and input sensitivity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Scale multiplier per wheel notch
    pub wheel_zoom_factor: f64,
    /// Scale increment per zoom button press
    pub button_zoom_step: f64,
    /// Pointer travel in pixels still treated as a click
    pub click_slop_px: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            min_scale: constants::MIN_SCALE,
            max_scale: constants::MAX_SCALE,
            wheel_zoom_factor: constants::WHEEL_ZOOM_FACTOR,
            button_zoom_step: constants::BUTTON_ZOOM_STEP,
            click_slop_px: constants::CLICK_SLOP_PX,
        }
    }
}

/// Route reveal animation timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    pub base_duration_ms: u64,
    pub per_edge_ms: u64,
    pub frame_interval_ms: u64,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            base_duration_ms: constants::ROUTE_ANIMATION_BASE_MS,
            per_edge_ms: constants::ROUTE_ANIMATION_PER_EDGE_MS,
            frame_interval_ms: constants::FRAME_INTERVAL_MS,
        }
    }
}

/// Raster output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Directory holding `<icon-id>.png` files
    pub icon_dir: PathBuf,
    pub surface_width: u32,
    pub surface_height: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            icon_dir: PathBuf::from("icons"),
            surface_width: 1200,
            surface_height: 800,
        }
    }
}

/// Defaults used by the editor modes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub default_object_width: f64,
    pub default_object_height: f64,
    pub polygon_z_index: i32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            default_object_width: constants::DEFAULT_OBJECT_WIDTH,
            default_object_height: constants::DEFAULT_OBJECT_HEIGHT,
            polygon_z_index: constants::DEFAULT_POLYGON_Z_INDEX,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiSettings,
    pub viewport: ViewportSettings,
    pub animation: AnimationSettings,
    pub render: RenderSettings,
    pub editor: EditorSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no config or home directory".to_string())
            })?;
        Ok(dir.join("utmn-map").join("config.toml"))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load config from `path` if given, else from the default location if it
    /// exists, else fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match Self::default_path() {
            Ok(default) if default.exists() => Self::load_from_file(&default),
            _ => Ok(Self::default()),
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("{}: {}", path.display(), e))
        })?;

        Ok(())
    }

    /// Serialize as TOML for display
    pub fn to_toml_string(&self) -> SettingsResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.public_base_url.trim().is_empty() {
            return Err(ConfigError::MissingKey("api.public_base_url".to_string()));
        }
        if self.api.admin_base_url.trim().is_empty() {
            return Err(ConfigError::MissingKey("api.admin_base_url".to_string()));
        }
        if self.api.timeout_ms == 0 {
            return Err(ConfigError::out_of_range("api.timeout_ms", 0));
        }

        let vp = &self.viewport;
        if !(vp.min_scale.is_finite() && vp.min_scale > 0.0) {
            return Err(ConfigError::out_of_range("viewport.min_scale", vp.min_scale));
        }
        if !(vp.max_scale.is_finite() && vp.max_scale >= vp.min_scale) {
            return Err(ConfigError::out_of_range("viewport.max_scale", vp.max_scale));
        }
        if !(vp.wheel_zoom_factor.is_finite() && vp.wheel_zoom_factor > 1.0) {
            return Err(ConfigError::out_of_range(
                "viewport.wheel_zoom_factor",
                vp.wheel_zoom_factor,
            ));
        }
        if !(vp.button_zoom_step.is_finite() && vp.button_zoom_step > 0.0) {
            return Err(ConfigError::out_of_range(
                "viewport.button_zoom_step",
                vp.button_zoom_step,
            ));
        }
        if !(vp.click_slop_px.is_finite() && vp.click_slop_px >= 0.0) {
            return Err(ConfigError::out_of_range(
                "viewport.click_slop_px",
                vp.click_slop_px,
            ));
        }

        if self.animation.frame_interval_ms == 0 {
            return Err(ConfigError::out_of_range("animation.frame_interval_ms", 0));
        }

        if self.render.surface_width == 0 || self.render.surface_height == 0 {
            return Err(ConfigError::out_of_range(
                "render.surface_size",
                format!("{}x{}", self.render.surface_width, self.render.surface_height),
            ));
        }

        if self.editor.default_object_width <= 0.0 || self.editor.default_object_height <= 0.0 {
            return Err(ConfigError::out_of_range(
                "editor.default_object_size",
                format!(
                    "{}x{}",
                    self.editor.default_object_width, self.editor.default_object_height
                ),
            ));
        }

        Ok(())
    }
}
