//! # UTMN Map
//!
//! Floor-plan viewer and editor engine for the UTMN MAP indoor navigation
//! application.
//!
//! ## Architecture
//!
//! The engine is organized as a workspace with multiple crates:
//!
//! 1. **utmn-map-core** - Domain model, geometry, constants, error types
//! 2. **utmn-map-settings** - Configuration file handling and validation
//! 3. **utmn-map-api** - Backend access: data source trait, HTTP client, in-memory source
//! 4. **utmn-map-canvas** - Viewport, hit-testing, edit modes, route animation, rendering
//! 5. **utmn-map** - This facade and the headless `utmn-map` renderer binary
//!
//! ## Features
//!
//! - **Multi-floor buildings**: background polygons, rooms, doors
//! - **Viewport**: pan, cursor-anchored wheel and pinch zoom
//! - **Editing**: create and move objects, draw floor background polygons
//! - **Routes**: server-built routes revealed progressively per floor
//! - **Raster output**: tiny-skia rendering to PNG

pub use utmn_map_api as api;
pub use utmn_map_canvas as canvas;
pub use utmn_map_core as core;
pub use utmn_map_settings as settings;

pub use utmn_map_api::{HttpMapClient, InMemoryMapSource, MapDataSource};
pub use utmn_map_canvas::{
    EditMode, IconCache, InteractionOutcome, LoadState, MapCanvas, PixmapSurface, Selection,
    SelectionDetails, ViewportTransform,
};
pub use utmn_map_core::{BuildingSnapshot, Error, Result, Route};
pub use utmn_map_settings::Config;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date and time
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with tracing
///
/// Filters come from `RUST_LOG`, with `info` always enabled.
///
/// # Errors
/// Returns an error if logging initialization fails
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
