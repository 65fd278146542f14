//! Shared constants for the map engine.
//!
//! Values here are interoperability or behaviour constants that several crates
//! agree on. Tunables that a deployment may want to change live in
//! `utmn-map-settings` instead and default to these values.

/// Smallest allowed viewport scale.
pub const MIN_SCALE: f64 = 0.2;

/// Largest allowed viewport scale.
pub const MAX_SCALE: f64 = 10.0;

/// Multiplicative zoom factor applied per wheel notch.
pub const WHEEL_ZOOM_FACTOR: f64 = 1.05;

/// Additive scale step used by the zoom buttons.
pub const BUTTON_ZOOM_STEP: f64 = 0.1;

/// Pointer travel (screen pixels) below which a press/release counts as a click.
pub const CLICK_SLOP_PX: f64 = 3.0;

/// Base duration of the route reveal animation in milliseconds.
pub const ROUTE_ANIMATION_BASE_MS: u64 = 1200;

/// Additional route animation time per edge in milliseconds.
pub const ROUTE_ANIMATION_PER_EDGE_MS: u64 = 80;

/// Target interval between animation frames in milliseconds.
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Objects whose name contains this marker are internal and never drawn.
pub const HIDDEN_OBJECT_MARKER: &str = "IDK";

/// Label used when a labelled room has no name.
pub const UNNAMED_LABEL: &str = "???";

/// Default width of an object created from the map.
pub const DEFAULT_OBJECT_WIDTH: f64 = 2.0;

/// Default height of an object created from the map.
pub const DEFAULT_OBJECT_HEIGHT: f64 = 2.0;

/// Z-index given to background polygons drawn on the map.
pub const DEFAULT_POLYGON_Z_INDEX: i32 = 0;

/// Minimum number of points a background polygon needs before it can be saved.
pub const MIN_POLYGON_POINTS: usize = 3;
