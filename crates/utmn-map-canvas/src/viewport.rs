//! Viewport and coordinate transformation for the floor canvas.
//!
//! Maps between screen pixels and floor (world) coordinates with an offset and
//! a uniform scale:
//!
//! ```text
//! screen = world * scale + offset
//! world  = (screen - offset) / scale
//! ```
//!
//! Both axes grow the same way (y down), so no flip is applied.

use std::fmt;

use utmn_map_core::constants::{MAX_SCALE, MIN_SCALE};
use utmn_map_core::{Error, Point, Result};
use utmn_map_settings::ViewportSettings;

/// Pan and zoom state of one canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportTransform {
    offset_x: f64,
    offset_y: f64,
    scale: f64,
    min_scale: f64,
    max_scale: f64,
    surface_width: f64,
    surface_height: f64,
}

impl ViewportTransform {
    /// Creates an identity viewport for a surface of the given size.
    pub fn new(surface_width: f64, surface_height: f64) -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            surface_width,
            surface_height,
        }
    }

    /// Creates a viewport using the configured scale limits.
    pub fn from_settings(settings: &ViewportSettings, surface_width: f64, surface_height: f64) -> Result<Self> {
        let mut viewport = Self::new(surface_width, surface_height);
        viewport.set_scale_limits(settings.min_scale, settings.max_scale)?;
        Ok(viewport)
    }

    pub fn offset_x(&self) -> f64 {
        self.offset_x
    }

    pub fn offset_y(&self) -> f64 {
        self.offset_y
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    pub fn surface_width(&self) -> f64 {
        self.surface_width
    }

    pub fn surface_height(&self) -> f64 {
        self.surface_height
    }

    /// Sets the surface dimensions. Offset and scale are left untouched.
    pub fn set_surface_size(&mut self, width: f64, height: f64) {
        self.surface_width = width;
        self.surface_height = height;
    }

    /// Changes the allowed scale range and re-clamps the current scale.
    pub fn set_scale_limits(&mut self, min: f64, max: f64) -> Result<()> {
        if !(min.is_finite() && max.is_finite() && min > 0.0 && max >= min) {
            return Err(Error::other(format!(
                "Invalid scale limits: min {min}, max {max}"
            )));
        }
        self.min_scale = min;
        self.max_scale = max;
        self.scale = self.clamp_scale(self.scale);
        Ok(())
    }

    /// Sets the offset directly.
    pub fn set_offset(&mut self, x: f64, y: f64) {
        self.offset_x = x;
        self.offset_y = y;
    }

    /// Pans by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if !(dx.is_finite() && dy.is_finite()) {
            tracing::debug!("Ignoring non-finite pan ({}, {})", dx, dy);
            return;
        }
        self.offset_x += dx;
        self.offset_y += dy;
    }

    fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }

    /// Multiplies the scale by `factor`, keeping the world point under
    /// `(sx, sy)` fixed on screen.
    pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            tracing::debug!("Ignoring zoom factor {}", factor);
            return;
        }
        self.zoom_to_scale_at(sx, sy, self.scale * factor);
    }

    /// Sets the scale (clamped) anchored at the screen point `(sx, sy)`.
    pub fn zoom_to_scale_at(&mut self, sx: f64, sy: f64, scale: f64) {
        if !(scale.is_finite() && scale > 0.0 && sx.is_finite() && sy.is_finite()) {
            tracing::debug!("Ignoring zoom to {} at ({}, {})", scale, sx, sy);
            return;
        }
        let old = self.scale;
        let new = self.clamp_scale(scale);
        self.offset_x = sx - ((sx - self.offset_x) / old) * new;
        self.offset_y = sy - ((sy - self.offset_y) / old) * new;
        self.scale = new;
    }

    /// Adds `delta` to the scale, anchored at the centre of the surface.
    pub fn step_zoom(&mut self, delta: f64) {
        let cx = self.surface_width / 2.0;
        let cy = self.surface_height / 2.0;
        self.zoom_to_scale_at(cx, cy, self.scale + delta);
    }

    /// Resets to the identity transform.
    pub fn reset(&mut self) {
        self.offset_x = 0.0;
        self.offset_y = 0.0;
        self.scale = 1.0;
    }

    /// Screen pixel to world coordinate.
    pub fn to_world(&self, sx: f64, sy: f64) -> Point {
        Point::new(
            (sx - self.offset_x) / self.scale,
            (sy - self.offset_y) / self.scale,
        )
    }

    /// World coordinate to screen pixel.
    pub fn to_screen(&self, wx: f64, wy: f64) -> Point {
        Point::new(
            wx * self.scale + self.offset_x,
            wy * self.scale + self.offset_y,
        )
    }
}

impl fmt::Display for ViewportTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scale: {:.2}x | Offset: ({:.1}, {:.1})",
            self.scale, self.offset_x, self.offset_y
        )
    }
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}
