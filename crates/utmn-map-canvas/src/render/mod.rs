//! Floor rendering.
//!
//! [`FloorRenderer`] turns the current state into a [`DisplayList`] without
//! touching any surface. A [`Surface`] then executes the list:
//! [`PixmapSurface`] rasterises with tiny-skia and [`RecordingSurface`] keeps
//! the commands for inspection.

mod display_list;
mod floor_renderer;
pub mod palette;
mod pixmap;
mod recording;

pub use display_list::{DisplayList, DrawCommand, Rgba, StrokeStyle};
pub use floor_renderer::{FloorRenderer, FrameInput};
pub use pixmap::PixmapSurface;
pub use recording::RecordingSurface;

/// Something a display list can be executed on.
pub trait Surface {
    fn execute(&mut self, list: &DisplayList);
}
