//! Fixed colours and sizes of the floor drawing.

use super::display_list::Rgba;
use utmn_map_core::ObjectType;

pub const BACKGROUND_FILL: Rgba = Rgba::new(255, 255, 255, 230);
pub const BACKGROUND_STROKE: Rgba = Rgba::new(200, 200, 200, 204);
pub const BACKGROUND_STROKE_WIDTH: f64 = 2.0;

pub const SELECTION_STROKE: Rgba = Rgba::opaque(0x4C, 0xAF, 0x50);
pub const SELECTION_STROKE_WIDTH: f64 = 3.0;

pub const DEFAULT_OBJECT_FILL: Rgba = Rgba::opaque(0xC9, 0xE6, 0xFA);
pub const OBJECT_OUTLINE: Rgba = Rgba::opaque(0xA0, 0xC4, 0xE0);
pub const OBJECT_OUTLINE_WIDTH: f64 = 1.0;

pub const LABEL_COLOR: Rgba = Rgba::opaque(0, 0, 0);
pub const LABEL_FONT_SIZE: f64 = 18.0;
pub const LABEL_LINE_HEIGHT: f64 = 20.0;

pub const ICON_SIZE: f64 = 28.0;

pub const DOOR_FILL: Rgba = Rgba::opaque(0xFF, 0x6B, 0x6B);
pub const DOOR_STROKE: Rgba = Rgba::opaque(0xFF, 0x00, 0x00);
pub const DOOR_STROKE_WIDTH: f64 = 1.0;

pub const ROUTE_STROKE: Rgba = Rgba::opaque(0x4C, 0xAF, 0x50);
pub const ROUTE_STROKE_WIDTH: f64 = 4.0;
pub const ROUTE_DASH: [f64; 2] = [10.0, 8.0];

pub const POLYGON_PREVIEW: Rgba = Rgba::opaque(0x19, 0x76, 0xD2);
pub const POLYGON_PREVIEW_WIDTH: f64 = 2.0;
pub const POLYGON_PREVIEW_DASH: [f64; 2] = [6.0, 4.0];
pub const POLYGON_MARKER_RADIUS: f64 = 4.0;

pub const ROOM_FILL: Rgba = Rgba::opaque(0xC9, 0xE6, 0xFA);

/// Fill colour for an object type. Unknown types get the default.
pub fn object_fill(object_type: Option<ObjectType>) -> Rgba {
    match object_type {
        Some(_) => ROOM_FILL,
        None => DEFAULT_OBJECT_FILL,
    }
}
