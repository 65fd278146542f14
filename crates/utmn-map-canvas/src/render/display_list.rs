//! Surface-independent drawing commands.
//!
//! Coordinates after a `SetTransform` are world units; stroke widths, dash
//! lengths and font sizes are in world units too and scale with the view.

use utmn_map_core::{Point, Rect};

/// 8-bit straight-alpha colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgba,
    pub width: f64,
    pub dash: Option<[f64; 2]>,
}

impl StrokeStyle {
    pub fn solid(color: Rgba, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(color: Rgba, width: f64, dash: [f64; 2]) -> Self {
        Self {
            color,
            width,
            dash: Some(dash),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole surface.
    Clear,
    /// Replace the current transform: `screen = world * scale + offset`.
    SetTransform {
        offset_x: f64,
        offset_y: f64,
        scale: f64,
    },
    /// Closed polygon.
    Polygon {
        points: Vec<Point>,
        fill: Option<Rgba>,
        stroke: Option<StrokeStyle>,
    },
    Rect {
        rect: Rect,
        fill: Option<Rgba>,
        stroke: Option<StrokeStyle>,
    },
    Line {
        from: Point,
        to: Point,
        stroke: StrokeStyle,
    },
    /// Open polyline.
    Polyline {
        points: Vec<Point>,
        stroke: StrokeStyle,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: Rgba,
    },
    /// Single line of text centred on `center`.
    Text {
        text: String,
        center: Point,
        size: f64,
        color: Rgba,
    },
    /// Icon bitmap scaled into `rect`.
    Icon {
        icon_id: String,
        rect: Rect,
    },
}

/// Ordered list of commands for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Lines drawn with the route stroke colour and width.
    pub fn route_lines(&self) -> Vec<(Point, Point)> {
        self.iter()
            .filter_map(|c| match c {
                DrawCommand::Line { from, to, stroke }
                    if stroke.color == super::palette::ROUTE_STROKE
                        && stroke.width == super::palette::ROUTE_STROKE_WIDTH =>
                {
                    Some((*from, *to))
                }
                _ => None,
            })
            .collect()
    }

    /// Text commands in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl IntoIterator for DisplayList {
    type Item = DrawCommand;
    type IntoIter = std::vec::IntoIter<DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}
