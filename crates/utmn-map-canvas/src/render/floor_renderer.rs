//! Builds the display list for one frame of the current floor.

use utmn_map_core::constants::UNNAMED_LABEL;
use utmn_map_core::{FloorPlan, Point, Rect, Route};

use super::display_list::{DisplayList, DrawCommand, StrokeStyle};
use super::palette;
use crate::edit_mode::EditMode;
use crate::route::{reveal, NodeIndex};
use crate::viewport::ViewportTransform;

/// Everything one frame depends on.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    pub floor: Option<&'a FloorPlan>,
    pub viewport: &'a ViewportTransform,
    pub mode: EditMode,
    /// Origin of the selected object; objects drawn at this position are
    /// highlighted.
    pub selected_origin: Option<Point>,
    /// Object being moved and its pending top-left position.
    pub move_override: Option<(&'a str, Point)>,
    pub route: Option<&'a Route>,
    pub route_progress: f64,
    pub nodes: &'a NodeIndex,
    pub polygon_points: &'a [Point],
}

/// Stateless floor renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloorRenderer;

impl FloorRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &FrameInput<'_>) -> DisplayList {
        let mut list = DisplayList::new();
        list.push(DrawCommand::Clear);

        let Some(floor) = frame.floor else {
            return list;
        };

        list.push(DrawCommand::SetTransform {
            offset_x: frame.viewport.offset_x(),
            offset_y: frame.viewport.offset_y(),
            scale: frame.viewport.scale(),
        });

        self.background(floor, &mut list);
        self.objects(frame, floor, &mut list);
        self.route(frame, floor, &mut list);
        self.polygon_preview(frame, &mut list);

        list
    }

    fn background(&self, floor: &FloorPlan, list: &mut DisplayList) {
        for polygon in floor.background.iter().filter(|p| p.is_drawable()) {
            list.push(DrawCommand::Polygon {
                points: polygon.vertices(),
                fill: Some(palette::BACKGROUND_FILL),
                stroke: Some(StrokeStyle::solid(
                    palette::BACKGROUND_STROKE,
                    palette::BACKGROUND_STROKE_WIDTH,
                )),
            });
        }
    }

    fn objects(&self, frame: &FrameInput<'_>, floor: &FloorPlan, list: &mut DisplayList) {
        for object in floor.visible_objects() {
            let rect = match frame.move_override {
                Some((id, origin)) if id == object.id => object.rect().moved_to(origin.x, origin.y),
                _ => object.rect(),
            };
            let object_type = object.object_type();

            if frame.selected_origin == Some(rect.origin()) {
                list.push(DrawCommand::Rect {
                    rect,
                    fill: None,
                    stroke: Some(StrokeStyle::solid(
                        palette::SELECTION_STROKE,
                        palette::SELECTION_STROKE_WIDTH,
                    )),
                });
            }

            list.push(DrawCommand::Rect {
                rect,
                fill: Some(palette::object_fill(object_type)),
                stroke: Some(StrokeStyle::solid(
                    palette::OBJECT_OUTLINE,
                    palette::OBJECT_OUTLINE_WIDTH,
                )),
            });

            match object_type {
                Some(t) if t.is_labelled() => label_lines(&object.name, rect, list),
                Some(t) => list.push(DrawCommand::Icon {
                    icon_id: t.icon_id().to_string(),
                    rect: Rect::centered_square(rect.center(), palette::ICON_SIZE),
                }),
                None => {}
            }

            for door in &object.doors {
                list.push(DrawCommand::Rect {
                    rect: door.rect(),
                    fill: Some(palette::DOOR_FILL),
                    stroke: Some(StrokeStyle::solid(
                        palette::DOOR_STROKE,
                        palette::DOOR_STROKE_WIDTH,
                    )),
                });
            }
        }
    }

    fn route(&self, frame: &FrameInput<'_>, floor: &FloorPlan, list: &mut DisplayList) {
        let Some(route) = frame.route else {
            return;
        };
        let segments = frame.nodes.floor_segments(route, floor.id());
        let stroke = StrokeStyle::dashed(
            palette::ROUTE_STROKE,
            palette::ROUTE_STROKE_WIDTH,
            palette::ROUTE_DASH,
        );
        for segment in reveal(&segments, frame.route_progress) {
            list.push(DrawCommand::Line {
                from: segment.from,
                to: segment.to,
                stroke: stroke.clone(),
            });
        }
    }

    fn polygon_preview(&self, frame: &FrameInput<'_>, list: &mut DisplayList) {
        if frame.mode != EditMode::Polygon || frame.polygon_points.is_empty() {
            return;
        }
        list.push(DrawCommand::Polyline {
            points: frame.polygon_points.to_vec(),
            stroke: StrokeStyle::dashed(
                palette::POLYGON_PREVIEW,
                palette::POLYGON_PREVIEW_WIDTH,
                palette::POLYGON_PREVIEW_DASH,
            ),
        });
        for point in frame.polygon_points {
            list.push(DrawCommand::Circle {
                center: *point,
                radius: palette::POLYGON_MARKER_RADIUS,
                fill: palette::POLYGON_PREVIEW,
            });
        }
    }
}

/// Stacks the words of `name` vertically around the rect centre.
fn label_lines(name: &str, rect: Rect, list: &mut DisplayList) {
    let mut words: Vec<&str> = name.split_whitespace().collect();
    if words.is_empty() {
        words.push(UNNAMED_LABEL);
    }
    let center = rect.center();
    let total = palette::LABEL_LINE_HEIGHT * words.len() as f64;
    for (i, word) in words.iter().enumerate() {
        let y = center.y - total / 2.0
            + palette::LABEL_LINE_HEIGHT / 2.0
            + i as f64 * palette::LABEL_LINE_HEIGHT;
        list.push(DrawCommand::Text {
            text: (*word).to_string(),
            center: Point::new(center.x, y),
            size: palette::LABEL_FONT_SIZE,
            color: palette::LABEL_COLOR,
        });
    }
}
