use utmn_map_canvas::render::palette;
use utmn_map_canvas::{
    DisplayList, DrawCommand, EditMode, FloorRenderer, FrameInput, NodeIndex, ViewportTransform,
};
use utmn_map_core::{BuildingSnapshot, Point, Rect, Route};

use crate::fixtures;

struct Scene {
    snapshot: BuildingSnapshot,
    nodes: NodeIndex,
    viewport: ViewportTransform,
}

impl Scene {
    fn new() -> Self {
        let snapshot = fixtures::snapshot();
        let nodes = NodeIndex::build(&snapshot, &fixtures::intersections(), &[]);
        Self {
            snapshot,
            nodes,
            viewport: ViewportTransform::default(),
        }
    }

    fn frame<'a>(&'a self, floor_id: &str) -> FrameInput<'a> {
        FrameInput {
            floor: self.snapshot.floor(floor_id),
            viewport: &self.viewport,
            mode: EditMode::Select,
            selected_origin: None,
            move_override: None,
            route: None,
            route_progress: 1.0,
            nodes: &self.nodes,
            polygon_points: &[],
        }
    }
}

fn object_rects(list: &DisplayList) -> Vec<Rect> {
    list.iter()
        .filter_map(|c| match c {
            DrawCommand::Rect {
                rect,
                fill: Some(fill),
                ..
            } if *fill == palette::ROOM_FILL => Some(*rect),
            _ => None,
        })
        .collect()
}

#[test]
fn test_draw_order() {
    let scene = Scene::new();
    let list = FloorRenderer::new().render(&scene.frame("f1"));
    let commands = list.commands();

    assert_eq!(commands[0], DrawCommand::Clear);
    assert!(matches!(commands[1], DrawCommand::SetTransform { scale, .. } if scale == 1.0));
    // Only the four-point background polygon is drawable.
    assert!(matches!(&commands[2], DrawCommand::Polygon { points, .. } if points.len() == 4));
    assert!(!matches!(commands[3], DrawCommand::Polygon { .. }));

    // Doors follow their own object.
    let o1 = commands
        .iter()
        .position(|c| matches!(c, DrawCommand::Rect { rect, .. } if rect.x == 10.0 && rect.y == 10.0))
        .unwrap();
    let d1 = commands
        .iter()
        .position(|c| matches!(c, DrawCommand::Rect { fill: Some(f), .. } if *f == palette::DOOR_FILL))
        .unwrap();
    let o2 = commands
        .iter()
        .position(|c| matches!(c, DrawCommand::Rect { rect, .. } if rect.x == 50.0))
        .unwrap();
    assert!(o1 < d1 && d1 < o2);
}

#[test]
fn test_no_floor_draws_only_clear() {
    let scene = Scene::new();
    let list = FloorRenderer::new().render(&scene.frame("missing"));
    assert_eq!(list.commands(), &[DrawCommand::Clear]);
}

#[test]
fn test_hidden_objects_are_skipped() {
    let scene = Scene::new();
    let list = FloorRenderer::new().render(&scene.frame("f1"));
    let rects = object_rects(&list);
    assert_eq!(rects.len(), 3);
    assert!(rects.iter().all(|r| r.x != 70.0));
}

#[test]
fn test_labels_and_icons() {
    let scene = Scene::new();
    let list = FloorRenderer::new().render(&scene.frame("f1"));

    assert_eq!(list.texts(), vec!["Room", "101"]);
    let icons: Vec<_> = list
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Icon { icon_id, rect } => Some((icon_id.as_str(), *rect)),
            _ => None,
        })
        .collect();
    // Stairs get an icon; the unknown type gets neither icon nor label.
    assert_eq!(icons.len(), 1);
    assert_eq!(icons[0].0, "stair");
    assert_eq!(icons[0].1, Rect::new(41.0, 1.0, 28.0, 28.0));

    let lines: Vec<Point> = list
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { center, .. } => Some(*center),
            _ => None,
        })
        .collect();
    assert_eq!(lines, vec![Point::new(20.0, 5.0), Point::new(20.0, 25.0)]);
}

#[test]
fn test_unnamed_cabinet_label() {
    let scene = Scene::new();
    let list = FloorRenderer::new().render(&scene.frame("f2"));
    assert_eq!(list.texts(), vec!["???"]);
}

#[test]
fn test_route_is_filtered_by_floor() {
    let scene = Scene::new();
    let route = fixtures::route();

    let mut frame = scene.frame("f1");
    frame.route = Some(&route);
    let lines = FloorRenderer::new().render(&frame).route_lines();
    assert_eq!(lines, vec![(Point::new(29.0, 15.0), Point::new(40.0, 15.0))]);

    let mut frame = scene.frame("f2");
    frame.route = Some(&route);
    let lines = FloorRenderer::new().render(&frame).route_lines();
    assert_eq!(lines, vec![(Point::new(40.0, 15.0), Point::new(13.0, 21.0))]);
}

#[test]
fn test_route_partial_reveal() {
    let scene = Scene::new();
    let route = Route::new(vec![utmn_map_core::Edge::new("d1", "i1", 1.0)]);

    let mut frame = scene.frame("f1");
    frame.route = Some(&route);
    frame.route_progress = 0.5;
    let lines = FloorRenderer::new().render(&frame).route_lines();
    assert_eq!(lines, vec![(Point::new(29.0, 15.0), Point::new(34.5, 15.0))]);

    frame.route_progress = 0.0;
    assert!(FloorRenderer::new().render(&frame).route_lines().is_empty());
}

#[test]
fn test_selection_highlight_and_move_override() {
    let scene = Scene::new();
    let mut frame = scene.frame("f1");
    frame.move_override = Some(("o2", Point::new(60.0, 25.0)));
    frame.selected_origin = Some(Point::new(60.0, 25.0));
    let list = FloorRenderer::new().render(&frame);

    assert!(object_rects(&list).contains(&Rect::new(60.0, 25.0, 10.0, 10.0)));
    let highlights: Vec<_> = list
        .iter()
        .filter(|c| {
            matches!(c, DrawCommand::Rect { fill: None, stroke: Some(s), .. }
                if s.color == palette::SELECTION_STROKE && s.width == palette::SELECTION_STROKE_WIDTH)
        })
        .collect();
    assert_eq!(highlights.len(), 1);
}

#[test]
fn test_polygon_preview_only_in_polygon_mode() {
    let scene = Scene::new();
    let points = [Point::new(0.0, 0.0), Point::new(5.0, 0.0)];
    let mut frame = scene.frame("f1");
    frame.polygon_points = &points;

    let count_circles = |list: &DisplayList| {
        list.iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    };

    assert_eq!(count_circles(&FloorRenderer::new().render(&frame)), 0);
    frame.mode = EditMode::Polygon;
    let list = FloorRenderer::new().render(&frame);
    assert_eq!(count_circles(&list), 2);
    assert!(matches!(list.commands().last(), Some(DrawCommand::Circle { .. })));
}
