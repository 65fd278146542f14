use serde_json::json;
use utmn_map_core::geometry::Point;
use utmn_map_core::{GraphNode, NodeKind, PolygonPoint, Route, RouteRequest};

#[test]
fn test_node_kind_wire_names() {
    let node: GraphNode = serde_json::from_value(json!({
        "id": "n1", "x": 1.0, "y": 2.0, "type": "intersection", "floor_id": "f1"
    }))
    .unwrap();
    assert_eq!(node.kind, NodeKind::Intersection);
    assert_eq!(node.position(), Point::new(1.0, 2.0));
}

#[test]
fn test_route_request_omits_empty_waypoints() {
    let req = RouteRequest::new("a", "b");
    assert_eq!(
        serde_json::to_value(&req).unwrap(),
        json!({"start_node_id": "a", "end_node_id": "b"})
    );

    let req = req.with_waypoints(vec!["w".to_string()]);
    assert_eq!(serde_json::to_value(&req).unwrap()["waypoints"], json!(["w"]));
}

#[test]
fn test_route_is_list_of_edges() {
    let route: Route = serde_json::from_value(json!([
        {"from_id": "a", "to_id": "b", "weight": 2.0},
        {"from_id": "b", "to_id": "c", "weight": 3.5}
    ]))
    .unwrap();
    assert_eq!(route.len(), 2);
    assert_eq!(route.total_weight(), 5.5);
}

#[test]
fn test_polygon_point_sequence() {
    let pts = [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)];
    let seq = PolygonPoint::sequence(&pts);
    let orders: Vec<u32> = seq.iter().map(|p| p.point_order).collect();
    assert_eq!(orders, vec![0, 1, 2]);
    assert_eq!(seq[2].y, 1.0);
}
