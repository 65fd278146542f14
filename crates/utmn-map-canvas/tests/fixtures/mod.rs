#![allow(dead_code)]

use serde_json::json;
use std::sync::Arc;
use utmn_map_api::InMemoryMapSource;
use utmn_map_core::{BuildingSnapshot, Edge, Intersection, Route};

pub const BUILDING: &str = "b1";

/// Two floors joined by a stair.
///
/// Floor `f1`: cabinet `o1` (10,10 20x10) with door `d1` inside its rect and
/// door `d2` just right of it, stair `o2`, hidden `o3`, unknown-type `o5`.
/// Floor `f2`: cabinet `o4` with door `d4`.
pub fn snapshot() -> BuildingSnapshot {
    let value = json!({
        "building": {"id": BUILDING, "name": "Main Building", "address": "Volodarskogo 6"},
        "floors": [
            {
                "floor": {"id": "f1", "name": "1", "alias": "First"},
                "background": [
                    {"id": "p1", "label": "outline", "z_index": 0, "points": [
                        {"order": 0, "x": 0.0, "y": 0.0},
                        {"order": 1, "x": 100.0, "y": 0.0},
                        {"order": 2, "x": 100.0, "y": 40.0},
                        {"order": 3, "x": 0.0, "y": 40.0}
                    ]},
                    {"id": "p2", "points": [{"x": 1.0, "y": 1.0}]}
                ],
                "objects": [
                    {
                        "id": "o1", "name": "Room 101", "alias": "Lab", "description": "Physics lab",
                        "x": 10.0, "y": 10.0, "width": 20.0, "height": 10.0,
                        "object_type_id": 1,
                        "doors": [
                            {"id": "d1", "x": 28.0, "y": 14.0, "width": 2.0, "height": 2.0},
                            {"id": "d2", "x": 30.0, "y": 12.0, "width": 2.0, "height": 2.0}
                        ]
                    },
                    {
                        "id": "o2", "name": "Stairs", "alias": "", "description": "",
                        "x": 50.0, "y": 10.0, "width": 10.0, "height": 10.0,
                        "object_type_id": 5, "doors": []
                    },
                    {
                        "id": "o3", "name": "IDK storage", "alias": "", "description": "",
                        "x": 70.0, "y": 10.0, "width": 5.0, "height": 5.0,
                        "object_type_id": 1, "doors": []
                    },
                    {
                        "id": "o5", "name": "Mystery", "alias": "", "description": "",
                        "x": 80.0, "y": 10.0, "width": 5.0, "height": 5.0,
                        "object_type_id": 42, "doors": null
                    }
                ]
            },
            {
                "floor": {"id": "f2", "name": "2", "alias": "Second"},
                "background": [],
                "objects": [
                    {
                        "id": "o4", "name": "", "alias": "", "description": "",
                        "x": 10.0, "y": 10.0, "width": 20.0, "height": 10.0,
                        "object_type_id": 1,
                        "doors": [{"id": "d4", "x": 12.0, "y": 20.0, "width": 2.0, "height": 2.0}]
                    }
                ]
            }
        ]
    });
    let mut snapshot: BuildingSnapshot =
        serde_json::from_value(value).expect("fixture snapshot is valid");
    snapshot.normalize();
    snapshot
}

pub fn intersections() -> Vec<Intersection> {
    vec![
        Intersection {
            id: "i1".into(),
            x: 40.0,
            y: 15.0,
            floor_id: "f1".into(),
        },
        Intersection {
            id: "i2".into(),
            x: 40.0,
            y: 15.0,
            floor_id: "f2".into(),
        },
    ]
}

/// `d1 -> i1` on f1, `i1 -> i2` across floors, `i2 -> d4` on f2.
pub fn route() -> Route {
    Route::new(vec![
        Edge::new("d1", "i1", 11.0),
        Edge::new("i1", "i2", 5.0),
        Edge::new("i2", "d4", 28.0),
    ])
}

pub fn source() -> Arc<InMemoryMapSource> {
    let source = InMemoryMapSource::with_snapshot(snapshot());
    source.set_intersections(BUILDING, intersections());
    source.set_route("d1", "d4", route());
    Arc::new(source)
}
