//! Buildings, floors and the per-building snapshot.

use serde::{Deserialize, Serialize};

use super::null_as_empty;
use super::object::{Door, PlacedObject};
use crate::geometry::Point;

/// A building as listed by the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Building {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
}

/// Floor identity. Floors are addressed by name in backend URLs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Floor {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub alias: String,
}

/// Vertex of a background polygon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BackgroundPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    pub x: f64,
    pub y: f64,
}

impl BackgroundPoint {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Decorative outline of the floor area.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BackgroundPolygon {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub points: Vec<BackgroundPoint>,
}

impl BackgroundPolygon {
    /// Vertices in drawing order.
    pub fn vertices(&self) -> Vec<Point> {
        self.points.iter().map(BackgroundPoint::point).collect()
    }

    /// Polygons with fewer than two points have nothing to draw.
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }
}

/// One floor with everything drawn on it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FloorPlan {
    pub floor: Floor,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub background: Vec<BackgroundPolygon>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub objects: Vec<PlacedObject>,
}

impl FloorPlan {
    pub fn id(&self) -> &str {
        &self.floor.id
    }

    pub fn name(&self) -> &str {
        &self.floor.name
    }

    pub fn object(&self, object_id: &str) -> Option<&PlacedObject> {
        self.objects.iter().find(|o| o.id == object_id)
    }

    /// Finds a door on this floor together with its owning object.
    pub fn door(&self, door_id: &str) -> Option<(&PlacedObject, &Door)> {
        self.objects
            .iter()
            .find_map(|o| o.door(door_id).map(|d| (o, d)))
    }

    /// Visible objects in insertion order.
    pub fn visible_objects(&self) -> impl Iterator<Item = &PlacedObject> {
        self.objects.iter().filter(|o| !o.is_hidden())
    }
}

/// Everything the viewer needs for one building.
///
/// A snapshot is never edited in place; after a mutation the whole value is
/// refetched and replaced.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BuildingSnapshot {
    pub building: Building,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub floors: Vec<FloorPlan>,
}

impl BuildingSnapshot {
    pub fn floor(&self, floor_id: &str) -> Option<&FloorPlan> {
        self.floors.iter().find(|f| f.id() == floor_id)
    }

    pub fn floor_by_name(&self, name: &str) -> Option<&FloorPlan> {
        self.floors.iter().find(|f| f.name() == name)
    }

    pub fn first_floor(&self) -> Option<&FloorPlan> {
        self.floors.first()
    }

    /// Zero-based position of the floor in the building.
    pub fn floor_index(&self, floor_id: &str) -> Option<usize> {
        self.floors.iter().position(|f| f.id() == floor_id)
    }

    pub fn find_object(&self, object_id: &str) -> Option<(&FloorPlan, &PlacedObject)> {
        self.floors
            .iter()
            .find_map(|f| f.object(object_id).map(|o| (f, o)))
    }

    pub fn find_door(&self, door_id: &str) -> Option<(&FloorPlan, &PlacedObject, &Door)> {
        self.floors
            .iter()
            .find_map(|f| f.door(door_id).map(|(o, d)| (f, o, d)))
    }

    /// Sorts background vertices by their `order` where the backend sent one
    /// and fills missing door owner ids.
    pub fn normalize(&mut self) {
        for floor in &mut self.floors {
            for polygon in &mut floor.background {
                if polygon.points.iter().all(|p| p.order.is_some()) {
                    polygon.points.sort_by_key(|p| p.order.unwrap_or_default());
                }
            }
            for object in &mut floor.objects {
                for door in &mut object.doors {
                    if door.object_id.is_empty() {
                        door.object_id = object.id.clone();
                    }
                }
            }
        }
    }
}
