//! Domain model of a mapped building.

pub mod building;
pub mod graph;
pub mod object;
pub mod polygon;

pub use building::{BackgroundPoint, BackgroundPolygon, Building, BuildingSnapshot, Floor, FloorPlan};
pub use graph::{
    Edge, GraphNode, Intersection, NewIntersection, NodeKind, Route, RouteRequest,
};
pub use object::{Door, NewObject, ObjectPatch, ObjectType, PlacedObject};
pub use polygon::{NewPolygon, PolygonPoint, PolygonRecord};

use serde::{Deserialize, Deserializer};

/// The backend sends `null` for empty lists in a few places.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
