//! # UTMN Map Core
//!
//! Domain model, geometry, constants and error types shared by the map
//! engine crates.

pub mod constants;
pub mod error;
pub mod geometry;
pub mod model;

pub use error::{ApiError, EditError, Error, LookupError, Result};
pub use geometry::{Point, Rect};
pub use model::{
    BackgroundPoint, BackgroundPolygon, Building, BuildingSnapshot, Door, Edge, Floor,
    FloorPlan, GraphNode, Intersection, NewIntersection, NewObject, NewPolygon, NodeKind,
    ObjectPatch, ObjectType, PlacedObject, PolygonPoint, PolygonRecord, Route, RouteRequest,
};
