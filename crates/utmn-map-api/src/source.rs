//! Data source interface
//!
//! Defines the contract between the map engine and the backend.

use async_trait::async_trait;
use utmn_map_core::{
    Building, BuildingSnapshot, Edge, Floor, GraphNode, Intersection, NewIntersection, NewObject,
    NewPolygon, ObjectPatch, ObjectType, PlacedObject, PolygonPoint, PolygonRecord, Result, Route,
    RouteRequest,
};

use crate::wire::{ObjectTypeInfo, SearchResult};

/// Backend operations used by the viewer and the editor.
///
/// Read operations go to the public API; mutations go to the admin API and
/// need a credential. Implementations must be usable from several tasks.
#[async_trait]
pub trait MapDataSource: Send + Sync {
    /// List all buildings
    async fn get_buildings(&self) -> Result<Vec<Building>>;

    /// Fetch the full snapshot of one building
    async fn get_objects(&self, building_id: &str) -> Result<BuildingSnapshot>;

    /// All graph nodes (doors and intersections) of a building
    async fn get_graph_nodes(&self, building_id: &str) -> Result<Vec<GraphNode>>;

    async fn get_intersections(&self, building_id: &str) -> Result<Vec<Intersection>>;

    async fn get_connections(&self, building_id: &str) -> Result<Vec<Edge>>;

    /// Ask the backend for a path between two nodes
    async fn build_route(&self, building_id: &str, request: &RouteRequest) -> Result<Route>;

    /// Free-text search, optionally restricted to some object types
    async fn search(
        &self,
        building_id: &str,
        query: &str,
        categories: &[ObjectType],
    ) -> Result<Vec<SearchResult>>;

    async fn get_categories(&self) -> Result<Vec<ObjectTypeInfo>>;

    async fn create_object(
        &self,
        building_id: &str,
        floor: &Floor,
        object: &NewObject,
    ) -> Result<PlacedObject>;

    async fn update_object(
        &self,
        building_id: &str,
        floor: &Floor,
        object_id: &str,
        patch: &ObjectPatch,
    ) -> Result<PlacedObject>;

    async fn delete_object(&self, building_id: &str, floor: &Floor, object_id: &str)
        -> Result<()>;

    /// Create an empty background polygon; points are attached separately
    async fn create_polygon(
        &self,
        building_id: &str,
        floor: &Floor,
        polygon: &NewPolygon,
    ) -> Result<PolygonRecord>;

    async fn add_polygon_points(
        &self,
        building_id: &str,
        floor: &Floor,
        polygon_id: &str,
        points: &[PolygonPoint],
    ) -> Result<()>;

    async fn add_intersection(
        &self,
        building_id: &str,
        intersection: &NewIntersection,
    ) -> Result<Intersection>;

    async fn add_connection(&self, building_id: &str, connection: &Edge) -> Result<Edge>;
}
