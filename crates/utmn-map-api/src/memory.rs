//! In-memory data source.
//!
//! Keeps one or more buildings in memory, applies mutations to them and
//! records every call. Used by tests and by offline demos.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use utmn_map_core::{
    ApiError, BackgroundPoint, BackgroundPolygon, Building, BuildingSnapshot, Edge, Floor,
    GraphNode, Intersection, NewIntersection, NewObject, NewPolygon, ObjectPatch, ObjectType,
    PlacedObject, PolygonPoint, PolygonRecord, Result, Route, RouteRequest,
};
use uuid::Uuid;

use crate::source::MapDataSource;
use crate::wire::{ObjectTypeInfo, SearchResult};

/// One call made against an [`InMemoryMapSource`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    GetBuildings,
    GetObjects { building_id: String },
    GetGraphNodes { building_id: String },
    GetIntersections { building_id: String },
    GetConnections { building_id: String },
    BuildRoute { building_id: String, request: RouteRequest },
    Search { building_id: String, query: String },
    GetCategories,
    CreateObject { floor_id: String, object: NewObject },
    UpdateObject { floor_id: String, object_id: String, patch: ObjectPatch },
    DeleteObject { floor_id: String, object_id: String },
    CreatePolygon { floor_id: String, polygon: NewPolygon },
    AddPolygonPoints { floor_id: String, polygon_id: String, points: Vec<PolygonPoint> },
    AddIntersection { intersection: NewIntersection },
    AddConnection { connection: Edge },
}

impl RecordedCall {
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            RecordedCall::CreateObject { .. }
                | RecordedCall::UpdateObject { .. }
                | RecordedCall::DeleteObject { .. }
                | RecordedCall::CreatePolygon { .. }
                | RecordedCall::AddPolygonPoints { .. }
                | RecordedCall::AddIntersection { .. }
                | RecordedCall::AddConnection { .. }
        )
    }
}

#[derive(Default)]
struct State {
    snapshots: HashMap<String, BuildingSnapshot>,
    nodes: HashMap<String, Vec<GraphNode>>,
    intersections: HashMap<String, Vec<Intersection>>,
    connections: HashMap<String, Vec<Edge>>,
    routes: HashMap<(String, String), Route>,
    calls: Vec<RecordedCall>,
    fail_reads: bool,
    fail_mutations: bool,
}

/// Stateful fake backend.
#[derive(Default)]
pub struct InMemoryMapSource {
    state: Mutex<State>,
}

impl InMemoryMapSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source serving one building.
    pub fn with_snapshot(snapshot: BuildingSnapshot) -> Self {
        let source = Self::new();
        source.insert_snapshot(snapshot);
        source
    }

    pub fn insert_snapshot(&self, mut snapshot: BuildingSnapshot) {
        snapshot.normalize();
        let id = snapshot.building.id.clone();
        self.state.lock().snapshots.insert(id, snapshot);
    }

    pub fn set_graph_nodes(&self, building_id: &str, nodes: Vec<GraphNode>) {
        self.state.lock().nodes.insert(building_id.to_string(), nodes);
    }

    pub fn set_intersections(&self, building_id: &str, intersections: Vec<Intersection>) {
        self.state
            .lock()
            .intersections
            .insert(building_id.to_string(), intersections);
    }

    /// Answer `build_route(start, end)` with `route`.
    pub fn set_route(&self, start: &str, end: &str, route: Route) {
        self.state
            .lock()
            .routes
            .insert((start.to_string(), end.to_string()), route);
    }

    /// Make every read fail with a 500 status.
    pub fn set_fail_reads(&self, fail: bool) {
        self.state.lock().fail_reads = fail;
    }

    /// Make every mutation fail with a 500 status.
    pub fn set_fail_mutations(&self, fail: bool) {
        self.state.lock().fail_mutations = fail;
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().calls.clone()
    }

    pub fn mutations(&self) -> Vec<RecordedCall> {
        self.calls().into_iter().filter(RecordedCall::is_mutation).collect()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    pub fn snapshot(&self, building_id: &str) -> Option<BuildingSnapshot> {
        self.state.lock().snapshots.get(building_id).cloned()
    }

    fn read(&self, url: &str, call: RecordedCall) -> Result<parking_lot::MutexGuard<'_, State>> {
        let mut state = self.state.lock();
        state.calls.push(call);
        if state.fail_reads {
            return Err(server_error(url));
        }
        Ok(state)
    }

    fn mutate(&self, url: &str, call: RecordedCall) -> Result<parking_lot::MutexGuard<'_, State>> {
        let mut state = self.state.lock();
        state.calls.push(call);
        if state.fail_mutations {
            tracing::debug!("Injected failure for {}", url);
            return Err(server_error(url));
        }
        Ok(state)
    }
}

fn server_error(url: &str) -> utmn_map_core::Error {
    ApiError::Status {
        status: 500,
        url: url.to_string(),
    }
    .into()
}

fn not_found(url: String) -> utmn_map_core::Error {
    ApiError::Status { status: 404, url }.into()
}

fn floor_plan_mut<'a>(
    state: &'a mut State,
    building_id: &str,
    floor: &Floor,
) -> Result<&'a mut utmn_map_core::FloorPlan> {
    state
        .snapshots
        .get_mut(building_id)
        .and_then(|s| s.floors.iter_mut().find(|f| f.floor.id == floor.id))
        .ok_or_else(|| not_found(format!("memory://{building_id}/floors/{}", floor.id)))
}

#[async_trait]
impl MapDataSource for InMemoryMapSource {
    async fn get_buildings(&self) -> Result<Vec<Building>> {
        let state = self.read("memory://buildings", RecordedCall::GetBuildings)?;
        let mut buildings: Vec<Building> =
            state.snapshots.values().map(|s| s.building.clone()).collect();
        buildings.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(buildings)
    }

    async fn get_objects(&self, building_id: &str) -> Result<BuildingSnapshot> {
        let url = format!("memory://{building_id}/objects");
        let state = self.read(
            &url,
            RecordedCall::GetObjects {
                building_id: building_id.to_string(),
            },
        )?;
        state
            .snapshots
            .get(building_id)
            .cloned()
            .ok_or_else(|| not_found(url))
    }

    async fn get_graph_nodes(&self, building_id: &str) -> Result<Vec<GraphNode>> {
        let state = self.read(
            "memory://graph/nodes",
            RecordedCall::GetGraphNodes {
                building_id: building_id.to_string(),
            },
        )?;
        Ok(state.nodes.get(building_id).cloned().unwrap_or_default())
    }

    async fn get_intersections(&self, building_id: &str) -> Result<Vec<Intersection>> {
        let state = self.read(
            "memory://intersections",
            RecordedCall::GetIntersections {
                building_id: building_id.to_string(),
            },
        )?;
        Ok(state
            .intersections
            .get(building_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_connections(&self, building_id: &str) -> Result<Vec<Edge>> {
        let state = self.read(
            "memory://connections",
            RecordedCall::GetConnections {
                building_id: building_id.to_string(),
            },
        )?;
        Ok(state
            .connections
            .get(building_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn build_route(&self, building_id: &str, request: &RouteRequest) -> Result<Route> {
        let url = format!("memory://{building_id}/route");
        let state = self.read(
            &url,
            RecordedCall::BuildRoute {
                building_id: building_id.to_string(),
                request: request.clone(),
            },
        )?;
        state
            .routes
            .get(&(request.start_node_id.clone(), request.end_node_id.clone()))
            .cloned()
            .ok_or_else(|| not_found(url))
    }

    async fn search(
        &self,
        building_id: &str,
        query: &str,
        categories: &[ObjectType],
    ) -> Result<Vec<SearchResult>> {
        let state = self.read(
            "memory://search",
            RecordedCall::Search {
                building_id: building_id.to_string(),
                query: query.to_string(),
            },
        )?;
        let needle = query.to_lowercase();
        let Some(snapshot) = state.snapshots.get(building_id) else {
            return Ok(Vec::new());
        };
        let results = snapshot
            .floors
            .iter()
            .flat_map(|f| f.objects.iter())
            .filter(|o| !o.is_hidden())
            .filter(|o| {
                needle.is_empty()
                    || o.name.to_lowercase().contains(&needle)
                    || o.alias.to_lowercase().contains(&needle)
            })
            .filter(|o| {
                categories.is_empty()
                    || o.object_type().is_some_and(|t| categories.contains(&t))
            })
            .map(|o| SearchResult {
                object_id: o.id.clone(),
                door_id: o.doors.first().map(|d| d.id.clone()).unwrap_or_default(),
                object_type_id: o.object_type_id,
                preview: o.name.clone(),
            })
            .collect();
        Ok(results)
    }

    async fn get_categories(&self) -> Result<Vec<ObjectTypeInfo>> {
        let _state = self.read("memory://categories", RecordedCall::GetCategories)?;
        Ok(ObjectType::ALL
            .iter()
            .map(|t| ObjectTypeInfo {
                id: t.id(),
                name: t.name().to_string(),
                alias: String::new(),
            })
            .collect())
    }

    async fn create_object(
        &self,
        building_id: &str,
        floor: &Floor,
        object: &NewObject,
    ) -> Result<PlacedObject> {
        let mut state = self.mutate(
            "memory://objects",
            RecordedCall::CreateObject {
                floor_id: floor.id.clone(),
                object: object.clone(),
            },
        )?;
        let plan = floor_plan_mut(&mut state, building_id, floor)?;
        let created = PlacedObject {
            id: object
                .id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: object.name.clone(),
            alias: object.alias.clone(),
            description: object.description.clone(),
            x: object.x,
            y: object.y,
            width: object.width,
            height: object.height,
            object_type_id: object.object_type_id,
            doors: Vec::new(),
        };
        plan.objects.push(created.clone());
        Ok(created)
    }

    async fn update_object(
        &self,
        building_id: &str,
        floor: &Floor,
        object_id: &str,
        patch: &ObjectPatch,
    ) -> Result<PlacedObject> {
        let mut state = self.mutate(
            "memory://objects",
            RecordedCall::UpdateObject {
                floor_id: floor.id.clone(),
                object_id: object_id.to_string(),
                patch: patch.clone(),
            },
        )?;
        let plan = floor_plan_mut(&mut state, building_id, floor)?;
        let object = plan
            .objects
            .iter_mut()
            .find(|o| o.id == object_id)
            .ok_or_else(|| not_found(format!("memory://objects/{object_id}")))?;
        patch.apply_to(object);
        Ok(object.clone())
    }

    async fn delete_object(&self, building_id: &str, floor: &Floor, object_id: &str) -> Result<()> {
        let mut state = self.mutate(
            "memory://objects",
            RecordedCall::DeleteObject {
                floor_id: floor.id.clone(),
                object_id: object_id.to_string(),
            },
        )?;
        let plan = floor_plan_mut(&mut state, building_id, floor)?;
        let before = plan.objects.len();
        plan.objects.retain(|o| o.id != object_id);
        if plan.objects.len() == before {
            return Err(not_found(format!("memory://objects/{object_id}")));
        }
        Ok(())
    }

    async fn create_polygon(
        &self,
        building_id: &str,
        floor: &Floor,
        polygon: &NewPolygon,
    ) -> Result<PolygonRecord> {
        let mut state = self.mutate(
            "memory://poligons",
            RecordedCall::CreatePolygon {
                floor_id: floor.id.clone(),
                polygon: polygon.clone(),
            },
        )?;
        let plan = floor_plan_mut(&mut state, building_id, floor)?;
        let record = PolygonRecord {
            id: Uuid::new_v4().to_string(),
            label: polygon.label.clone(),
            z_index: polygon.z_index,
        };
        plan.background.push(BackgroundPolygon {
            id: Some(record.id.clone()),
            label: Some(record.label.clone()),
            z_index: Some(record.z_index),
            points: Vec::new(),
        });
        Ok(record)
    }

    async fn add_polygon_points(
        &self,
        building_id: &str,
        floor: &Floor,
        polygon_id: &str,
        points: &[PolygonPoint],
    ) -> Result<()> {
        let mut state = self.mutate(
            "memory://poligons/points",
            RecordedCall::AddPolygonPoints {
                floor_id: floor.id.clone(),
                polygon_id: polygon_id.to_string(),
                points: points.to_vec(),
            },
        )?;
        let plan = floor_plan_mut(&mut state, building_id, floor)?;
        let polygon = plan
            .background
            .iter_mut()
            .find(|p| p.id.as_deref() == Some(polygon_id))
            .ok_or_else(|| not_found(format!("memory://poligons/{polygon_id}")))?;
        polygon.points.extend(points.iter().map(|p| BackgroundPoint {
            order: Some(i64::from(p.point_order)),
            x: p.x,
            y: p.y,
        }));
        polygon.points.sort_by_key(|p| p.order.unwrap_or_default());
        Ok(())
    }

    async fn add_intersection(
        &self,
        building_id: &str,
        intersection: &NewIntersection,
    ) -> Result<Intersection> {
        let mut state = self.mutate(
            "memory://route/intersections",
            RecordedCall::AddIntersection {
                intersection: intersection.clone(),
            },
        )?;
        let created = Intersection {
            id: intersection.id.clone(),
            x: intersection.x,
            y: intersection.y,
            floor_id: intersection.floor_id.clone(),
        };
        state
            .intersections
            .entry(building_id.to_string())
            .or_default()
            .push(created.clone());
        Ok(created)
    }

    async fn add_connection(&self, building_id: &str, connection: &Edge) -> Result<Edge> {
        let mut state = self.mutate(
            "memory://route/connections",
            RecordedCall::AddConnection {
                connection: connection.clone(),
            },
        )?;
        state
            .connections
            .entry(building_id.to_string())
            .or_default()
            .push(connection.clone());
        Ok(connection.clone())
    }
}
