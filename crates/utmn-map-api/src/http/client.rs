//! Blocking `ureq` agent driven from async code through `spawn_blocking`.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use utmn_map_core::{
    ApiError, Building, BuildingSnapshot, Edge, Error, Floor, GraphNode, Intersection,
    NewIntersection, NewObject, NewPolygon, ObjectPatch, ObjectType, PlacedObject, PolygonPoint,
    PolygonRecord, Result, Route, RouteRequest,
};
use utmn_map_settings::ApiSettings;

use super::paths;
use crate::source::MapDataSource;
use crate::wire::{
    BuildingsEnvelope, CategoriesEnvelope, ConnectionsEnvelope, IntersectionsEnvelope,
    NodesEnvelope, ObjectTypeInfo, ObjectsEnvelope, RouteEnvelope, SearchEnvelope, SearchResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

/// A fully described request, movable onto the blocking pool.
#[derive(Debug, Clone)]
struct Call {
    method: Method,
    url: String,
    query: Vec<(String, String)>,
    body: Option<String>,
    token: Option<String>,
}

/// HTTP data source for the public and admin backends.
pub struct HttpMapClient {
    agent: ureq::Agent,
    public_base: String,
    admin_base: String,
    timeout_ms: u64,
    access_token: RwLock<Option<String>>,
}

impl HttpMapClient {
    pub fn new(public_base: impl Into<String>, admin_base: impl Into<String>, timeout_ms: u64) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_millis(timeout_ms)))
            .http_status_as_error(false)
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
            public_base: public_base.into(),
            admin_base: admin_base.into(),
            timeout_ms,
            access_token: RwLock::new(None),
        }
    }

    /// Build a client from the `[api]` configuration section.
    pub fn from_settings(settings: &ApiSettings) -> Self {
        let client = Self::new(
            settings.public_base_url.clone(),
            settings.admin_base_url.clone(),
            settings.timeout_ms,
        );
        client.set_access_token(settings.access_token.clone());
        client
    }

    /// Replace the bearer token used for admin calls.
    pub fn set_access_token(&self, token: Option<String>) {
        *self.access_token.write() = token;
    }

    pub fn public_base(&self) -> &str {
        &self.public_base
    }

    pub fn admin_base(&self) -> &str {
        &self.admin_base
    }

    fn public_call(&self, method: Method, path: String) -> Call {
        Call {
            method,
            url: paths::join(&self.public_base, &path),
            query: Vec::new(),
            body: None,
            token: None,
        }
    }

    fn admin_call(&self, method: Method, path: String) -> Call {
        Call {
            method,
            url: paths::join(&self.admin_base, &path),
            query: Vec::new(),
            body: None,
            token: self.access_token.read().clone(),
        }
    }

    fn with_json<T: Serialize + ?Sized>(mut call: Call, body: &T) -> Result<Call> {
        call.body = Some(serde_json::to_string(body)?);
        Ok(call)
    }

    async fn send(&self, call: Call) -> Result<String> {
        let agent = self.agent.clone();
        let timeout_ms = self.timeout_ms;
        let url = call.url.clone();
        tracing::debug!("{:?} {}", call.method, call.url);

        let outcome = tokio::task::spawn_blocking(move || execute(&agent, &call, timeout_ms))
            .await
            .map_err(|e| ApiError::Transport {
                url: url.clone(),
                message: e.to_string(),
            })?;

        outcome.map_err(|e| {
            tracing::warn!("Request failed: {}", e);
            Error::from(e)
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, call: Call) -> Result<T> {
        let url = call.url.clone();
        let text = self.send(call).await?;
        decode(&url, &text)
    }
}

fn decode<T: DeserializeOwned>(url: &str, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|e| {
        Error::from(ApiError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    })
}

fn with_headers<B>(
    mut request: ureq::RequestBuilder<B>,
    call: &Call,
) -> ureq::RequestBuilder<B> {
    for (key, value) in &call.query {
        request = request.query(key, value);
    }
    if let Some(token) = &call.token {
        request = request.header("Authorization", format!("Bearer {token}"));
    }
    request.header("Accept", "application/json")
}

fn execute(agent: &ureq::Agent, call: &Call, timeout_ms: u64) -> std::result::Result<String, ApiError> {
    let body = call.body.as_deref().unwrap_or("");
    let result = match call.method {
        Method::Get => with_headers(agent.get(&call.url), call).call(),
        Method::Delete => with_headers(agent.delete(&call.url), call).call(),
        Method::Post => with_headers(agent.post(&call.url), call)
            .header("Content-Type", "application/json")
            .send(body),
        Method::Patch => with_headers(agent.patch(&call.url), call)
            .header("Content-Type", "application/json")
            .send(body),
    };

    let mut response = result.map_err(|e| match e {
        ureq::Error::Timeout(_) => ApiError::Timeout {
            url: call.url.clone(),
            timeout_ms,
        },
        other => ApiError::Transport {
            url: call.url.clone(),
            message: other.to_string(),
        },
    })?;

    let status = response.status().as_u16();
    match status {
        200..=299 => {}
        401 | 403 => {
            return Err(ApiError::Unauthorized {
                url: call.url.clone(),
            })
        }
        _ => {
            return Err(ApiError::Status {
                status,
                url: call.url.clone(),
            })
        }
    }

    response
        .body_mut()
        .read_to_string()
        .map_err(|e| ApiError::Transport {
            url: call.url.clone(),
            message: e.to_string(),
        })
}

#[async_trait]
impl MapDataSource for HttpMapClient {
    async fn get_buildings(&self) -> Result<Vec<Building>> {
        let envelope: BuildingsEnvelope = self
            .fetch(self.public_call(Method::Get, paths::buildings()))
            .await?;
        Ok(envelope.buildings)
    }

    async fn get_objects(&self, building_id: &str) -> Result<BuildingSnapshot> {
        let envelope: ObjectsEnvelope = self
            .fetch(self.public_call(Method::Get, paths::objects(building_id)))
            .await?;
        let mut snapshot = envelope.into_snapshot();
        snapshot.normalize();
        tracing::info!(
            "Loaded building {} with {} floors",
            building_id,
            snapshot.floors.len()
        );
        Ok(snapshot)
    }

    async fn get_graph_nodes(&self, building_id: &str) -> Result<Vec<GraphNode>> {
        let envelope: NodesEnvelope = self
            .fetch(self.public_call(Method::Get, paths::graph_nodes(building_id)))
            .await?;
        Ok(envelope.nodes)
    }

    async fn get_intersections(&self, building_id: &str) -> Result<Vec<Intersection>> {
        let envelope: IntersectionsEnvelope = self
            .fetch(self.public_call(Method::Get, paths::intersections(building_id)))
            .await?;
        Ok(envelope.intersections)
    }

    async fn get_connections(&self, building_id: &str) -> Result<Vec<Edge>> {
        let envelope: ConnectionsEnvelope = self
            .fetch(self.public_call(Method::Get, paths::connections(building_id)))
            .await?;
        Ok(envelope.connections)
    }

    async fn build_route(&self, building_id: &str, request: &RouteRequest) -> Result<Route> {
        let call = Self::with_json(
            self.public_call(Method::Post, paths::route(building_id)),
            request,
        )?;
        let envelope: RouteEnvelope = self.fetch(call).await?;
        Ok(Route::new(envelope.route))
    }

    async fn search(
        &self,
        building_id: &str,
        query: &str,
        categories: &[ObjectType],
    ) -> Result<Vec<SearchResult>> {
        let mut call = self.public_call(Method::Get, paths::search(building_id));
        if !query.is_empty() {
            call.query.push(("query".to_string(), query.to_string()));
        }
        for category in categories {
            call.query
                .push(("category".to_string(), category.name().to_string()));
        }
        let envelope: SearchEnvelope = self.fetch(call).await?;
        Ok(envelope.results)
    }

    async fn get_categories(&self) -> Result<Vec<ObjectTypeInfo>> {
        let envelope: CategoriesEnvelope = self
            .fetch(self.public_call(Method::Get, paths::categories()))
            .await?;
        Ok(envelope.categories)
    }

    async fn create_object(
        &self,
        building_id: &str,
        floor: &Floor,
        object: &NewObject,
    ) -> Result<PlacedObject> {
        let call = Self::with_json(
            self.admin_call(Method::Post, paths::floor_objects(building_id, &floor.name)),
            object,
        )?;
        let created: PlacedObject = self.fetch(call).await?;
        tracing::info!("Created object {} on floor {}", created.id, floor.name);
        Ok(created)
    }

    async fn update_object(
        &self,
        building_id: &str,
        floor: &Floor,
        object_id: &str,
        patch: &ObjectPatch,
    ) -> Result<PlacedObject> {
        let call = Self::with_json(
            self.admin_call(
                Method::Patch,
                paths::floor_object(building_id, &floor.name, object_id),
            ),
            patch,
        )?;
        let updated: PlacedObject = self.fetch(call).await?;
        tracing::info!("Updated object {}", object_id);
        Ok(updated)
    }

    async fn delete_object(&self, building_id: &str, floor: &Floor, object_id: &str) -> Result<()> {
        self.send(self.admin_call(
            Method::Delete,
            paths::floor_object(building_id, &floor.name, object_id),
        ))
        .await?;
        tracing::info!("Deleted object {}", object_id);
        Ok(())
    }

    async fn create_polygon(
        &self,
        building_id: &str,
        floor: &Floor,
        polygon: &NewPolygon,
    ) -> Result<PolygonRecord> {
        let call = Self::with_json(
            self.admin_call(Method::Post, paths::polygons(building_id, &floor.name)),
            polygon,
        )?;
        self.fetch(call).await
    }

    async fn add_polygon_points(
        &self,
        building_id: &str,
        floor: &Floor,
        polygon_id: &str,
        points: &[PolygonPoint],
    ) -> Result<()> {
        let call = Self::with_json(
            self.admin_call(
                Method::Post,
                paths::polygon_points(building_id, &floor.name, polygon_id),
            ),
            points,
        )?;
        self.send(call).await?;
        tracing::info!("Saved {} points for polygon {}", points.len(), polygon_id);
        Ok(())
    }

    async fn add_intersection(
        &self,
        building_id: &str,
        intersection: &NewIntersection,
    ) -> Result<Intersection> {
        let call = Self::with_json(
            self.admin_call(Method::Post, paths::admin_intersections(building_id)),
            intersection,
        )?;
        self.fetch(call).await
    }

    async fn add_connection(&self, building_id: &str, connection: &Edge) -> Result<Edge> {
        let call = Self::with_json(
            self.admin_call(Method::Post, paths::admin_connections(building_id)),
            connection,
        )?;
        self.fetch(call).await
    }
}
