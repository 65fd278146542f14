//! Response envelopes used by the backend.
//!
//! Most list endpoints wrap their payload in a single named field. These types
//! exist only to unwrap that field; the rest of the engine works with the
//! core model.

use serde::{Deserialize, Serialize};
use utmn_map_core::{Building, BuildingSnapshot, Edge, GraphNode, Intersection};

/// `getObjects` is served both wrapped in `{"objects": ...}` and flat.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ObjectsEnvelope {
    Wrapped { objects: BuildingSnapshot },
    Flat(BuildingSnapshot),
}

impl ObjectsEnvelope {
    pub(crate) fn into_snapshot(self) -> BuildingSnapshot {
        match self {
            ObjectsEnvelope::Wrapped { objects } => objects,
            ObjectsEnvelope::Flat(snapshot) => snapshot,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BuildingsEnvelope {
    #[serde(default)]
    pub buildings: Vec<Building>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NodesEnvelope {
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IntersectionsEnvelope {
    #[serde(default)]
    pub intersections: Vec<Intersection>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConnectionsEnvelope {
    #[serde(default)]
    pub connections: Vec<Edge>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RouteEnvelope {
    #[serde(default, alias = "edges")]
    pub route: Vec<Edge>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchEnvelope {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoriesEnvelope {
    #[serde(default)]
    pub categories: Vec<ObjectTypeInfo>,
}

/// One search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub object_id: String,
    #[serde(default)]
    pub door_id: String,
    pub object_type_id: u32,
    #[serde(default)]
    pub preview: String,
}

/// Object type as listed by `/api/categories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectTypeInfo {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub alias: String,
}
