//! Navigation graph as returned by the routing backend.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Door,
    Intersection,
}

/// Node of the navigation graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub floor_id: String,
}

impl GraphNode {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Corridor junction that is not a door.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intersection {
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub floor_id: String,
}

impl Intersection {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Directed edge between two node ids. Stored connections use the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from_id: String,
    pub to_id: String,
    #[serde(default)]
    pub weight: f64,
}

impl Edge {
    pub fn new(from_id: impl Into<String>, to_id: impl Into<String>, weight: f64) -> Self {
        Self {
            from_id: from_id.into(),
            to_id: to_id.into(),
            weight,
        }
    }
}

/// Ordered list of edges forming a path. May span several floors.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route {
    edges: Vec<Edge>,
}

impl Route {
    pub fn new(edges: Vec<Edge>) -> Self {
        Self { edges }
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|e| e.weight).sum()
    }
}

impl From<Vec<Edge>> for Route {
    fn from(edges: Vec<Edge>) -> Self {
        Self::new(edges)
    }
}

/// Route query between two nodes with optional intermediate waypoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub start_node_id: String,
    pub end_node_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waypoints: Option<Vec<String>>,
}

impl RouteRequest {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start_node_id: start.into(),
            end_node_id: end.into(),
            waypoints: None,
        }
    }

    pub fn with_waypoints(mut self, waypoints: Vec<String>) -> Self {
        self.waypoints = Some(waypoints);
        self
    }
}

/// Payload for registering a new intersection node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIntersection {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub floor_id: String,
}
