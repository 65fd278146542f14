//! Resolves route node ids to floor positions.

use std::collections::HashMap;

use utmn_map_core::{BuildingSnapshot, GraphNode, Intersection, Point, Route};

/// Where a node's position came from, in resolution priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeSource {
    /// Centre of a door owned by `object_id`
    Door { object_id: String },
    Intersection,
    /// Any other graph node the backend listed
    GraphNode,
    /// Centre of an object whose id was used as a node id
    ObjectCentre,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedNode {
    pub position: Point,
    pub floor_id: String,
    pub source: NodeSource,
}

/// One drawable route edge on a single floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSegment {
    pub from: Point,
    pub to: Point,
}

impl RouteSegment {
    pub fn length(&self) -> f64 {
        self.from.distance_to(&self.to)
    }
}

/// Lookup table from node id to position and floor.
///
/// Doors win over intersections, intersections over other graph nodes, and
/// object centres are the last resort.
#[derive(Debug, Clone, Default)]
pub struct NodeIndex {
    nodes: HashMap<String, ResolvedNode>,
}

impl NodeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(
        snapshot: &BuildingSnapshot,
        intersections: &[Intersection],
        graph_nodes: &[GraphNode],
    ) -> Self {
        let mut nodes: HashMap<String, ResolvedNode> = HashMap::new();

        for floor in &snapshot.floors {
            for object in &floor.objects {
                for door in &object.doors {
                    nodes.entry(door.id.clone()).or_insert_with(|| ResolvedNode {
                        position: door.center(),
                        floor_id: floor.id().to_string(),
                        source: NodeSource::Door {
                            object_id: object.id.clone(),
                        },
                    });
                }
            }
        }

        for intersection in intersections {
            nodes
                .entry(intersection.id.clone())
                .or_insert_with(|| ResolvedNode {
                    position: intersection.position(),
                    floor_id: intersection.floor_id.clone(),
                    source: NodeSource::Intersection,
                });
        }

        for node in graph_nodes {
            nodes.entry(node.id.clone()).or_insert_with(|| ResolvedNode {
                position: node.position(),
                floor_id: node.floor_id.clone(),
                source: NodeSource::GraphNode,
            });
        }

        for floor in &snapshot.floors {
            for object in &floor.objects {
                nodes.entry(object.id.clone()).or_insert_with(|| ResolvedNode {
                    position: object.center(),
                    floor_id: floor.id().to_string(),
                    source: NodeSource::ObjectCentre,
                });
            }
        }

        Self { nodes }
    }

    pub fn resolve(&self, node_id: &str) -> Option<&ResolvedNode> {
        self.nodes.get(node_id)
    }

    pub fn floor_of(&self, node_id: &str) -> Option<&str> {
        self.resolve(node_id).map(|n| n.floor_id.as_str())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Edges of `route` whose both endpoints are on `floor_id`, in route order.
    /// Edges with an unresolvable endpoint are dropped.
    pub fn floor_segments(&self, route: &Route, floor_id: &str) -> Vec<RouteSegment> {
        route
            .edges()
            .iter()
            .filter_map(|edge| {
                let from = self.resolve(&edge.from_id)?;
                let to = self.resolve(&edge.to_id)?;
                (from.floor_id == floor_id && to.floor_id == floor_id).then_some(RouteSegment {
                    from: from.position,
                    to: to.position,
                })
            })
            .collect()
    }
}

/// Cuts `segments` so that only `progress` of their total length remains.
/// The last kept segment is interpolated.
pub(crate) fn reveal(segments: &[RouteSegment], progress: f64) -> Vec<RouteSegment> {
    let total: f64 = segments.iter().map(RouteSegment::length).sum();
    let mut remain = total * progress.clamp(0.0, 1.0);
    let mut out = Vec::new();
    for segment in segments {
        if remain <= 0.0 {
            break;
        }
        let len = segment.length();
        if remain >= len {
            out.push(*segment);
            remain -= len;
        } else {
            let t = remain / len;
            out.push(RouteSegment {
                from: segment.from,
                to: segment.from.lerp(&segment.to, t),
            });
            remain = 0.0;
        }
    }
    out
}
