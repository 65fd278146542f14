//! Admin-side background polygon records.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Polygon as created by the admin API. Points are attached in a second call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonRecord {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub z_index: i32,
}

/// Creation payload for a polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPolygon {
    pub label: String,
    pub z_index: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolygonPoint {
    pub point_order: u32,
    pub x: f64,
    pub y: f64,
}

impl PolygonPoint {
    /// Numbers `points` consecutively from zero.
    pub fn sequence(points: &[Point]) -> Vec<PolygonPoint> {
        points
            .iter()
            .enumerate()
            .map(|(i, p)| PolygonPoint {
                point_order: i as u32,
                x: p.x,
                y: p.y,
            })
            .collect()
    }
}
