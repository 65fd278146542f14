//! URL construction for the backend endpoints.
//!
//! Floors are addressed by name in admin URLs.

pub(crate) fn join(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

pub(crate) fn buildings() -> String {
    "/api/buildings".to_string()
}

pub(crate) fn objects(building: &str) -> String {
    format!("/api/buildings/{building}/objects")
}

pub(crate) fn graph_nodes(building: &str) -> String {
    format!("/api/buildings/{building}/graph/nodes")
}

pub(crate) fn intersections(building: &str) -> String {
    format!("/api/buildings/{building}/intersections")
}

pub(crate) fn connections(building: &str) -> String {
    format!("/api/buildings/{building}/connections")
}

pub(crate) fn route(building: &str) -> String {
    format!("/api/buildings/{building}/route")
}

pub(crate) fn search(building: &str) -> String {
    format!("/api/buildings/{building}/search")
}

pub(crate) fn categories() -> String {
    "/api/categories".to_string()
}

pub(crate) fn floor_objects(building: &str, floor: &str) -> String {
    format!("/api/buildings/{building}/floors/{floor}/objects")
}

pub(crate) fn floor_object(building: &str, floor: &str, object: &str) -> String {
    format!("/api/buildings/{building}/floors/{floor}/objects/{object}")
}

pub(crate) fn polygons(building: &str, floor: &str) -> String {
    format!("/api/buildings/{building}/floors/{floor}/poligons")
}

pub(crate) fn polygon_points(building: &str, floor: &str, polygon: &str) -> String {
    format!("/api/buildings/{building}/floors/{floor}/poligons/{polygon}/points")
}

pub(crate) fn admin_intersections(building: &str) -> String {
    format!("/api/buildings/{building}/route/intersections")
}

pub(crate) fn admin_connections(building: &str) -> String {
    format!("/api/buildings/{building}/route/connections")
}
