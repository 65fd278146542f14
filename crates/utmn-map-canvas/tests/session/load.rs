use std::sync::Arc;
use utmn_map_api::InMemoryMapSource;
use utmn_map_canvas::{
    DrawCommand, EditMode, LoadState, MapCanvas, SelectedInfo, Selection,
};
use utmn_map_core::{Error, LookupError, ObjectType, Point};
use utmn_map_settings::Config;

use crate::fixtures::{self, BUILDING};

pub fn canvas(source: &Arc<InMemoryMapSource>) -> MapCanvas {
    MapCanvas::new(source.clone(), BUILDING, &Config::default()).unwrap()
}

pub async fn loaded() -> (MapCanvas, Arc<InMemoryMapSource>) {
    let source = fixtures::source();
    let mut canvas = canvas(&source);
    canvas.load().await.unwrap();
    source.clear_calls();
    (canvas, source)
}

#[tokio::test]
async fn test_load_shows_first_floor() {
    let source = fixtures::source();
    let mut canvas = canvas(&source);
    assert_eq!(canvas.load_state(), &LoadState::Idle);

    canvas.load().await.unwrap();
    assert!(canvas.load_state().is_ready());
    assert_eq!(canvas.current_floor_id(), Some("f1"));
    assert_eq!(canvas.snapshot().unwrap().building.name, "Main Building");
    assert!(canvas.nodes().resolve("i2").is_some());
    assert!(canvas.nodes().resolve("d4").is_some());
}

#[tokio::test]
async fn test_load_failure_draws_empty_frame() {
    let source = fixtures::source();
    source.set_fail_reads(true);
    let mut canvas = canvas(&source);

    let err = canvas.load().await.unwrap_err();
    assert!(err.is_api_error());
    assert!(matches!(canvas.load_state(), LoadState::Failed(_)));
    assert_eq!(canvas.render_frame().commands(), &[DrawCommand::Clear]);
}

#[tokio::test]
async fn test_floor_change_clears_selection_and_points() {
    let (mut canvas, _) = loaded().await;
    canvas.click(15.0, 15.0);
    assert!(canvas.selection().is_some());

    canvas.set_current_floor("f2").unwrap();
    assert!(canvas.selection().is_none());
    assert_eq!(canvas.current_floor().unwrap().name(), "2");

    let err = canvas.set_current_floor("f9").unwrap_err();
    assert!(matches!(
        err,
        Error::Lookup(LookupError::FloorNotFound { .. })
    ));
    assert_eq!(canvas.current_floor_id(), Some("f2"));

    canvas.set_current_floor_by_name("1").unwrap();
    assert_eq!(canvas.current_floor_id(), Some("f1"));
}

#[tokio::test]
async fn test_mode_switch_clears_interaction() {
    let (mut canvas, _) = loaded().await;
    canvas.click(15.0, 15.0);
    canvas.set_mode(EditMode::Polygon);
    assert!(canvas.selection().is_none());

    canvas.click(1.0, 1.0);
    canvas.click(2.0, 1.0);
    assert_eq!(canvas.polygon_points().len(), 2);

    canvas.set_mode(EditMode::Move);
    assert!(canvas.polygon_points().is_empty());
    assert!(canvas.interaction().move_override.is_none());
    assert!(canvas.interaction().pending_draft.is_none());
}

#[tokio::test]
async fn test_object_selection_details() {
    let (mut canvas, _) = loaded().await;
    canvas.click(15.0, 15.0);
    assert_eq!(
        canvas.selection(),
        Some(&Selection::Object {
            id: "o1".into(),
            origin: Point::new(10.0, 10.0)
        })
    );

    let details = canvas.selection_details().unwrap();
    assert_eq!(details.building_name, "Main Building");
    assert_eq!(details.building_address, "Volodarskogo 6");
    assert_eq!(details.floor_number, 1);
    assert_eq!(
        details.info,
        SelectedInfo::Object {
            name: "Room 101".into(),
            alias: "Lab".into(),
            description: "Physics lab".into(),
            object_type: Some(ObjectType::Cabinet),
        }
    );
}

#[tokio::test]
async fn test_door_selection_details() {
    let (mut canvas, _) = loaded().await;
    canvas.click(31.0, 13.0);
    let details = canvas.selection_details().unwrap();
    assert_eq!(
        details.info,
        SelectedInfo::Door {
            label: "Room 101 (door 2)".into(),
            owner_name: "Room 101".into(),
        }
    );

    canvas.set_current_floor("f2").unwrap();
    canvas.click(13.0, 21.0);
    let details = canvas.selection_details().unwrap();
    assert_eq!(details.floor_number, 2);
    assert_eq!(
        details.info,
        SelectedInfo::Door {
            label: "Unnamed".into(),
            owner_name: "Unnamed".into(),
        }
    );
}

#[tokio::test]
async fn test_click_on_empty_space_clears_selection() {
    let (mut canvas, _) = loaded().await;
    canvas.click(15.0, 15.0);
    canvas.click(95.0, 35.0);
    assert!(canvas.selection().is_none());
    assert!(canvas.selection_details().is_none());
}
