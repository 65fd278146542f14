use utmn_map_api::RecordedCall;
use utmn_map_canvas::{DrawCommand, EditMode, InteractionOutcome, NewObjectForm};
use utmn_map_core::{EditError, Error, ObjectType, Point, PolygonPoint, Rect};

use super::load::loaded;
use crate::fixtures::BUILDING;

#[tokio::test]
async fn test_move_round_trip() {
    let (mut canvas, source) = loaded().await;
    canvas.set_mode(EditMode::Move);

    assert_eq!(canvas.pointer_down(12.0, 12.0), InteractionOutcome::None);
    assert_eq!(canvas.pointer_move(17.0, 17.0), InteractionOutcome::Redraw);

    // The renderer prefers the override while dragging.
    let moved = Rect::new(15.0, 15.0, 20.0, 10.0);
    assert!(canvas
        .render_frame()
        .iter()
        .any(|c| matches!(c, DrawCommand::Rect { rect, .. } if *rect == moved)));
    assert_eq!(canvas.snapshot().unwrap().find_object("o1").unwrap().1.x, 10.0);

    assert_eq!(
        canvas.pointer_up(17.0, 17.0),
        InteractionOutcome::CommitMove {
            object_id: "o1".into(),
            x: 15.0,
            y: 15.0
        }
    );

    let updated = canvas.commit_move().await.unwrap();
    assert_eq!((updated.x, updated.y), (15.0, 15.0));

    let mutations = source.mutations();
    assert_eq!(mutations.len(), 1);
    match &mutations[0] {
        RecordedCall::UpdateObject {
            object_id, patch, ..
        } => {
            assert_eq!(object_id, "o1");
            assert_eq!((patch.x, patch.y), (Some(15.0), Some(15.0)));
            assert_eq!(patch.name.as_deref(), Some("Room 101"));
            assert_eq!(patch.width, Some(20.0));
        }
        other => panic!("unexpected mutation {other:?}"),
    }

    let (_, object) = canvas.snapshot().unwrap().find_object("o1").unwrap();
    assert_eq!((object.x, object.y), (15.0, 15.0));
    assert!(canvas.interaction().move_override.is_none());
}

#[tokio::test]
async fn test_failed_move_discards_override() {
    let (mut canvas, source) = loaded().await;
    source.set_fail_mutations(true);
    canvas.set_mode(EditMode::Move);

    canvas.pointer_down(12.0, 12.0);
    canvas.pointer_move(22.0, 12.0);
    canvas.pointer_up(22.0, 12.0);

    assert!(canvas.commit_move().await.unwrap_err().is_api_error());
    assert!(canvas.interaction().move_override.is_none());
    let (_, object) = canvas.snapshot().unwrap().find_object("o1").unwrap();
    assert_eq!((object.x, object.y), (10.0, 10.0));
}

#[tokio::test]
async fn test_move_without_object_commits_nothing() {
    let (mut canvas, source) = loaded().await;
    canvas.set_mode(EditMode::Move);

    canvas.pointer_down(95.0, 35.0);
    canvas.pointer_move(99.0, 35.0);
    assert_eq!(canvas.pointer_up(99.0, 35.0), InteractionOutcome::None);
    assert!(matches!(
        canvas.commit_move().await,
        Err(Error::Edit(EditError::NothingToCommit))
    ));
    assert!(source.mutations().is_empty());
}

#[tokio::test]
async fn test_polygon_needs_three_points() {
    let (mut canvas, source) = loaded().await;
    canvas.set_mode(EditMode::Polygon);
    canvas.click(0.0, 0.0);
    canvas.click(10.0, 0.0);

    assert!(matches!(
        canvas.finish_polygon().await,
        Err(Error::Edit(EditError::NotEnoughPolygonPoints { count: 2 }))
    ));
    assert!(source.mutations().is_empty());
    assert_eq!(canvas.polygon_points().len(), 2);
}

#[tokio::test]
async fn test_polygon_finish_submits_ordered_points() {
    let (mut canvas, source) = loaded().await;
    canvas.set_mode(EditMode::Polygon);
    for (x, y) in [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)] {
        assert_eq!(canvas.click(x, y), InteractionOutcome::Redraw);
    }

    let record = canvas.finish_polygon().await.unwrap();
    assert_eq!(record.label, "Floor background 1");
    assert_eq!(record.z_index, 0);

    let mutations = source.mutations();
    assert_eq!(mutations.len(), 2);
    assert!(matches!(&mutations[0], RecordedCall::CreatePolygon { .. }));
    match &mutations[1] {
        RecordedCall::AddPolygonPoints {
            polygon_id, points, ..
        } => {
            assert_eq!(polygon_id, &record.id);
            let orders: Vec<u32> = points.iter().map(|p| p.point_order).collect();
            assert_eq!(orders, vec![0, 1, 2]);
            assert_eq!(
                points[2],
                PolygonPoint {
                    point_order: 2,
                    x: 10.0,
                    y: 10.0
                }
            );
        }
        other => panic!("unexpected mutation {other:?}"),
    }

    assert_eq!(canvas.mode(), EditMode::Select);
    assert!(canvas.polygon_points().is_empty());
    let floor = canvas.current_floor().unwrap();
    assert!(floor
        .background
        .iter()
        .any(|p| p.id.as_deref() == Some(record.id.as_str()) && p.points.len() == 3));
}

#[tokio::test]
async fn test_create_object_at_clicked_position() {
    let (mut canvas, source) = loaded().await;

    let err = canvas
        .submit_create(NewObjectForm::new(ObjectType::Cafe, "Cafe"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Edit(EditError::NoPendingDraft)));

    canvas.set_mode(EditMode::Create);
    assert_eq!(
        canvas.click(40.0, 30.0),
        InteractionOutcome::OpenCreateForm(Point::new(40.0, 30.0))
    );

    let form = NewObjectForm::new(ObjectType::Cafe, "Cafe").with_alias("Coffee");
    let created = canvas.submit_create(form).await.unwrap();
    assert_eq!((created.x, created.y), (40.0, 30.0));
    assert_eq!((created.width, created.height), (2.0, 2.0));
    assert_eq!(created.object_type_id, ObjectType::Cafe.id());

    assert_eq!(source.mutations().len(), 1);
    assert!(canvas.interaction().pending_draft.is_none());
    assert!(canvas
        .snapshot()
        .unwrap()
        .find_object(&created.id)
        .is_some());
}

#[tokio::test]
async fn test_drag_is_not_a_click() {
    let (mut canvas, _) = loaded().await;

    canvas.pointer_down(15.0, 15.0);
    canvas.pointer_move(25.0, 15.0);
    canvas.pointer_up(25.0, 15.0);
    assert_eq!(canvas.click(25.0, 15.0), InteractionOutcome::None);
    assert!(canvas.selection().is_none());
    assert_eq!(canvas.viewport().offset_x(), 10.0);

    // A small wobble still counts as a click.
    canvas.reset_view();
    canvas.pointer_down(15.0, 15.0);
    canvas.pointer_move(16.0, 15.0);
    canvas.pointer_up(16.0, 15.0);
    assert_eq!(canvas.click(16.0, 15.0), InteractionOutcome::Redraw);
    assert!(canvas.selection().is_some());
}

#[tokio::test]
async fn test_zoom_input_by_mode() {
    let (mut canvas, _) = loaded().await;

    assert!(canvas.wheel(100.0, 100.0, -1.0));
    assert!((canvas.viewport().scale() - 1.05).abs() < 1e-9);

    canvas.set_mode(EditMode::Move);
    assert!(!canvas.wheel(100.0, 100.0, -1.0));
    assert!(!canvas.touch_start(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)]));
    assert!((canvas.viewport().scale() - 1.05).abs() < 1e-9);

    // Buttons work in every mode.
    canvas.zoom_in();
    assert!((canvas.viewport().scale() - 1.15).abs() < 1e-9);
    canvas.zoom_out();
    canvas.reset_view();
    assert_eq!(canvas.viewport().scale(), 1.0);
}

#[tokio::test]
async fn test_pinch_zoom_in_select_mode() {
    let (mut canvas, _) = loaded().await;
    canvas.reset_view();
    let anchor = canvas.viewport().to_world(150.0, 100.0);

    assert!(canvas.touch_start(&[Point::new(100.0, 100.0), Point::new(200.0, 100.0)]));
    assert!(canvas.touch_move(&[Point::new(50.0, 100.0), Point::new(250.0, 100.0)]));
    assert!((canvas.viewport().scale() - 2.0).abs() < 1e-9);

    // The pinch centre stays over the same world point.
    let after = canvas.viewport().to_world(150.0, 100.0);
    assert!((after.x - anchor.x).abs() < 1e-9);
    assert!((after.y - anchor.y).abs() < 1e-9);

    // Lifting one finger turns the gesture into a pan.
    canvas.touch_end(&[Point::new(250.0, 100.0)]);
    let before = canvas.viewport().offset_x();
    assert!(canvas.touch_move(&[Point::new(260.0, 100.0)]));
    assert_eq!(canvas.viewport().offset_x(), before + 10.0);
}

#[tokio::test]
async fn test_create_saved_when_refetch_fails() {
    let (mut canvas, source) = loaded().await;
    canvas.set_mode(EditMode::Create);
    canvas.click(40.0, 30.0);
    source.set_fail_reads(true);

    let created = canvas
        .submit_create(NewObjectForm::new(ObjectType::Cafe, "Cafe"))
        .await
        .unwrap();
    assert_eq!(source.mutations().len(), 1);
    assert!(source
        .snapshot(BUILDING)
        .unwrap()
        .find_object(&created.id)
        .is_some());
    assert!(canvas.interaction().pending_draft.is_none());
    assert!(canvas.is_stale());
    assert!(canvas.snapshot().unwrap().find_object(&created.id).is_none());

    source.set_fail_reads(false);
    canvas.refresh().await.unwrap();
    assert!(!canvas.is_stale());
    assert!(canvas.snapshot().unwrap().find_object(&created.id).is_some());
}

#[tokio::test]
async fn test_move_saved_when_refetch_fails() {
    let (mut canvas, source) = loaded().await;
    canvas.set_mode(EditMode::Move);
    canvas.pointer_down(12.0, 12.0);
    canvas.pointer_move(17.0, 17.0);
    canvas.pointer_up(17.0, 17.0);
    source.set_fail_reads(true);

    let updated = canvas.commit_move().await.unwrap();
    assert_eq!((updated.x, updated.y), (15.0, 15.0));
    assert!(canvas.is_stale());
    assert!(canvas.interaction().move_override.is_none());

    let stored = source.snapshot(BUILDING).unwrap();
    let (_, object) = stored.find_object("o1").unwrap();
    assert_eq!((object.x, object.y), (15.0, 15.0));
    let (_, shown) = canvas.snapshot().unwrap().find_object("o1").unwrap();
    assert_eq!((shown.x, shown.y), (10.0, 10.0));
}

#[tokio::test]
async fn test_polygon_saved_when_refetch_fails() {
    let (mut canvas, source) = loaded().await;
    canvas.set_mode(EditMode::Polygon);
    for (x, y) in [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)] {
        canvas.click(x, y);
    }
    source.set_fail_reads(true);

    let record = canvas.finish_polygon().await.unwrap();
    assert_eq!(record.label, "Floor background 1");
    assert_eq!(source.mutations().len(), 2);
    assert!(canvas.is_stale());
    assert_eq!(canvas.mode(), EditMode::Select);
    assert!(canvas.polygon_points().is_empty());
}
