use std::time::{Duration, Instant};
use utmn_map_canvas::{ManualFrameScheduler, MapCanvas};
use utmn_map_core::{Error, LookupError, Point};
use utmn_map_settings::Config;

use super::load::loaded;
use crate::fixtures::{self, BUILDING};

#[tokio::test]
async fn test_route_from_selection_is_drawn_per_floor() {
    let (mut canvas, _) = loaded().await;

    canvas.click(15.0, 15.0);
    let start = canvas.selection_endpoint().unwrap();
    assert_eq!(start, "d1");

    let route = canvas.build_route(&start, "d4").await.unwrap();
    assert_eq!(route.len(), 3);
    assert_eq!(canvas.route_progress(), 0.0);
    assert!(canvas.render_frame().route_lines().is_empty());

    canvas.finish_route_animation();
    assert_eq!(
        canvas.render_frame().route_lines(),
        vec![(Point::new(29.0, 15.0), Point::new(40.0, 15.0))]
    );

    canvas.set_current_floor("f2").unwrap();
    assert_eq!(
        canvas.render_frame().route_lines(),
        vec![(Point::new(40.0, 15.0), Point::new(13.0, 21.0))]
    );
}

#[tokio::test]
async fn test_object_without_door_is_not_an_endpoint() {
    let (mut canvas, _) = loaded().await;
    canvas.click(55.0, 15.0);
    assert!(matches!(
        canvas.selection_endpoint(),
        Err(Error::Lookup(LookupError::NoDoor { .. }))
    ));

    canvas.click(95.0, 35.0);
    assert!(matches!(
        canvas.selection_endpoint(),
        Err(Error::Lookup(LookupError::NoEndpoint))
    ));
}

#[tokio::test]
async fn test_reassignment_resets_progress() {
    let (mut canvas, _) = loaded().await;
    let start = Instant::now();
    canvas.set_route_at(Some(fixtures::route()), start);
    let p = canvas.tick_animation_at(start + Duration::from_millis(720));
    assert!((p - 0.5).abs() < 1e-9);

    canvas.set_route_at(Some(fixtures::route()), start + Duration::from_millis(720));
    assert_eq!(canvas.route_progress(), 0.0);

    canvas.clear_route();
    assert!(canvas.route().is_none());
    assert_eq!(canvas.route_progress(), 1.0);
    assert!(canvas.render_frame().route_lines().is_empty());
}

#[tokio::test]
async fn test_frames_drive_animation_and_teardown_cancels() {
    let source = fixtures::source();
    let scheduler = ManualFrameScheduler::new();
    let mut canvas = MapCanvas::new(source.clone(), BUILDING, &Config::default())
        .unwrap()
        .with_frame_scheduler(Box::new(scheduler.clone()));
    canvas.load().await.unwrap();

    canvas.set_route(Some(fixtures::route()));
    let tick = scheduler.next_tick().unwrap();
    assert!(canvas.on_frame(tick));

    canvas.teardown();
    assert!(scheduler.next_tick().is_none());
    assert_eq!(scheduler.cancelled(), 1);
}

#[tokio::test]
async fn test_failed_route_request_keeps_previous_route() {
    let (mut canvas, source) = loaded().await;
    canvas.set_route(Some(fixtures::route()));
    source.set_fail_reads(true);

    assert!(canvas.build_route("d1", "d4").await.is_err());
    assert_eq!(canvas.route(), Some(&fixtures::route()));
}

#[tokio::test]
async fn test_unknown_route_node_is_not_requested() {
    let (mut canvas, source) = loaded().await;
    let err = canvas.build_route("d1", "nowhere").await.unwrap_err();
    assert!(matches!(
        err,
        Error::Lookup(LookupError::NodeNotFound { ref node_id }) if node_id == "nowhere"
    ));
    assert!(source.calls().is_empty());
    assert!(canvas.route().is_none());
}
