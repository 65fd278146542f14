use std::time::{Duration, Instant};
use utmn_map_canvas::{FrameTick, ManualFrameScheduler, RouteAnimator, RouteTiming};
use utmn_map_core::Route;

use crate::fixtures;

fn animator() -> (RouteAnimator, ManualFrameScheduler) {
    let scheduler = ManualFrameScheduler::new();
    let animator = RouteAnimator::new(RouteTiming::default(), Box::new(scheduler.clone()));
    (animator, scheduler)
}

#[test]
fn test_duration_scales_with_edges() {
    let (mut animator, _) = animator();
    animator.set_route(Some(fixtures::route()), Instant::now());
    assert_eq!(animator.duration(), Duration::from_millis(1200 + 3 * 80));
}

#[test]
fn test_progress_is_monotonic_and_completes() {
    let (mut animator, scheduler) = animator();
    let start = Instant::now();
    animator.set_route(Some(fixtures::route()), start);
    assert_eq!(animator.progress(), 0.0);
    assert!(scheduler.next_tick().is_some());

    let mut last = 0.0;
    for ms in (0..=1440).step_by(16) {
        let p = animator.tick(start + Duration::from_millis(ms));
        assert!(p >= last);
        assert!(p <= 1.0);
        last = p;
    }
    assert_eq!(animator.tick(start + Duration::from_millis(1440)), 1.0);
    assert!(!animator.is_running());
    assert!(scheduler.next_tick().is_none());

    // An older instant never moves progress back.
    assert_eq!(animator.tick(start), 1.0);
}

#[test]
fn test_reassignment_restarts() {
    let (mut animator, scheduler) = animator();
    let start = Instant::now();
    animator.set_route(Some(fixtures::route()), start);
    animator.tick(start + Duration::from_millis(1000));
    assert!(animator.progress() > 0.5);

    // Same route again is still a new assignment.
    animator.set_route(Some(fixtures::route()), start + Duration::from_millis(1000));
    assert_eq!(animator.progress(), 0.0);
    assert_eq!(scheduler.started(), vec![1, 2]);
    assert_eq!(scheduler.cancelled(), 1);
}

#[test]
fn test_stale_frames_are_ignored() {
    let (mut animator, _) = animator();
    let start = Instant::now();
    animator.set_route(Some(fixtures::route()), start);
    let stale = FrameTick {
        generation: animator.generation(),
    };
    animator.set_route(Some(fixtures::route()), start);

    assert!(!animator.on_frame(stale, start + Duration::from_secs(5)));
    assert_eq!(animator.progress(), 0.0);
}

#[test]
fn test_empty_or_cleared_route_is_complete() {
    let (mut animator, scheduler) = animator();
    animator.set_route(Some(fixtures::route()), Instant::now());
    animator.set_route(Some(Route::default()), Instant::now());
    assert_eq!(animator.progress(), 1.0);
    assert!(scheduler.next_tick().is_none());

    animator.set_route(None, Instant::now());
    assert!(animator.route().is_none());
    assert_eq!(animator.progress(), 1.0);
}
