use proptest::prelude::*;
use utmn_map_canvas::ViewportTransform;

fn viewport(offset_x: f64, offset_y: f64, scale: f64) -> ViewportTransform {
    let mut vp = ViewportTransform::new(800.0, 600.0);
    vp.set_offset(offset_x, offset_y);
    vp.zoom_to_scale_at(0.0, 0.0, scale);
    vp.set_offset(offset_x, offset_y);
    vp
}

proptest! {
    #[test]
    fn prop_zoom_keeps_anchor_fixed(
        offset_x in -500.0f64..500.0,
        offset_y in -500.0f64..500.0,
        scale in 0.2f64..10.0,
        sx in 0.0f64..800.0,
        sy in 0.0f64..600.0,
        factor in 0.5f64..2.0,
    ) {
        let mut vp = viewport(offset_x, offset_y, scale);
        let before = vp.to_world(sx, sy);
        vp.zoom_at(sx, sy, factor);
        let after = vp.to_world(sx, sy);
        prop_assert!((before.x - after.x).abs() < 1e-6);
        prop_assert!((before.y - after.y).abs() < 1e-6);
    }

    #[test]
    fn prop_scale_stays_within_limits(factors in proptest::collection::vec(0.01f64..100.0, 1..30)) {
        let mut vp = ViewportTransform::default();
        for factor in factors {
            vp.zoom_at(400.0, 300.0, factor);
            prop_assert!(vp.scale() >= 0.2 && vp.scale() <= 10.0);
        }
    }

    #[test]
    fn prop_world_screen_round_trip(
        offset_x in -500.0f64..500.0,
        scale in 0.2f64..10.0,
        wx in -1000.0f64..1000.0,
        wy in -1000.0f64..1000.0,
    ) {
        let vp = viewport(offset_x, -offset_x, scale);
        let screen = vp.to_screen(wx, wy);
        let world = vp.to_world(screen.x, screen.y);
        prop_assert!((world.x - wx).abs() < 1e-6);
        prop_assert!((world.y - wy).abs() < 1e-6);
    }
}

#[test]
fn test_zoom_formula() {
    let mut vp = ViewportTransform::default();
    vp.zoom_at(100.0, 50.0, 2.0);
    assert_eq!(vp.scale(), 2.0);
    assert_eq!(vp.offset_x(), -100.0);
    assert_eq!(vp.offset_y(), -50.0);
}

#[test]
fn test_zoom_clamps_at_max() {
    let mut vp = ViewportTransform::default();
    vp.zoom_at(0.0, 0.0, 50.0);
    assert_eq!(vp.scale(), 10.0);
    vp.zoom_at(0.0, 0.0, 0.001);
    assert_eq!(vp.scale(), 0.2);
}

#[test]
fn test_step_zoom_anchors_at_centre() {
    let mut vp = ViewportTransform::new(200.0, 100.0);
    let centre = vp.to_world(100.0, 50.0);
    vp.step_zoom(0.1);
    assert!((vp.scale() - 1.1).abs() < 1e-9);
    let after = vp.to_world(100.0, 50.0);
    assert!((centre.x - after.x).abs() < 1e-9);
    assert!((centre.y - after.y).abs() < 1e-9);
}

#[test]
fn test_pan_ignores_non_finite() {
    let mut vp = ViewportTransform::default();
    vp.pan_by(3.0, 4.0);
    vp.pan_by(f64::INFINITY, 1.0);
    assert_eq!((vp.offset_x(), vp.offset_y()), (3.0, 4.0));
}
