use utmn_map_canvas::{hit_object, hit_test, route_endpoint, Hit};
use utmn_map_core::LookupError;

use crate::fixtures;

#[test]
fn test_boundary_is_inclusive() {
    let snapshot = fixtures::snapshot();
    let floor = snapshot.floor("f1").unwrap();
    for (x, y) in [(10.0, 10.0), (30.0, 20.0), (10.0, 20.0), (30.0, 10.0)] {
        match hit_test(x, y, floor) {
            Hit::Object(o) => assert_eq!(o.id, "o1", "at ({x}, {y})"),
            other => panic!("expected o1 at ({x}, {y}), got {other:?}"),
        }
    }
    assert!(hit_test(9.999, 10.0, floor).is_none());
}

#[test]
fn test_object_beats_overlapping_door() {
    let snapshot = fixtures::snapshot();
    let floor = snapshot.floor("f1").unwrap();
    // d1 lies inside o1.
    assert!(matches!(hit_test(29.0, 15.0, floor), Hit::Object(o) if o.id == "o1"));
}

#[test]
fn test_door_outside_object() {
    let snapshot = fixtures::snapshot();
    let floor = snapshot.floor("f1").unwrap();
    match hit_test(31.0, 13.0, floor) {
        Hit::Door { door, owner } => {
            assert_eq!(door.id, "d2");
            assert_eq!(owner.id, "o1");
        }
        other => panic!("expected door, got {other:?}"),
    }
    assert!(hit_object(31.0, 13.0, floor).is_none());
}

#[test]
fn test_hidden_objects_are_still_hit() {
    let snapshot = fixtures::snapshot();
    let floor = snapshot.floor("f1").unwrap();
    assert!(matches!(hit_test(72.0, 12.0, floor), Hit::Object(o) if o.id == "o3"));
}

#[test]
fn test_route_endpoint() {
    let snapshot = fixtures::snapshot();
    let floor = snapshot.floor("f1").unwrap();

    assert_eq!(route_endpoint(&hit_test(31.0, 13.0, floor)).unwrap(), "d2");
    assert_eq!(route_endpoint(&hit_test(15.0, 15.0, floor)).unwrap(), "d1");
    assert_eq!(
        route_endpoint(&hit_test(55.0, 15.0, floor)),
        Err(LookupError::NoDoor {
            object_id: "o2".into()
        })
    );
    assert_eq!(route_endpoint(&Hit::None), Err(LookupError::NoEndpoint));
}
