use utmn_map_core::{ObjectPatch, ObjectType, PlacedObject};

fn room(name: &str, type_id: u32) -> PlacedObject {
    PlacedObject {
        id: "o1".to_string(),
        name: name.to_string(),
        alias: String::new(),
        description: String::new(),
        x: 10.0,
        y: 10.0,
        width: 4.0,
        height: 2.0,
        object_type_id: type_id,
        doors: Vec::new(),
    }
}

#[test]
fn test_object_type_ids_round_trip() {
    for t in ObjectType::ALL {
        assert_eq!(ObjectType::from_id(t.id()), Some(t));
        assert_eq!(t.name().parse::<ObjectType>(), Ok(t));
    }
    assert_eq!(ObjectType::from_id(0), None);
    assert_eq!(ObjectType::from_id(11), None);
}

#[test]
fn test_icon_ids() {
    assert_eq!(ObjectType::Cabinet.icon_id(), "point-icon");
    assert_eq!(ObjectType::WomanToilet.icon_id(), "women-toilet");
    assert_eq!(ObjectType::ChillZone.icon_id(), "chill-zone");
    assert!(ObjectType::Cabinet.is_labelled());
    assert!(!ObjectType::Stair.is_labelled());
}

#[test]
fn test_unknown_type_is_tolerated() {
    let obj = room("Storage", 42);
    assert_eq!(obj.object_type(), None);
}

#[test]
fn test_hidden_marker() {
    assert!(room("IDK corridor", 1).is_hidden());
    assert!(!room("101", 1).is_hidden());
}

#[test]
fn test_patch_with_position() {
    let mut obj = room("101", 1);
    let patch = ObjectPatch::from_object(&obj).with_position(15.0, 15.0);
    assert_eq!(patch.x, Some(15.0));
    assert_eq!(patch.name.as_deref(), Some("101"));

    patch.apply_to(&mut obj);
    assert_eq!((obj.x, obj.y), (15.0, 15.0));
    assert_eq!(obj.width, 4.0);
}

#[test]
fn test_patch_skips_absent_fields() {
    let patch = ObjectPatch {
        x: Some(1.0),
        ..Default::default()
    };
    let json = serde_json::to_value(&patch).unwrap();
    assert_eq!(json, serde_json::json!({"x": 1.0}));
}
