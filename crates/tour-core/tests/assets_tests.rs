use glam::Vec3;
use tour_core::{
    parse_legends, InterestCatalog, ObjectId, SecondClickPolicy, TourConfig, TourError, TourFile,
};

const PAINTINGS: &str = r#"[
  {"name": "Starry_Night", "audioId": "a1", "audioUrl": "audio/starry.mp3", "distance": 2.5,
   "link": "/starry"},
  {"name": "Water_Lilies", "distance": 3.0,
   "quad": [[0,0,0],[1,0,0],[1,1,0],[0,1,0]]},
  {"name": "Starry_Night", "audioId": "dup", "audioUrl": "audio/dup.mp3", "distance": 9.0}
]"#;

#[test]
fn catalog_maps_object_identity_to_entries() {
    let catalog = InterestCatalog::from_json(PAINTINGS).unwrap();
    assert_eq!(catalog.len(), 2, "duplicate name is dropped");

    let starry = catalog
        .lookup(&ObjectId::new("Starry_Night"))
        .and_then(|i| catalog.get(i))
        .unwrap();
    assert_eq!(starry.target_offset, 2.5);
    let audio = starry.audio.as_ref().unwrap();
    assert_eq!((audio.id.as_str(), audio.url.as_str()), ("a1", "audio/starry.mp3"));
    assert_eq!(starry.link.as_deref(), Some("/starry"));

    let lilies = catalog.get(1).unwrap();
    assert!(lilies.audio.is_none());
    assert_eq!(lilies.quad.unwrap()[2], Vec3::new(1.0, 1.0, 0.0));

    assert!(catalog.lookup(&ObjectId::new("Starry")).is_none());
}

#[test]
fn legends_fill_matching_entries() {
    let mut catalog = InterestCatalog::from_json(PAINTINGS).unwrap();
    let legends = parse_legends(r#"{"Starry_Night": "Van Gogh, 1889", "Unknown": "x"}"#).unwrap();
    catalog.apply_legends(&legends);
    assert_eq!(catalog.get(0).unwrap().legend, "Van Gogh, 1889");
    assert_eq!(catalog.get(1).unwrap().legend, "");
}

#[test]
fn malformed_catalog_is_a_parse_error() {
    assert!(matches!(
        InterestCatalog::from_json("{\"name\": 1}"),
        Err(TourError::Parse(_))
    ));
}

#[test]
fn tour_file_builds_path_and_sorted_stops() {
    let text = r#"{
      "path": [{"x": 0, "y": 1, "z": 0}, {"x": 5, "y": 1, "z": 0}, {"x": 5, "y": 1, "z": 5}],
      "stops": [{"name": "hall", "t": 0.6}, {"name": "door", "t": 0.1}]
    }"#;
    let (path, stops) = TourFile::from_json(text).unwrap().into_parts(1e-3).unwrap();
    assert_eq!(path.control_points().len(), 3);
    assert_eq!(stops.stops()[0].name, "door");
    assert_eq!(stops.len(), 2);

    let bare = r#"{"path": [{"x": 0, "y": 0, "z": 0}, {"x": 1, "y": 0, "z": 0}]}"#;
    let (_, none) = TourFile::from_json(bare).unwrap().into_parts(1e-3).unwrap();
    assert!(none.is_empty());
}

#[test]
fn tour_file_with_one_point_is_invalid() {
    let text = r#"{"path": [{"x": 0, "y": 0, "z": 0}]}"#;
    let err = TourFile::from_json(text).unwrap().into_parts(1e-3).unwrap_err();
    assert!(matches!(err, TourError::InvalidPath { points: 1 }));
}

#[test]
fn config_overlay_keeps_defaults() {
    let cfg = TourConfig::from_json(
        r#"{"interaction_distance": 25.0, "second_click": "confirm", "motion": {"friction": 0.1}}"#,
    )
    .unwrap();
    assert_eq!(cfg.interaction_distance, 25.0);
    assert_eq!(cfg.second_click, SecondClickPolicy::Confirm);
    assert_eq!(cfg.motion.friction, 0.1);
    assert_eq!(cfg.motion.acceleration, 0.025);
    assert_eq!(cfg.transition_duration, 2.0);
    assert!(cfg.flip_back_faces);

    let raw = TourConfig::from_json(r#"{"flip_back_faces": false}"#).unwrap();
    assert!(!raw.flip_back_faces);
}

#[test]
fn config_rejects_friction_outside_unit_interval() {
    for friction in ["0.0", "1.0", "1.5"] {
        let text = format!(r#"{{"motion": {{"friction": {friction}}}}}"#);
        assert!(matches!(
            TourConfig::from_json(&text),
            Err(TourError::Config(_))
        ));
    }
    assert!(TourConfig::default().validate().is_ok());
}
