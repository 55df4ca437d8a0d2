mod common;

use common::{catalog, hit, ScriptedScene};
use glam::Vec3;
use tour_core::{InterestCatalog, InterestResolver, ObjectId, Orientation, Ray, Resolution};

fn forward_ray() -> Ray {
    Ray::new(Vec3::ZERO, Vec3::NEG_Z)
}

fn resolve(scene: &ScriptedScene, catalog: &InterestCatalog) -> Resolution {
    InterestResolver::new(40.0, None).resolve(&forward_ray(), Vec3::ZERO, scene, catalog, None)
}

#[test]
fn too_far_is_no_hit_and_near_is_offset_along_normal() {
    let paintings = catalog(&[("mona", 1.5)]);

    let far = ScriptedScene::single("mona", Vec3::new(0.0, 0.0, -45.0), Vec3::Z);
    assert_eq!(resolve(&far, &paintings), Resolution::NoHit);

    let near = ScriptedScene::single("mona", Vec3::new(0.0, 0.0, -35.0), Vec3::new(0.0, 0.0, 2.0));
    let Resolution::Target(target) = resolve(&near, &paintings) else {
        panic!("expected a target at distance 35");
    };
    assert_eq!(target.interest, 0);
    assert_eq!(target.hit_point, Vec3::new(0.0, 0.0, -35.0));
    assert_eq!(target.pose.position, Vec3::new(0.0, 0.0, -33.5));
    let offset = target.pose.position.distance(target.hit_point);
    assert!((offset - 1.5).abs() < 1e-6);
}

#[test]
fn threshold_is_exclusive() {
    let paintings = catalog(&[("mona", 1.0)]);
    let at_limit = ScriptedScene::single("mona", Vec3::new(0.0, 0.0, -40.0), Vec3::Z);
    assert_eq!(resolve(&at_limit, &paintings), Resolution::NoHit);
}

#[test]
fn unrelated_geometry_is_skipped_even_when_nearer() {
    let paintings = catalog(&[("mona", 1.0)]);
    let scene = ScriptedScene {
        hits: vec![
            hit("wall", Vec3::new(0.0, 0.0, -3.0), Vec3::Z),
            hit("mona", Vec3::new(0.0, 0.0, -8.0), Vec3::Z),
        ],
        centroids: Vec::new(),
    };
    let target = resolve(&scene, &paintings);
    assert_eq!(target.target().map(|t| t.interest), Some(0));
    assert_eq!(target.target().unwrap().hit_point.z, -8.0);
}

#[test]
fn far_catalog_hit_ends_the_search() {
    let paintings = catalog(&[("far", 1.0), ("farther", 1.0)]);
    let scene = ScriptedScene {
        hits: vec![
            hit("far", Vec3::new(0.0, 0.0, -41.0), Vec3::Z),
            hit("farther", Vec3::new(0.0, 0.0, -50.0), Vec3::Z),
        ],
        centroids: Vec::new(),
    };
    assert_eq!(resolve(&scene, &paintings), Resolution::NoHit);
}

#[test]
fn small_faces_are_rejected_when_configured() {
    let paintings = catalog(&[("mona", 1.0)]);
    let mut sliver = hit("mona", Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
    sliver.face_area = 0.01;
    let scene = ScriptedScene {
        hits: vec![sliver],
        centroids: Vec::new(),
    };

    assert!(matches!(resolve(&scene, &paintings), Resolution::Target(_)));
    let strict = InterestResolver::new(40.0, Some(0.5));
    assert_eq!(
        strict.resolve(&forward_ray(), Vec3::ZERO, &scene, &paintings, None),
        Resolution::NoHit
    );
}

#[test]
fn looks_at_object_centroid() {
    let paintings = catalog(&[("mona", 2.0)]);
    let centre = Vec3::new(0.5, 1.0, -10.0);
    let scene = ScriptedScene {
        hits: vec![hit("mona", Vec3::new(0.0, 0.0, -10.0), Vec3::Z)],
        centroids: vec![(ObjectId::new("mona"), centre)],
    };
    let target = resolve(&scene, &paintings);
    assert_eq!(
        target.target().unwrap().pose.orientation,
        Orientation::LookAt(centre)
    );
}

#[test]
fn back_faces_are_approached_from_the_viewer_side() {
    let paintings = catalog(&[("mona", 1.0)]);
    let scene = ScriptedScene::single("mona", Vec3::new(0.0, 0.0, -10.0), Vec3::NEG_Z);
    let target = resolve(&scene, &paintings);
    assert_eq!(target.target().unwrap().pose.position, Vec3::new(0.0, 0.0, -9.0));
}

#[test]
fn back_faces_follow_the_raw_normal_when_flipping_is_off() {
    let paintings = catalog(&[("mona", 1.0)]);
    let scene = ScriptedScene::single("mona", Vec3::new(0.0, 0.0, -10.0), Vec3::NEG_Z);
    let target = InterestResolver::new(40.0, None)
        .with_back_face_flip(false)
        .resolve(&forward_ray(), Vec3::ZERO, &scene, &paintings, None);
    assert_eq!(target.target().unwrap().pose.position, Vec3::new(0.0, 0.0, -11.0));
}

#[test]
fn empty_catalog_never_hits() {
    let scene = ScriptedScene::single("mona", Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
    assert_eq!(resolve(&scene, &InterestCatalog::empty()), Resolution::NoHit);
}

#[test]
fn reports_nearest_stop_of_the_approach_pose() {
    let paintings = catalog(&[("mona", 2.0)]);
    let (path, stops) = common::square_tour(&[0.0, 0.25, 0.5, 0.75]);
    let scene = ScriptedScene::single("mona", Vec3::new(10.0, 0.0, 12.0), Vec3::NEG_Z);
    let ray = Ray::new(Vec3::new(10.0, 0.0, 5.0), Vec3::Z);
    let target = InterestResolver::new(40.0, None)
        .resolve(&ray, ray.origin, &scene, &paintings, Some((&path, &stops)));
    // approach pose sits at (10, 0, 10)
    assert_eq!(target.target().unwrap().nearest_stop, Some(0.5));
}
