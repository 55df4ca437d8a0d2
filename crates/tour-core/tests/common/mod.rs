// Shared fixtures for the tour-core integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use glam::Vec3;
use tour_core::{
    CatalogRecord, InterestCatalog, KeyValueStore, MemoryStore, NavigationStateMachine,
    ObjectId, PathModel, Ray, SceneHit, SceneHits, SceneQuery, StopTable,
};

/// Scene that reports the same hits for every ray.
#[derive(Default)]
pub struct ScriptedScene {
    pub hits: Vec<SceneHit>,
    pub centroids: Vec<(ObjectId, Vec3)>,
}

impl ScriptedScene {
    pub fn single(name: &str, point: Vec3, normal: Vec3) -> Self {
        Self {
            hits: vec![hit(name, point, normal)],
            centroids: Vec::new(),
        }
    }
}

impl SceneQuery for ScriptedScene {
    fn intersect(&self, _ray: &Ray) -> SceneHits {
        self.hits.iter().cloned().collect()
    }

    fn centroid(&self, object: &ObjectId) -> Option<Vec3> {
        self.centroids
            .iter()
            .find(|(id, _)| id == object)
            .map(|(_, c)| *c)
    }
}

pub fn hit(name: &str, point: Vec3, normal: Vec3) -> SceneHit {
    SceneHit {
        object: ObjectId::new(name),
        point,
        normal,
        face_area: 1.0,
    }
}

/// Store whose contents stay visible to the test after it is boxed.
#[derive(Clone, Default)]
pub struct SharedStore(pub Rc<RefCell<MemoryStore>>);

impl SharedStore {
    pub fn value(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key)
    }
}

impl KeyValueStore for SharedStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> tour_core::Result<()> {
        self.0.borrow_mut().set(key, value)
    }
}

pub fn record(name: &str, distance: f32) -> CatalogRecord {
    CatalogRecord {
        name: name.to_owned(),
        audio_id: Some(format!("{name}-audio")),
        audio_url: Some(format!("audio/{name}.mp3")),
        distance,
        link: Some(format!("/paintings/{name}")),
        quad: None,
    }
}

pub fn catalog(names: &[(&str, f32)]) -> InterestCatalog {
    InterestCatalog::from_records(names.iter().map(|(n, d)| record(n, *d)).collect())
}

/// 10 x 10 square loop in the y = 0 plane.
pub fn square_path() -> PathModel {
    PathModel::new(vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(10.0, 0.0, 0.0),
        Vec3::new(10.0, 0.0, 10.0),
        Vec3::new(0.0, 0.0, 10.0),
    ])
    .unwrap()
}

pub fn square_tour(stops: &[f32]) -> (PathModel, StopTable) {
    (square_path(), StopTable::from_values(stops, 1e-3))
}

pub const FRAME: Duration = Duration::from_micros(16_667);

pub fn run_frames(nav: &mut NavigationStateMachine, frames: usize) {
    for _ in 0..frames {
        nav.frame(FRAME);
    }
}
