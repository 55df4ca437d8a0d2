//! Bridge to the JavaScript scene graph.
//!
//! The page defines a global `museumScene` object:
//!
//! - `intersect(origin, direction)` returns a JSON array of
//!   `{object, point, normal, faceArea?}` ordered nearest first,
//! - `centroid(name)` returns a JSON `[x, y, z]` or `null`,
//! - `setCamera(pose)` receives a [`PoseExport`] as a `Float32Array`.

use glam::Vec3;
use serde::Deserialize;
use tour_core::{ObjectId, Ray, SceneHit, SceneHits, SceneQuery};
use wasm_bindgen::prelude::*;

use crate::pose::PoseExport;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = museumScene, js_name = intersect)]
    fn js_intersect(origin: &[f32], direction: &[f32]) -> Result<String, JsValue>;

    #[wasm_bindgen(catch, js_namespace = museumScene, js_name = centroid)]
    fn js_centroid(name: &str) -> Result<String, JsValue>;

    #[wasm_bindgen(catch, js_namespace = museumScene, js_name = setCamera)]
    fn js_set_camera(pose: &[f32]) -> Result<(), JsValue>;
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HitRecord {
    object: String,
    point: [f32; 3],
    normal: [f32; 3],
    #[serde(default = "unmeasured_area")]
    face_area: f32,
}

// Scenes that do not report face areas never trip the area filter.
fn unmeasured_area() -> f32 {
    f32::MAX
}

#[derive(Clone, Copy, Debug, Default)]
pub struct JsScene;

impl SceneQuery for JsScene {
    fn intersect(&self, ray: &Ray) -> SceneHits {
        let origin = ray.origin.to_array();
        let direction = ray.direction.to_array();
        let text = match js_intersect(&origin, &direction) {
            Ok(text) => text,
            Err(e) => {
                log::debug!("[scene] intersect failed: {:?}", e);
                return SceneHits::new();
            }
        };
        match serde_json::from_str::<Vec<HitRecord>>(&text) {
            Ok(records) => records
                .into_iter()
                .map(|r| SceneHit {
                    object: ObjectId::new(r.object),
                    point: Vec3::from(r.point),
                    normal: Vec3::from(r.normal),
                    face_area: r.face_area,
                })
                .collect(),
            Err(e) => {
                log::warn!("[scene] bad intersect payload: {e}");
                SceneHits::new()
            }
        }
    }

    fn centroid(&self, object: &ObjectId) -> Option<Vec3> {
        let text = js_centroid(object.as_str())
            .map_err(|e| log::debug!("[scene] centroid failed: {:?}", e))
            .ok()?;
        serde_json::from_str::<Option<[f32; 3]>>(&text)
            .map_err(|e| log::warn!("[scene] bad centroid payload: {e}"))
            .ok()
            .flatten()
            .map(Vec3::from)
    }
}

pub fn publish_pose(pose: &PoseExport) {
    if let Err(e) = js_set_camera(pose.as_floats()) {
        log::debug!("[scene] setCamera failed: {:?}", e);
    }
}
