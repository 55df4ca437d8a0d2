//! Pointer targeting: which painting a ray selects and where the camera
//! should go to look at it.

use std::fmt;

use glam::Vec3;
use smallvec::SmallVec;

use crate::camera::{CameraPose, Ray};
use crate::catalog::InterestCatalog;
use crate::path::PathModel;
use crate::stops::StopTable;

/// Identity of a scene object, as reported by the scene query.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneHit {
    pub object: ObjectId,
    pub point: Vec3,
    pub normal: Vec3,
    /// Area of the intersected triangle.
    pub face_area: f32,
}

pub type SceneHits = SmallVec<[SceneHit; 4]>;

/// Ray queries against the host's scene graph.
pub trait SceneQuery {
    /// All hits along `ray`, nearest first.
    fn intersect(&self, ray: &Ray) -> SceneHits;
    /// Geometric centre of `object`, if known.
    fn centroid(&self, object: &ObjectId) -> Option<Vec3>;
}

/// Scene without geometry; every query misses.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyScene;

impl SceneQuery for EmptyScene {
    fn intersect(&self, _ray: &Ray) -> SceneHits {
        SceneHits::new()
    }

    fn centroid(&self, _object: &ObjectId) -> Option<Vec3> {
        None
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InterestTarget {
    /// Index into the catalog.
    pub interest: usize,
    pub hit_point: Vec3,
    /// Approach pose: in front of the surface, looking at the object centre.
    pub pose: CameraPose,
    /// Path parameter of the stop closest to the approach pose.
    pub nearest_stop: Option<f32>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    NoHit,
    Target(InterestTarget),
}

impl Resolution {
    pub fn target(&self) -> Option<&InterestTarget> {
        match self {
            Resolution::Target(t) => Some(t),
            Resolution::NoHit => None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct InterestResolver {
    /// Hits at or beyond this camera distance are too far to interact with.
    pub max_distance: f32,
    /// Optional rejection of degenerate faces.
    pub min_face_area: Option<f32>,
    /// Turn normals that face away from the ray back toward the viewer.
    pub flip_back_faces: bool,
}

impl InterestResolver {
    pub fn new(max_distance: f32, min_face_area: Option<f32>) -> Self {
        Self {
            max_distance,
            min_face_area,
            flip_back_faces: true,
        }
    }

    pub fn with_back_face_flip(mut self, flip: bool) -> Self {
        self.flip_back_faces = flip;
        self
    }

    /// Resolve `ray` against the scene. Hits on objects absent from the
    /// catalog are skipped even when nearer. The same rule serves hover and
    /// click. The approach pose sits `target_offset` along the hit normal;
    /// with `flip_back_faces` a normal facing away from the ray is negated.
    pub fn resolve(
        &self,
        ray: &Ray,
        camera_position: Vec3,
        scene: &dyn SceneQuery,
        catalog: &InterestCatalog,
        tour: Option<(&PathModel, &StopTable)>,
    ) -> Resolution {
        if catalog.is_empty() {
            return Resolution::NoHit;
        }
        let hits = scene.intersect(ray);
        for hit in hits.iter() {
            let Some(index) = catalog.lookup(&hit.object) else {
                continue;
            };
            if let Some(min_area) = self.min_face_area {
                if hit.face_area < min_area {
                    log::debug!(
                        "[pick] '{}' face area {:.4} below {:.4}",
                        hit.object,
                        hit.face_area,
                        min_area
                    );
                    continue;
                }
            }
            if camera_position.distance(hit.point) >= self.max_distance {
                return Resolution::NoHit;
            }
            let Some(point) = catalog.get(index) else {
                continue;
            };

            let mut normal = hit.normal.normalize_or_zero();
            if normal == Vec3::ZERO {
                normal = -ray.direction;
            } else if self.flip_back_faces && normal.dot(ray.direction) > 0.0 {
                // back face: approach from the viewer's side
                normal = -normal;
            }
            let position = hit.point + normal * point.target_offset;
            let look_at = scene.centroid(&hit.object).unwrap_or(hit.point);
            let nearest_stop = tour
                .and_then(|(path, stops)| stops.nearest_stop(position, path))
                .map(|s| s.t);

            return Resolution::Target(InterestTarget {
                interest: index,
                hit_point: hit.point,
                pose: CameraPose::looking_at(position, look_at),
                nearest_stop,
            });
        }
        Resolution::NoHit
    }
}
