//! Painting geometry for hosts without a scene graph: one flat quad per
//! catalog entry that carries `quad` corners.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;
use tour_core::{InterestCatalog, ObjectId, Ray, SceneHit, SceneHits, SceneQuery};

#[derive(Clone, Debug)]
pub struct PaintingQuad {
    pub id: ObjectId,
    pub corners: [Vec3; 4],
}

impl PaintingQuad {
    pub fn centroid(&self) -> Vec3 {
        self.corners.iter().copied().sum::<Vec3>() / 4.0
    }
}

pub fn quads_from_catalog(catalog: &InterestCatalog) -> Vec<PaintingQuad> {
    catalog
        .iter()
        .filter_map(|p| {
            p.quad.map(|corners| PaintingQuad {
                id: p.id.clone(),
                corners,
            })
        })
        .collect()
}

/// Ray/triangle intersection (Moller-Trumbore). Returns the ray distance.
#[inline]
pub fn ray_triangle(ray: &Ray, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    let e1 = b - a;
    let e2 = c - a;
    let p = ray.direction.cross(e2);
    let det = e1.dot(p);
    if det.abs() < 1e-8 {
        return None;
    }
    let inv = 1.0 / det;
    let s = ray.origin - a;
    let u = s.dot(p) * inv;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = ray.direction.dot(q) * inv;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv;
    (t >= 0.0).then_some(t)
}

/// Scene query over a shared quad list; the list is filled once the
/// catalog has loaded.
#[derive(Clone, Default)]
pub struct QuadScene {
    quads: Rc<RefCell<Vec<PaintingQuad>>>,
}

impl QuadScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&self, quads: Vec<PaintingQuad>) {
        log::info!("[scene] {} painting quads", quads.len());
        *self.quads.borrow_mut() = quads;
    }
}

impl SceneQuery for QuadScene {
    fn intersect(&self, ray: &Ray) -> SceneHits {
        let mut hits: Vec<(f32, SceneHit)> = Vec::new();
        for quad in self.quads.borrow().iter() {
            let [a, b, c, d] = quad.corners;
            for (p0, p1, p2) in [(a, b, c), (a, c, d)] {
                let Some(t) = ray_triangle(ray, p0, p1, p2) else {
                    continue;
                };
                let cross = (p1 - p0).cross(p2 - p0);
                hits.push((
                    t,
                    SceneHit {
                        object: quad.id.clone(),
                        point: ray.at(t),
                        normal: cross.normalize_or_zero(),
                        face_area: 0.5 * cross.length(),
                    },
                ));
                break;
            }
        }
        hits.sort_by(|x, y| x.0.total_cmp(&y.0));
        hits.into_iter().map(|(_, h)| h).collect()
    }

    fn centroid(&self, object: &ObjectId) -> Option<Vec3> {
        self.quads
            .borrow()
            .iter()
            .find(|q| &q.id == object)
            .map(PaintingQuad::centroid)
    }
}
