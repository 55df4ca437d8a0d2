//! Closed spline through the tour's control points.

use glam::Vec3;

use crate::error::{Result, TourError};

/// Wrap `v` into `[low, high)` by modulo. Non-finite input maps to `low`.
///
/// Exact for values already in range, so `wrap(wrap(v))` equals `wrap(v)`.
#[inline]
pub fn wrap(v: f32, low: f32, high: f32) -> f32 {
    let span = high - low;
    if !v.is_finite() || span <= 0.0 {
        return low;
    }
    let mut r = (v - low) % span;
    if r < 0.0 {
        r += span;
    }
    if r >= span {
        r = 0.0;
    }
    low + r
}

/// Shortest distance between two parameters on the unit loop.
#[inline]
pub fn cyclic_distance(a: f32, b: f32) -> f32 {
    let d = wrap(a - b, 0.0, 1.0);
    d.min(1.0 - d)
}

/// Distance travelled from `from` to `to` moving in `direction` (±1) on the loop.
#[inline]
pub fn directed_distance(from: f32, to: f32, direction: f32) -> f32 {
    if direction >= 0.0 {
        wrap(to - from, 0.0, 1.0)
    } else {
        wrap(from - to, 0.0, 1.0)
    }
}

/// Centripetal Catmull-Rom loop through an ordered list of control points.
///
/// The parameter is uniform per segment: `t = i / n` lands exactly on
/// control point `i`.
#[derive(Clone, Debug)]
pub struct PathModel {
    points: Vec<Vec3>,
}

impl PathModel {
    pub fn new(points: Vec<Vec3>) -> Result<Self> {
        if points.len() < 2 {
            return Err(TourError::InvalidPath {
                points: points.len(),
            });
        }
        Ok(Self { points })
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    /// Position at parameter `t`. Callers pass wrapped values; others are
    /// wrapped here as well.
    pub fn point_at(&self, t: f32) -> Vec3 {
        let n = self.points.len();
        let p = wrap(t, 0.0, 1.0) * n as f32;
        let seg = (p.floor() as usize).min(n - 1);
        let w = p - seg as f32;

        let p0 = self.points[(seg + n - 1) % n];
        let p1 = self.points[seg];
        let p2 = self.points[(seg + 1) % n];
        let p3 = self.points[(seg + 2) % n];

        // knot spacing: sqrt of chord length
        let mut dt0 = p0.distance_squared(p1).powf(0.25);
        let mut dt1 = p1.distance_squared(p2).powf(0.25);
        let mut dt2 = p2.distance_squared(p3).powf(0.25);
        if dt1 < 1e-4 {
            dt1 = 1.0;
        }
        if dt0 < 1e-4 {
            dt0 = dt1;
        }
        if dt2 < 1e-4 {
            dt2 = dt1;
        }

        let t1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
        let t2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;

        let c0 = p1;
        let c1 = t1;
        let c2 = -3.0 * p1 + 3.0 * p2 - 2.0 * t1 - t2;
        let c3 = 2.0 * p1 - 2.0 * p2 + t1 + t2;
        c0 + w * (c1 + w * (c2 + w * c3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> PathModel {
        PathModel::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 10.0),
            Vec3::new(0.0, 0.0, 10.0),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_short_paths() {
        assert!(matches!(
            PathModel::new(vec![Vec3::ONE]),
            Err(TourError::InvalidPath { points: 1 })
        ));
        assert!(PathModel::new(Vec::new()).is_err());
    }

    #[test]
    fn passes_through_control_points() {
        let path = square();
        for (i, cp) in path.control_points().iter().enumerate() {
            let p = path.point_at(i as f32 / 4.0);
            assert!((p - *cp).length() < 1e-4, "point {i}: {p:?} vs {cp:?}");
        }
    }

    #[test]
    fn loop_is_continuous_at_seam() {
        let path = square();
        let before = path.point_at(1.0 - 1e-4);
        let after = path.point_at(0.0);
        assert!((before - after).length() < 0.05);
    }

    #[test]
    fn wrap_handles_negative_and_large_values() {
        assert!((wrap(1.25, 0.0, 1.0) - 0.25).abs() < 1e-6);
        assert!((wrap(-0.25, 0.0, 1.0) - 0.75).abs() < 1e-6);
        assert_eq!(wrap(-1e-9, 0.0, 1.0), 0.0);
        assert_eq!(wrap(f32::NAN, 0.0, 1.0), 0.0);
    }

    #[test]
    fn cyclic_distance_crosses_the_seam() {
        assert!((cyclic_distance(0.95, 0.05) - 0.1).abs() < 1e-6);
        assert!((directed_distance(0.95, 0.05, 1.0) - 0.1).abs() < 1e-6);
        assert!((directed_distance(0.95, 0.05, -1.0) - 0.9).abs() < 1e-6);
    }
}
