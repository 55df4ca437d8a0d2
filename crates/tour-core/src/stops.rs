//! Named exhibit stops along the path parameter.

use glam::Vec3;
use serde::Deserialize;

use crate::path::{cyclic_distance, wrap, PathModel};

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Stop {
    pub name: String,
    pub t: f32,
}

impl Stop {
    pub fn new(name: impl Into<String>, t: f32) -> Self {
        Self {
            name: name.into(),
            t,
        }
    }
}

/// Stops ordered by ascending parameter, whatever the declaration order.
#[derive(Clone, Debug, Default)]
pub struct StopTable {
    stops: Vec<Stop>,
    tolerance: f32,
}

impl StopTable {
    /// Wraps every parameter into [0, 1), sorts, and merges stops that lie
    /// within `tolerance` of each other (the first declared wins).
    pub fn new(stops: Vec<Stop>, tolerance: f32) -> Self {
        let mut stops: Vec<Stop> = stops
            .into_iter()
            .filter(|s| s.t.is_finite())
            .map(|s| Stop {
                t: wrap(s.t, 0.0, 1.0),
                ..s
            })
            .collect();
        // stable: equal parameters keep declaration order
        stops.sort_by(|a, b| a.t.total_cmp(&b.t));

        let mut merged: Vec<Stop> = Vec::with_capacity(stops.len());
        for stop in stops {
            match merged.last() {
                Some(last) if cyclic_distance(last.t, stop.t) < tolerance => {
                    log::warn!(
                        "[stops] '{}' at {:.4} merged into '{}'",
                        stop.name,
                        stop.t,
                        last.name
                    );
                }
                _ => merged.push(stop),
            }
        }
        if merged.len() > 1 {
            let first_t = merged[0].t;
            if let Some(last) = merged.last() {
                if cyclic_distance(last.t, first_t) < tolerance {
                    merged.pop();
                }
            }
        }
        Self {
            stops: merged,
            tolerance,
        }
    }

    pub fn from_values(values: &[f32], tolerance: f32) -> Self {
        let stops = values
            .iter()
            .enumerate()
            .map(|(i, t)| Stop::new(format!("stop-{i}"), *t))
            .collect();
        Self::new(stops, tolerance)
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    /// Stop within tolerance of `position`, if any.
    pub fn stop_at(&self, position: f32) -> Option<&Stop> {
        self.index_at(position).map(|i| &self.stops[i])
    }

    fn index_at(&self, position: f32) -> Option<usize> {
        self.stops
            .iter()
            .position(|s| cyclic_distance(s.t, position) < self.tolerance)
    }

    pub fn next_stop(&self, position: f32) -> Option<&Stop> {
        let n = self.stops.len();
        if n == 0 {
            return None;
        }
        if let Some(i) = self.index_at(position) {
            return Some(&self.stops[(i + 1) % n]);
        }
        let threshold = position + self.tolerance;
        self.stops
            .iter()
            .find(|s| s.t > threshold)
            .or_else(|| self.stops.first())
    }

    pub fn prev_stop(&self, position: f32) -> Option<&Stop> {
        let n = self.stops.len();
        if n == 0 {
            return None;
        }
        if let Some(i) = self.index_at(position) {
            return Some(&self.stops[(i + n - 1) % n]);
        }
        let threshold = position - self.tolerance;
        self.stops
            .iter()
            .rev()
            .find(|s| s.t < threshold)
            .or_else(|| self.stops.last())
    }

    /// Stop whose path point is closest to `world` (straight-line distance).
    pub fn nearest_stop(&self, world: Vec3, path: &PathModel) -> Option<&Stop> {
        self.stops
            .iter()
            .map(|s| (s, path.point_at(s.t).distance_squared(world)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(s, _)| s)
    }
}
