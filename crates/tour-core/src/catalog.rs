//! External tour assets: the path file, the painting catalog and the legend
//! dictionary.
//!
//! All three arrive asynchronously. The catalog maps scene object identity
//! to its entry through a lookup table built once here, so picking never
//! relies on object name patterns.

use fnv::FnvHashMap;
use glam::Vec3;
use serde::Deserialize;

use crate::error::Result;
use crate::interest::ObjectId;
use crate::path::PathModel;
use crate::stops::{Stop, StopTable};

#[derive(Clone, Copy, Debug, Deserialize)]
struct PointRecord {
    x: f32,
    y: f32,
    z: f32,
}

/// `tour.json`: `{ "path": [{x, y, z}, ...], "stops": [{name, t}, ...] }`.
#[derive(Clone, Debug, Deserialize)]
pub struct TourFile {
    path: Vec<PointRecord>,
    #[serde(default)]
    stops: Vec<Stop>,
}

impl TourFile {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn into_parts(self, stop_tolerance: f32) -> Result<(PathModel, StopTable)> {
        let points = self
            .path
            .iter()
            .map(|p| Vec3::new(p.x, p.y, p.z))
            .collect::<Vec<_>>();
        let path = PathModel::new(points)?;
        Ok((path, StopTable::new(self.stops, stop_tolerance)))
    }
}

/// One `paintings.json` record.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    pub name: String,
    #[serde(default)]
    pub audio_id: Option<String>,
    #[serde(default)]
    pub audio_url: Option<String>,
    /// Approach distance in front of the painting surface.
    pub distance: f32,
    /// Page opened when a focused painting is clicked again.
    #[serde(default)]
    pub link: Option<String>,
    /// Corner points for hosts without a scene graph of their own.
    #[serde(default)]
    pub quad: Option<[[f32; 3]; 4]>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AudioRef {
    pub id: String,
    pub url: String,
}

#[derive(Clone, Debug)]
pub struct InterestPoint {
    pub id: ObjectId,
    pub target_offset: f32,
    pub audio: Option<AudioRef>,
    pub legend: String,
    pub link: Option<String>,
    pub quad: Option<[Vec3; 4]>,
}

impl InterestPoint {
    pub fn name(&self) -> &str {
        self.id.as_str()
    }
}

impl From<CatalogRecord> for InterestPoint {
    fn from(r: CatalogRecord) -> Self {
        let audio = r.audio_url.map(|url| AudioRef {
            id: r.audio_id.unwrap_or_else(|| r.name.clone()),
            url,
        });
        Self {
            id: ObjectId::new(r.name),
            target_offset: r.distance,
            audio,
            legend: String::new(),
            link: r.link,
            quad: r.quad.map(|q| q.map(Vec3::from)),
        }
    }
}

/// Read-only set of interactive paintings for a session.
#[derive(Clone, Debug, Default)]
pub struct InterestCatalog {
    points: Vec<InterestPoint>,
    by_id: FnvHashMap<ObjectId, usize>,
}

impl InterestCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let records: Vec<CatalogRecord> = serde_json::from_str(text)?;
        Ok(Self::from_records(records))
    }

    pub fn from_records(records: Vec<CatalogRecord>) -> Self {
        let mut points = Vec::with_capacity(records.len());
        let mut by_id = FnvHashMap::default();
        for record in records {
            let point = InterestPoint::from(record);
            if by_id.contains_key(&point.id) {
                log::warn!("[catalog] duplicate entry '{}' ignored", point.id);
                continue;
            }
            by_id.insert(point.id.clone(), points.len());
            points.push(point);
        }
        Self { points, by_id }
    }

    /// Fill legend text from a name → text dictionary.
    pub fn apply_legends(&mut self, legends: &FnvHashMap<String, String>) {
        for point in &mut self.points {
            if let Some(text) = legends.get(point.id.as_str()) {
                point.legend = text.clone();
            }
        }
    }

    pub fn lookup(&self, id: &ObjectId) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn get(&self, index: usize) -> Option<&InterestPoint> {
        self.points.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InterestPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// `legends.json`: a flat `{ name: text }` object.
pub fn parse_legends(text: &str) -> Result<FnvHashMap<String, String>> {
    Ok(serde_json::from_str(text)?)
}
