//! Blocking asset reads on a background thread. Results go back to the
//! event loop as [`Loaded`] messages.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread;

use anyhow::Context;
use tour_core::{parse_legends, InterestCatalog, Loaded, TourConfig, TourFile};

pub const TOUR_FILE: &str = "tour.json";
pub const PAINTINGS_FILE: &str = "paintings.json";
pub const LEGENDS_FILE: &str = "legends.json";
pub const CONFIG_FILE: &str = "tour-config.json";

fn read(dir: &Path, name: &str) -> anyhow::Result<String> {
    let path = dir.join(name);
    fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
}

/// Optional overlay; a missing or invalid file leaves the defaults.
pub fn load_config(dir: &Path) -> TourConfig {
    let Ok(text) = read(dir, CONFIG_FILE) else {
        log::info!("[config] no {CONFIG_FILE}, using defaults");
        return TourConfig::default();
    };
    TourConfig::from_json(&text).unwrap_or_else(|e| {
        log::warn!("[config] {CONFIG_FILE} rejected, using defaults: {e}");
        TourConfig::default()
    })
}

pub fn spawn(dir: PathBuf, stop_tolerance: f32, tx: Sender<Loaded>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        match read(&dir, TOUR_FILE) {
            Ok(text) => {
                let parts = TourFile::from_json(&text).and_then(|f| f.into_parts(stop_tolerance));
                let _ = tx.send(Loaded::Tour(parts));
            }
            Err(e) => log::error!("[path] {e:#}; the camera stays put"),
        }

        let catalog = read(&dir, PAINTINGS_FILE)
            .and_then(|text| InterestCatalog::from_json(&text).map_err(anyhow::Error::from))
            .unwrap_or_else(|e| {
                log::warn!("[catalog] {e:#}");
                InterestCatalog::empty()
            });
        let _ = tx.send(Loaded::Catalog(catalog));

        match read(&dir, LEGENDS_FILE)
            .and_then(|text| parse_legends(&text).map_err(anyhow::Error::from))
        {
            Ok(legends) => {
                let _ = tx.send(Loaded::Legends(legends));
            }
            Err(e) => log::warn!("[catalog] no legends: {e:#}"),
        }
    })
}
