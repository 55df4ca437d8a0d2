//! Asset fetches. Each file is fetched on its own task and handed to the
//! navigation inbox; nothing here touches navigation state directly.

use anyhow::anyhow;
use tour_core::{parse_legends, InterestCatalog, Loaded, ResourceSender, TourConfig, TourFile};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

use crate::constants::{CONFIG_URL, LEGENDS_URL, PAINTINGS_URL, TOUR_URL};

pub async fn fetch_text(url: &str) -> anyhow::Result<String> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let opts = web::RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(web::RequestMode::SameOrigin);
    let request = web::Request::new_with_str_and_init(url, &opts)
        .map_err(|e| anyhow!("{url}: bad request {:?}", e))?;

    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| anyhow!("{url}: fetch failed {:?}", e))?;
    let response: web::Response = value
        .dyn_into()
        .map_err(|e| anyhow!("{url}: not a Response {:?}", e))?;
    if !response.ok() {
        return Err(anyhow!("{url}: HTTP {}", response.status()));
    }
    let body = response
        .text()
        .map_err(|e| anyhow!("{url}: unreadable body {:?}", e))?;
    let text = JsFuture::from(body)
        .await
        .map_err(|e| anyhow!("{url}: unreadable body {:?}", e))?;
    text.as_string()
        .ok_or_else(|| anyhow!("{url}: body is not text"))
}

/// Optional overlay; a missing or invalid file leaves the defaults.
pub async fn load_config() -> TourConfig {
    let text = match fetch_text(CONFIG_URL).await {
        Ok(text) => text,
        Err(e) => {
            log::info!("[config] using defaults ({e})");
            return TourConfig::default();
        }
    };
    match TourConfig::from_json(&text) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("[config] {CONFIG_URL} rejected, using defaults: {e}");
            TourConfig::default()
        }
    }
}

pub fn spawn_asset_loaders(sender: &ResourceSender, stop_tolerance: f32) {
    let tx = sender.clone();
    spawn_local(async move {
        match fetch_text(TOUR_URL).await {
            Ok(text) => {
                let parts = TourFile::from_json(&text).and_then(|f| f.into_parts(stop_tolerance));
                let _ = tx.send(Loaded::Tour(parts));
            }
            Err(e) => log::error!("[path] {e}; the camera stays put"),
        }
    });

    let tx = sender.clone();
    spawn_local(async move {
        let catalog = match fetch_text(PAINTINGS_URL).await {
            Ok(text) => InterestCatalog::from_json(&text).unwrap_or_else(|e| {
                log::warn!("[catalog] {PAINTINGS_URL}: {e}");
                InterestCatalog::empty()
            }),
            Err(e) => {
                log::warn!("[catalog] {e}");
                InterestCatalog::empty()
            }
        };
        let _ = tx.send(Loaded::Catalog(catalog));
    });

    let tx = sender.clone();
    spawn_local(async move {
        let legends = fetch_text(LEGENDS_URL)
            .await
            .and_then(|text| parse_legends(&text).map_err(anyhow::Error::from));
        match legends {
            Ok(legends) => {
                let _ = tx.send(Loaded::Legends(legends));
            }
            Err(e) => log::warn!("[catalog] no legends: {e}"),
        }
    });
}
