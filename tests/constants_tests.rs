// Host-side tests for page wiring constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn element_ids_are_distinct() {
    let ids = [
        CANVAS_ID,
        PREV_BUTTON_ID,
        NEXT_BUTTON_ID,
        RETURN_BUTTON_ID,
        LEGEND_ID,
        LEGEND_TITLE_ID,
        LEGEND_TEXT_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        assert!(!a.starts_with('#'), "ids are looked up without a selector prefix");
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn asset_urls_are_relative_json() {
    for url in [TOUR_URL, PAINTINGS_URL, LEGENDS_URL, CONFIG_URL] {
        assert!(url.ends_with(".json"), "{url}");
        assert!(!url.starts_with('/'), "{url} should resolve against the page");
    }
}
