// Host-side tests for pure input helpers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn arrow_keys_map_to_tour_commands() {
    assert_eq!(key_command("ArrowRight"), Some(KeyCommand::Next));
    assert_eq!(key_command("ArrowLeft"), Some(KeyCommand::Prev));
    assert_eq!(key_command("Backspace"), Some(KeyCommand::ReturnToTour));
    assert_eq!(key_command("Escape"), Some(KeyCommand::ReturnToTour));
    assert_eq!(key_command("Enter"), Some(KeyCommand::ConfirmDrillDown));
    assert_eq!(key_command("n"), key_command("N"));
}

#[test]
fn unrelated_keys_are_ignored() {
    for key in ["a", " ", "Shift", "ArrowUp", ""] {
        assert_eq!(key_command(key), None, "key {key:?}");
    }
}

#[test]
fn form_controls_keep_their_keys() {
    for tag in ["INPUT", "textarea", "Select"] {
        assert!(is_text_entry_tag(tag), "tag {tag:?}");
    }
    for tag in ["CANVAS", "BUTTON", "DIV", ""] {
        assert!(!is_text_entry_tag(tag), "tag {tag:?}");
    }
}

#[test]
fn wheel_up_moves_forward() {
    assert_eq!(wheel_to_scroll(-100.0), 1.0);
    assert_eq!(wheel_to_scroll(3.0), -1.0);
    assert_eq!(wheel_to_scroll(0.0), 0.0, "zero delta is not a tick");
}

#[test]
fn client_coordinates_are_made_canvas_relative() {
    let p = client_to_local(Vec2::new(130.0, 95.0), 30.0, 15.0);
    assert_eq!(p, Vec2::new(100.0, 80.0));
}
