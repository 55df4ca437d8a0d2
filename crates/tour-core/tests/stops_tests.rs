mod common;

use glam::Vec3;
use tour_core::{Stop, StopTable};

#[test]
fn next_and_prev_from_a_stop() {
    let table = StopTable::from_values(&[0.1, 0.3, 0.7], 1e-3);
    assert_eq!(table.next_stop(0.3).map(|s| s.t), Some(0.7));
    assert_eq!(table.prev_stop(0.3).map(|s| s.t), Some(0.1));
}

#[test]
fn next_then_prev_returns_to_every_stop() {
    let table = StopTable::from_values(&[0.05, 0.2, 0.45, 0.6, 0.9], 1e-3);
    for stop in table.stops() {
        let next = table.next_stop(stop.t).unwrap();
        let back = table.prev_stop(next.t).unwrap();
        assert_eq!(back.t, stop.t, "round trip from {}", stop.t);
    }
    let pair = StopTable::from_values(&[0.25, 0.75], 1e-3);
    for stop in pair.stops() {
        let next = pair.next_stop(stop.t).unwrap();
        assert_eq!(pair.prev_stop(next.t).unwrap().t, stop.t);
    }
}

#[test]
fn between_stops_and_wrapping() {
    let table = StopTable::from_values(&[0.1, 0.3, 0.7], 1e-3);
    assert_eq!(table.next_stop(0.5).unwrap().t, 0.7);
    assert_eq!(table.prev_stop(0.5).unwrap().t, 0.3);
    assert_eq!(table.next_stop(0.8).unwrap().t, 0.1);
    assert_eq!(table.prev_stop(0.05).unwrap().t, 0.7);
    // just outside tolerance still counts as "before" the stop
    assert_eq!(table.next_stop(0.0985).unwrap().t, 0.1);
}

#[test]
fn declaration_order_does_not_matter() {
    let table = StopTable::new(
        vec![
            Stop::new("west", 0.7),
            Stop::new("entrance", 0.1),
            Stop::new("east", 1.3),
        ],
        1e-3,
    );
    let names: Vec<_> = table.stops().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["entrance", "east", "west"]);
    assert!((table.stops()[1].t - 0.3).abs() < 1e-6);
}

#[test]
fn near_duplicates_are_merged() {
    let table = StopTable::new(
        vec![
            Stop::new("a", 0.2),
            Stop::new("a-dup", 0.2005),
            Stop::new("b", 0.6),
            Stop::new("seam", 0.9999),
            Stop::new("start", 0.0),
        ],
        1e-3,
    );
    let names: Vec<_> = table.stops().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["start", "a", "b"]);
}

#[test]
fn empty_and_single_tables() {
    let empty = StopTable::from_values(&[], 1e-3);
    assert!(empty.next_stop(0.4).is_none());
    assert!(empty.prev_stop(0.4).is_none());

    let one = StopTable::from_values(&[0.4], 1e-3);
    assert_eq!(one.next_stop(0.4).unwrap().t, 0.4);
    assert_eq!(one.prev_stop(0.1).unwrap().t, 0.4);
}

#[test]
fn nearest_stop_by_world_position() {
    let (path, table) = common::square_tour(&[0.0, 0.25, 0.5, 0.75]);
    let near_second = Vec3::new(9.0, 1.0, -1.0);
    assert_eq!(table.nearest_stop(near_second, &path).unwrap().t, 0.25);
    let near_last = Vec3::new(-2.0, 0.0, 11.0);
    assert_eq!(table.nearest_stop(near_last, &path).unwrap().t, 0.75);
}
