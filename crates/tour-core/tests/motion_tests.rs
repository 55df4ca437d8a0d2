use tour_core::{wrap, MotionConfig, MotionIntegrator, MotionState};

const DT: f32 = 1.0 / 60.0;

fn integrator(position: f32) -> MotionIntegrator {
    MotionIntegrator::new(
        MotionConfig::default(),
        MotionState {
            position,
            velocity: 0.0,
        },
        1e-3,
    )
}

#[test]
fn wrap_is_idempotent_and_in_range() {
    let samples = [
        -3.75, -1.0, -0.5, -1e-7, 0.0, 1e-7, 0.25, 0.999_999, 1.0, 1.5, 7.3, 123.456, -123.456,
    ];
    for t in samples {
        let once = wrap(t, 0.0, 1.0);
        assert!((0.0..1.0).contains(&once), "wrap({t}) = {once}");
        assert_eq!(wrap(once, 0.0, 1.0), once, "wrap not idempotent for {t}");
    }
}

#[test]
fn coasting_speed_decays_monotonically() {
    let mut m = integrator(0.2);
    m.add_impulse(0.08);
    m.step(DT);
    let mut last_speed = m.velocity().abs();
    let mut last_pos = m.position();
    let mut last_delta = f32::INFINITY;
    for _ in 0..200 {
        m.step(DT);
        let speed = m.velocity().abs();
        if last_speed > 0.0 {
            assert!(speed < last_speed, "speed {speed} did not drop below {last_speed}");
        } else {
            assert_eq!(speed, 0.0);
        }
        let delta = (m.position() - last_pos).abs();
        assert!(delta <= last_delta + 1e-7);
        last_speed = speed;
        last_pos = m.position();
        last_delta = delta;
    }
    assert_eq!(m.velocity(), 0.0);
}

#[test]
fn single_impulse_settles_within_fifty_frames() {
    let mut m = integrator(0.0);
    m.add_impulse(0.05);
    for _ in 0..50 {
        m.step(DT);
    }
    assert!(m.velocity().abs() < 0.001, "velocity {}", m.velocity());
}

#[test]
fn velocity_is_clamped_to_terminal() {
    let mut m = integrator(0.0);
    m.add_impulse(5.0);
    m.step(DT);
    assert!(m.velocity() <= MotionConfig::default().terminal_velocity);
    m.add_impulse(-50.0);
    m.step(DT);
    assert!(m.velocity() >= -MotionConfig::default().terminal_velocity);
}

#[test]
fn scroll_uses_only_the_sign() {
    let mut small = integrator(0.5);
    let mut large = integrator(0.5);
    small.scroll(1.0);
    large.scroll(120.0);
    small.step(DT);
    large.step(DT);
    assert_eq!(small.state(), large.state());
    assert!(small.velocity() > 0.0);

    let mut none = integrator(0.5);
    none.scroll(0.0);
    none.step(DT);
    assert_eq!(none.position(), 0.5);
}

#[test]
fn position_wraps_when_coasting_backwards() {
    let mut m = integrator(0.0);
    m.add_impulse(-0.1);
    m.step(DT);
    assert!(m.position() > 0.9 && m.position() < 1.0);
}

#[test]
fn seek_glides_to_target_and_clears() {
    let mut m = integrator(0.0);
    m.seek_to(0.1, 1.0);
    let mut arrived = None;
    for frame in 0..400 {
        if let Some(t) = m.step(DT) {
            arrived = Some((frame, t));
            break;
        }
        assert!(m.velocity() > 0.0, "glide velocity is pinned");
    }
    let (frame, t) = arrived.expect("seek never arrived");
    assert!(frame > 60, "glide, not a jump");
    assert_eq!(t, 0.1);
    assert_eq!(m.position(), 0.1);
    assert_eq!(m.velocity(), 0.0);
    assert!(m.seek().is_none());
    assert_eq!(m.step(DT), None);
}

#[test]
fn backward_seek_crosses_the_seam() {
    let mut m = integrator(0.02);
    m.seek_to(0.95, -1.0);
    let mut steps = 0;
    while m.step(DT).is_none() {
        steps += 1;
        assert!(steps < 400);
        assert!(m.velocity() < 0.0);
    }
    assert_eq!(m.position(), 0.95);
}

#[test]
fn halt_drops_pending_input() {
    let mut m = integrator(0.4);
    m.add_impulse(0.05);
    m.seek_to(0.9, 1.0);
    m.halt();
    m.step(DT);
    assert_eq!(m.position(), 0.4);
    assert!(m.seek().is_none());
}
