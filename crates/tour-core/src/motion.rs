//! Damped 1-D motion of the camera along the path parameter.
//!
//! Free coasting integrates position, then decays velocity by `friction`
//! every step and clamps it to the terminal velocity. A seek (prev/next
//! command) pins velocity to a constant glide until the target stop is
//! reached.

use serde::Deserialize;

use crate::constants::*;
use crate::path::{cyclic_distance, directed_distance, wrap};

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub acceleration: f32,
    /// Fraction of velocity removed every step, strictly in (0, 1).
    pub friction: f32,
    pub terminal_velocity: f32,
    /// Coasting speed below which the camera is considered at rest.
    pub rest_velocity: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            acceleration: PATH_ACCELERATION,
            friction: PATH_FRICTION,
            terminal_velocity: PATH_TERMINAL_VELOCITY,
            rest_velocity: PATH_REST_VELOCITY,
        }
    }
}

impl MotionConfig {
    #[inline]
    pub fn scroll_impulse(&self, delta: f32) -> f32 {
        sign(delta) * SCROLL_IMPULSE_SCALE * self.acceleration
    }

    #[inline]
    pub fn seek_speed(&self) -> f32 {
        (SEEK_VELOCITY_SCALE * self.acceleration).min(self.terminal_velocity)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionState {
    pub position: f32,
    pub velocity: f32,
}

/// An active prev/next glide toward `target` (+1 forward, -1 backward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Seek {
    pub target: f32,
    pub direction: f32,
}

#[derive(Clone, Debug)]
pub struct MotionIntegrator {
    pub config: MotionConfig,
    state: MotionState,
    pending_impulse: f32,
    seek: Option<Seek>,
    tolerance: f32,
}

impl MotionIntegrator {
    pub fn new(config: MotionConfig, initial: MotionState, tolerance: f32) -> Self {
        Self {
            config,
            state: MotionState {
                position: wrap(initial.position, 0.0, 1.0),
                velocity: initial.velocity,
            },
            pending_impulse: 0.0,
            seek: None,
            tolerance,
        }
    }

    pub fn state(&self) -> MotionState {
        self.state
    }

    pub fn position(&self) -> f32 {
        self.state.position
    }

    pub fn velocity(&self) -> f32 {
        self.state.velocity
    }

    pub fn seek(&self) -> Option<Seek> {
        self.seek
    }

    /// Place the camera at `position` at rest, dropping any pending input.
    pub fn reset_to(&mut self, position: f32) {
        self.state = MotionState {
            position: wrap(position, 0.0, 1.0),
            velocity: 0.0,
        };
        self.halt();
    }

    /// Zero velocity and forget queued impulses and seeks.
    pub fn halt(&mut self) {
        self.state.velocity = 0.0;
        self.pending_impulse = 0.0;
        self.seek = None;
    }

    /// Queue a velocity change applied at the start of the next step.
    pub fn add_impulse(&mut self, dv: f32) {
        if dv.is_finite() {
            self.pending_impulse += dv;
        }
    }

    /// One wheel tick; only the sign of `delta` matters.
    pub fn scroll(&mut self, delta: f32) {
        let dv = self.config.scroll_impulse(delta);
        self.add_impulse(dv);
    }

    pub fn seek_to(&mut self, target: f32, direction: f32) {
        self.pending_impulse = 0.0;
        self.seek = Some(Seek {
            target: wrap(target, 0.0, 1.0),
            direction: if direction < 0.0 { -1.0 } else { 1.0 },
        });
    }

    /// Advance by `dt` seconds. Returns the seek target on the step that
    /// reaches it.
    pub fn step(&mut self, dt: f32) -> Option<f32> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        match self.seek {
            Some(seek) => self.step_seek(seek, dt),
            None => {
                self.step_coast(dt);
                None
            }
        }
    }

    fn step_coast(&mut self, dt: f32) {
        let cfg = self.config;
        let s = &mut self.state;
        s.velocity += self.pending_impulse;
        self.pending_impulse = 0.0;

        s.position += s.velocity * dt;
        s.velocity *= 1.0 - cfg.friction;
        s.velocity = s.velocity.clamp(-cfg.terminal_velocity, cfg.terminal_velocity);
        if s.velocity.abs() < cfg.rest_velocity {
            s.velocity = 0.0;
        }
        s.position = wrap(s.position, 0.0, 1.0);
    }

    fn step_seek(&mut self, seek: Seek, dt: f32) -> Option<f32> {
        let speed = self.config.seek_speed();
        self.state.velocity = seek.direction * speed;

        let remaining = directed_distance(self.state.position, seek.target, seek.direction);
        let travel = speed * dt;
        if travel >= remaining {
            // would cross the stop this step
            self.state.position = seek.target;
        } else {
            self.state.position = wrap(
                self.state.position + self.state.velocity * dt,
                0.0,
                1.0,
            );
        }

        if cyclic_distance(self.state.position, seek.target) < self.tolerance {
            self.state.position = seek.target;
            self.state.velocity = 0.0;
            self.seek = None;
            return Some(seek.target);
        }
        None
    }
}

#[inline]
fn sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}
