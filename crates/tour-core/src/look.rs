//! Drag-to-look orientation control.

use glam::{Vec2, Vec3};
use serde::Deserialize;

use crate::camera::{angles_from_forward, Orientation};
use crate::constants::*;

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    pub rotation_speed: f32,
    pub pitch_margin: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            rotation_speed: LOOK_ROTATION_SPEED,
            pitch_margin: LOOK_PITCH_MARGIN,
        }
    }
}

/// Yaw/pitch driven by pointer drags. Dragging grabs the scene: moving the
/// pointer right turns the view left.
#[derive(Clone, Debug)]
pub struct FreeLook {
    pub yaw: f32,
    pub pitch: f32,
    config: LookConfig,
    enabled: bool,
    dragging: bool,
    last: Vec2,
    travel: f32,
}

impl FreeLook {
    pub fn new(config: LookConfig, yaw: f32, pitch: f32) -> Self {
        let mut look = Self {
            yaw,
            pitch,
            config,
            enabled: true,
            dragging: false,
            last: Vec2::ZERO,
            travel: 0.0,
        };
        look.pitch = look.clamp_pitch(pitch);
        look
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Disable and drop any drag in progress.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.dragging = false;
    }

    pub fn press(&mut self, pos: Vec2) -> bool {
        if !self.enabled {
            return false;
        }
        self.dragging = true;
        self.last = pos;
        self.travel = 0.0;
        true
    }

    /// Returns true when the orientation changed.
    pub fn drag_to(&mut self, pos: Vec2) -> bool {
        if !self.enabled || !self.dragging {
            return false;
        }
        let delta = pos - self.last;
        self.last = pos;
        self.travel += delta.length();
        if delta == Vec2::ZERO {
            return false;
        }
        self.rotate_by(delta);
        true
    }

    /// Ends the drag and reports how far the pointer travelled while pressed.
    pub fn release(&mut self) -> f32 {
        self.dragging = false;
        self.travel
    }

    pub fn rotate_by(&mut self, delta_px: Vec2) {
        self.yaw += delta_px.x * self.config.rotation_speed;
        self.pitch = self.clamp_pitch(self.pitch + delta_px.y * self.config.rotation_speed);
    }

    /// Adopt the angles of a camera looking along `forward`.
    pub fn sync_from(&mut self, forward: Vec3) {
        let (yaw, pitch) = angles_from_forward(forward);
        self.yaw = yaw;
        self.pitch = self.clamp_pitch(pitch);
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::Angles {
            yaw: self.yaw,
            pitch: self.pitch,
        }
    }

    fn clamp_pitch(&self, pitch: f32) -> f32 {
        let max = std::f32::consts::FRAC_PI_2 - self.config.pitch_margin;
        pitch.clamp(-max, max)
    }
}
