//! Camera description, poses and picking rays.
//!
//! These types avoid platform APIs; the web and native frontends read the
//! camera to build their own view matrices and feed pointer positions back
//! in as normalized device coordinates.

use glam::{Mat4, Vec2, Vec3, Vec4};
use serde::Deserialize;

use crate::constants::*;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    pub start_position: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fovy_degrees: CAMERA_FOVY_DEGREES,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
            start_position: CAMERA_START_POSITION,
        }
    }
}

/// World-space ray with a unit-length direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Orientation {
    /// Free-look angles, Euler order YXZ.
    Angles { yaw: f32, pitch: f32 },
    LookAt(Vec3),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub orientation: Orientation,
}

impl CameraPose {
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            orientation: Orientation::LookAt(target),
        }
    }

    /// Point the pose is looking at, `distance` ahead for angle-based poses.
    pub fn focus(&self, distance: f32) -> Vec3 {
        match self.orientation {
            Orientation::LookAt(target) => target,
            Orientation::Angles { yaw, pitch } => {
                self.position + forward_from_angles(yaw, pitch) * distance
            }
        }
    }
}

/// Unit forward vector for YXZ yaw/pitch, looking down -Z at zero.
#[inline]
pub fn forward_from_angles(yaw: f32, pitch: f32) -> Vec3 {
    let (sy, cy) = yaw.sin_cos();
    let (sp, cp) = pitch.sin_cos();
    Vec3::new(-sy * cp, sp, -cy * cp)
}

/// Inverse of [`forward_from_angles`]. Returns `(yaw, pitch)`.
#[inline]
pub fn angles_from_forward(dir: Vec3) -> (f32, f32) {
    let d = dir.normalize_or_zero();
    if d == Vec3::ZERO {
        return (0.0, 0.0);
    }
    let pitch = d.y.clamp(-1.0, 1.0).asin();
    let yaw = (-d.x).atan2(-d.z);
    (yaw, pitch)
}

/// Pixel coordinates to NDC, y up. Degenerate viewports map to the centre.
#[inline]
pub fn pointer_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new((2.0 * x / width) - 1.0, 1.0 - (2.0 * y / height))
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        let eye = Vec3::from(config.start_position);
        Self {
            eye,
            target: eye + Vec3::NEG_Z,
            up: Vec3::Y,
            aspect,
            fovy_radians: config.fovy_degrees.to_radians(),
            znear: config.znear,
            zfar: config.zfar,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Keep the eye, aim along yaw/pitch.
    pub fn set_angles(&mut self, yaw: f32, pitch: f32) {
        self.target = self.eye + forward_from_angles(yaw, pitch);
    }

    /// Move the eye, keeping the current viewing direction.
    pub fn translate_to(&mut self, eye: Vec3) {
        let dir = self.target - self.eye;
        self.eye = eye;
        self.target = eye + dir;
    }

    /// World-space ray through `ndc` (x right, y up, both in [-1, 1]).
    pub fn screen_ray(&self, ndc: Vec2) -> Ray {
        let inv = (self.projection_matrix() * self.view_matrix()).inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        Ray::new(self.eye, p1 - self.eye)
    }
}
