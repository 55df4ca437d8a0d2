//! Tunable parameters for a tour session.
//!
//! Defaults come from [`crate::constants`]. Front-ends may overlay a partial
//! JSON document; missing fields keep their defaults.

use serde::Deserialize;

use crate::camera::CameraConfig;
use crate::constants::*;
use crate::error::{Result, TourError};
use crate::look::LookConfig;
use crate::motion::MotionConfig;

/// What a repeat click on the focused painting does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondClickPolicy {
    /// Stay at the painting.
    Ignore,
    /// Leave the scene for the painting's page straight away.
    #[default]
    DrillDown,
    /// Ask the host first; `confirm_drill_down` completes the navigation.
    Confirm,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TourConfig {
    pub motion: MotionConfig,
    pub look: LookConfig,
    pub camera: CameraConfig,
    pub stop_tolerance: f32,
    pub transition_duration: f32,
    pub interaction_distance: f32,
    /// Rejects hits on faces smaller than this. `None` accepts any face.
    pub min_face_area: Option<f32>,
    /// Approach back faces from the viewer's side instead of through the wall.
    pub flip_back_faces: bool,
    pub click_slop_px: f32,
    pub second_click: SecondClickPolicy,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            motion: MotionConfig::default(),
            look: LookConfig::default(),
            camera: CameraConfig::default(),
            stop_tolerance: STOP_TOLERANCE,
            transition_duration: TRANSITION_DURATION_SEC,
            interaction_distance: INTERACTION_DISTANCE,
            min_face_area: None,
            flip_back_faces: true,
            click_slop_px: CLICK_SLOP_PX,
            second_click: SecondClickPolicy::default(),
        }
    }
}

impl TourConfig {
    /// Parse a (possibly partial) JSON overlay and validate the result.
    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: TourConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let m = &self.motion;
        if !(m.friction > 0.0 && m.friction < 1.0) {
            return Err(TourError::Config(format!(
                "friction must lie in (0, 1), got {}",
                m.friction
            )));
        }
        if m.terminal_velocity <= 0.0 || m.acceleration <= 0.0 {
            return Err(TourError::Config(
                "acceleration and terminal velocity must be positive".into(),
            ));
        }
        if self.transition_duration <= 0.0 {
            return Err(TourError::Config(format!(
                "transition duration must be positive, got {}",
                self.transition_duration
            )));
        }
        if self.interaction_distance <= 0.0 {
            return Err(TourError::Config(format!(
                "interaction distance must be positive, got {}",
                self.interaction_distance
            )));
        }
        if self.stop_tolerance <= 0.0 || self.stop_tolerance >= 0.5 {
            return Err(TourError::Config(format!(
                "stop tolerance must lie in (0, 0.5), got {}",
                self.stop_tolerance
            )));
        }
        Ok(())
    }
}
