//! Timed camera tweens between poses.
//!
//! A tween carries a payload that is handed back exactly once, on the
//! update that reaches the end. Starting a new tween replaces the old one;
//! the replaced payload is dropped and its completion never fires.

use glam::Vec3;

use crate::camera::{Camera, CameraPose};

/// Smooth ease-in-ease-out over [0, 1].
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenKind {
    /// Interpolate both eye and focus point.
    Focus,
    /// Interpolate the eye only; viewing direction is left alone.
    PositionOnly,
}

#[derive(Clone, Debug)]
struct Tween<T> {
    from_eye: Vec3,
    to_eye: Vec3,
    from_focus: Vec3,
    to_focus: Vec3,
    kind: TweenKind,
    elapsed: f32,
    duration: f32,
    generation: u64,
    payload: T,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Completion<T> {
    pub generation: u64,
    pub payload: T,
}

#[derive(Clone, Debug)]
pub struct TransitionController<T> {
    active: Option<Tween<T>>,
    generation: u64,
}

impl<T> Default for TransitionController<T> {
    fn default() -> Self {
        Self {
            active: None,
            generation: 0,
        }
    }
}

impl<T> TransitionController<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Normalized progress of the active tween.
    pub fn progress(&self) -> Option<f32> {
        self.active
            .as_ref()
            .map(|t| (t.elapsed / t.duration).clamp(0.0, 1.0))
    }

    /// Tween eye and focus from the camera's current view to `target`.
    pub fn start_focus(
        &mut self,
        camera: &Camera,
        target: &CameraPose,
        duration: f32,
        payload: T,
    ) -> u64 {
        let to_focus = target.focus(1.0);
        let reach = camera.eye.distance(to_focus).max(1.0);
        let from_focus = camera.eye + camera.forward() * reach;
        self.start(
            camera.eye,
            target.position,
            from_focus,
            to_focus,
            TweenKind::Focus,
            duration,
            payload,
        )
    }

    /// Tween the eye to `to_eye`, keeping the viewing direction.
    pub fn start_return(&mut self, camera: &Camera, to_eye: Vec3, duration: f32, payload: T) -> u64 {
        self.start(
            camera.eye,
            to_eye,
            camera.target,
            camera.target,
            TweenKind::PositionOnly,
            duration,
            payload,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn start(
        &mut self,
        from_eye: Vec3,
        to_eye: Vec3,
        from_focus: Vec3,
        to_focus: Vec3,
        kind: TweenKind,
        duration: f32,
        payload: T,
    ) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        if self.active.is_some() {
            log::debug!("[tween] generation {} superseded", self.generation - 1);
        }
        self.active = Some(Tween {
            from_eye,
            to_eye,
            from_focus,
            to_focus,
            kind,
            elapsed: 0.0,
            duration: duration.max(f32::EPSILON),
            generation: self.generation,
            payload,
        });
        self.generation
    }

    /// Advance the active tween and write the interpolated pose to `camera`.
    /// Returns the payload on the frame that completes the tween; later
    /// calls return `None` and leave the camera untouched.
    pub fn update(&mut self, dt: f32, camera: &mut Camera) -> Option<Completion<T>> {
        let tween = self.active.as_mut()?;
        tween.elapsed += dt.max(0.0);
        let s = (tween.elapsed / tween.duration).min(1.0);
        let e = ease_in_out(s);

        let eye = tween.from_eye.lerp(tween.to_eye, e);
        match tween.kind {
            TweenKind::Focus => {
                let focus = tween.from_focus.lerp(tween.to_focus, e);
                camera.eye = eye;
                if focus.distance_squared(eye) > 1e-8 {
                    camera.target = focus;
                }
            }
            TweenKind::PositionOnly => camera.translate_to(eye),
        }

        if s < 1.0 {
            return None;
        }
        self.active.take().map(|t| Completion {
            generation: t.generation,
            payload: t.payload,
        })
    }
}
