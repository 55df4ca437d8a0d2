//! Top-level tour controller.
//!
//! Owns the camera and decides, once per frame, which single component may
//! write its pose: the path motion (free-look and playback), the transition
//! controller, or nobody (at a painting). Commands arrive as discrete calls;
//! asynchronously loaded resources arrive through an inbox drained at the
//! start of every frame. Host-facing effects (audio, legend, page changes)
//! are queued as [`NavEvent`]s.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use fnv::FnvHashMap;
use glam::{Vec2, Vec3};

use crate::camera::{pointer_ndc, Camera};
use crate::catalog::{AudioRef, InterestCatalog};
use crate::config::{SecondClickPolicy, TourConfig};
use crate::constants::FRAME_DT_MAX_SEC;
use crate::error::{Result, TourError};
use crate::interest::{InterestResolver, Resolution, SceneQuery};
use crate::look::FreeLook;
use crate::motion::{MotionIntegrator, MotionState};
use crate::path::PathModel;
use crate::persistence::{KeyValueStore, PersistedSession};
use crate::stops::StopTable;
use crate::transition::TransitionController;

/// Results of asynchronous loads, delivered through [`ResourceSender`].
#[derive(Debug)]
pub enum Loaded {
    Tour(Result<(PathModel, StopTable)>),
    Catalog(InterestCatalog),
    Legends(FnvHashMap<String, String>),
}

pub type ResourceSender = Sender<Loaded>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionLeg {
    /// Flying to a painting.
    Approach { interest: usize },
    /// Flying back to the tour path.
    Return,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NavigationMode {
    /// Coasting on the path; drag-look active.
    FreeLook,
    /// Gliding to a stop after prev/next; drag-look stays active.
    TourPlayback { target: f32, direction: f32 },
    /// A tween owns the camera; drag-look disabled.
    TransitioningToTarget {
        leg: TransitionLeg,
        resume_at: f32,
        generation: u64,
    },
    /// Parked at a painting; `resume_at` is where the tour picks up again.
    AtTarget { interest: usize, resume_at: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub enum NavEvent {
    ModeChanged(NavigationMode),
    HoverChanged(Option<String>),
    StopReached {
        name: String,
        t: f32,
    },
    ArrivedAtInterest {
        name: String,
        legend: String,
        audio: Option<AudioRef>,
    },
    LeftInterest {
        name: String,
    },
    DrillDownRequested {
        name: String,
    },
    DrillDown {
        name: String,
        link: Option<String>,
    },
    ReturnedToTour {
        t: f32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The current mode does not accept clicks, or the press was a drag.
    Ignored,
    /// Path or catalog not loaded yet.
    NotReady,
    NoHit,
    Approaching { interest: usize },
    DrillDown { interest: usize },
    ConfirmRequested { interest: usize },
}

pub struct NavigationStateMachine {
    config: TourConfig,
    camera: Camera,
    look: FreeLook,
    motion: MotionIntegrator,
    transition: TransitionController<TransitionLeg>,
    resolver: InterestResolver,
    mode: NavigationMode,

    path: Option<PathModel>,
    stops: StopTable,
    catalog: Option<InterestCatalog>,
    pending_legends: Option<FnvHashMap<String, String>>,

    scene: Box<dyn SceneQuery>,
    store: Box<dyn KeyValueStore>,
    inbox: Receiver<Loaded>,
    sender: ResourceSender,

    events: Vec<NavEvent>,
    hovered: Option<usize>,
    viewport: Vec2,
    suppress_click: bool,
    pending_drill_down: Option<usize>,
    progression: u32,
}

impl NavigationStateMachine {
    /// Seeds yaw, path position and progression from `store`.
    pub fn new(
        config: TourConfig,
        scene: Box<dyn SceneQuery>,
        store: Box<dyn KeyValueStore>,
    ) -> Result<Self> {
        config.validate()?;
        let session = PersistedSession::load(store.as_ref());
        log::info!(
            "[nav] session yaw={:.3} pathPos={:.4} progression={}",
            session.yaw,
            session.path_position,
            session.progression
        );

        let look = FreeLook::new(config.look, session.yaw, 0.0);
        let mut camera = Camera::new(&config.camera, 1.0);
        camera.set_angles(look.yaw, look.pitch);
        let motion = MotionIntegrator::new(
            config.motion,
            MotionState {
                position: session.path_position,
                velocity: 0.0,
            },
            config.stop_tolerance,
        );
        let resolver = InterestResolver::new(config.interaction_distance, config.min_face_area)
            .with_back_face_flip(config.flip_back_faces);
        let (sender, inbox) = mpsc::channel();

        Ok(Self {
            stops: StopTable::new(Vec::new(), config.stop_tolerance),
            config,
            camera,
            look,
            motion,
            transition: TransitionController::new(),
            resolver,
            mode: NavigationMode::FreeLook,
            path: None,
            catalog: None,
            pending_legends: None,
            scene,
            store,
            inbox,
            sender,
            events: Vec::new(),
            hovered: None,
            viewport: Vec2::ONE,
            suppress_click: false,
            pending_drill_down: None,
            progression: session.progression,
        })
    }

    /// Handle for loaders; messages are applied on the next frame.
    pub fn resource_sender(&self) -> ResourceSender {
        self.sender.clone()
    }

    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn motion_state(&self) -> MotionState {
        self.motion.state()
    }

    pub fn look(&self) -> &FreeLook {
        &self.look
    }

    pub fn path(&self) -> Option<&PathModel> {
        self.path.as_ref()
    }

    pub fn stops(&self) -> &StopTable {
        &self.stops
    }

    pub fn catalog(&self) -> Option<&InterestCatalog> {
        self.catalog.as_ref()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn progression(&self) -> u32 {
        self.progression
    }

    pub fn drain_events(&mut self) -> Vec<NavEvent> {
        std::mem::take(&mut self.events)
    }

    /// Snapshot of what teardown would persist.
    pub fn session(&self) -> PersistedSession {
        PersistedSession {
            yaw: self.look.yaw,
            path_position: self.resume_position(),
            progression: self.progression,
        }
    }

    /// Apply a loaded resource immediately.
    pub fn deliver(&mut self, loaded: Loaded) {
        match loaded {
            Loaded::Tour(Ok((path, stops))) => {
                log::info!(
                    "[path] {} control points, {} stops",
                    path.control_points().len(),
                    stops.len()
                );
                self.path = Some(path);
                self.stops = stops;
            }
            Loaded::Tour(Err(e)) => {
                log::error!("[path] unusable tour path, camera stays put: {e}");
            }
            Loaded::Catalog(mut catalog) => {
                if let Some(legends) = self.pending_legends.take() {
                    catalog.apply_legends(&legends);
                }
                log::info!("[catalog] {} paintings", catalog.len());
                self.catalog = Some(catalog);
            }
            Loaded::Legends(legends) => match self.catalog.as_mut() {
                Some(catalog) => catalog.apply_legends(&legends),
                None => self.pending_legends = Some(legends),
            },
        }
    }

    /// Per-frame update. Exactly one pose writer runs, chosen by the mode.
    pub fn frame(&mut self, dt: Duration) {
        while let Ok(loaded) = self.inbox.try_recv() {
            self.deliver(loaded);
        }
        let dt = dt.as_secs_f32().min(FRAME_DT_MAX_SEC);

        match self.mode {
            NavigationMode::FreeLook | NavigationMode::TourPlayback { .. } => {
                self.step_tour(dt);
            }
            NavigationMode::TransitioningToTarget {
                leg,
                resume_at,
                generation,
            } => {
                if let Some(done) = self.transition.update(dt, &mut self.camera) {
                    if done.generation == generation {
                        self.finish_transition(leg, resume_at);
                    } else {
                        log::debug!("[nav] stale tween generation {} ignored", done.generation);
                    }
                }
            }
            NavigationMode::AtTarget { .. } => {
                self.camera.set_angles(self.look.yaw, self.look.pitch);
            }
        }
    }

    fn step_tour(&mut self, dt: f32) {
        self.camera.set_angles(self.look.yaw, self.look.pitch);
        if self.path.is_none() {
            return;
        }
        if let Some(t) = self.motion.step(dt) {
            let name = self
                .stops
                .stop_at(t)
                .map(|s| s.name.clone())
                .unwrap_or_default();
            log::info!("[nav] reached stop '{}' at {:.4}", name, t);
            self.events.push(NavEvent::StopReached { name, t });
            self.set_mode(NavigationMode::FreeLook);
        }
        if let Some(path) = self.path.as_ref() {
            self.camera.translate_to(path.point_at(self.motion.position()));
        }
    }

    fn finish_transition(&mut self, leg: TransitionLeg, resume_at: f32) {
        self.look.sync_from(self.camera.forward());
        self.look.enable();
        match leg {
            TransitionLeg::Approach { interest } => {
                self.progression = self.progression.saturating_add(1);
                if let Some(point) = self.catalog.as_ref().and_then(|c| c.get(interest)) {
                    log::info!("[nav] arrived at '{}'", point.name());
                    self.events.push(NavEvent::ArrivedAtInterest {
                        name: point.name().to_owned(),
                        legend: point.legend.clone(),
                        audio: point.audio.clone(),
                    });
                }
                self.set_mode(NavigationMode::AtTarget {
                    interest,
                    resume_at,
                });
            }
            TransitionLeg::Return => {
                self.motion.reset_to(resume_at);
                self.events.push(NavEvent::ReturnedToTour { t: resume_at });
                self.set_mode(NavigationMode::FreeLook);
            }
        }
    }

    fn set_mode(&mut self, mode: NavigationMode) {
        if self.mode == mode {
            return;
        }
        log::info!("[nav] mode {:?} -> {:?}", self.mode, mode);
        if !matches!(mode, NavigationMode::AtTarget { .. }) {
            self.pending_drill_down = None;
        }
        self.mode = mode;
        self.events.push(NavEvent::ModeChanged(mode));
    }

    fn resume_position(&self) -> f32 {
        match self.mode {
            NavigationMode::TransitioningToTarget { resume_at, .. }
            | NavigationMode::AtTarget { resume_at, .. } => resume_at,
            _ => self.motion.position(),
        }
    }

    // ---------------- Commands ----------------

    /// One wheel tick; positive moves forward along the path.
    pub fn scroll(&mut self, delta: f32) {
        if self.mode != NavigationMode::FreeLook {
            log::debug!("[nav] scroll ignored in {:?}", self.mode);
            return;
        }
        if self.path.is_none() {
            log::debug!("[nav] scroll: {}", TourError::ResourceNotReady("path"));
            return;
        }
        self.motion.scroll(delta);
    }

    pub fn press_next(&mut self) {
        self.seek(1.0);
    }

    pub fn press_prev(&mut self) {
        self.seek(-1.0);
    }

    fn seek(&mut self, direction: f32) {
        let from = match self.mode {
            NavigationMode::FreeLook => self.motion.position(),
            // a repeated press in the same direction chains to the stop after
            NavigationMode::TourPlayback {
                target,
                direction: d,
            } if d == direction => target,
            NavigationMode::TourPlayback { .. } => self.motion.position(),
            _ => {
                log::debug!("[nav] prev/next ignored in {:?}", self.mode);
                return;
            }
        };
        if self.path.is_none() {
            log::debug!("[nav] prev/next: {}", TourError::ResourceNotReady("path"));
            return;
        }
        let stop = if direction > 0.0 {
            self.stops.next_stop(from)
        } else {
            self.stops.prev_stop(from)
        };
        let Some(stop) = stop else {
            log::debug!("[nav] prev/next ignored: tour has no stops");
            return;
        };
        let target = stop.t;
        log::info!("[nav] gliding to '{}' at {:.4}", stop.name, target);
        self.motion.seek_to(target, direction);
        self.set_mode(NavigationMode::TourPlayback { target, direction });
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.suppress_click = false;
        self.look.press(Vec2::new(x, y));
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if self.look.is_dragging() {
            self.look.drag_to(Vec2::new(x, y));
            return;
        }
        if matches!(self.mode, NavigationMode::TransitioningToTarget { .. }) {
            return;
        }
        let hovered = match self.resolve_at(x, y) {
            Ok(Resolution::Target(t)) => Some(t.interest),
            Ok(Resolution::NoHit) | Err(_) => None,
        };
        if hovered != self.hovered {
            self.hovered = hovered;
            let name = hovered
                .and_then(|i| self.catalog.as_ref().and_then(|c| c.get(i)))
                .map(|p| p.name().to_owned());
            self.events.push(NavEvent::HoverChanged(name));
        }
    }

    pub fn pointer_up(&mut self, _x: f32, _y: f32) {
        let travel = self.look.release();
        self.suppress_click = travel > self.config.click_slop_px;
    }

    pub fn pointer_click(&mut self, x: f32, y: f32) -> ClickOutcome {
        if std::mem::take(&mut self.suppress_click) {
            return ClickOutcome::Ignored;
        }
        let focused = match self.mode {
            NavigationMode::FreeLook => None,
            NavigationMode::AtTarget { interest, .. } => Some(interest),
            _ => {
                log::debug!("[nav] click ignored in {:?}", self.mode);
                return ClickOutcome::Ignored;
            }
        };
        let target = match self.resolve_at(x, y) {
            Ok(Resolution::Target(t)) => t,
            Ok(Resolution::NoHit) => return ClickOutcome::NoHit,
            Err(e) => {
                log::debug!("[nav] click: {e}");
                return ClickOutcome::NotReady;
            }
        };

        if focused == Some(target.interest) {
            return self.repeat_click(target.interest);
        }
        if let Some(previous) = focused {
            self.push_left(previous);
        }

        let resume_at = target
            .nearest_stop
            .unwrap_or_else(|| self.resume_position());
        self.motion.halt();
        self.look.disable();
        let leg = TransitionLeg::Approach {
            interest: target.interest,
        };
        let generation = self.transition.start_focus(
            &self.camera,
            &target.pose,
            self.config.transition_duration,
            leg,
        );
        self.set_mode(NavigationMode::TransitioningToTarget {
            leg,
            resume_at,
            generation,
        });
        ClickOutcome::Approaching {
            interest: target.interest,
        }
    }

    fn repeat_click(&mut self, interest: usize) -> ClickOutcome {
        match self.config.second_click {
            SecondClickPolicy::Ignore => ClickOutcome::Ignored,
            SecondClickPolicy::DrillDown => {
                self.push_drill_down(interest);
                ClickOutcome::DrillDown { interest }
            }
            SecondClickPolicy::Confirm => {
                self.pending_drill_down = Some(interest);
                if let Some(name) = self.interest_name(interest) {
                    self.events.push(NavEvent::DrillDownRequested { name });
                }
                ClickOutcome::ConfirmRequested { interest }
            }
        }
    }

    /// Completes a drill-down requested under [`SecondClickPolicy::Confirm`].
    pub fn confirm_drill_down(&mut self) -> bool {
        match (self.mode, self.pending_drill_down.take()) {
            (NavigationMode::AtTarget { interest, .. }, Some(pending)) if pending == interest => {
                self.push_drill_down(interest);
                true
            }
            _ => false,
        }
    }

    /// Leave the focused painting and fly back to the saved stop.
    pub fn press_return_to_tour(&mut self) -> bool {
        let NavigationMode::AtTarget {
            interest,
            resume_at,
        } = self.mode
        else {
            log::debug!("[nav] return ignored in {:?}", self.mode);
            return false;
        };
        let eye = match self.path.as_ref() {
            Some(path) => path.point_at(resume_at),
            None => Vec3::from(self.config.camera.start_position),
        };
        self.push_left(interest);
        self.look.disable();
        let leg = TransitionLeg::Return;
        let generation =
            self.transition
                .start_return(&self.camera, eye, self.config.transition_duration, leg);
        self.set_mode(NavigationMode::TransitioningToTarget {
            leg,
            resume_at,
            generation,
        });
        true
    }

    /// Viewport resize hook: updates the camera aspect.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.viewport = Vec2::new(width, height);
        self.camera.set_aspect(width / height);
    }

    /// Write the session to the store. Called once when the host shuts down.
    pub fn teardown(&mut self) -> Result<()> {
        let session = self.session();
        log::info!(
            "[store] saving yaw={:.3} pathPos={:.4} progression={}",
            session.yaw,
            session.path_position,
            session.progression
        );
        session.save(self.store.as_mut())
    }

    fn resolve_at(&self, x: f32, y: f32) -> Result<Resolution> {
        let catalog = self
            .catalog
            .as_ref()
            .ok_or(TourError::ResourceNotReady("catalog"))?;
        let ndc = pointer_ndc(x, y, self.viewport.x, self.viewport.y);
        let ray = self.camera.screen_ray(ndc);
        let tour = self.path.as_ref().map(|p| (p, &self.stops));
        Ok(self
            .resolver
            .resolve(&ray, self.camera.eye, self.scene.as_ref(), catalog, tour))
    }

    fn interest_name(&self, interest: usize) -> Option<String> {
        self.catalog
            .as_ref()
            .and_then(|c| c.get(interest))
            .map(|p| p.name().to_owned())
    }

    fn push_left(&mut self, interest: usize) {
        if let Some(name) = self.interest_name(interest) {
            self.events.push(NavEvent::LeftInterest { name });
        }
    }

    fn push_drill_down(&mut self, interest: usize) {
        if let Some(point) = self.catalog.as_ref().and_then(|c| c.get(interest)) {
            log::info!("[nav] drill down into '{}'", point.name());
            self.events.push(NavEvent::DrillDown {
                name: point.name().to_owned(),
                link: point.link.clone(),
            });
        }
    }
}
