//! Turns navigation events into page effects: legend panel, painting audio,
//! button state, hover cursor and drill-down page changes.

use tour_core::{AudioRef, NavEvent, NavigationMode};
use web_sys as web;

use crate::constants::*;
use crate::dom;

pub struct Presenter {
    document: web::Document,
    canvas: web::HtmlCanvasElement,
    audio: Option<web::HtmlAudioElement>,
}

impl Presenter {
    pub fn new(document: web::Document, canvas: web::HtmlCanvasElement) -> Self {
        Self {
            document,
            canvas,
            audio: None,
        }
    }

    /// Apply one event. Returns true when the visitor accepted a drill-down
    /// prompt and the navigation should be confirmed.
    pub fn present(&mut self, event: &NavEvent) -> bool {
        match event {
            NavEvent::HoverChanged(hovered) => {
                let _ = self
                    .canvas
                    .class_list()
                    .toggle_with_force(HOVER_CLASS, hovered.is_some());
            }
            NavEvent::ModeChanged(mode) => self.show_mode(mode),
            NavEvent::StopReached { name, t } => {
                log::info!("[tour] at stop '{}' ({:.3})", name, t);
            }
            NavEvent::ArrivedAtInterest {
                name,
                legend,
                audio,
            } => {
                dom::set_text(&self.document, LEGEND_TITLE_ID, &name.replace('_', " "));
                dom::set_text(&self.document, LEGEND_TEXT_ID, legend);
                dom::set_class(&self.document, LEGEND_ID, VISIBLE_CLASS, true);
                if let Some(audio) = audio {
                    self.play(audio);
                }
            }
            NavEvent::LeftInterest { .. } => {
                self.stop_audio();
                dom::set_class(&self.document, LEGEND_ID, VISIBLE_CLASS, false);
            }
            NavEvent::DrillDownRequested { name } => {
                let prompt = format!("Open the page for {}?", name.replace('_', " "));
                return web::window()
                    .and_then(|w| w.confirm_with_message(&prompt).ok())
                    .unwrap_or(false);
            }
            NavEvent::DrillDown { name, link } => self.drill_down(name, link.as_deref()),
            NavEvent::ReturnedToTour { .. } => {}
        }
        false
    }

    fn show_mode(&self, mode: &NavigationMode) {
        let at_target = matches!(mode, NavigationMode::AtTarget { .. });
        let busy = matches!(mode, NavigationMode::TransitioningToTarget { .. });
        dom::set_class(&self.document, RETURN_BUTTON_ID, VISIBLE_CLASS, at_target);
        for id in [PREV_BUTTON_ID, NEXT_BUTTON_ID] {
            dom::set_class(&self.document, id, BUSY_CLASS, busy || at_target);
        }
    }

    fn play(&mut self, audio: &AudioRef) {
        self.stop_audio();
        match web::HtmlAudioElement::new_with_src(&audio.url) {
            Ok(el) => {
                if let Err(e) = el.play() {
                    log::warn!("[audio] '{}' did not start: {:?}", audio.id, e);
                }
                self.audio = Some(el);
            }
            Err(e) => log::warn!("[audio] '{}' unavailable: {:?}", audio.id, e),
        }
    }

    fn stop_audio(&mut self) {
        if let Some(el) = self.audio.take() {
            let _ = el.pause();
        }
    }

    fn drill_down(&mut self, name: &str, link: Option<&str>) {
        let Some(link) = link else {
            log::info!("[tour] '{}' has no page to open", name);
            return;
        };
        self.stop_audio();
        log::info!("[tour] opening {}", link);
        if let Some(w) = web::window() {
            if let Err(e) = w.location().set_href(link) {
                log::error!("[tour] navigation to {} failed: {:?}", link, e);
            }
        }
    }
}
