use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::events::SharedNav;
use crate::pose::PoseExport;
use crate::presenter::Presenter;
use crate::scene;

pub struct FrameContext {
    pub nav: SharedNav,
    pub presenter: Presenter,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        let mut nav = self.nav.borrow_mut();
        nav.frame(dt);
        // a confirmed drill-down queues more events, so keep draining
        loop {
            let events = nav.drain_events();
            if events.is_empty() {
                break;
            }
            let mut confirmed = false;
            for event in &events {
                confirmed |= self.presenter.present(event);
            }
            if confirmed {
                nav.confirm_drill_down();
            }
        }

        let cam = nav.camera();
        let pose = PoseExport::new(
            cam.eye,
            cam.target,
            cam.up,
            cam.fovy_radians,
            cam.aspect,
            nav.hovered().is_some(),
        );
        scene::publish_pose(&pose);
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    let tick = tick.borrow();
    let Some(cb) = tick.as_ref() else {
        return;
    };
    if let Err(e) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
        log::error!("[frame] requestAnimationFrame failed: {:?}", e);
    }
}
