use std::cell::RefCell;
use std::rc::Rc;

use tour_core::NavigationStateMachine;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::{NEXT_BUTTON_ID, PREV_BUTTON_ID, RETURN_BUTTON_ID};
use crate::dom;
use crate::input::{self, KeyCommand};

pub type SharedNav = Rc<RefCell<NavigationStateMachine>>;

fn listen<E>(target: &web::EventTarget, kind: &str, handler: impl FnMut(E) + 'static)
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    if let Err(e) = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()) {
        log::warn!("[input] could not listen for {}: {:?}", kind, e);
    }
    closure.forget();
}

pub fn wire_pointer(canvas: &web::HtmlCanvasElement, nav: &SharedNav) {
    // pointerdown
    {
        let nav = nav.clone();
        let canvas_target = canvas.clone();
        listen(canvas, "pointerdown", move |ev: web::PointerEvent| {
            let pos = input::pointer_css_px(&ev, &canvas_target);
            nav.borrow_mut().pointer_down(pos.x, pos.y);
            let _ = canvas_target.set_pointer_capture(ev.pointer_id());
        });
    }

    // pointermove: drag-look while pressed, hover otherwise
    {
        let nav = nav.clone();
        let canvas_move = canvas.clone();
        listen(canvas, "pointermove", move |ev: web::PointerEvent| {
            let pos = input::pointer_css_px(&ev, &canvas_move);
            nav.borrow_mut().pointer_move(pos.x, pos.y);
        });
    }

    // pointerup
    {
        let nav = nav.clone();
        let canvas_up = canvas.clone();
        listen(canvas, "pointerup", move |ev: web::PointerEvent| {
            let pos = input::pointer_css_px(&ev, &canvas_up);
            nav.borrow_mut().pointer_up(pos.x, pos.y);
            let _ = canvas_up.release_pointer_capture(ev.pointer_id());
        });
    }

    // click fires after pointerup, which has already classified the press
    {
        let nav = nav.clone();
        let canvas_click = canvas.clone();
        listen(canvas, "click", move |ev: web::MouseEvent| {
            let pos = input::pointer_css_px(&ev, &canvas_click);
            let outcome = nav.borrow_mut().pointer_click(pos.x, pos.y);
            log::debug!("[input] click at ({:.0}, {:.0}) -> {:?}", pos.x, pos.y, outcome);
        });
    }
}

pub fn wire_wheel(nav: &SharedNav) {
    let Some(window) = web::window() else {
        return;
    };
    let nav = nav.clone();
    listen(&window, "wheel", move |ev: web::WheelEvent| {
        let tick = input::wheel_to_scroll(ev.delta_y());
        if tick != 0.0 {
            nav.borrow_mut().scroll(tick);
        }
    });
}

pub fn wire_keys(nav: &SharedNav) {
    let Some(window) = web::window() else {
        return;
    };
    let nav = nav.clone();
    listen(&window, "keydown", move |ev: web::KeyboardEvent| {
        if typing_into_field(&ev) {
            return;
        }
        let Some(command) = input::key_command(&ev.key()) else {
            return;
        };
        let mut nav = nav.borrow_mut();
        match command {
            KeyCommand::Next => nav.press_next(),
            KeyCommand::Prev => nav.press_prev(),
            KeyCommand::ReturnToTour => {
                nav.press_return_to_tour();
            }
            KeyCommand::ConfirmDrillDown => {
                nav.confirm_drill_down();
            }
        }
        ev.prevent_default();
    });
}

fn typing_into_field(ev: &web::KeyboardEvent) -> bool {
    let Some(target) = ev.target() else {
        return false;
    };
    if let Some(el) = target.dyn_ref::<web::HtmlElement>() {
        if el.is_content_editable() {
            return true;
        }
    }
    target
        .dyn_ref::<web::Element>()
        .is_some_and(|el| input::is_text_entry_tag(&el.tag_name()))
}

pub fn wire_buttons(document: &web::Document, nav: &SharedNav) {
    let nav_prev = nav.clone();
    dom::add_click_listener(document, PREV_BUTTON_ID, move || {
        nav_prev.borrow_mut().press_prev();
    });
    let nav_next = nav.clone();
    dom::add_click_listener(document, NEXT_BUTTON_ID, move || {
        nav_next.borrow_mut().press_next();
    });
    let nav_return = nav.clone();
    dom::add_click_listener(document, RETURN_BUTTON_ID, move || {
        nav_return.borrow_mut().press_return_to_tour();
    });
}

pub fn wire_resize(canvas: &web::HtmlCanvasElement, nav: &SharedNav) {
    let apply = {
        let canvas = canvas.clone();
        let nav = nav.clone();
        move || {
            dom::sync_canvas_backing_size(&canvas);
            let size = input::canvas_css_size(&canvas);
            nav.borrow_mut().resize(size.x, size.y);
        }
    };
    apply();
    if let Some(window) = web::window() {
        listen(&window, "resize", move |_ev: web::Event| apply());
    }
}

/// Persist the session when the page goes away.
pub fn wire_teardown(nav: &SharedNav) {
    let Some(window) = web::window() else {
        return;
    };
    let nav = nav.clone();
    listen(&window, "pagehide", move |_ev: web::Event| {
        if let Err(e) = nav.borrow_mut().teardown() {
            log::error!("[store] session not saved: {e}");
        }
    });
}
