#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;
use tour_core::NavigationStateMachine;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod loader;
mod pose;
mod presenter;
mod scene;
mod storage;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("museum-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let config = loader::load_config().await;
    let stop_tolerance = config.stop_tolerance;
    let nav = NavigationStateMachine::new(
        config,
        Box::new(scene::JsScene),
        Box::new(storage::LocalStore::open()),
    )?;
    let nav: events::SharedNav = Rc::new(RefCell::new(nav));

    // Assets arrive through the navigation inbox; input works before they land.
    loader::spawn_asset_loaders(&nav.borrow().resource_sender(), stop_tolerance);

    events::wire_resize(&canvas, &nav);
    events::wire_pointer(&canvas, &nav);
    events::wire_wheel(&nav);
    events::wire_keys(&nav);
    events::wire_buttons(&document, &nav);
    events::wire_teardown(&nav);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        nav: nav.clone(),
        presenter: presenter::Presenter::new(document.clone(), canvas.clone()),
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
