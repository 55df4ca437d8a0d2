use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use winit::{
    event::*,
    event_loop::{ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{CursorIcon, Window, WindowBuilder},
};

use tour_core::{Loaded, NavEvent, NavigationMode, NavigationStateMachine};

mod loader;
mod quads;
mod store;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const DEFAULT_ASSET_DIR: &str = "assets";
const DEFAULT_SESSION_FILE: &str = "museum-session.json";

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    // tour-native [ASSET_DIR] [SESSION_FILE]
    let mut args = std::env::args().skip(1);
    let asset_dir = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_ASSET_DIR.into()));
    let session_file = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_SESSION_FILE.into()));
    log::info!(
        "assets from {}, session in {}",
        asset_dir.display(),
        session_file.display()
    );

    let config = loader::load_config(&asset_dir);
    let scene = quads::QuadScene::new();
    let mut nav = NavigationStateMachine::new(
        config.clone(),
        Box::new(scene.clone()),
        Box::new(store::FileStore::open(session_file)),
    )?;

    // Catalog results pass through here first to build the quad scene.
    let (tx, rx) = mpsc::channel();
    let _loader = loader::spawn(asset_dir, config.stop_tolerance, tx);

    let event_loop = EventLoop::new().expect("event loop");
    let window = WindowBuilder::new()
        .with_title("Museum tour (native)")
        .build(&event_loop)
        .expect("window");
    let size = window.inner_size();
    nav.resize(size.width as f32, size.height as f32);

    let mut cursor = (0.0_f32, 0.0_f32);
    let mut last_frame = Instant::now();
    let mut last_title = String::new();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => nav.resize(size.width as f32, size.height as f32),
            WindowEvent::CloseRequested => {
                if let Err(e) = nav.teardown() {
                    log::error!("[store] session not saved: {e}");
                }
                elwt.exit();
            }
            WindowEvent::CursorMoved { position, .. } => {
                cursor = (position.x as f32, position.y as f32);
                nav.pointer_move(cursor.0, cursor.1);
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => nav.pointer_down(cursor.0, cursor.1),
                ElementState::Released => {
                    nav.pointer_up(cursor.0, cursor.1);
                    let outcome = nav.pointer_click(cursor.0, cursor.1);
                    log::debug!("[input] click -> {:?}", outcome);
                }
            },
            WindowEvent::MouseWheel { delta, .. } => {
                let y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32,
                };
                if y != 0.0 {
                    nav.scroll(y.signum());
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(key),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => match key {
                NamedKey::ArrowRight => nav.press_next(),
                NamedKey::ArrowLeft => nav.press_prev(),
                NamedKey::Backspace | NamedKey::Escape => {
                    nav.press_return_to_tour();
                }
                NamedKey::Enter => {
                    nav.confirm_drill_down();
                }
                _ => {}
            },
            _ => {}
        },
        Event::AboutToWait => {
            while let Ok(loaded) = rx.try_recv() {
                if let Loaded::Catalog(catalog) = &loaded {
                    scene.replace(quads::quads_from_catalog(catalog));
                }
                nav.deliver(loaded);
            }

            let now = Instant::now();
            nav.frame(now - last_frame);
            last_frame = now;
            for event in nav.drain_events() {
                present(&window, &event);
            }

            let title = title_for(&nav);
            if title != last_title {
                window.set_title(&title);
                last_title = title;
            }
            elwt.set_control_flow(ControlFlow::WaitUntil(now + FRAME_INTERVAL));
        }
        _ => {}
    })?;
    Ok(())
}

// No audio output or page navigation natively; cues are logged.
fn present(window: &Window, event: &NavEvent) {
    match event {
        NavEvent::HoverChanged(hovered) => window.set_cursor_icon(if hovered.is_some() {
            CursorIcon::Pointer
        } else {
            CursorIcon::Default
        }),
        NavEvent::ModeChanged(_) | NavEvent::ReturnedToTour { .. } => {}
        NavEvent::StopReached { name, t } => log::info!("[tour] at stop '{}' ({:.3})", name, t),
        NavEvent::ArrivedAtInterest {
            name,
            legend,
            audio,
        } => {
            log::info!("[tour] {}: {}", name, legend);
            if let Some(audio) = audio {
                log::info!("[audio] cue '{}' ({})", audio.id, audio.url);
            }
        }
        NavEvent::LeftInterest { name } => log::info!("[tour] leaving {}", name),
        NavEvent::DrillDownRequested { name } => {
            log::info!("[tour] press Enter to open the page for {}", name)
        }
        NavEvent::DrillDown { name, link } => match link {
            Some(link) => log::info!("[tour] {} links to {}", name, link),
            None => log::info!("[tour] {} has no page", name),
        },
    }
}

fn title_for(nav: &NavigationStateMachine) -> String {
    let place = match nav.mode() {
        NavigationMode::FreeLook => "touring".to_owned(),
        NavigationMode::TourPlayback { target, .. } => format!("gliding to {target:.2}"),
        NavigationMode::TransitioningToTarget { .. } => "moving".to_owned(),
        NavigationMode::AtTarget { interest, .. } => nav
            .catalog()
            .and_then(|c| c.get(interest))
            .map(|p| p.name().replace('_', " "))
            .unwrap_or_default(),
    };
    format!(
        "Museum tour - {} - {:.2} - visits {}",
        place,
        nav.motion_state().position,
        nav.progression()
    )
}
