use glam::Vec2;
use web_sys as web;

/// Keyboard shortcuts onto the navigation commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    Next,
    Prev,
    ReturnToTour,
    ConfirmDrillDown,
}

#[inline]
pub fn key_command(key: &str) -> Option<KeyCommand> {
    match key {
        "ArrowRight" | "PageDown" | "n" | "N" => Some(KeyCommand::Next),
        "ArrowLeft" | "PageUp" | "p" | "P" => Some(KeyCommand::Prev),
        "Backspace" | "Escape" => Some(KeyCommand::ReturnToTour),
        "Enter" => Some(KeyCommand::ConfirmDrillDown),
        _ => None,
    }
}

/// Form controls that keep their own keystrokes.
#[inline]
pub fn is_text_entry_tag(tag: &str) -> bool {
    ["INPUT", "TEXTAREA", "SELECT"]
        .iter()
        .any(|t| tag.eq_ignore_ascii_case(t))
}

/// Wheel `deltaY` to a scroll tick: wheel up moves forward along the tour.
#[inline]
pub fn wheel_to_scroll(delta_y: f64) -> f32 {
    if delta_y > 0.0 {
        -1.0
    } else if delta_y < 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Client coordinates relative to a rect's top-left corner, in CSS pixels.
#[inline]
pub fn client_to_local(client: Vec2, left: f32, top: f32) -> Vec2 {
    Vec2::new(client.x - left, client.y - top)
}

#[inline]
pub fn pointer_css_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    client_to_local(
        Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
        rect.left() as f32,
        rect.top() as f32,
    )
}

/// Canvas size in CSS pixels, the space pointer positions are reported in.
#[inline]
pub fn canvas_css_size(canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(rect.width() as f32, rect.height() as f32)
}
