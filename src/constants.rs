// DOM hooks and asset locations for the web front-end.
// Navigation tuning lives in tour-core; only page wiring is defined here.

pub const CANVAS_ID: &str = "museum-canvas";
pub const PREV_BUTTON_ID: &str = "prev-btn";
pub const NEXT_BUTTON_ID: &str = "next-btn";
pub const RETURN_BUTTON_ID: &str = "return-btn";
pub const LEGEND_ID: &str = "legend";
pub const LEGEND_TITLE_ID: &str = "legend-title";
pub const LEGEND_TEXT_ID: &str = "legend-text";

// CSS classes toggled by the presenter
pub const VISIBLE_CLASS: &str = "visible";
pub const HOVER_CLASS: &str = "hovering"; // on the canvas while a painting is under the pointer
pub const BUSY_CLASS: &str = "busy"; // on nav buttons while a transition owns the camera

// Assets, relative to the page
pub const TOUR_URL: &str = "assets/tour.json";
pub const PAINTINGS_URL: &str = "assets/paintings.json";
pub const LEGENDS_URL: &str = "assets/legends.json";
pub const CONFIG_URL: &str = "assets/tour-config.json"; // optional TourConfig overlay

// Length of the pose export in f32s
pub const POSE_FLOATS: usize = 12;
