// Shared navigation tuning constants used by both web and native frontends.

// Path motion
pub const PATH_ACCELERATION: f32 = 0.025; // base acceleration in path units per second
pub const PATH_FRICTION: f32 = 0.065; // fraction of velocity lost every step
pub const PATH_TERMINAL_VELOCITY: f32 = 0.10; // velocity clamp in path units per second
pub const PATH_REST_VELOCITY: f32 = 0.002; // coasting below this speed counts as stopped
pub const SCROLL_IMPULSE_SCALE: f32 = 0.5; // one wheel tick adds this many accelerations
pub const SEEK_VELOCITY_SCALE: f32 = 2.0; // prev/next glide speed in accelerations

// Stops
pub const STOP_TOLERANCE: f32 = 1e-3; // parameter distance treated as "at" a stop

// Transitions
pub const TRANSITION_DURATION_SEC: f32 = 2.0;

// Frame timing
pub const FRAME_DT_MAX_SEC: f32 = 0.1; // longer frames (tab switch, hitch) are clamped

// Interaction
pub const INTERACTION_DISTANCE: f32 = 40.0; // max camera distance for hover and click
pub const CLICK_SLOP_PX: f32 = 4.0; // press travel beyond this is a drag

// Free-look
pub const LOOK_ROTATION_SPEED: f32 = 0.003; // radians per dragged pixel
pub const LOOK_PITCH_MARGIN: f32 = 0.1; // keeps pitch away from the poles

// Camera
pub const CAMERA_FOVY_DEGREES: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;
pub const CAMERA_START_POSITION: [f32; 3] = [4.0, 4.0, 4.0]; // used until the path is loaded

// Persisted session keys
pub const KEY_CAMERA_YAW: &str = "cameraYaw";
pub const KEY_PATH_POS: &str = "pathPos";
pub const KEY_PROGRESSION: &str = "progression";
