// Page wiring and frontend tuning constants.
//
// Kept free of `web_sys` so host tests can include this file directly.

// DOM ids the host page provides
pub const CANVAS_ID: &str = "tree-canvas";
pub const HELP_OVERLAY_ID: &str = "help-overlay";
pub const STATUS_ID: &str = "status";
pub const HINT_ID: &str = "hint";

// Manifest attributes on the canvas element
pub const ATTR_PHOTOS: &str = "data-photos"; // comma-separated image urls
pub const ATTR_AUDIO: &str = "data-audio"; // background music url

// Globals installed by the host page
pub const SCENE_BRIDGE_GLOBAL: &str = "treeScene";

pub const GESTURE_UNAVAILABLE_TEXT: &str = "Gesture control unavailable – using mouse";

// Frame pacing
pub const MAX_FRAME_DT: f32 = 0.1; // seconds; longer gaps (hidden tab) are treated as this

// Camera capture for the hand recognizer
pub const VIDEO_WIDTH: u32 = 640;
pub const VIDEO_HEIGHT: u32 = 480;

pub const MUSIC_VOLUME: f64 = 0.5;
