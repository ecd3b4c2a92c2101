use std::time::Duration;

// Shared tuning constants for the tree scene. Rates expressed "per frame" are
// fractions of the remaining distance covered in one 60 Hz reference frame.

// Input arbitration
pub const HAND_PRIORITY_WINDOW: Duration = Duration::from_millis(1000); // mouse is locked out this long after a hand update
pub const GESTURE_COMMIT_FRAMES: u32 = 4; // identical classifier labels needed to commit a gesture
pub const CLICK_DRAG_THRESHOLD: f32 = 5.0; // pointer travel (px) beyond which a press is a drag
pub const DRAG_ROTATE_PER_PX: f32 = 0.005; // radians of rotation per dragged pixel
pub const HOVER_RADIUS_NDC: f32 = 0.15; // cursor-to-photo distance in normalized view coords

// Hand steering: full hand travel across the frame maps to these angles
pub const HAND_PITCH_RANGE: f32 = 0.6;
pub const HAND_YAW_RANGE: f32 = std::f32::consts::PI;

// Tree shape (world units)
pub const TREE_BASE_Y: f32 = -10.0;
pub const TREE_HEIGHT: f32 = 20.0;
pub const TREE_RADIUS: f32 = 8.0;
pub const CHAOS_RADIUS: f32 = 24.0; // radius of the scattered cloud
pub const ORDER_CLEARANCE: f32 = 0.25; // min gap between ornaments in the ledger
pub const PLACEMENT_ATTEMPTS: usize = 24; // candidates tried before settling for the best one
pub const LEDGER_CELL_SIZE: f32 = 2.0;

// Intro "climbing light" sequence
pub const REVEAL_START_Y: f32 = -12.0;
pub const REVEAL_END_Y: f32 = 12.0;
pub const REVEAL_DURATION: Duration = Duration::from_secs(4);
pub const CLIMAX_DURATION: Duration = Duration::from_secs(2);
pub const REVEAL_ALWAYS_VISIBLE: f32 = 1000.0; // sentinel reveal height once the intro is over
pub const REVEAL_SOFT_EDGE: f32 = 1.5; // visibility falloff band below the reveal height
pub const CLIMAX_FLASH_GAIN: f32 = 2.5; // peak extra brightness during the climax

// Motion
pub const REFERENCE_FPS: f32 = 60.0;
pub const PHOTO_FOCUS_DAMPING: f32 = 0.1; // background rate multiplier while a photo is focused
pub const SCENE_ROTATION_RATE: f32 = 0.08;
pub const ORDER_AUTO_SPIN: f32 = 0.12; // rad/s around the trunk while assembled
pub const FOCUS_DISTANCE: f32 = 12.0; // focused photo distance in front of the camera
pub const FOCUS_SCALE: f32 = 3.2;
pub const FOCUS_RATE: f32 = 0.12;
pub const HOVER_SCALE_BOOST: f32 = 1.25;

// Camera
pub const CAMERA_Z: f32 = 36.0;
pub const CAMERA_Y: f32 = 2.0;
pub const CAMERA_FOVY: f32 = std::f32::consts::FRAC_PI_4;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 200.0;

pub const DEFAULT_SEED: u64 = 0x2512_2024;
