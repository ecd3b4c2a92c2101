//! Shared interaction state and the input-source arbitration rule.
//!
//! Two producers write here: the pointer controller and the hand-gesture
//! controller. Every producer-facing setter replaces a whole field at once and
//! goes through the same rule: a HAND update always lands and stamps the hand
//! clock; a MOUSE update lands only once the hand has been quiet for longer
//! than [`HAND_PRIORITY_WINDOW`]. Rejected updates are dropped silently.
//!
//! Time is passed in as the session-relative [`Duration`] of the event so the
//! rule is deterministic under test.

use crate::constants::HAND_PRIORITY_WINDOW;
use crate::scene::SceneMode;
use glam::Vec2;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InputSource {
    #[default]
    Mouse,
    Hand,
}

impl InputSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mouse => "mouse",
            Self::Hand => "hand",
        }
    }
}

/// Cursor in normalized device coordinates, both axes in \[-1, 1\], y up.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cursor {
    pub x: f32,
    pub y: f32,
    pub active: bool,
}

impl Cursor {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// The single interaction context shared by producers, the scene state
/// machine and the animation drivers.
///
/// Rotations are stored as `(x, y)` = (pitch, yaw) in radians.
#[derive(Clone, Debug)]
pub struct InteractionStore {
    mode: SceneMode,
    cursor: Cursor,
    scene_rotation: Vec2,
    photo_rotation: Vec2,
    input_source: InputSource,
    last_hand_signal: Option<Duration>,
    hovered_photo: Option<usize>,
    selected_photo: Option<usize>,
}

impl Default for InteractionStore {
    fn default() -> Self {
        Self::new(SceneMode::Order)
    }
}

impl InteractionStore {
    pub fn new(mode: SceneMode) -> Self {
        Self {
            mode,
            cursor: Cursor::default(),
            scene_rotation: Vec2::ZERO,
            photo_rotation: Vec2::ZERO,
            input_source: InputSource::Mouse,
            last_hand_signal: None,
            hovered_photo: None,
            selected_photo: None,
        }
    }

    pub fn mode(&self) -> SceneMode {
        self.mode
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn scene_rotation(&self) -> Vec2 {
        self.scene_rotation
    }

    pub fn photo_rotation(&self) -> Vec2 {
        self.photo_rotation
    }

    pub fn input_source(&self) -> InputSource {
        self.input_source
    }

    pub fn last_hand_signal(&self) -> Option<Duration> {
        self.last_hand_signal
    }

    pub fn hovered_photo(&self) -> Option<usize> {
        self.hovered_photo
    }

    pub fn selected_photo(&self) -> Option<usize> {
        self.selected_photo
    }

    pub fn set_cursor(&mut self, x: f32, y: f32, active: bool, source: InputSource, now: Duration) {
        if !self.admit(source, now) {
            return;
        }
        self.cursor = Cursor {
            x: x.clamp(-1.0, 1.0),
            y: y.clamp(-1.0, 1.0),
            active,
        };
    }

    pub fn set_scene_rotation(&mut self, x: f32, y: f32, source: InputSource, now: Duration) {
        if !self.admit(source, now) {
            return;
        }
        self.scene_rotation = Vec2::new(x, y);
    }

    pub fn set_photo_rotation(&mut self, x: f32, y: f32, source: InputSource, now: Duration) {
        if !self.admit(source, now) {
            return;
        }
        self.photo_rotation = Vec2::new(x, y);
    }

    /// Hover is derived each frame from the cursor; it only means something
    /// in CHAOS, so it is cleared in every other mode.
    pub fn set_hovered_photo(&mut self, index: Option<usize>) {
        self.hovered_photo = match self.mode {
            SceneMode::Chaos => index,
            _ => None,
        };
    }

    fn admit(&mut self, source: InputSource, now: Duration) -> bool {
        match source {
            InputSource::Hand => {
                self.last_hand_signal = Some(now);
                self.input_source = InputSource::Hand;
                true
            }
            InputSource::Mouse => {
                let hand_recent = self
                    .last_hand_signal
                    .is_some_and(|t| now.saturating_sub(t) <= HAND_PRIORITY_WINDOW);
                if hand_recent {
                    log::trace!("[input] mouse update dropped, hand has priority");
                    return false;
                }
                self.input_source = InputSource::Mouse;
                true
            }
        }
    }

    // Mode changes are owned by the scene state machine; these keep the
    // per-mode invariants (rotation resets, single selection) in one place.

    pub(crate) fn enter_order(&mut self) {
        self.mode = SceneMode::Order;
        self.scene_rotation = Vec2::ZERO;
        self.selected_photo = None;
        self.hovered_photo = None;
    }

    pub(crate) fn enter_chaos(&mut self) {
        self.mode = SceneMode::Chaos;
        self.selected_photo = None;
    }

    pub(crate) fn enter_photo_focus(&mut self, index: usize) {
        self.mode = SceneMode::PhotoFocus;
        self.selected_photo = Some(index);
        self.photo_rotation = Vec2::ZERO;
        self.hovered_photo = None;
    }
}
