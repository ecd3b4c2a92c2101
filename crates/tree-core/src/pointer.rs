//! Mouse/touch producer.
//!
//! Moves update the cursor; a press followed by a release counts as a click
//! unless the pointer travelled more than [`CLICK_DRAG_THRESHOLD`] pixels in
//! between, in which case it was a drag and steered the scene (or the focused
//! photo) instead.

use crate::constants::{CLICK_DRAG_THRESHOLD, DRAG_ROTATE_PER_PX};
use crate::interaction::{InputSource, InteractionStore};
use crate::scene::{SceneEvent, SceneMode};
use glam::Vec2;
use std::time::Duration;

#[derive(Clone, Copy, Debug)]
struct Press {
    last: Vec2,
    travelled: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PointerController {
    press: Option<Press>,
}

impl PointerController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Cumulative travel of the current press, in pixels.
    pub fn travelled(&self) -> Option<f32> {
        self.press.map(|p| p.travelled)
    }

    /// `px` is the pointer in canvas pixels, `ndc` the same point in
    /// normalized device coordinates.
    pub fn pointer_move(&mut self, px: Vec2, ndc: Vec2, store: &mut InteractionStore, now: Duration) {
        store.set_cursor(ndc.x, ndc.y, true, InputSource::Mouse, now);

        let Some(press) = self.press.as_mut() else {
            return;
        };
        let delta = px - press.last;
        press.travelled += delta.length();
        press.last = px;
        if press.travelled <= CLICK_DRAG_THRESHOLD {
            return;
        }

        // Screen y grows downward: dragging down pitches the scene toward the viewer.
        let step = Vec2::new(delta.y, delta.x) * DRAG_ROTATE_PER_PX;
        match store.mode() {
            SceneMode::PhotoFocus => {
                let r = store.photo_rotation() + step;
                store.set_photo_rotation(r.x, r.y, InputSource::Mouse, now);
            }
            _ => {
                let r = store.scene_rotation() + step;
                store.set_scene_rotation(r.x, r.y, InputSource::Mouse, now);
            }
        }
    }

    pub fn pointer_down(&mut self, px: Vec2) {
        self.press = Some(Press {
            last: px,
            travelled: 0.0,
        });
    }

    /// Ends a press. Returns a click event unless the press was a drag.
    pub fn pointer_up(&mut self, px: Vec2) -> Option<SceneEvent> {
        let press = self.press.take()?;
        let travelled = press.travelled + (px - press.last).length();
        if travelled > CLICK_DRAG_THRESHOLD {
            log::debug!("[input] drag of {travelled:.1}px, not a click");
            return None;
        }
        Some(SceneEvent::Click)
    }

    /// Pointer left the canvas: keep the last position but mark it inactive.
    pub fn pointer_leave(&mut self, store: &mut InteractionStore, now: Duration) {
        self.press = None;
        let c = store.cursor();
        store.set_cursor(c.x, c.y, false, InputSource::Mouse, now);
    }
}
