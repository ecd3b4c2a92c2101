//! Hand-gesture producer.
//!
//! Consumes one recognizer result per video frame. A visible hand drives the
//! cursor and either the scene rotation or, while a photo is focused, the
//! photo rotation. Its label goes through the commit debounce before it can
//! become a scene event. Losing the hand reports one inactive HAND cursor,
//! which keeps the mouse locked out for the rest of the priority window;
//! later frames without a hand leave the store alone.

use crate::constants::{HAND_PITCH_RANGE, HAND_YAW_RANGE};
use crate::gesture::{GestureClassifier, GestureDebouncer, GestureLabel, HandLandmarks, LandmarkClassifier};
use crate::interaction::{InputSource, InteractionStore};
use crate::scene::{SceneEvent, SceneMode};
use std::time::Duration;

pub struct GestureController {
    classifier: Box<dyn GestureClassifier>,
    debouncer: GestureDebouncer,
    last_label: Option<GestureLabel>,
    hand_visible: bool,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new(Box::new(LandmarkClassifier::default()))
    }
}

impl GestureController {
    pub fn new(classifier: Box<dyn GestureClassifier>) -> Self {
        Self {
            classifier,
            debouncer: GestureDebouncer::default(),
            last_label: None,
            hand_visible: false,
        }
    }

    /// Label of the most recent frame, `None` when no hand was seen.
    pub fn last_label(&self) -> Option<GestureLabel> {
        self.last_label
    }

    /// Feed one recognizer result. Returns a committed gesture event, if the
    /// debounce released one on this tick.
    pub fn on_frame(
        &mut self,
        hand: Option<&HandLandmarks>,
        store: &mut InteractionStore,
        now: Duration,
    ) -> Option<SceneEvent> {
        let Some(hand) = hand else {
            if self.hand_visible {
                let c = store.cursor();
                store.set_cursor(c.x, c.y, false, InputSource::Hand, now);
                log::debug!("[gesture] hand lost");
            }
            self.hand_visible = false;
            self.last_label = None;
            self.debouncer.reset();
            return None;
        };
        self.hand_visible = true;

        let ndc = hand.palm_ndc();
        store.set_cursor(ndc.x, ndc.y, true, InputSource::Hand, now);

        // Hand offset from frame center steers absolutely, no accumulation.
        let pitch = -ndc.y * HAND_PITCH_RANGE;
        let yaw = ndc.x * HAND_YAW_RANGE;
        match store.mode() {
            SceneMode::Order | SceneMode::Chaos => {
                store.set_scene_rotation(pitch, yaw, InputSource::Hand, now)
            }
            SceneMode::PhotoFocus => store.set_photo_rotation(pitch, yaw, InputSource::Hand, now),
            SceneMode::Forming => {}
        }

        let label = self.classifier.classify(hand);
        self.last_label = Some(label);
        let committed = self.debouncer.push(Some(label))?;
        log::debug!("[gesture] committed {}", committed.as_str());
        Some(SceneEvent::Gesture(committed))
    }
}
