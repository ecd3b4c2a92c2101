//! One-shot intro: a reveal height climbs the tree, then a brief flash.

use crate::constants::{
    CLIMAX_DURATION, CLIMAX_FLASH_GAIN, REVEAL_ALWAYS_VISIBLE, REVEAL_DURATION, REVEAL_END_Y,
    REVEAL_SOFT_EDGE, REVEAL_START_Y,
};
use std::f32::consts::PI;
use std::time::Duration;

/// Reveal values for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealState {
    pub height: f32,
    /// Brightness multiplier for revealed layers, 1.0 outside the climax.
    pub brightness: f32,
}

impl Default for RevealState {
    fn default() -> Self {
        Self {
            height: REVEAL_ALWAYS_VISIBLE,
            brightness: 1.0,
        }
    }
}

impl RevealState {
    /// 1 well below the reveal height, fading to 0 at it.
    pub fn visibility(&self, y: f32) -> f32 {
        ((self.height - y) / REVEAL_SOFT_EDGE).clamp(0.0, 1.0)
    }
}

/// Drives the reveal height from the bottom of the tree to the top over
/// [`REVEAL_DURATION`], then fires the climax once. Never rewinds.
#[derive(Clone, Debug)]
pub struct IntroSequencer {
    start: Duration,
    current_height: f32,
    climax_triggered: bool,
    climax_time: Option<Duration>,
}

impl IntroSequencer {
    pub fn new(start: Duration) -> Self {
        Self {
            start,
            current_height: REVEAL_START_Y,
            climax_triggered: false,
            climax_time: None,
        }
    }

    pub fn current_height(&self) -> f32 {
        self.current_height
    }

    pub fn climax_triggered(&self) -> bool {
        self.climax_triggered
    }

    pub fn climax_time(&self) -> Option<Duration> {
        self.climax_time
    }

    pub fn tick(&mut self, now: Duration) -> RevealState {
        let elapsed = now.saturating_sub(self.start);
        if !self.climax_triggered {
            if elapsed < REVEAL_DURATION {
                let t = elapsed.as_secs_f32() / REVEAL_DURATION.as_secs_f32();
                self.current_height = REVEAL_START_Y + (REVEAL_END_Y - REVEAL_START_Y) * t;
                return RevealState {
                    height: self.current_height,
                    brightness: 1.0,
                };
            }
            self.climax_triggered = true;
            self.climax_time = Some(now);
            self.current_height = REVEAL_ALWAYS_VISIBLE;
            log::info!("[intro] reveal complete, climax");
        }

        RevealState {
            height: self.current_height,
            brightness: 1.0 + self.flash(now),
        }
    }

    fn flash(&self, now: Duration) -> f32 {
        let Some(at) = self.climax_time else {
            return 0.0;
        };
        let since = now.saturating_sub(at);
        if since >= CLIMAX_DURATION {
            return 0.0;
        }
        let t = since.as_secs_f32() / CLIMAX_DURATION.as_secs_f32();
        // Fast rise, slow decay.
        CLIMAX_FLASH_GAIN * (PI * t.sqrt()).sin()
    }
}
