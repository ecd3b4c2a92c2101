// Pure input helpers shared by the event wiring and the frame loop.

use crate::constants::MAX_FRAME_DT;
use glam::Vec2;
use std::time::Duration;
use tree_core::{InputSource, SceneMode};

/// Canvas-relative pixel position to normalized device coordinates
/// (x right, y up, both in [-1, 1]). A collapsed canvas maps to the center.
#[inline]
pub fn canvas_px_to_ndc(px: Vec2, size: Vec2) -> Vec2 {
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(px.x / size.x * 2.0 - 1.0, 1.0 - px.y / size.y * 2.0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Assemble or scatter the tree; closes a focused photo.
    Toggle,
    ToggleMusic,
    Fullscreen,
    Help,
}

#[inline]
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        " " | "Spacebar" => Some(KeyAction::Toggle),
        "m" | "M" => Some(KeyAction::ToggleMusic),
        "Enter" => Some(KeyAction::Fullscreen),
        "h" | "H" => Some(KeyAction::Help),
        _ => None,
    }
}

/// Seconds between two frames, clamped so a stalled tab does not teleport
/// everything on resume.
#[inline]
pub fn frame_dt(prev: Duration, now: Duration) -> f32 {
    now.saturating_sub(prev).as_secs_f32().min(MAX_FRAME_DT)
}

pub fn hint_text(mode: SceneMode, source: InputSource) -> String {
    let scene = match mode {
        SceneMode::Order => "Tree",
        SceneMode::Chaos => "Scattered",
        SceneMode::Forming => "Forming",
        SceneMode::PhotoFocus => "Photo",
    };
    let control = match source {
        InputSource::Mouse => "mouse",
        InputSource::Hand => "hand",
    };
    format!("{scene} · {control}")
}
