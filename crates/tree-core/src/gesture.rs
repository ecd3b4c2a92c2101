//! Hand landmarks, discrete gesture labels, and the commit debounce.
//!
//! The recognizer upstream hands over 21 landmarks per frame in normalized
//! image space (x right, y down, both 0..1). A [`GestureClassifier`] reduces
//! them to one of four labels; [`GestureDebouncer`] only lets a label through
//! once it has been seen on [`GESTURE_COMMIT_FRAMES`] consecutive ticks.

use crate::constants::GESTURE_COMMIT_FRAMES;
use crate::error::{Error, Result};
use glam::{Vec2, Vec3};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GestureLabel {
    #[default]
    Neutral,
    Fist,
    Open,
    Pinch,
}

impl GestureLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Fist => "fist",
            Self::Open => "open",
            Self::Pinch => "pinch",
        }
    }
}

pub const LANDMARK_COUNT: usize = 21;

// Landmark indices in the standard hand topology.
pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_TIP: usize = 20;

const FINGERS: [(usize, usize); 4] = [
    (INDEX_PIP, INDEX_TIP),
    (MIDDLE_PIP, MIDDLE_TIP),
    (RING_PIP, RING_TIP),
    (PINKY_PIP, PINKY_TIP),
];

#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    points: [Vec3; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn new(points: [Vec3; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Build from a flat `[x0, y0, z0, x1, ...]` buffer as delivered by the
    /// recognizer.
    pub fn from_flat(values: &[f32]) -> Result<Self> {
        let expected = LANDMARK_COUNT * 3;
        if values.len() != expected {
            return Err(Error::InvalidLandmarks {
                expected,
                got: values.len(),
            });
        }
        let mut points = [Vec3::ZERO; LANDMARK_COUNT];
        for (p, xyz) in points.iter_mut().zip(values.chunks_exact(3)) {
            *p = Vec3::new(xyz[0], xyz[1], xyz[2]);
        }
        Ok(Self { points })
    }

    pub fn point(&self, index: usize) -> Vec3 {
        self.points[index]
    }

    pub fn points(&self) -> &[Vec3; LANDMARK_COUNT] {
        &self.points
    }

    /// Image-plane distance between two landmarks.
    pub fn distance(&self, a: usize, b: usize) -> f32 {
        self.points[a].truncate().distance(self.points[b].truncate())
    }

    /// Center of the palm in image space.
    pub fn palm_center(&self) -> Vec2 {
        let sum = [WRIST, INDEX_MCP, MIDDLE_MCP, PINKY_MCP]
            .iter()
            .map(|&i| self.points[i].truncate())
            .fold(Vec2::ZERO, |acc, p| acc + p);
        sum / 4.0
    }

    /// Palm center in normalized device coordinates, mirrored horizontally
    /// so moving the hand right moves the cursor right on a selfie view.
    pub fn palm_ndc(&self) -> Vec2 {
        let c = self.palm_center();
        Vec2::new(1.0 - 2.0 * c.x, 1.0 - 2.0 * c.y).clamp(Vec2::splat(-1.0), Vec2::splat(1.0))
    }
}

/// Maps one frame of landmarks to a discrete label.
pub trait GestureClassifier {
    fn classify(&self, hand: &HandLandmarks) -> GestureLabel;
}

/// Ratio thresholds for [`LandmarkClassifier`].
#[derive(Clone, Copy, Debug)]
pub struct ClassifierThresholds {
    /// A finger counts as extended when its tip is this much farther from
    /// the wrist than its middle joint.
    pub extension_ratio: f32,
    /// Thumb-to-index distance over palm size below which it is a pinch.
    pub pinch_ratio: f32,
    /// Extended fingers needed for an open hand.
    pub open_fingers: usize,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            extension_ratio: 1.1,
            pinch_ratio: 0.3,
            open_fingers: 4,
        }
    }
}

/// Rule-based classifier over finger-extension and pinch ratios.
#[derive(Clone, Debug, Default)]
pub struct LandmarkClassifier {
    pub thresholds: ClassifierThresholds,
}

impl LandmarkClassifier {
    pub fn extended_fingers(&self, hand: &HandLandmarks) -> usize {
        FINGERS
            .iter()
            .filter(|(pip, tip)| {
                hand.distance(WRIST, *tip) > hand.distance(WRIST, *pip) * self.thresholds.extension_ratio
            })
            .count()
    }
}

impl GestureClassifier for LandmarkClassifier {
    fn classify(&self, hand: &HandLandmarks) -> GestureLabel {
        let palm = hand.distance(WRIST, MIDDLE_MCP);
        if palm <= f32::EPSILON {
            return GestureLabel::Neutral;
        }
        let extended = self.extended_fingers(hand);
        if extended == 0 {
            return GestureLabel::Fist;
        }
        if hand.distance(THUMB_TIP, INDEX_TIP) / palm < self.thresholds.pinch_ratio {
            return GestureLabel::Pinch;
        }
        if extended >= self.thresholds.open_fingers {
            return GestureLabel::Open;
        }
        GestureLabel::Neutral
    }
}

/// Commits a label only after it has been reported on `required`
/// consecutive ticks. The commit fires once, on the tick the streak reaches
/// the requirement; a frame without a hand resets the streak.
#[derive(Clone, Debug)]
pub struct GestureDebouncer {
    required: u32,
    last: Option<GestureLabel>,
    streak: u32,
}

impl Default for GestureDebouncer {
    fn default() -> Self {
        Self::new(GESTURE_COMMIT_FRAMES)
    }
}

impl GestureDebouncer {
    pub fn new(required: u32) -> Self {
        Self {
            required: required.max(1),
            last: None,
            streak: 0,
        }
    }

    pub fn push(&mut self, label: Option<GestureLabel>) -> Option<GestureLabel> {
        let Some(label) = label else {
            self.reset();
            return None;
        };
        if self.last == Some(label) {
            self.streak = self.streak.saturating_add(1);
        } else {
            self.last = Some(label);
            self.streak = 1;
        }
        (self.streak == self.required).then_some(label)
    }

    pub fn reset(&mut self) {
        self.last = None;
        self.streak = 0;
    }

    pub fn current(&self) -> Option<(GestureLabel, u32)> {
        self.last.map(|l| (l, self.streak))
    }
}
