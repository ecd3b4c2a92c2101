//! Asset manifest and per-photo load bookkeeping.
//!
//! The photo count fixes the photo layer size up front. A photo that fails to
//! load is swapped for a placeholder derived from its index, so instance
//! count and layout never change.

use crate::error::Error;

const DEFAULT_PHOTOS: &[&str] = &[
    "photos/01.jpg",
    "photos/02.jpg",
    "photos/03.jpg",
    "photos/04.jpg",
    "photos/05.jpg",
    "photos/06.jpg",
    "photos/07.jpg",
    "photos/08.jpg",
    "photos/09.jpg",
    "photos/10.jpg",
    "photos/11.jpg",
    "photos/12.jpg",
];
const DEFAULT_AUDIO: &str = "audio/jingle.mp3";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetManifest {
    pub photos: Vec<String>,
    pub audio: Option<String>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            photos: DEFAULT_PHOTOS.iter().map(|s| s.to_string()).collect(),
            audio: Some(DEFAULT_AUDIO.to_string()),
        }
    }
}

impl AssetManifest {
    /// Parse a comma-separated photo list. Empty entries are skipped; an
    /// empty list falls back to the built-in photos.
    pub fn parse(photos: &str, audio: Option<&str>) -> Self {
        let list: Vec<String> = photos
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        let defaults = Self::default();
        Self {
            photos: if list.is_empty() { defaults.photos } else { list },
            audio: match audio.map(str::trim) {
                Some(a) if !a.is_empty() => Some(a.to_string()),
                _ => defaults.audio,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhotoState {
    Pending,
    Loaded,
    Placeholder,
}

/// Stand-in for a photo that could not be loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct Placeholder {
    pub color: [f32; 3],
    pub label: String,
}

impl Placeholder {
    /// Same index, same placeholder.
    pub fn for_index(index: usize) -> Self {
        // Golden-ratio hue steps keep neighbours distinct.
        let hue = (index as f32 * 0.618_034).fract();
        Self {
            color: hsv_to_rgb(hue, 0.45, 0.9),
            label: format!("♥ {}", index + 1),
        }
    }
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    let i = (h * 6.0).floor();
    let f = h * 6.0 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);
    match i as i32 % 6 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

#[derive(Clone, Debug)]
pub struct PhotoSlot {
    pub id: String,
    pub state: PhotoState,
}

/// Load state of every photo in the manifest, by instance index.
#[derive(Clone, Debug)]
pub struct PhotoAlbum {
    slots: Vec<PhotoSlot>,
}

impl PhotoAlbum {
    pub fn new(manifest: &AssetManifest) -> Self {
        Self {
            slots: manifest
                .photos
                .iter()
                .map(|id| PhotoSlot {
                    id: id.clone(),
                    state: PhotoState::Pending,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, index: usize) -> Option<&PhotoSlot> {
        self.slots.get(index)
    }

    pub fn mark_loaded(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.state = PhotoState::Loaded;
        }
    }

    /// Record a failure and return the placeholder to show instead.
    pub fn mark_failed(&mut self, index: usize, reason: &str) -> Option<Placeholder> {
        let slot = self.slots.get_mut(index)?;
        slot.state = PhotoState::Placeholder;
        let err = Error::AssetLoad {
            id: slot.id.clone(),
            reason: reason.to_string(),
        };
        log::warn!("[assets] {err}, using placeholder");
        Some(Placeholder::for_index(index))
    }

    pub fn pending(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.state == PhotoState::Pending)
            .count()
    }
}
