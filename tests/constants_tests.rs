// Host-side tests for frontend constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn dom_ids_are_distinct() {
    let ids = [CANVAS_ID, HELP_OVERLAY_ID, STATUS_ID, HINT_ID];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn manifest_attributes_are_data_attributes() {
    assert!(ATTR_PHOTOS.starts_with("data-"));
    assert!(ATTR_AUDIO.starts_with("data-"));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn frame_and_media_limits_are_sane() {
    assert!(MAX_FRAME_DT > 0.0 && MAX_FRAME_DT <= 0.25);
    assert!(VIDEO_WIDTH > 0 && VIDEO_HEIGHT > 0);
    assert!((0.0..=1.0).contains(&MUSIC_VOLUME));
    assert!(GESTURE_UNAVAILABLE_TEXT.contains("mouse"));
}
