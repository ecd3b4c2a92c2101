// Click versus drag, and pointer steering.

use glam::Vec2;
use std::time::Duration;
use tree_core::{
    dispatch, GestureController, GestureLabel, GestureClassifier, HandLandmarks, InputSource,
    InteractionStore, PointerController, SceneEvent, SceneMode, LANDMARK_COUNT,
};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn px(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

#[test]
fn press_and_release_in_place_is_a_click() {
    let mut p = PointerController::new();
    p.pointer_down(px(100.0, 100.0));
    assert!(p.is_pressed());
    assert_eq!(p.pointer_up(px(102.0, 101.0)), Some(SceneEvent::Click));
    assert!(!p.is_pressed());
}

#[test]
fn release_without_press_does_nothing() {
    let mut p = PointerController::new();
    assert_eq!(p.pointer_up(px(0.0, 0.0)), None);
}

#[test]
fn eight_pixel_move_is_a_drag() {
    let mut store = InteractionStore::default();
    let mut p = PointerController::new();
    p.pointer_down(px(100.0, 100.0));
    p.pointer_move(px(108.0, 100.0), Vec2::ZERO, &mut store, ms(10));
    assert_eq!(p.travelled(), Some(8.0));
    assert_eq!(p.pointer_up(px(108.0, 100.0)), None);
}

#[test]
fn jitter_that_returns_home_is_still_a_drag() {
    let mut store = InteractionStore::default();
    let mut p = PointerController::new();
    p.pointer_down(px(50.0, 50.0));
    p.pointer_move(px(54.0, 50.0), Vec2::ZERO, &mut store, ms(10));
    p.pointer_move(px(50.0, 50.0), Vec2::ZERO, &mut store, ms(20));
    assert_eq!(p.pointer_up(px(50.0, 50.0)), None);
}

#[test]
fn drag_rotates_the_scene() {
    let mut store = InteractionStore::default();
    let mut p = PointerController::new();
    p.pointer_down(px(0.0, 0.0));
    // Under the threshold: no rotation yet.
    p.pointer_move(px(4.0, 0.0), Vec2::ZERO, &mut store, ms(10));
    assert_eq!(store.scene_rotation(), Vec2::ZERO);
    p.pointer_move(px(104.0, 0.0), Vec2::ZERO, &mut store, ms(20));
    let r = store.scene_rotation();
    assert_eq!(r.x, 0.0);
    assert!((r.y - 0.5).abs() < 1e-5, "{r}");
}

#[test]
fn drag_rotates_the_focused_photo_instead() {
    let mut store = InteractionStore::default();
    dispatch(&mut store, SceneEvent::Toggle);
    store.set_hovered_photo(Some(5));
    dispatch(&mut store, SceneEvent::Click);
    assert_eq!(store.mode(), SceneMode::PhotoFocus);

    let mut p = PointerController::new();
    p.pointer_down(px(0.0, 0.0));
    p.pointer_move(px(0.0, 40.0), Vec2::ZERO, &mut store, ms(10));
    assert_eq!(store.scene_rotation(), Vec2::ZERO);
    assert!((store.photo_rotation().x - 0.2).abs() < 1e-5);
}

#[test]
fn moves_update_the_cursor_and_leave_deactivates_it() {
    let mut store = InteractionStore::default();
    let mut p = PointerController::new();
    p.pointer_move(px(10.0, 10.0), Vec2::new(0.5, -0.25), &mut store, ms(0));
    assert!(store.cursor().active);
    assert_eq!(store.cursor().position(), Vec2::new(0.5, -0.25));

    p.pointer_leave(&mut store, ms(10));
    assert!(!store.cursor().active);
    assert_eq!(store.cursor().position(), Vec2::new(0.5, -0.25));
}

#[test]
fn pointer_is_ignored_while_the_hand_has_priority() {
    let mut store = InteractionStore::default();
    store.set_cursor(0.1, 0.1, true, InputSource::Hand, ms(0));
    let mut p = PointerController::new();
    p.pointer_move(px(0.0, 0.0), Vec2::new(-0.8, 0.8), &mut store, ms(500));
    assert_eq!(store.cursor().position(), Vec2::new(0.1, 0.1));
}

struct Fixed(GestureLabel);

impl GestureClassifier for Fixed {
    fn classify(&self, _: &HandLandmarks) -> GestureLabel {
        self.0
    }
}

#[test]
fn click_assembles_then_open_hand_scatters() {
    let mut store = InteractionStore::default();
    dispatch(&mut store, SceneEvent::Toggle);
    assert_eq!(store.mode(), SceneMode::Chaos);

    let mut p = PointerController::new();
    p.pointer_move(px(200.0, 200.0), Vec2::ZERO, &mut store, ms(0));
    p.pointer_down(px(200.0, 200.0));
    let ev = p.pointer_up(px(200.0, 200.0));
    assert_eq!(ev, Some(SceneEvent::Click));
    assert_eq!(dispatch(&mut store, SceneEvent::Click), Some(SceneMode::Order));
    assert_eq!(store.scene_rotation(), Vec2::ZERO);

    let mut hand = GestureController::new(Box::new(Fixed(GestureLabel::Open)));
    let landmarks = HandLandmarks::new([glam::Vec3::new(0.5, 0.5, 0.0); LANDMARK_COUNT]);
    let mut modes = Vec::new();
    for frame in 0..5 {
        if let Some(ev) = hand.on_frame(Some(&landmarks), &mut store, ms(100 + frame * 33)) {
            modes.push(dispatch(&mut store, ev));
        }
    }
    assert_eq!(modes, vec![Some(SceneMode::Chaos)]);
}
