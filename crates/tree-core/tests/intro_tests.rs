// Intro reveal sweep and climax.

use std::time::Duration;
use tree_core::{IntroSequencer, RevealState};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn reveal_starts_below_the_tree() {
    let mut intro = IntroSequencer::new(ms(500));
    let r = intro.tick(ms(500));
    assert_eq!(r.height, -12.0);
    assert_eq!(r.brightness, 1.0);
    assert!(!intro.climax_triggered());
}

#[test]
fn reveal_height_climbs_linearly() {
    let mut intro = IntroSequencer::new(ms(0));
    let mid = intro.tick(ms(2_000));
    assert!(mid.height.abs() < 1e-4, "{}", mid.height);
    let late = intro.tick(ms(3_000));
    assert!((late.height - 6.0).abs() < 1e-4);
}

#[test]
fn height_rises_strictly_during_the_climb() {
    let mut intro = IntroSequencer::new(ms(0));
    let mut last = intro.tick(ms(0)).height;
    for t in (16..4_000).step_by(16) {
        let r = intro.tick(ms(t));
        assert!(r.height > last, "height stalled at {t}ms");
        last = r.height;
    }
    for t in (4_000..8_000).step_by(16) {
        let r = intro.tick(ms(t));
        assert!(r.height >= last, "height fell at {t}ms");
        last = r.height;
    }
}

#[test]
fn climax_fires_once_and_stays() {
    let mut intro = IntroSequencer::new(ms(0));
    intro.tick(ms(3_990));
    assert!(!intro.climax_triggered());

    let at = intro.tick(ms(4_010));
    assert!(intro.climax_triggered());
    assert_eq!(intro.climax_time(), Some(ms(4_010)));
    assert_eq!(at.height, 1000.0);

    intro.tick(ms(60_000));
    assert_eq!(intro.climax_time(), Some(ms(4_010)));
    assert_eq!(intro.current_height(), 1000.0);
}

#[test]
fn climax_flash_rises_then_settles() {
    let mut intro = IntroSequencer::new(ms(0));
    intro.tick(ms(4_000));
    let peak = intro.tick(ms(4_500)).brightness;
    assert!(peak > 2.0, "{peak}");
    assert_eq!(intro.tick(ms(6_000)).brightness, 1.0);
    assert_eq!(intro.tick(ms(30_000)).brightness, 1.0);
}

#[test]
fn visibility_fades_just_below_the_reveal_line() {
    let r = RevealState {
        height: 0.0,
        brightness: 1.0,
    };
    assert_eq!(r.visibility(-5.0), 1.0);
    assert_eq!(r.visibility(0.0), 0.0);
    assert_eq!(r.visibility(3.0), 0.0);
    let edge = r.visibility(-0.75);
    assert!(edge > 0.0 && edge < 1.0);

    // Once the intro is over everything in the scene is visible.
    assert_eq!(RevealState::default().visibility(30.0), 1.0);
}
