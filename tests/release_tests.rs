// Host-side tests for the start-up release guard

mod release {
    include!("../src/release.rs");
}

use release::ReleaseGuard;
use std::cell::Cell;
use std::rc::Rc;

fn count_release(hits: &Rc<Cell<u32>>) {
    hits.set(hits.get() + 1);
}

fn start_up(hits: Rc<Cell<u32>>, fail_at: Option<u32>) -> Result<Rc<Cell<u32>>, String> {
    let guard = ReleaseGuard::new(hits, count_release);
    for stage in 0..3 {
        if fail_at == Some(stage) {
            return Err(format!("stage {stage} failed"));
        }
    }
    guard.into_inner().ok_or_else(|| "lost".to_string())
}

#[test]
fn dropping_the_guard_releases_once() {
    let hits = Rc::new(Cell::new(0));
    {
        let guard = ReleaseGuard::new(hits.clone(), count_release);
        assert!(guard.get().is_some());
    }
    assert_eq!(hits.get(), 1);
}

#[test]
fn every_failed_stage_releases_the_resource() {
    for stage in 0..3 {
        let hits = Rc::new(Cell::new(0));
        assert!(start_up(hits.clone(), Some(stage)).is_err());
        assert_eq!(hits.get(), 1, "stage {stage}");
    }
}

#[test]
fn successful_start_up_keeps_the_resource() {
    let hits = Rc::new(Cell::new(0));
    let owned = start_up(hits.clone(), None).unwrap();
    assert_eq!(hits.get(), 0);
    drop(owned);
    assert_eq!(hits.get(), 0);
}
