//! Discrete scene modes and the transitions between them.
//!
//! Only committed events reach this module: a click that was not a drag, a
//! toggle key, or a gesture label that survived the debounce. Requests that
//! make no sense in the current mode are ignored.

use crate::gesture::GestureLabel;
use crate::interaction::InteractionStore;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SceneMode {
    Chaos,
    /// Reserved transitional state; nothing enters it.
    Forming,
    #[default]
    Order,
    PhotoFocus,
}

impl SceneMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chaos => "chaos",
            Self::Forming => "forming",
            Self::Order => "order",
            Self::PhotoFocus => "photo-focus",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneEvent {
    Click,
    Toggle,
    Gesture(GestureLabel),
}

/// Apply a committed event to the store. Returns the new mode when a
/// transition happened.
pub fn dispatch(store: &mut InteractionStore, event: SceneEvent) -> Option<SceneMode> {
    use GestureLabel::{Fist, Open, Pinch};
    use SceneEvent::{Click, Gesture, Toggle};

    let from = store.mode();
    match (from, event) {
        (SceneMode::Order, Click | Toggle | Gesture(Open)) => store.enter_chaos(),
        (SceneMode::Chaos, Click) => match store.hovered_photo() {
            Some(i) => store.enter_photo_focus(i),
            None => store.enter_order(),
        },
        (SceneMode::Chaos, Toggle | Gesture(Fist)) => store.enter_order(),
        (SceneMode::Chaos, Gesture(Pinch)) => match store.hovered_photo() {
            Some(i) => store.enter_photo_focus(i),
            None => {
                log::debug!("[scene] pinch with nothing hovered");
                return None;
            }
        },
        (SceneMode::PhotoFocus, Click | Toggle | Gesture(Fist | Open)) => store.enter_chaos(),
        _ => {
            log::debug!("[scene] {:?} ignored in {}", event, from.as_str());
            return None;
        }
    }

    let to = store.mode();
    match store.selected_photo() {
        Some(i) => log::info!("[scene] {} -> {} (photo {})", from.as_str(), to.as_str(), i),
        None => log::info!("[scene] {} -> {}", from.as_str(), to.as_str()),
    }
    Some(to)
}
