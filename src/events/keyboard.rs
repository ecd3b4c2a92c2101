use crate::audio::Music;
use crate::input::{key_action, KeyAction};
use crate::overlay;
use std::cell::RefCell;
use std::rc::Rc;
use tree_core::{dispatch, InteractionStore, SceneEvent};
use wasm_bindgen::JsCast;
use web_sys as web;

fn toggle_fullscreen(canvas: &web::HtmlCanvasElement) {
    if let Some(doc) = web::window().and_then(|w| w.document()) {
        if doc.fullscreen_element().is_some() {
            doc.exit_fullscreen();
        } else {
            _ = canvas.request_fullscreen();
        }
    }
}

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    store: &Rc<RefCell<InteractionStore>>,
    music: &Rc<RefCell<Music>>,
    canvas: &web::HtmlCanvasElement,
) {
    if ev.repeat() {
        return;
    }
    let Some(action) = key_action(&ev.key()) else {
        return;
    };
    match action {
        KeyAction::Toggle => {
            music.borrow_mut().start_if_idle();
            dispatch(&mut store.borrow_mut(), SceneEvent::Toggle);
        }
        KeyAction::ToggleMusic => music.borrow_mut().toggle(),
        KeyAction::Fullscreen => toggle_fullscreen(canvas),
        KeyAction::Help => {
            if let Some(doc) = web::window().and_then(|w| w.document()) {
                overlay::toggle(&doc);
            }
        }
    }
    ev.prevent_default();
}

pub fn wire_global_keydown(
    store: Rc<RefCell<InteractionStore>>,
    music: Rc<RefCell<Music>>,
    canvas: web::HtmlCanvasElement,
) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &store, &music, &canvas);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
