use crate::audio::Music;
use crate::clock::SessionClock;
use crate::input;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use tree_core::{dispatch, InteractionStore, PointerController};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub store: Rc<RefCell<InteractionStore>>,
    pub pointer: Rc<RefCell<PointerController>>,
    pub music: Rc<RefCell<Music>>,
    pub clock: SessionClock,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
    wire_pointerup(&w);
    wire_pointerleave(&w);
}

/// Pointer position in canvas CSS pixels, plus the canvas CSS size.
fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> (Vec2, Vec2) {
    let rect = canvas.get_bounding_client_rect();
    let px = Vec2::new(
        (ev.client_x() as f64 - rect.left()) as f32,
        (ev.client_y() as f64 - rect.top()) as f32,
    );
    (px, Vec2::new(rect.width() as f32, rect.height() as f32))
}

fn add_listener(
    target: &web::HtmlCanvasElement,
    name: &str,
    handler: impl FnMut(web::PointerEvent) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(_)>);
    _ = target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &InputWiring) {
    let w2 = w.clone();
    add_listener(&w.canvas, "pointermove", move |ev: web::PointerEvent| {
        let (px, size) = pointer_canvas_px(&ev, &w2.canvas);
        let ndc = input::canvas_px_to_ndc(px, size);
        let now = w2.clock.now();
        w2.pointer
            .borrow_mut()
            .pointer_move(px, ndc, &mut w2.store.borrow_mut(), now);
    });
}

fn wire_pointerdown(w: &InputWiring) {
    let w2 = w.clone();
    add_listener(&w.canvas, "pointerdown", move |ev: web::PointerEvent| {
        let (px, _) = pointer_canvas_px(&ev, &w2.canvas);
        w2.pointer.borrow_mut().pointer_down(px);
        w2.music.borrow_mut().start_if_idle();
        _ = w2.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    });
}

fn wire_pointerup(w: &InputWiring) {
    let w2 = w.clone();
    add_listener(&w.canvas, "pointerup", move |ev: web::PointerEvent| {
        let (px, _) = pointer_canvas_px(&ev, &w2.canvas);
        let click = w2.pointer.borrow_mut().pointer_up(px);
        if let Some(event) = click {
            dispatch(&mut w2.store.borrow_mut(), event);
        }
        ev.prevent_default();
    });
}

fn wire_pointerleave(w: &InputWiring) {
    let w2 = w.clone();
    add_listener(&w.canvas, "pointerleave", move |_ev: web::PointerEvent| {
        let now = w2.clock.now();
        w2.pointer
            .borrow_mut()
            .pointer_leave(&mut w2.store.borrow_mut(), now);
        log::debug!("[input] pointer left canvas");
    });
}
