use crate::bridge::BridgeSink;
use crate::clock::SessionClock;
use crate::input;
use crate::overlay;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tree_core::{Camera, Experience, InputSource, InteractionStore, SceneMode};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub experience: Experience,
    pub store: Rc<RefCell<InteractionStore>>,
    pub camera: Camera,
    pub sink: BridgeSink,

    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub clock: SessionClock,

    pub last_frame: Duration,
    pub last_hint: Option<(SceneMode, InputSource)>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = self.clock.now();
        let dt = input::frame_dt(self.last_frame, now);
        self.last_frame = now;

        let (w, h) = (self.canvas.width(), self.canvas.height());
        if h > 0 {
            self.camera.aspect = w as f32 / h as f32;
        }
        self.sink.set_camera(&self.camera);

        let hint = {
            let mut store = self.store.borrow_mut();
            self.experience
                .tick(&mut store, &self.camera, now, dt, &mut self.sink);
            (store.mode(), store.input_source())
        };
        if self.last_hint != Some(hint) {
            overlay::update_hint(&self.document, &input::hint_text(hint.0, hint.1));
            self.last_hint = Some(hint);
        }

        self.sink.render();
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
