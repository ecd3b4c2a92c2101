#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use tree_core::{
    Camera, Experience, InteractionStore, PhotoAlbum, PointerController, TreeConfig,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod batch;
mod bridge;
mod clock;
mod constants;
mod dom;
mod events;
mod frame;
mod gesture;
mod input;
mod overlay;
mod photos;
mod release;

use bridge::{BridgeSink, SceneBridge};
use clock::SessionClock;
use constants::GESTURE_UNAVAILABLE_TEXT;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("holiday-tree starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas(&document)?;
    dom::wire_canvas_resize(&canvas);

    let manifest = dom::read_manifest(&canvas);
    log::info!(
        "[assets] {} photos, audio {:?}",
        manifest.photos.len(),
        manifest.audio
    );

    let bridge = SceneBridge::from_window()?;
    let clock = SessionClock::start();
    let config = TreeConfig::default().with_photo_count(manifest.photos.len());
    let experience = Experience::build(&config, clock.now());
    let mut sink = BridgeSink::new(bridge.clone());
    sink.register_layers(&experience);

    let album = Rc::new(RefCell::new(PhotoAlbum::new(&manifest)));
    photos::load_all(album, bridge);

    let store = Rc::new(RefCell::new(InteractionStore::default()));
    let music = Rc::new(RefCell::new(audio::Music::new(manifest.audio.as_deref())));

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        store: store.clone(),
        pointer: Rc::new(RefCell::new(PointerController::new())),
        music: music.clone(),
        clock,
    });
    events::wire_global_keydown(store.clone(), music, canvas.clone());

    start_gestures(document.clone(), store.clone(), clock);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        experience,
        store,
        camera: Camera::default(),
        sink,
        canvas,
        document,
        clock,
        last_frame: clock.now(),
        last_hint: None,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}

/// Start camera capture in the background. The scene is already running on
/// mouse input; a failure here only shows the status line.
fn start_gestures(
    document: web::Document,
    store: Rc<RefCell<InteractionStore>>,
    clock: SessionClock,
) {
    spawn_local(async move {
        match gesture::GesturePipeline::open(&document).await {
            Ok(pipeline) => {
                let pipeline = Rc::new(pipeline);
                stop_on_pagehide(pipeline.clone());
                gesture::run(pipeline, store, clock);
            }
            Err(e) => {
                log::warn!("[gesture] {e}; mouse only");
                overlay::show_status(&document, GESTURE_UNAVAILABLE_TEXT);
            }
        }
    });
}

fn stop_on_pagehide(pipeline: Rc<gesture::GesturePipeline>) {
    let closure = Closure::wrap(Box::new(move |_: web::Event| {
        pipeline.stop();
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
