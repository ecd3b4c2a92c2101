//! Camera capture and the hand-recognizer loop.
//!
//! The recognizer itself lives in the page: `createHandTracker()` resolves to
//! an object whose `detect(video, timestampMs)` returns 21 landmarks as a flat
//! `[x, y, z, ...]` array, or `null` when no hand is in view. Detection runs
//! once per animation frame and never overlaps itself. Any failure during
//! start-up leaves the session on mouse input only; there is no retry.

use crate::clock::SessionClock;
use crate::constants::{VIDEO_HEIGHT, VIDEO_WIDTH};
use crate::release::ReleaseGuard;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tree_core::{dispatch, Error, GestureController, HandLandmarks, InteractionStore};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

#[wasm_bindgen]
extern "C" {
    #[derive(Clone, Debug)]
    pub type HandTracker;

    #[wasm_bindgen(catch, js_name = createHandTracker)]
    fn create_hand_tracker() -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn detect(
        this: &HandTracker,
        video: &web::HtmlVideoElement,
        timestamp_ms: f64,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method)]
    fn close(this: &HandTracker);
}

fn unavailable(stage: &str, e: JsValue) -> Error {
    Error::GestureUnavailable(format!("{stage}: {:?}", e))
}

/// A running capture: the camera stream, the video element it plays into,
/// and the recognizer. `stop` or dropping it releases the camera.
pub struct GesturePipeline {
    stream: web::MediaStream,
    video: web::HtmlVideoElement,
    tracker: HandTracker,
    stopped: Cell<bool>,
}

impl GesturePipeline {
    pub async fn open(document: &web::Document) -> Result<Self, Error> {
        let window = web::window().ok_or_else(|| Error::GestureUnavailable("no window".into()))?;
        let devices = window
            .navigator()
            .media_devices()
            .map_err(|e| unavailable("media devices", e))?;

        let constraints = web::MediaStreamConstraints::new();
        constraints.set_video(&JsValue::TRUE);
        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(|e| unavailable("getUserMedia", e))?;
        let stream: web::MediaStream = JsFuture::from(promise)
            .await
            .map_err(|e| unavailable("camera", e))?
            .unchecked_into();
        // Until start-up completes, any early return stops the camera.
        let guard = ReleaseGuard::new(stream, release_stream);

        let video: web::HtmlVideoElement = document
            .create_element("video")
            .map_err(|e| unavailable("video element", e))?
            .unchecked_into();
        video.set_muted(true);
        video.set_width(VIDEO_WIDTH);
        video.set_height(VIDEO_HEIGHT);
        _ = video.set_attribute("playsinline", "");
        video.set_src_object(guard.get());
        let play = video.play().map_err(|e| unavailable("video play", e))?;
        JsFuture::from(play)
            .await
            .map_err(|e| unavailable("video play", e))?;

        let promise = create_hand_tracker().map_err(|e| unavailable("recognizer", e))?;
        let tracker: HandTracker = JsFuture::from(promise)
            .await
            .map_err(|e| unavailable("recognizer", e))?
            .unchecked_into();
        let stream = guard
            .into_inner()
            .ok_or_else(|| Error::GestureUnavailable("camera stream lost".into()))?;

        log::info!("[gesture] camera and recognizer ready");
        Ok(Self {
            stream,
            video,
            tracker,
            stopped: Cell::new(false),
        })
    }

    /// Stop the detect loop and release the camera and recognizer. Later
    /// calls do nothing.
    pub fn stop(&self) {
        if self.stopped.replace(true) {
            return;
        }
        stop_tracks(&self.stream);
        self.video.set_src_object(None);
        self.tracker.close();
        log::info!("[gesture] pipeline released");
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }

    fn detect(&self, timestamp_ms: f64) -> Option<HandLandmarks> {
        let raw = match self.tracker.detect(&self.video, timestamp_ms) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("[gesture] detect failed: {:?}", e);
                return None;
            }
        };
        if raw.is_null() || raw.is_undefined() {
            return None;
        }
        let flat = js_sys::Float32Array::new(&raw).to_vec();
        match HandLandmarks::from_flat(&flat) {
            Ok(hand) => Some(hand),
            Err(e) => {
                log::warn!("[gesture] {e}");
                None
            }
        }
    }
}

impl Drop for GesturePipeline {
    fn drop(&mut self) {
        self.stop();
    }
}

fn release_stream(stream: &web::MediaStream) {
    stop_tracks(stream);
    log::info!("[gesture] camera released after failed start-up");
}

fn stop_tracks(stream: &web::MediaStream) {
    for track in stream.get_tracks().iter() {
        track.unchecked_into::<web::MediaStreamTrack>().stop();
    }
}

/// Resolves on the next animation frame with its timestamp.
async fn next_animation_frame() -> Option<f64> {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(w) = web::window() {
            _ = w.request_animation_frame(&resolve);
        }
    });
    JsFuture::from(promise).await.ok().and_then(|v| v.as_f64())
}

/// Feed recognizer results into the store until the pipeline is stopped.
pub fn run(
    pipeline: Rc<GesturePipeline>,
    store: Rc<RefCell<InteractionStore>>,
    clock: SessionClock,
) {
    spawn_local(async move {
        let mut controller = GestureController::default();
        while !pipeline.is_stopped() {
            let Some(timestamp) = next_animation_frame().await else {
                break;
            };
            if pipeline.is_stopped() {
                break;
            }
            let hand = pipeline.detect(timestamp);
            let now = clock.now();
            let mut store = store.borrow_mut();
            if let Some(event) = controller.on_frame(hand.as_ref(), &mut store, now) {
                dispatch(&mut store, event);
            }
        }
        log::info!("[gesture] loop stopped");
    });
}
