//! Background music: one looping audio element from the manifest.

use crate::constants::MUSIC_VOLUME;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub struct Music {
    element: Option<web::HtmlAudioElement>,
    started: bool,
    playing: bool,
}

impl Music {
    /// A missing url or element yields a silent player.
    pub fn new(src: Option<&str>) -> Self {
        let element = src.and_then(|src| match web::HtmlAudioElement::new_with_src(src) {
            Ok(el) => {
                el.set_loop(true);
                el.set_volume(MUSIC_VOLUME);
                wire_error_log(&el, src);
                Some(el)
            }
            Err(e) => {
                log::warn!("[audio] cannot create player for {src}: {:?}", e);
                None
            }
        });
        Self {
            element,
            started: false,
            playing: false,
        }
    }

    /// Browsers only allow playback after a user gesture; call from input
    /// handlers.
    pub fn start_if_idle(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.play();
    }

    pub fn toggle(&mut self) {
        self.started = true;
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    fn play(&mut self) {
        let Some(el) = &self.element else {
            return;
        };
        match el.play() {
            Ok(promise) => {
                self.playing = true;
                spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        log::warn!("[audio] playback refused: {:?}", e);
                    }
                });
            }
            Err(e) => log::warn!("[audio] play failed: {:?}", e),
        }
    }

    fn pause(&mut self) {
        if let Some(el) = &self.element {
            _ = el.pause();
        }
        self.playing = false;
        log::info!("[audio] paused");
    }
}

fn wire_error_log(el: &web::HtmlAudioElement, src: &str) {
    let src = src.to_string();
    let closure = Closure::wrap(Box::new(move |_: web::Event| {
        log::warn!("[audio] failed to load {src}, continuing without music");
    }) as Box<dyn FnMut(_)>);
    _ = el.add_event_listener_with_callback("error", closure.as_ref().unchecked_ref());
    closure.forget();
}
