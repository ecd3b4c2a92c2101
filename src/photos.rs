//! Photo loading. Each image loads independently; a failure swaps in the
//! placeholder for that index and never changes the photo layer.

use crate::bridge::SceneBridge;
use std::cell::RefCell;
use std::rc::Rc;
use tree_core::PhotoAlbum;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub fn load_all(album: Rc<RefCell<PhotoAlbum>>, bridge: SceneBridge) {
    let ids: Vec<String> = {
        let album = album.borrow();
        (0..album.len())
            .filter_map(|i| album.slot(i).map(|s| s.id.clone()))
            .collect()
    };
    for (index, id) in ids.into_iter().enumerate() {
        let album = album.clone();
        let bridge = bridge.clone();
        spawn_local(async move {
            match load_image(&id).await {
                Ok(img) => {
                    album.borrow_mut().mark_loaded(index);
                    bridge.set_photo_image(index as u32, &img);
                }
                Err(reason) => {
                    let placeholder = album.borrow_mut().mark_failed(index, &reason);
                    if let Some(ph) = placeholder {
                        bridge.set_photo_placeholder(index as u32, &ph.color, &ph.label);
                    }
                }
            }
            let pending = album.borrow().pending();
            if pending == 0 {
                log::info!("[assets] all photos settled");
            }
        });
    }
}

async fn load_image(src: &str) -> Result<web::HtmlImageElement, String> {
    let img = web::HtmlImageElement::new().map_err(|e| format!("{:?}", e))?;
    let done = js_sys::Promise::new(&mut |resolve, reject| {
        img.set_onload(Some(&resolve));
        img.set_onerror(Some(&reject));
    });
    img.set_src(src);
    let result = JsFuture::from(done).await;
    img.set_onload(None);
    img.set_onerror(None);
    result.map_err(|_| "image failed to load".to_string())?;
    Ok(img)
}
