use crate::constants::{HELP_OVERLAY_ID, HINT_ID, STATUS_ID};
use web_sys as web;

#[inline]
pub fn toggle(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(HELP_OVERLAY_ID) {
        _ = el.class_list().toggle("hidden");
    }
}

/// Persistent status line, e.g. when gesture control could not start.
pub fn show_status(document: &web::Document, text: &str) {
    if let Some(el) = document.get_element_by_id(STATUS_ID) {
        el.set_text_content(Some(text));
        _ = el.class_list().remove_1("hidden");
    }
}

/// Live mode / input-source hint.
pub fn update_hint(document: &web::Document, text: &str) {
    if let Some(el) = document.get_element_by_id(HINT_ID) {
        el.set_text_content(Some(text));
    }
}
