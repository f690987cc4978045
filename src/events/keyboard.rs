use crate::core::{DriveInput, DriveKey};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn drive_key_for_event(ev: &web::KeyboardEvent) -> Option<DriveKey> {
    DriveKey::from_key(&ev.key())
}

fn add_key_listener(window: &web::Window, kind: &str, input: Rc<DriveInput>, held: bool) {
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        if let Some(key) = drive_key_for_event(&ev) {
            input.set(key, held);
        }
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Hold/release the six drive keys from window key events. Losing focus
/// releases everything so no key stays stuck down.
pub fn wire_drive_keys(input: Rc<DriveInput>) {
    let Some(window) = web::window() else {
        return;
    };
    add_key_listener(&window, "keydown", input.clone(), true);
    add_key_listener(&window, "keyup", input.clone(), false);

    let blur = Closure::wrap(Box::new(move || {
        input.release_all();
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref());
    blur.forget();
}
