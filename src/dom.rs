use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        log::warn!("[dom] no #{element_id} to attach a click handler to");
    }
}

pub fn input_element(document: &web::Document, element_id: &str) -> Option<web::HtmlInputElement> {
    document
        .get_element_by_id(element_id)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
}

/// Checkbox state; a missing element reads as `default`.
pub fn read_checkbox(input: Option<&web::HtmlInputElement>, default: bool) -> bool {
    input.map(|i| i.checked()).unwrap_or(default)
}

/// Slider value; a missing element reads as `default`. An unparsable value
/// comes through as NaN so the caller can reject it.
pub fn read_number(input: Option<&web::HtmlInputElement>, default: f32) -> f32 {
    input.map(|i| i.value_as_number() as f32).unwrap_or(default)
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}
