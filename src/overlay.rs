use crate::core::Bands;
use std::fmt::Write;
use web_sys as web;

/// Render the seven band readouts as list items.
pub fn equalizer_html(bands: &Bands) -> String {
    let mut html = String::with_capacity(256);
    for band in bands.iter() {
        _ = write!(html, "<li>{band}</li>");
    }
    html
}

/// Refresh the `#equalizer` list. Missing element is a no-op.
pub fn update_equalizer(element: Option<&web::Element>, bands: &Bands) {
    if let Some(el) = element {
        el.set_inner_html(&equalizer_html(bands));
    }
}
