use crate::constants::*;
use crate::core::{BloomParams, DriveMode, LayerVisibility, Visualizer};
use crate::dom;
use std::cell::Cell;
use std::rc::Rc;
use web_sys as web;

/// Settings panel inputs, re-read every frame and forwarded only on change.
pub struct ControlPanel {
    grid: Option<web::HtmlInputElement>,
    faces: Option<web::HtmlInputElement>,
    autodrive: Option<web::HtmlInputElement>,
    strength: Option<web::HtmlInputElement>,
    radius: Option<web::HtmlInputElement>,
    threshold: Option<web::HtmlInputElement>,
    last_bloom: [u32; 3],
}

impl ControlPanel {
    pub fn new(document: &web::Document) -> Self {
        let defaults = BloomParams::default();
        Self {
            grid: dom::input_element(document, TOGGLE_GRID_ID),
            faces: dom::input_element(document, TOGGLE_FACES_ID),
            autodrive: dom::input_element(document, TOGGLE_AUTODRIVE_ID),
            strength: dom::input_element(document, BLOOM_STRENGTH_ID),
            radius: dom::input_element(document, BLOOM_RADIUS_ID),
            threshold: dom::input_element(document, BLOOM_THRESHOLD_ID),
            last_bloom: [
                defaults.strength.to_bits(),
                defaults.radius.to_bits(),
                defaults.threshold.to_bits(),
            ],
        }
    }

    pub fn apply(&mut self, visualizer: &mut Visualizer) {
        let layers = LayerVisibility {
            grid: dom::read_checkbox(self.grid.as_ref(), true),
            faces: dom::read_checkbox(self.faces.as_ref(), true),
        };
        visualizer.set_layers(layers);

        let mode = if dom::read_checkbox(self.autodrive.as_ref(), true) {
            DriveMode::Auto
        } else {
            DriveMode::Manual
        };
        visualizer.set_drive_mode(mode);

        let defaults = BloomParams::default();
        let strength = dom::read_number(self.strength.as_ref(), defaults.strength);
        let radius = dom::read_number(self.radius.as_ref(), defaults.radius);
        let threshold = dom::read_number(self.threshold.as_ref(), defaults.threshold);
        let bits = [strength.to_bits(), radius.to_bits(), threshold.to_bits()];
        if bits != self.last_bloom {
            self.last_bloom = bits;
            // rejection is logged by the visualizer; the previous values stay live
            _ = visualizer.set_bloom_parameters(strength, radius, threshold);
        }
    }
}

/// Vehicle buttons queue a selection; the frame loop applies it.
pub fn wire_vehicle_buttons(document: &web::Document, count: usize, pending: Rc<Cell<Option<usize>>>) {
    for index in 0..count {
        let pending = pending.clone();
        dom::add_click_listener(document, &format!("{VEHICLE_BUTTON_PREFIX}{index}"), move || {
            pending.set(Some(index));
        });
    }
}
