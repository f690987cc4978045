#![cfg(target_arch = "wasm32")]
use crate::core::{default_profiles, DriveInput, NoiseField, Visualizer, VisualizerConfig};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod audio;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("synthwave-web starting");

    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let feed = audio::EnergyFeed::new(&document)?;
    let visualizer = Visualizer::new(
        VisualizerConfig::default(),
        default_profiles(),
        NoiseField::from_entropy(),
    );
    let gpu = frame::init_gpu(&canvas, visualizer.terrain().grid()).await?;

    let input = Rc::new(DriveInput::new());
    events::wire_drive_keys(input.clone());
    let pending_vehicle = Rc::new(Cell::new(None));
    events::wire_vehicle_buttons(
        &document,
        visualizer.presentation().profiles().len(),
        pending_vehicle.clone(),
    );

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        visualizer,
        feed: Some(feed),
        input,
        controls: events::ControlPanel::new(&document),
        pending_vehicle,
        equalizer: document.get_element_by_id(constants::EQUALIZER_ID),
        canvas,
        gpu: Some(gpu),
        last_instant: Instant::now(),
        frame_index: 0,
        last_budget_warning: None,
    }));

    let handle = frame::start_loop(frame_ctx.clone());
    frame::wire_teardown(handle, frame_ctx.clone());
    assets::load_vehicles(frame_ctx);
    Ok(())
}
