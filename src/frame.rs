use crate::audio::EnergyFeed;
use crate::constants::BUDGET_WARN_INTERVAL;
use crate::core::constants::FRAME_BUDGET_MS;
use crate::core::{DriveInput, TerrainGrid, Viewport, Visualizer};
use crate::events::ControlPanel;
use crate::overlay;
use crate::render;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub visualizer: Visualizer,
    /// Dropped on teardown, which closes the audio context.
    pub feed: Option<EnergyFeed>,
    pub input: Rc<DriveInput>,
    pub controls: ControlPanel,
    pub pending_vehicle: Rc<Cell<Option<usize>>>,
    pub equalizer: Option<web::Element>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'static>>,
    pub last_instant: Instant,
    pub frame_index: u64,
    pub last_budget_warning: Option<u64>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        if let Some(index) = self.pending_vehicle.take() {
            if let Err(e) = self.visualizer.select_vehicle(index) {
                log::warn!("[frame] vehicle switch ignored: {e}");
            }
        }
        self.controls.apply(&mut self.visualizer);

        let width = self.canvas.width();
        let height = self.canvas.height();
        self.visualizer.set_viewport(Viewport::new(width, height));

        let energies = self.feed.as_mut().and_then(|feed| feed.latest());
        let view = self.visualizer.tick(energies, &self.input);
        self.frame_index += 1;
        if should_warn_budget(view.tick_cost, self.frame_index, self.last_budget_warning) {
            self.last_budget_warning = Some(self.frame_index);
            log::warn!(
                "[frame] tick took {:.2}ms (budget {FRAME_BUDGET_MS}ms)",
                view.tick_cost
            );
        }

        overlay::update_equalizer(self.equalizer.as_ref(), &view.bands);

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(width, height);
            match g.render(dt_sec, &view) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => g.reconfigure(),
                Err(e) => log::error!("render error: {:?}", e),
            }
        }
    }
}

/// Over budget, and either never warned or warned at least
/// `BUDGET_WARN_INTERVAL` frames ago.
#[inline]
fn should_warn_budget(tick_cost: f32, frame: u64, last_warned: Option<u64>) -> bool {
    tick_cost > FRAME_BUDGET_MS
        && last_warned.map_or(true, |last| frame.saturating_sub(last) >= BUDGET_WARN_INTERVAL)
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    terrain: &TerrainGrid,
) -> anyhow::Result<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    render::GpuState::new(leaked_canvas, terrain).await
}

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Running flag, pending frame id and the tick closure of the RAF loop.
pub struct LoopHandle {
    running: Rc<Cell<bool>>,
    raf_id: Rc<Cell<Option<i32>>>,
    tick: TickClosure,
}

impl LoopHandle {
    /// Stop the loop and cancel the frame already requested.
    pub fn stop(&self) {
        self.running.set(false);
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        self.tick.borrow_mut().take();
    }
}

fn request_frame(tick: &TickClosure, raf_id: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => raf_id.set(Some(id)),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> LoopHandle {
    let running = Rc::new(Cell::new(true));
    let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let tick: TickClosure = Rc::new(RefCell::new(None));

    let tick_clone = tick.clone();
    let running_tick = running.clone();
    let raf_tick = raf_id.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        raf_tick.set(None);
        if !running_tick.get() {
            return;
        }
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone, &raf_tick);
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &raf_id);
    log::info!("[frame] loop started");

    LoopHandle {
        running,
        raf_id,
        tick,
    }
}

/// On `pagehide`: stop the loop, cancel the pending frame, release the GPU
/// and close the audio graph, all in one handler.
pub fn wire_teardown(handle: LoopHandle, frame_ctx: Rc<RefCell<FrameContext>>) {
    let Some(window) = web::window() else {
        return;
    };
    let closure = Closure::wrap(Box::new(move || {
        handle.stop();
        let mut ctx = frame_ctx.borrow_mut();
        ctx.gpu = None;
        ctx.feed = None;
        log::info!(
            "[frame] torn down after {} terrain frames",
            ctx.visualizer.terrain().frames()
        );
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    closure.forget();
}
