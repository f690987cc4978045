//! Procedural low-poly vehicle meshes, one per profile.

use crate::core::{Rgb, TerrainVertex, VehicleProfile};
use crate::frame::FrameContext;
use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

pub struct MeshData {
    pub vertices: Vec<TerrainVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Axis-aligned box with flat per-face shading baked into the color.
    fn push_box(&mut self, min: Vec3, max: Vec3, color: Rgb) {
        // (normal, four corners counter-clockwise seen from outside)
        let faces: [(Vec3, [Vec3; 4]); 6] = [
            (Vec3::Z, [
                Vec3::new(min.x, min.y, max.z),
                Vec3::new(max.x, min.y, max.z),
                Vec3::new(max.x, max.y, max.z),
                Vec3::new(min.x, max.y, max.z),
            ]),
            (Vec3::NEG_Z, [
                Vec3::new(max.x, min.y, min.z),
                Vec3::new(min.x, min.y, min.z),
                Vec3::new(min.x, max.y, min.z),
                Vec3::new(max.x, max.y, min.z),
            ]),
            (Vec3::X, [
                Vec3::new(max.x, min.y, max.z),
                Vec3::new(max.x, min.y, min.z),
                Vec3::new(max.x, max.y, min.z),
                Vec3::new(max.x, max.y, max.z),
            ]),
            (Vec3::NEG_X, [
                Vec3::new(min.x, min.y, min.z),
                Vec3::new(min.x, min.y, max.z),
                Vec3::new(min.x, max.y, max.z),
                Vec3::new(min.x, max.y, min.z),
            ]),
            (Vec3::Y, [
                Vec3::new(min.x, max.y, max.z),
                Vec3::new(max.x, max.y, max.z),
                Vec3::new(max.x, max.y, min.z),
                Vec3::new(min.x, max.y, min.z),
            ]),
            (Vec3::NEG_Y, [
                Vec3::new(min.x, min.y, min.z),
                Vec3::new(max.x, min.y, min.z),
                Vec3::new(max.x, min.y, max.z),
                Vec3::new(min.x, min.y, max.z),
            ]),
        ];
        let light = Vec3::new(0.3, 0.8, 0.5).normalize();
        for (normal, corners) in faces {
            let shade = 0.35 + 0.65 * normal.dot(light).max(0.0);
            let c = [color[0] * shade, color[1] * shade, color[2] * shade];
            let base = self.vertices.len() as u32;
            for p in corners {
                self.vertices.push(TerrainVertex {
                    position: p.to_array(),
                    color: c,
                });
            }
            self.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
    }
}

/// Body proportions per silhouette.
struct Silhouette {
    length: f32,
    width: f32,
    body_height: f32,
    cabin_height: f32,
    cabin_length: f32,
    body: Rgb,
    glow: Rgb,
}

fn silhouette(index: usize) -> Silhouette {
    match index {
        // wedge sports car
        0 => Silhouette {
            length: 2.0,
            width: 0.9,
            body_height: 0.3,
            cabin_height: 0.22,
            cabin_length: 0.8,
            body: [0.55, 0.57, 0.6],
            glow: [4.0, 0.2, 0.6],
        },
        // long, tall muscle car
        1 => Silhouette {
            length: 4.4,
            width: 1.9,
            body_height: 0.7,
            cabin_height: 0.5,
            cabin_length: 1.8,
            body: [0.45, 0.05, 0.05],
            glow: [4.0, 1.2, 0.1],
        },
        // angular pickup
        _ => Silhouette {
            length: 2.2,
            width: 1.0,
            body_height: 0.45,
            cabin_height: 0.3,
            cabin_length: 1.2,
            body: [0.7, 0.72, 0.75],
            glow: [0.2, 3.0, 4.0],
        },
    }
}

pub fn build_vehicle_mesh(index: usize, profile: &VehicleProfile) -> MeshData {
    let s = silhouette(index);
    let hl = s.length / 2.0;
    let hw = s.width / 2.0;
    let wheel = s.body_height * 0.6;
    let mut mesh = MeshData::new();

    mesh.push_box(
        Vec3::new(-hw, wheel * 0.5, -hl),
        Vec3::new(hw, wheel * 0.5 + s.body_height, hl),
        s.body,
    );
    let roof = wheel * 0.5 + s.body_height;
    mesh.push_box(
        Vec3::new(-hw * 0.8, roof, -s.cabin_length * 0.6),
        Vec3::new(hw * 0.8, roof + s.cabin_height, s.cabin_length * 0.4),
        [s.body[0] * 0.3, s.body[1] * 0.3, s.body[2] * 0.4],
    );
    // tail light bar, bright enough to bloom
    mesh.push_box(
        Vec3::new(-hw * 0.9, roof - s.body_height * 0.35, -hl - 0.02),
        Vec3::new(hw * 0.9, roof - s.body_height * 0.15, -hl),
        s.glow,
    );
    for (x, z) in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
        let cx = x * (hw + 0.02);
        let cz = z * (hl - wheel * 1.2);
        mesh.push_box(
            Vec3::new(cx - 0.08, 0.0, cz - wheel * 0.5),
            Vec3::new(cx + 0.08, wheel, cz + wheel * 0.5),
            [0.05, 0.05, 0.06],
        );
    }
    log::debug!(
        "[assets] {} mesh: {} vertices",
        profile.name,
        mesh.vertices.len()
    );
    mesh
}

async fn next_microtask() {
    _ = wasm_bindgen_futures::JsFuture::from(js_sys::Promise::resolve(&wasm_bindgen::JsValue::NULL)).await;
}

/// Build and upload every profile's mesh off the frame path, announcing
/// each one to the visualizer as it becomes resident.
pub fn load_vehicles(frame_ctx: Rc<RefCell<FrameContext>>) {
    let profiles = frame_ctx.borrow().visualizer.presentation().profiles().to_vec();
    spawn_local(async move {
        for (index, profile) in profiles.iter().enumerate() {
            next_microtask().await;
            let mesh = build_vehicle_mesh(index, profile);
            let mut guard = frame_ctx.borrow_mut();
            let ctx = &mut *guard;
            let Some(gpu) = ctx.gpu.as_mut() else {
                log::warn!("[assets] GPU gone, stopping vehicle upload");
                return;
            };
            let handle = gpu.upload_mesh(&mesh);
            if let Err(e) = ctx.visualizer.on_vehicle_loaded(index, handle) {
                log::warn!("[assets] {}: {e}", profile.name);
            }
        }
    });
}
