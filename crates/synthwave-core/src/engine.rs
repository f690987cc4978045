//! One-tick orchestration of every core component.
//!
//! `Visualizer` is the single writer of all per-frame state. `tick` runs the
//! pipeline in a fixed order and hands back a `FrameView` borrowing the
//! result, so the renderer reads a consistent snapshot and the next tick
//! cannot start while a draw still holds it.

use crate::camera::{Camera, Viewport};
use crate::color::ColorTheme;
use crate::error::Result;
use crate::noise::NoiseField;
use crate::presentation::{
    LoadOutcome, MeshHandle, PostParams, Presentation, VehicleProfile, PREFERRED_VEHICLE,
};
use crate::spectrum::{extract_bands, Bands};
use crate::sun::SunState;
use crate::terrain::{AdvanceReport, LayerVisibility, TerrainConfig, TerrainSynthesizer, TerrainVertex};
use crate::vehicle::{DriveInput, DriveMode, VehicleKinematics, VehicleTransform};
use glam::Mat4;
use std::f32::consts::FRAC_PI_2;

#[derive(Clone, Debug, Default)]
pub struct VisualizerConfig {
    pub terrain: TerrainConfig,
    pub drive_mode: DriveMode,
}

/// Read-only snapshot of one tick, valid until the next mutation.
pub struct FrameView<'a> {
    pub vertices: &'a [TerrainVertex],
    pub triangle_indices: &'a [u32],
    pub line_indices: &'a [u32],
    pub layers: LayerVisibility,
    /// Lays the terrain lattice (z up) flat on the world floor.
    pub terrain_model: Mat4,
    /// `None` until the first vehicle mesh is active.
    pub vehicle: Option<(MeshHandle, VehicleTransform)>,
    pub camera: &'a Camera,
    pub post: PostParams,
    pub sun: SunState,
    pub bands: Bands,
    /// Whether the terrain advanced this tick (false while no audio).
    pub terrain_advanced: bool,
    pub wrapped_vertices: usize,
    /// Wall time spent in `tick`, milliseconds.
    pub tick_cost: f32,
}

pub struct Visualizer {
    noise: NoiseField,
    terrain: TerrainSynthesizer,
    kinematics: VehicleKinematics,
    presentation: Presentation,
    sun: SunState,
    camera: Camera,
    bands: Bands,
    last_report: AdvanceReport,
    terrain_advanced: bool,
    tick_cost: f32,
}

impl Visualizer {
    pub fn new(config: VisualizerConfig, profiles: Vec<VehicleProfile>, noise: NoiseField) -> Self {
        let presentation = Presentation::new(profiles);
        let mut kinematics = match presentation.profile(PREFERRED_VEHICLE) {
            Some(profile) => VehicleKinematics::new(profile),
            None => VehicleKinematics::new(&VehicleProfile::default()),
        };
        kinematics.set_mode(config.drive_mode);
        let mut camera = Camera::default();
        camera.follow(kinematics.camera_target());
        let mut terrain = TerrainSynthesizer::new(config.terrain);
        terrain.recolor(&presentation.theme());
        log::info!(
            "[engine] visualizer ready with {} vehicle profiles, noise seed {}",
            presentation.profiles().len(),
            noise.seed()
        );
        Self {
            noise,
            terrain,
            kinematics,
            presentation,
            sun: SunState::new(),
            camera,
            bands: Bands::default(),
            last_report: AdvanceReport::default(),
            terrain_advanced: false,
            tick_cost: 0.0,
        }
    }

    /// Advance one frame.
    ///
    /// With no energies (audio not started) the terrain is held in place and
    /// the previous bands are reused; the vehicle, sun and camera still run.
    pub fn tick(&mut self, energies: Option<&[u8]>, input: &DriveInput) -> FrameView<'_> {
        let started = instant::Instant::now();

        self.terrain_advanced = false;
        if let Some(energies) = energies {
            self.bands = extract_bands(energies);
            let theme = self.presentation.theme();
            self.last_report = self.terrain.advance(energies, &self.noise, &theme);
            self.terrain_advanced = true;
        } else {
            self.last_report.wrapped.clear();
        }

        self.kinematics.update(&self.bands, &self.noise, input);
        self.sun.update(&self.bands);
        self.camera.follow(self.kinematics.camera_target());

        self.tick_cost = started.elapsed().as_secs_f32() * 1000.0;
        self.view()
    }

    /// Snapshot of the current state without advancing.
    pub fn view(&self) -> FrameView<'_> {
        let grid = self.terrain.grid();
        FrameView {
            vertices: grid.vertices(),
            triangle_indices: grid.triangle_indices(),
            line_indices: grid.line_indices(),
            layers: self.terrain.layers(),
            terrain_model: Mat4::from_rotation_x(-FRAC_PI_2),
            vehicle: self
                .presentation
                .active_mesh()
                .map(|mesh| (mesh, self.kinematics.transform())),
            camera: &self.camera,
            post: self.presentation.post_params(),
            sun: self.sun,
            bands: self.bands,
            terrain_advanced: self.terrain_advanced,
            wrapped_vertices: self.last_report.wrapped.len(),
            tick_cost: self.tick_cost,
        }
    }

    pub fn terrain(&self) -> &TerrainSynthesizer {
        &self.terrain
    }

    pub fn kinematics(&self) -> &VehicleKinematics {
        &self.kinematics
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    pub fn theme(&self) -> ColorTheme {
        self.presentation.theme()
    }

    /// Called by the asset provider once a mesh is resident.
    pub fn on_vehicle_loaded(&mut self, index: usize, handle: MeshHandle) -> Result<()> {
        if self.presentation.register_loaded(index, handle)? == LoadOutcome::Activated {
            self.apply_active_profile();
        }
        Ok(())
    }

    /// Switch vehicles. On error nothing changes.
    pub fn select_vehicle(&mut self, index: usize) -> Result<()> {
        if self.presentation.active_index() == Some(index) {
            return Ok(());
        }
        self.presentation.select_vehicle(index)?;
        self.apply_active_profile();
        Ok(())
    }

    fn apply_active_profile(&mut self) {
        if let Some(profile) = self.presentation.active_profile() {
            self.kinematics.retarget(profile);
            self.terrain.recolor(&profile.theme);
        }
    }

    pub fn set_layers(&mut self, layers: LayerVisibility) -> bool {
        let theme = self.presentation.theme();
        self.terrain.set_layers(layers, &theme)
    }

    pub fn set_drive_mode(&mut self, mode: DriveMode) {
        self.kinematics.set_mode(mode);
    }

    pub fn set_bloom_parameters(&mut self, strength: f32, radius: f32, threshold: f32) -> Result<()> {
        self.presentation
            .set_bloom_parameters(strength, radius, threshold)
            .map_err(|e| {
                log::warn!("[engine] bloom update rejected: {e}");
                e
            })
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> bool {
        self.camera.set_viewport(viewport)
    }
}
