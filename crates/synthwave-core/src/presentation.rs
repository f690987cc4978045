//! Vehicle catalog, active selection and post-processing parameters.
//!
//! Mesh loading happens elsewhere and completes asynchronously; this side
//! only learns about it through `register_loaded` and never blocks on it.

use crate::color::{rgb_from_hex, ColorTheme, Rgb};
use crate::constants::{BLOOM_RADIUS, BLOOM_STRENGTH, BLOOM_THRESHOLD, VEHICLE_START};
use crate::error::{Result, SynthwaveError};
use fnv::FnvHashMap;
use glam::Vec3;
use std::f32::consts::PI;

/// Index of the vehicle shown as soon as its mesh is ready.
pub const PREFERRED_VEHICLE: usize = 0;

#[derive(Clone, Debug, PartialEq)]
pub struct VehicleProfile {
    pub name: &'static str,
    pub scale: Vec3,
    pub rotation: Vec3,
    pub initial_position: Vec3,
    pub theme: ColorTheme,
    pub particle_tint: Rgb,
    pub background_tint: Rgb,
    pub sun_color: Rgb,
}

impl Default for VehicleProfile {
    fn default() -> Self {
        Self {
            name: "Vehicle",
            scale: Vec3::ONE,
            rotation: Vec3::new(0.0, PI, 0.0),
            initial_position: VEHICLE_START,
            theme: ColorTheme::default(),
            particle_tint: [1.0; 3],
            background_tint: [0.0; 3],
            sun_color: [1.0; 3],
        }
    }
}

pub fn default_profiles() -> Vec<VehicleProfile> {
    let facing_camera = Vec3::new(0.0, PI, 0.0);
    vec![
        VehicleProfile {
            name: "DeLorean",
            scale: Vec3::splat(2.0),
            rotation: facing_camera,
            initial_position: VEHICLE_START,
            theme: ColorTheme::RETRO,
            particle_tint: rgb_from_hex(0xff00ff),
            background_tint: rgb_from_hex(0x0f0f1c),
            sun_color: [1.0, 0.2, 0.8],
        },
        VehicleProfile {
            name: "Muscle",
            scale: Vec3::ONE,
            rotation: facing_camera,
            initial_position: VEHICLE_START,
            theme: ColorTheme::SUNSET,
            particle_tint: rgb_from_hex(0xffaa33),
            background_tint: rgb_from_hex(0x1c0f0f),
            sun_color: [1.0, 0.45, 0.1],
        },
        VehicleProfile {
            name: "Cyber",
            scale: Vec3::splat(2.0),
            rotation: facing_camera,
            initial_position: VEHICLE_START,
            theme: ColorTheme::NEON,
            particle_tint: rgb_from_hex(0x00ffee),
            background_tint: rgb_from_hex(0x0a1420),
            sun_color: [0.2, 0.9, 1.0],
        },
    ]
}

/// Opaque id for a mesh owned by the asset provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BloomParams {
    pub strength: f32,
    pub radius: f32,
    pub threshold: f32,
}

impl Default for BloomParams {
    fn default() -> Self {
        Self {
            strength: BLOOM_STRENGTH,
            radius: BLOOM_RADIUS,
            threshold: BLOOM_THRESHOLD,
        }
    }
}

/// Everything the post chain needs for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PostParams {
    pub bloom: BloomParams,
    pub background_tint: Rgb,
    pub particle_tint: Rgb,
    pub sun_color: Rgb,
}

/// Outcome of announcing a loaded mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Registered,
    /// The mesh was the preferred start vehicle and is now active.
    Activated,
}

pub struct Presentation {
    profiles: Vec<VehicleProfile>,
    loaded: FnvHashMap<usize, MeshHandle>,
    active: Option<usize>,
    bloom: BloomParams,
}

impl Presentation {
    pub fn new(profiles: Vec<VehicleProfile>) -> Self {
        Self {
            profiles,
            loaded: FnvHashMap::default(),
            active: None,
            bloom: BloomParams::default(),
        }
    }

    pub fn profiles(&self) -> &[VehicleProfile] {
        &self.profiles
    }

    pub fn profile(&self, index: usize) -> Option<&VehicleProfile> {
        self.profiles.get(index)
    }

    pub fn is_loaded(&self, index: usize) -> bool {
        self.loaded.contains_key(&index)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_profile(&self) -> Option<&VehicleProfile> {
        self.active.and_then(|i| self.profiles.get(i))
    }

    /// Active mesh, if a vehicle has been activated.
    pub fn active_mesh(&self) -> Option<MeshHandle> {
        self.active.and_then(|i| self.loaded.get(&i).copied())
    }

    /// Theme of the active vehicle, falling back to the first profile's
    /// theme before anything is active.
    pub fn theme(&self) -> ColorTheme {
        self.active_profile()
            .or_else(|| self.profiles.first())
            .map(|p| p.theme)
            .unwrap_or_default()
    }

    pub fn register_loaded(&mut self, index: usize, handle: MeshHandle) -> Result<LoadOutcome> {
        if index >= self.profiles.len() {
            return Err(SynthwaveError::UnknownVehicle { index });
        }
        log::info!("[presentation] vehicle {index} loaded as {:?}", handle);
        self.loaded.insert(index, handle);
        if index == PREFERRED_VEHICLE && self.active.is_none() {
            self.active = Some(index);
            return Ok(LoadOutcome::Activated);
        }
        Ok(LoadOutcome::Registered)
    }

    /// Make vehicle `index` active. Fails, leaving the selection as it was,
    /// when the index has no profile or its mesh has not finished loading.
    pub fn select_vehicle(&mut self, index: usize) -> Result<&VehicleProfile> {
        if index >= self.profiles.len() {
            return Err(SynthwaveError::UnknownVehicle { index });
        }
        if !self.loaded.contains_key(&index) {
            return Err(SynthwaveError::MissingAsset { index });
        }
        self.active = Some(index);
        log::info!("[presentation] selected {}", self.profiles[index].name);
        Ok(&self.profiles[index])
    }

    pub fn bloom(&self) -> BloomParams {
        self.bloom
    }

    /// Store new bloom values. Any finite value is accepted as-is; a
    /// non-finite one rejects the whole update.
    pub fn set_bloom_parameters(&mut self, strength: f32, radius: f32, threshold: f32) -> Result<()> {
        for (name, value) in [
            ("strength", strength),
            ("radius", radius),
            ("threshold", threshold),
        ] {
            if !value.is_finite() {
                return Err(SynthwaveError::NonFinite { name, value });
            }
        }
        self.bloom = BloomParams {
            strength,
            radius,
            threshold,
        };
        Ok(())
    }

    pub fn post_params(&self) -> PostParams {
        let profile = self.active_profile().or_else(|| self.profiles.first());
        PostParams {
            bloom: self.bloom,
            background_tint: profile.map(|p| p.background_tint).unwrap_or([0.0; 3]),
            particle_tint: profile.map(|p| p.particle_tint).unwrap_or([1.0; 3]),
            sun_color: profile.map(|p| p.sun_color).unwrap_or([1.0; 3]),
        }
    }
}
