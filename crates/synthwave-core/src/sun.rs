//! The banded sun disc sitting behind the horizon.

use crate::constants::{SUN_PHASE_MAX, SUN_POSITION, SUN_SCALE_GAIN, SUN_SIZE, SUN_TIME_STEP};
use crate::spectrum::Bands;
use glam::{Mat4, Vec3};
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunState {
    /// Shader clock, advanced a fixed step per tick.
    pub time: f32,
    /// High-treble energy of the latest tick, in \[0, 1\].
    pub intensity: f32,
    pub scale: f32,
    /// Per-session offset for the scanline scroll.
    pub phase: f32,
    pub position: Vec3,
    pub size: f32,
}

impl SunState {
    pub fn new() -> Self {
        Self::with_phase(rand::thread_rng().gen_range(0.0..SUN_PHASE_MAX))
    }

    pub fn with_phase(phase: f32) -> Self {
        Self {
            time: 0.0,
            intensity: 0.0,
            scale: 1.0,
            phase,
            position: SUN_POSITION,
            size: SUN_SIZE,
        }
    }

    pub fn update(&mut self, bands: &Bands) {
        let treble = bands.high_treble();
        self.time += SUN_TIME_STEP;
        self.intensity = treble;
        self.scale = 1.0 + treble * SUN_SCALE_GAIN;
    }

    /// Quad transform: unit square scaled to the disc size and pulse.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_scale(Vec3::new(self.size * self.scale, self.size * self.scale, 1.0))
    }
}

impl Default for SunState {
    fn default() -> Self {
        Self::new()
    }
}
