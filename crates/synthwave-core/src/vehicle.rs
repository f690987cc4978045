//! Vehicle kinematics: audio-driven autopilot or six-key manual drive.

use crate::color::lerp;
use crate::constants::*;
use crate::noise::NoiseField;
use crate::presentation::VehicleProfile;
use crate::spectrum::Bands;
use glam::{EulerRot, Mat4, Quat, Vec3};
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DriveKey {
    Q,
    E,
    W,
    A,
    S,
    D,
}

impl DriveKey {
    pub const ALL: [DriveKey; 6] = [
        DriveKey::Q,
        DriveKey::E,
        DriveKey::W,
        DriveKey::A,
        DriveKey::S,
        DriveKey::D,
    ];

    #[inline]
    pub fn from_key(key: &str) -> Option<DriveKey> {
        match key {
            "q" | "Q" => Some(DriveKey::Q),
            "e" | "E" => Some(DriveKey::E),
            "w" | "W" => Some(DriveKey::W),
            "a" | "A" => Some(DriveKey::A),
            "s" | "S" => Some(DriveKey::S),
            "d" | "D" => Some(DriveKey::D),
            _ => None,
        }
    }

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

/// Held state of the six drive keys.
///
/// Written by key event handlers, read once per tick by the kinematics.
/// Each flag is an independent single-bit toggle.
#[derive(Debug, Default)]
pub struct DriveInput {
    held: [AtomicBool; 6],
}

impl DriveInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, key: DriveKey, held: bool) {
        self.held[key.slot()].store(held, Ordering::Relaxed);
    }

    pub fn press(&self, key: DriveKey) {
        self.set(key, true);
    }

    pub fn release(&self, key: DriveKey) {
        self.set(key, false);
    }

    pub fn is_held(&self, key: DriveKey) -> bool {
        self.held[key.slot()].load(Ordering::Relaxed)
    }

    pub fn release_all(&self) {
        for key in DriveKey::ALL {
            self.release(key);
        }
    }

    pub fn snapshot(&self) -> DriveSnapshot {
        DriveSnapshot {
            q: self.is_held(DriveKey::Q),
            e: self.is_held(DriveKey::E),
            w: self.is_held(DriveKey::W),
            a: self.is_held(DriveKey::A),
            s: self.is_held(DriveKey::S),
            d: self.is_held(DriveKey::D),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriveSnapshot {
    pub q: bool,
    pub e: bool,
    pub w: bool,
    pub a: bool,
    pub s: bool,
    pub d: bool,
}

impl DriveSnapshot {
    /// `(forward, sideways, vertical)`, each in {-1, 0, 1}.
    pub fn axes(&self) -> (f32, f32, f32) {
        let unit = |b: bool| if b { 1.0 } else { 0.0 };
        (
            unit(self.w) - unit(self.s),
            unit(self.d) - unit(self.a),
            unit(self.q) - unit(self.e),
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DriveMode {
    #[default]
    Auto,
    Manual,
}

/// Pose handed to the renderer each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VehicleTransform {
    pub position: Vec3,
    /// Euler angles (XYZ order), radians.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl VehicleTransform {
    pub fn model_matrix(&self) -> Mat4 {
        let q = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, q, self.position)
    }
}

#[derive(Clone, Debug)]
pub struct VehicleKinematics {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    pub initial_position: Vec3,
    mode: DriveMode,
    drive_time: f32,
}

impl VehicleKinematics {
    pub fn new(profile: &VehicleProfile) -> Self {
        Self {
            position: profile.initial_position,
            rotation: profile.rotation,
            scale: profile.scale,
            initial_position: profile.initial_position,
            mode: DriveMode::Auto,
            drive_time: 0.0,
        }
    }

    pub fn mode(&self) -> DriveMode {
        self.mode
    }

    /// Switch drive mode. Picked up on the next `update`; no blending.
    pub fn set_mode(&mut self, mode: DriveMode) {
        if mode != self.mode {
            log::info!("[vehicle] drive mode {:?}", mode);
            self.mode = mode;
        }
    }

    pub fn drive_time(&self) -> f32 {
        self.drive_time
    }

    /// Take over a newly selected model's static pose, keeping the current
    /// position so the switch does not teleport the vehicle.
    pub fn retarget(&mut self, profile: &VehicleProfile) {
        self.rotation = profile.rotation;
        self.scale = profile.scale;
        self.initial_position = profile.initial_position;
    }

    pub fn update(&mut self, bands: &Bands, noise: &NoiseField, input: &DriveInput) {
        match self.mode {
            DriveMode::Auto => self.auto_drive(bands.mid(), noise),
            DriveMode::Manual => {
                self.manual_drive(input.snapshot());
            }
        }
    }

    /// Lateral noise wander plus a smoothed approach toward a mid-band
    /// driven depth. `y` is left alone.
    pub fn auto_drive(&mut self, mid: f32, noise: &NoiseField) {
        let t = self.drive_time;
        self.position.x = noise.noise2d(t, t) * AUTO_WANDER_AMPLITUDE;
        let target_z = self.initial_position.z - (mid * AUTO_MID_GAIN - AUTO_MID_BIAS);
        self.position.z = lerp(self.position.z, target_z, AUTO_Z_LERP);
        self.drive_time += AUTO_TIME_STEP;
    }

    /// Move by one speed step per held axis. The move is all-or-nothing:
    /// if the proposed point leaves the box on any axis nothing moves.
    /// Returns whether the move was applied.
    pub fn manual_drive(&mut self, keys: DriveSnapshot) -> bool {
        let (forward, sideways, vertical) = keys.axes();
        let proposed = Vec3::new(
            self.position.x + sideways * DRIVE_SPEED,
            self.position.y + vertical * DRIVE_SPEED,
            self.position.z - forward * DRIVE_SPEED,
        );
        if within_drive_bounds(proposed) {
            self.position = proposed;
            true
        } else {
            false
        }
    }

    pub fn transform(&self) -> VehicleTransform {
        VehicleTransform {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }

    /// Point the camera collaborator should follow.
    pub fn camera_target(&self) -> Vec3 {
        self.position
    }
}

#[inline]
fn open_interval(v: f32, (lo, hi): (f32, f32)) -> bool {
    v > lo && v < hi
}

#[inline]
pub fn within_drive_bounds(p: Vec3) -> bool {
    open_interval(p.x, DRIVE_BOUNDS_X)
        && open_interval(p.y, DRIVE_BOUNDS_Y)
        && open_interval(p.z, DRIVE_BOUNDS_Z)
}
