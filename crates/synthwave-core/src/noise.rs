//! Seeded 2D simplex field shared by the terrain and the auto-drive wander.

use ::noise::{NoiseFn, Simplex};

/// Octave summation parameters.
///
/// With `frequency == 1.0` every octave samples the same point and the sum
/// reduces to the single-octave value times the amplitude series. The
/// terrain defaults depend on that.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OctaveParams {
    pub octaves: u32,
    pub amplitude: f32,
    pub gain: f32,
    pub frequency: f32,
}

impl Default for OctaveParams {
    fn default() -> Self {
        Self {
            octaves: 3,
            amplitude: 0.5,
            gain: 0.5,
            frequency: 1.0,
        }
    }
}

pub struct NoiseField {
    simplex: Simplex,
    seed: u32,
}

impl NoiseField {
    pub fn new(seed: u32) -> Self {
        Self {
            simplex: Simplex::new(seed),
            seed,
        }
    }

    /// Seed from the process RNG; stable for the lifetime of the field.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Continuous noise in \[-1, 1\].
    #[inline]
    pub fn noise2d(&self, x: f32, y: f32) -> f32 {
        let v = self.simplex.get([x as f64, y as f64]) as f32;
        if v.is_finite() {
            v.clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn octave_noise(&self, x: f32, y: f32, params: &OctaveParams) -> f32 {
        let mut value = 0.0;
        let mut amplitude = params.amplitude;
        let (mut px, mut py) = (x, y);
        for _ in 0..params.octaves {
            value += amplitude * self.noise2d(px, py);
            amplitude *= params.gain;
            px *= params.frequency;
            py *= params.frequency;
        }
        value
    }
}
