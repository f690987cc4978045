// Host-side tests for the seeded noise field.

use synthwave_core::{NoiseField, OctaveParams};

#[test]
fn noise_is_bounded() {
    let field = NoiseField::new(7);
    for i in -40..40 {
        for j in -40..40 {
            let v = field.noise2d(i as f32 * 0.37, j as f32 * 0.53);
            assert!((-1.0..=1.0).contains(&v), "noise2d out of range: {v}");
        }
    }
}

#[test]
fn same_seed_is_deterministic() {
    let a = NoiseField::new(42);
    let b = NoiseField::new(42);
    for i in 0..100 {
        let (x, y) = (i as f32 * 0.15, i as f32 * 0.07);
        assert_eq!(a.noise2d(x, y), b.noise2d(x, y));
    }
    assert_eq!(a.seed(), 42);
}

#[test]
fn different_seeds_give_different_fields() {
    let a = NoiseField::new(1);
    let b = NoiseField::new(2);
    let differs = (0..100).any(|i| {
        let (x, y) = (i as f32 * 0.31 + 0.1, i as f32 * 0.17 + 0.2);
        a.noise2d(x, y) != b.noise2d(x, y)
    });
    assert!(differs);
}

#[test]
fn single_octave_is_half_the_base_noise() {
    let field = NoiseField::new(3);
    let params = OctaveParams {
        octaves: 1,
        ..OctaveParams::default()
    };
    for i in 0..50 {
        let (x, y) = (i as f32 * 0.15, (50 - i) as f32 * 0.15);
        let expected = 0.5 * field.noise2d(x, y);
        assert!((field.octave_noise(x, y, &params) - expected).abs() < 1e-6);
    }
}

#[test]
fn default_octaves_at_unit_frequency_sum_the_amplitude_series() {
    let field = NoiseField::new(9);
    let params = OctaveParams::default();
    for i in 0..50 {
        let (x, y) = (i as f32 * 0.15, i as f32 * 0.3);
        let expected = (0.5 + 0.25 + 0.125) * field.noise2d(x, y);
        assert!((field.octave_noise(x, y, &params) - expected).abs() < 1e-5);
    }
}

#[test]
fn zero_octaves_is_flat() {
    let field = NoiseField::new(11);
    let params = OctaveParams {
        octaves: 0,
        ..OctaveParams::default()
    };
    assert_eq!(field.octave_noise(1.3, 2.7, &params), 0.0);
}
