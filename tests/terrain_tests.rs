// Host-side tests for terrain synthesis: layout, scrolling, wraparound,
// horizon masking, road carving and layer repaints.

use synthwave_core::color::BLACK;
use synthwave_core::{ColorTheme, LayerVisibility, NoiseField, TerrainConfig, TerrainSynthesizer};

fn synth() -> TerrainSynthesizer {
    TerrainSynthesizer::new(TerrainConfig::default())
}

fn pseudo_spectrum(seed: u32, len: usize) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 24) as u8
        })
        .collect()
}

#[test]
fn grid_has_expected_topology() {
    let t = synth();
    let grid = t.grid();
    assert_eq!(grid.columns(), 51);
    assert_eq!(grid.rows(), 51);
    assert_eq!(grid.len(), 51 * 51);
    assert_eq!(grid.triangle_indices().len(), 50 * 50 * 6);
    // 50 horizontal edges per row, 50 vertical edges per column
    assert_eq!(grid.line_indices().len(), 2 * (50 * 51 + 51 * 50));
    assert!(grid
        .triangle_indices()
        .iter()
        .chain(grid.line_indices())
        .all(|&i| (i as usize) < grid.len()));
}

#[test]
fn lattice_spans_the_patch_row_major() {
    let t = synth();
    let grid = t.grid();
    assert_eq!(grid.vertex(0, 0).position, [-50.0, 50.0, 0.0]);
    assert_eq!(grid.vertex(50, 50).position, [50.0, -50.0, 0.0]);
    assert_eq!(grid.vertex(1, 0).position[0], -48.0);
    assert_eq!(grid.vertex(0, 1).position[1], 48.0);
    assert_eq!(grid.index(3, 2), 3 + 2 * 51);
}

#[test]
fn advance_scrolls_and_wraps_the_near_row() {
    let mut t = synth();
    let noise = NoiseField::new(1);
    let before: Vec<f32> = t.grid().vertices().iter().map(|v| v.position[1]).collect();
    let report = t.advance(&[128u8; 128], &noise, &ColorTheme::RETRO);

    // only the row sitting on the near edge falls past it
    assert_eq!(report.wrapped.len(), 51);
    for (i, v) in t.grid().vertices().iter().enumerate() {
        let moved = before[i] - 0.1;
        let expected = if report.wrapped.contains(&(i as u32)) {
            moved + 100.0
        } else {
            moved
        };
        assert!(
            (v.position[1] - expected).abs() < 1e-4,
            "vertex {i}: {} != {expected}",
            v.position[1]
        );
    }
    assert_eq!(t.frames(), 1);
}

#[test]
fn wrapped_vertices_land_on_the_black_horizon() {
    let mut t = synth();
    let noise = NoiseField::new(2);
    let report = t.advance(&[255u8; 128], &noise, &ColorTheme::RETRO);
    for &i in &report.wrapped {
        let v = &t.grid().vertices()[i as usize];
        assert!(v.position[1] >= 47.0);
        assert_eq!(v.position[2], 0.0);
        assert_eq!(v.color, BLACK);
    }
}

#[test]
fn horizon_rows_are_flat_and_black_every_frame() {
    let mut t = synth();
    let noise = NoiseField::new(3);
    for frame in 0..300 {
        t.advance(&pseudo_spectrum(frame, 128), &noise, &ColorTheme::RETRO);
        for v in t.grid().vertices() {
            if v.position[1] >= 47.0 {
                assert_eq!(v.position[2], 0.0);
                assert_eq!(v.color, BLACK);
            }
        }
    }
}

#[test]
fn topology_never_changes() {
    let mut t = synth();
    let noise = NoiseField::new(4);
    let tris = t.grid().triangle_indices().to_vec();
    let lines = t.grid().line_indices().to_vec();
    let xs: Vec<f32> = t.grid().vertices().iter().map(|v| v.position[0]).collect();
    for frame in 0..250 {
        t.advance(&pseudo_spectrum(frame, 64), &noise, &ColorTheme::NEON);
    }
    assert_eq!(t.grid().triangle_indices(), &tris[..]);
    assert_eq!(t.grid().line_indices(), &lines[..]);
    let xs_after: Vec<f32> = t.grid().vertices().iter().map(|v| v.position[0]).collect();
    assert_eq!(xs, xs_after);
}

#[test]
fn rows_stay_inside_the_patch_and_keep_their_spacing() {
    let mut t = synth();
    let noise = NoiseField::new(5);
    for frame in 0..777 {
        t.advance(&pseudo_spectrum(frame, 128), &noise, &ColorTheme::RETRO);
    }
    let grid = t.grid();
    let mut ys: Vec<f32> = (0..grid.rows()).map(|r| grid.vertex(0, r).position[1]).collect();
    ys.sort_by(|a, b| a.total_cmp(b));
    for y in &ys {
        assert!((-50.0..50.0).contains(y), "row escaped the patch: {y}");
    }
    for pair in ys.windows(2) {
        let gap = pair[1] - pair[0];
        // the first and last rows start 100 apart and therefore coincide
        assert!(gap.abs() < 1e-2 || (gap - 2.0).abs() < 1e-2, "uneven gap {gap}");
    }
}

#[test]
fn heights_stay_finite_for_any_spectrum() {
    let mut t = synth();
    let noise = NoiseField::new(6);
    for frame in 0..200 {
        let len = (frame as usize * 7) % 140;
        t.advance(&pseudo_spectrum(frame, len), &noise, &ColorTheme::SUNSET);
        for v in t.grid().vertices() {
            assert!(v.position.iter().all(|c| c.is_finite()));
            assert!(v.color.iter().all(|c| c.is_finite() && (0.0..=1.0).contains(c)));
        }
    }
}

#[test]
fn road_is_carved_but_never_flat() {
    let cfg = TerrainConfig::default();
    let center = cfg.road_factor(0.0);
    let expected = 0.5 * (0.8f32 * (0.0 - 100.0 / 12.0)).exp();
    assert!(center > 0.0);
    assert!((center - expected).abs() < 1e-6);
    assert!(center < cfg.road_factor(4.0));
    assert!(cfg.road_factor(4.0) < cfg.road_factor(8.0));
    // outside the road only the sine envelope applies
    assert!((cfg.road_factor(25.0) - (std::f32::consts::FRAC_PI_4).sin()).abs() < 1e-6);
    assert!((cfg.road_factor(10.0) - 0.5).abs() < 1e-6);
}

#[test]
fn spectrum_lifts_rows_it_is_coupled_to() {
    let t = synth();
    let noise = NoiseField::new(7);
    let x = 25.0;
    let quiet = t.synthesize_height(12, 10, x, &[0u8; 128], &noise);
    let loud = t.synthesize_height(12, 10, x, &[255u8; 128], &noise);
    // two coupled bins of 255, times 0.002, through the road and height scales
    let lift = 2.0 * 255.0 * 0.002 * t.config().road_factor(x) * 5.0;
    assert!(((loud - quiet) - lift).abs() < 1e-4, "lift was {}", loud - quiet);
}

#[test]
fn short_spectra_read_missing_bins_as_silence() {
    let t = synth();
    let noise = NoiseField::new(8);
    let short = t.synthesize_height(3, 4, 30.0, &[255u8; 10], &noise);
    let silent = t.synthesize_height(3, 4, 30.0, &[], &noise);
    assert_eq!(short, silent);
}

#[test]
fn layer_toggle_repaints_from_current_heights() {
    let mut t = synth();
    let noise = NoiseField::new(9);
    for frame in 0..20 {
        t.advance(&pseudo_spectrum(frame, 128), &noise, &ColorTheme::RETRO);
    }
    let same = t.set_layers(LayerVisibility::default(), &ColorTheme::NEON);
    assert!(!same, "unchanged layers must not repaint");

    let changed = t.set_layers(
        LayerVisibility {
            grid: false,
            faces: true,
        },
        &ColorTheme::NEON,
    );
    assert!(changed);
    assert!(!t.layers().grid);
    for v in t.grid().vertices() {
        let expected = if v.position[1] >= 47.0 {
            BLACK
        } else {
            ColorTheme::NEON.color_for_height(v.position[2])
        };
        assert_eq!(v.color, expected);
    }
}
