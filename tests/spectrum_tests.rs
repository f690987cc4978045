// Host-side tests for band extraction.

use synthwave_core::spectrum::{average_energy, bin_at};
use synthwave_core::{extract_bands, BandKind, FrequencyBand};

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn saturated_spectrum_gives_unit_bands() {
    let bands = extract_bands(&[255u8; 128]);
    for band in bands.iter() {
        assert!(close(band.value, 1.0), "{} = {}", band.label(), band.value);
    }
}

#[test]
fn silence_and_empty_buffers_give_zero_bands() {
    for energies in [&[0u8; 128][..], &[][..]] {
        let bands = extract_bands(energies);
        assert!(bands.iter().all(|b| b.value == 0.0));
    }
}

#[test]
fn mid_band_is_mean_of_bins_9_to_14() {
    let mut energies = [0u8; 64];
    for e in &mut energies[9..=14] {
        *e = 102;
    }
    let bands = extract_bands(&energies);
    assert!(close(bands.mid(), 0.4));
    assert!(close(bands.value(BandKind::LowMid), 0.0));
    assert!(close(bands.value(BandKind::UpperMid), 0.0));
}

#[test]
fn short_buffer_counts_missing_bins_as_silence() {
    // bins 5 and 6 present, 7 and 8 missing
    let energies = [255u8; 7];
    let bands = extract_bands(&energies);
    assert!(close(bands.value(BandKind::Bass), 1.0));
    assert!(close(bands.value(BandKind::LowMid), 0.5));
    assert!(close(bands.high_treble(), 0.0));
    assert!(close(average_energy(&energies, 5, 8), 0.5));
}

#[test]
fn truncated_band_is_dimmed_not_renormalized() {
    // Treble is bins 20..=24; only bin 20 exists
    let bands = extract_bands(&[255u8; 21]);
    assert!(close(bands.value(BandKind::Treble), 0.2));
    assert!(close(bands.high_treble(), 0.0));
}

#[test]
fn band_ranges_are_contiguous_and_ascending() {
    let mut next = 0;
    for kind in BandKind::ALL {
        let (lo, hi) = kind.range();
        assert_eq!(lo, next, "{} does not start where the previous band ended", kind.label());
        assert!(hi >= lo);
        next = hi + 1;
    }
    assert_eq!(next, 32);
}

#[test]
fn labels_follow_band_order() {
    let labels: Vec<_> = extract_bands(&[]).iter().map(|b| b.label()).collect();
    assert_eq!(
        labels,
        ["Sub-Bass", "Bass", "Low Mid", "Mid", "Upper Mid", "Treble", "High Treble"]
    );
}

#[test]
fn display_uses_two_decimals() {
    let band = FrequencyBand {
        kind: BandKind::Mid,
        value: 0.456,
    };
    assert_eq!(band.to_string(), "Mid 0.46");
}

#[test]
fn bin_reads_raw_bytes_and_out_of_range_as_zero() {
    let energies = [51u8, 255];
    assert_eq!(bin_at(&energies, 0), 51.0);
    assert_eq!(bin_at(&energies, 1), 255.0);
    assert_eq!(bin_at(&energies, 2), 0.0);
}

// Property: every band stays in [0, 1] for arbitrary byte spectra.
#[test]
fn bands_stay_normalized_for_arbitrary_spectra() {
    let mut state: u32 = 0x1234_5678;
    for len in [0usize, 3, 17, 31, 32, 128] {
        let energies: Vec<u8> = (0..len)
            .map(|_| {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                (state >> 24) as u8
            })
            .collect();
        for band in extract_bands(&energies).iter() {
            assert!(
                (0.0..=1.0).contains(&band.value),
                "{} out of range for len {len}: {}",
                band.label(),
                band.value
            );
        }
    }
}
