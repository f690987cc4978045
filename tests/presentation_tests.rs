// Host-side tests for the vehicle catalog, selection and bloom parameters.

use glam::Vec3;
use std::f32::consts::PI;
use synthwave_core::{
    default_profiles, BloomParams, ColorTheme, LoadOutcome, MeshHandle, Presentation, SynthwaveError,
};

#[test]
fn default_catalog_has_three_vehicles() {
    let profiles = default_profiles();
    let names: Vec<_> = profiles.iter().map(|p| p.name).collect();
    assert_eq!(names, ["DeLorean", "Muscle", "Cyber"]);
    for p in &profiles {
        assert_eq!(p.rotation, Vec3::new(0.0, PI, 0.0));
        assert_eq!(p.initial_position, Vec3::new(0.0, 0.0, 25.0));
    }
    assert_eq!(profiles[0].scale, Vec3::splat(2.0));
    assert_eq!(profiles[1].scale, Vec3::ONE);
    assert_eq!(profiles[0].theme, ColorTheme::RETRO);
    assert_eq!(profiles[2].theme, ColorTheme::NEON);
}

#[test]
fn selecting_an_unloaded_vehicle_is_rejected() {
    let mut p = Presentation::new(default_profiles());
    assert_eq!(
        p.select_vehicle(1).err(),
        Some(SynthwaveError::MissingAsset { index: 1 })
    );
    assert_eq!(p.active_index(), None);
    assert_eq!(p.active_mesh(), None);
}

#[test]
fn unknown_index_is_rejected() {
    let mut p = Presentation::new(default_profiles());
    assert_eq!(
        p.select_vehicle(7).err(),
        Some(SynthwaveError::UnknownVehicle { index: 7 })
    );
    assert_eq!(
        p.register_loaded(3, MeshHandle(0)).err(),
        Some(SynthwaveError::UnknownVehicle { index: 3 })
    );
}

#[test]
fn preferred_vehicle_activates_on_load() {
    let mut p = Presentation::new(default_profiles());
    assert_eq!(p.register_loaded(1, MeshHandle(10)), Ok(LoadOutcome::Registered));
    assert_eq!(p.active_index(), None);
    assert_eq!(p.register_loaded(0, MeshHandle(11)), Ok(LoadOutcome::Activated));
    assert_eq!(p.active_index(), Some(0));
    assert_eq!(p.active_mesh(), Some(MeshHandle(11)));
}

#[test]
fn failed_switch_keeps_previous_selection() {
    let mut p = Presentation::new(default_profiles());
    p.register_loaded(0, MeshHandle(0)).ok();
    assert!(p.select_vehicle(2).is_err());
    assert_eq!(p.active_index(), Some(0));

    p.register_loaded(2, MeshHandle(2)).ok();
    let profile = p.select_vehicle(2).map(|v| v.name);
    assert_eq!(profile, Ok("Cyber"));
    assert_eq!(p.active_mesh(), Some(MeshHandle(2)));
    assert_eq!(p.theme(), ColorTheme::NEON);
}

#[test]
fn bloom_defaults_match_the_sliders() {
    let p = Presentation::new(default_profiles());
    assert_eq!(
        p.bloom(),
        BloomParams {
            strength: 1.0,
            radius: 1.0,
            threshold: 0.5
        }
    );
}

#[test]
fn bloom_accepts_any_finite_value() {
    let mut p = Presentation::new(default_profiles());
    assert!(p.set_bloom_parameters(3.5, -1.0, 0.0).is_ok());
    assert_eq!(p.bloom().strength, 3.5);
    assert_eq!(p.bloom().radius, -1.0);
}

#[test]
fn non_finite_bloom_is_rejected_without_partial_update() {
    let mut p = Presentation::new(default_profiles());
    let before = p.bloom();
    match p.set_bloom_parameters(2.0, f32::INFINITY, 0.1) {
        Err(SynthwaveError::NonFinite { name, .. }) => assert_eq!(name, "radius"),
        other => panic!("expected NonFinite, got {other:?}"),
    }
    assert!(p.set_bloom_parameters(f32::NAN, 1.0, 0.1).is_err());
    assert_eq!(p.bloom(), before);
}

#[test]
fn post_params_follow_the_active_profile() {
    let profiles = default_profiles();
    let mut p = Presentation::new(profiles.clone());
    // nothing active yet: first profile's look
    assert_eq!(p.post_params().background_tint, profiles[0].background_tint);
    p.register_loaded(0, MeshHandle(0)).ok();
    p.register_loaded(1, MeshHandle(1)).ok();
    p.select_vehicle(1).ok();
    let post = p.post_params();
    assert_eq!(post.background_tint, profiles[1].background_tint);
    assert_eq!(post.sun_color, profiles[1].sun_color);
    assert_eq!(post.particle_tint, profiles[1].particle_tint);
}

#[test]
fn errors_render_readable_messages() {
    let e = SynthwaveError::MissingAsset { index: 2 };
    assert_eq!(e.to_string(), "vehicle 2 has not finished loading");
}
