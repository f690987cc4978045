// Host-side tests for vehicle kinematics: key mapping, manual bounds and
// the audio-driven autopilot.

use glam::Vec3;
use synthwave_core::vehicle::within_drive_bounds;
use synthwave_core::{
    default_profiles, DriveInput, DriveKey, DriveMode, DriveSnapshot, NoiseField, VehicleKinematics,
    VehicleProfile,
};

fn kinematics_at(position: Vec3) -> VehicleKinematics {
    let mut k = VehicleKinematics::new(&default_profiles()[0]);
    k.position = position;
    k.set_mode(DriveMode::Manual);
    k
}

fn held(keys: &[DriveKey]) -> DriveSnapshot {
    let input = DriveInput::new();
    for &key in keys {
        input.press(key);
    }
    input.snapshot()
}

#[test]
fn drive_keys_map_case_insensitively() {
    assert_eq!(DriveKey::from_key("w"), Some(DriveKey::W));
    assert_eq!(DriveKey::from_key("W"), Some(DriveKey::W));
    assert_eq!(DriveKey::from_key("q"), Some(DriveKey::Q));
    assert_eq!(DriveKey::from_key("E"), Some(DriveKey::E));
    assert_eq!(DriveKey::from_key("x"), None);
    assert_eq!(DriveKey::from_key("ArrowUp"), None);
    assert_eq!(DriveKey::from_key(""), None);
}

#[test]
fn input_flags_press_release_and_clear() {
    let input = DriveInput::new();
    input.press(DriveKey::W);
    input.press(DriveKey::D);
    assert!(input.is_held(DriveKey::W));
    assert_eq!(input.snapshot().axes(), (1.0, 1.0, 0.0));
    input.release(DriveKey::W);
    assert!(!input.is_held(DriveKey::W));
    input.press(DriveKey::E);
    assert_eq!(input.snapshot().axes(), (0.0, 1.0, -1.0));
    input.release_all();
    assert_eq!(input.snapshot(), DriveSnapshot::default());
}

#[test]
fn opposing_keys_cancel() {
    assert_eq!(held(&[DriveKey::W, DriveKey::S, DriveKey::A, DriveKey::D]).axes(), (0.0, 0.0, 0.0));
}

#[test]
fn manual_move_steps_each_axis_by_speed() {
    let mut k = kinematics_at(Vec3::new(0.0, 15.0, 0.0));
    assert!(k.manual_drive(held(&[DriveKey::W, DriveKey::D, DriveKey::Q])));
    assert!((k.position - Vec3::new(0.2, 15.2, -0.2)).length() < 1e-6);
}

#[test]
fn move_past_side_bound_is_rejected_whole() {
    let start = Vec3::new(4.9, 15.0, 0.0);
    let mut k = kinematics_at(start);
    assert!(!k.manual_drive(held(&[DriveKey::D])));
    assert_eq!(k.position, start);

    // the forward component is dropped too, not just the x part
    assert!(!k.manual_drive(held(&[DriveKey::D, DriveKey::W])));
    assert_eq!(k.position, start);
}

#[test]
fn bounds_are_exclusive() {
    assert!(within_drive_bounds(Vec3::new(4.99, 0.01, 39.99)));
    assert!(!within_drive_bounds(Vec3::new(5.0, 10.0, 0.0)));
    assert!(!within_drive_bounds(Vec3::new(0.0, 0.0, 0.0)));
    assert!(!within_drive_bounds(Vec3::new(0.0, 30.0, 0.0)));
    assert!(!within_drive_bounds(Vec3::new(0.0, 10.0, -40.0)));
}

#[test]
fn manual_update_reads_shared_input() {
    let mut k = kinematics_at(Vec3::new(0.0, 10.0, 0.0));
    let input = DriveInput::new();
    input.press(DriveKey::S);
    k.update(&Default::default(), &NoiseField::new(1), &input);
    assert!((k.position.z - 0.2).abs() < 1e-6);
    assert_eq!(k.drive_time(), 0.0, "manual drive must not advance the autopilot clock");
}

#[test]
fn autopilot_lerps_toward_mid_band_target() {
    let profile = VehicleProfile {
        initial_position: Vec3::new(0.0, 0.0, 10.0),
        ..VehicleProfile::default()
    };
    let mut k = VehicleKinematics::new(&profile);
    k.position.z = 0.0;
    let noise = NoiseField::new(5);
    // mid = 0: target = 10 - (0 * 35 - 10) = 20, one 2% step from 0
    k.auto_drive(0.0, &noise);
    assert!((k.position.z - 0.4).abs() < 1e-6);
    assert!((k.drive_time() - 0.005).abs() < 1e-7);
    assert!(k.position.x.abs() <= 3.0);
}

#[test]
fn loud_mids_pull_the_vehicle_forward() {
    let mut k = VehicleKinematics::new(&default_profiles()[0]);
    let noise = NoiseField::new(6);
    for _ in 0..500 {
        k.auto_drive(1.0, &noise);
    }
    // target = 25 - (35 - 10) = 0
    assert!(k.position.z < 1.0, "z = {}", k.position.z);
    assert_eq!(k.position.y, 0.0);
}

#[test]
fn wander_stays_within_amplitude() {
    let mut k = VehicleKinematics::new(&default_profiles()[0]);
    let noise = NoiseField::new(7);
    for _ in 0..2000 {
        k.auto_drive(0.3, &noise);
        assert!(k.position.x.abs() <= 3.0 + 1e-6);
    }
}

#[test]
fn retarget_keeps_position_and_takes_pose() {
    let profiles = default_profiles();
    let mut k = VehicleKinematics::new(&profiles[0]);
    k.position = Vec3::new(1.0, 2.0, 3.0);
    k.retarget(&profiles[1]);
    assert_eq!(k.position, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(k.scale, profiles[1].scale);
    assert_eq!(k.rotation, profiles[1].rotation);
    assert_eq!(k.transform().position, k.camera_target());
}

#[test]
fn model_matrix_places_scaled_vehicle() {
    let k = VehicleKinematics::new(&default_profiles()[0]);
    let m = k.transform().model_matrix();
    let origin = m.transform_point3(Vec3::ZERO);
    assert!((origin - Vec3::new(0.0, 0.0, 25.0)).length() < 1e-5);
    // yawed half a turn, scaled by 2: local +z points back toward -z
    let nose = m.transform_point3(Vec3::Z);
    assert!((nose - Vec3::new(0.0, 0.0, 23.0)).length() < 1e-4);
}
