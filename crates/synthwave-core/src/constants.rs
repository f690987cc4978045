use glam::Vec3;

// Shared terrain/vehicle tuning constants used by the core and the web frontend.

// Spectrum
pub const BYTE_MAX: f32 = 255.0; // analyser bytes are 0..=255
pub const BAND_COUNT: usize = 7;

// Terrain patch
pub const TERRAIN_WIDTH: f32 = 100.0;
pub const TERRAIN_HEIGHT: f32 = 100.0;
pub const TERRAIN_SEGMENTS: u32 = 50; // per axis, (50+1)^2 vertices
pub const SCROLL_STEP: f32 = 0.1; // y decrement per frame
pub const WRAP_MIN_Y: f32 = -50.0; // rows below this jump back by WRAP_SPAN
pub const WRAP_SPAN: f32 = 100.0;
pub const HORIZON_Y: f32 = 47.0; // rows at/after this are flattened and blacked out

// Height synthesis
pub const NOISE_SCALE: f32 = 0.15;
pub const NOISE_TILE: u32 = 50; // lattice index period fed to the noise
pub const HEIGHT_BIAS: f32 = 1.0;
pub const HEIGHT_GAIN: f32 = 1.5;
pub const SPECTRAL_OFFSET: usize = 20; // first analyser bin coupled to the rows
pub const SPECTRAL_GAIN: f32 = 0.002;
pub const SIN_HEIGHT_FLOOR: f32 = 0.5;
pub const ROAD_PROPORTION: f32 = 1.0 / 12.0;
pub const ROAD_FALLOFF_RATE: f32 = 0.8;
pub const ROAD_FALLOFF_BIAS: f32 = 0.0; // added to the road exponential; 0 lets the centerline approach flat
pub const HEIGHT_SCALE: f32 = 5.0;

// Height -> color mapping
pub const COLOR_MIN_Z: f32 = 0.0;
pub const COLOR_MAX_Z: f32 = 10.0;
pub const COLOR_SATURATION: f32 = 1.0;
pub const COLOR_LIGHTNESS: f32 = 0.5;

// Vehicle kinematics
pub const DRIVE_SPEED: f32 = 0.2;
pub const DRIVE_BOUNDS_X: (f32, f32) = (-5.0, 5.0); // exclusive
pub const DRIVE_BOUNDS_Y: (f32, f32) = (0.0, 30.0);
pub const DRIVE_BOUNDS_Z: (f32, f32) = (-40.0, 40.0);
pub const AUTO_TIME_STEP: f32 = 0.005;
pub const AUTO_WANDER_AMPLITUDE: f32 = 3.0;
pub const AUTO_MID_GAIN: f32 = 35.0;
pub const AUTO_MID_BIAS: f32 = 10.0;
pub const AUTO_Z_LERP: f32 = 0.02;
pub const VEHICLE_START: Vec3 = Vec3::new(0.0, 0.0, 25.0);

// Sun disc
pub const SUN_SIZE: f32 = 50.0;
pub const SUN_POSITION: Vec3 = Vec3::new(0.0, 0.0, -250.0);
pub const SUN_TIME_STEP: f32 = 0.05;
pub const SUN_SCALE_GAIN: f32 = 0.1;
pub const SUN_PHASE_MAX: f32 = 10.0;

// Camera
pub const CAMERA_FOVY_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const CAMERA_FOLLOW_OFFSET: Vec3 = Vec3::new(0.0, 5.0, 10.0);

// Post-processing defaults (match the settings sliders)
pub const BLOOM_STRENGTH: f32 = 1.0;
pub const BLOOM_RADIUS: f32 = 1.0;
pub const BLOOM_THRESHOLD: f32 = 0.5;

// Frame budget for the whole tick (ms)
pub const FRAME_BUDGET_MS: f32 = 4.0;
