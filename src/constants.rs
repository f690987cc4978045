// Host-side wiring constants: element ids, analyser setup and loop tuning.

// DOM
pub const CANVAS_ID: &str = "app-canvas";
pub const AUDIO_ID: &str = "app-audio";
pub const EQUALIZER_ID: &str = "equalizer";
pub const TOGGLE_GRID_ID: &str = "toggle-grid";
pub const TOGGLE_FACES_ID: &str = "toggle-faces";
pub const TOGGLE_AUTODRIVE_ID: &str = "toggle-autodrive";
pub const BLOOM_STRENGTH_ID: &str = "bloom-strength";
pub const BLOOM_RADIUS_ID: &str = "bloom-radius";
pub const BLOOM_THRESHOLD_ID: &str = "bloom-threshold";
pub const VEHICLE_BUTTON_PREFIX: &str = "vehicle-"; // followed by the profile index

// Analyser
pub const FFT_SIZE: u32 = 256; // 128 byte bins per frame
pub const ANALYSER_SMOOTHING: f64 = 0.5;

// Frame loop
pub const BUDGET_WARN_INTERVAL: u64 = 120; // frames between over-budget warnings

// Renderer
pub const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
pub const BLOOM_TINT_MIX: f32 = 0.15; // how far bloom is pulled toward the profile's particle tint
pub const BLUR_TAP_SPACING: f32 = 1.5; // texels between blur taps at radius 1
