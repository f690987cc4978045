//! Platform-independent core of the synthwave visualizer.
//!
//! Everything here is deterministic given a noise seed and a byte spectrum;
//! the web frontend owns the audio graph, the DOM and the GPU.

pub mod camera;
pub mod color;
pub mod constants;
pub mod engine;
pub mod error;
pub mod noise;
pub mod presentation;
pub mod spectrum;
pub mod sun;
pub mod terrain;
pub mod vehicle;

pub use camera::{Camera, Viewport};
pub use color::{hsl_to_rgb, ColorTheme, Rgb};
pub use engine::{FrameView, Visualizer, VisualizerConfig};
pub use error::{Result, SynthwaveError};
pub use noise::{NoiseField, OctaveParams};
pub use presentation::{
    default_profiles, BloomParams, LoadOutcome, MeshHandle, PostParams, Presentation,
    VehicleProfile,
};
pub use spectrum::{extract_bands, BandKind, Bands, FrequencyBand};
pub use sun::SunState;
pub use terrain::{
    AdvanceReport, LayerVisibility, TerrainConfig, TerrainGrid, TerrainSynthesizer, TerrainVertex,
};
pub use vehicle::{DriveInput, DriveKey, DriveMode, DriveSnapshot, VehicleKinematics, VehicleTransform};
