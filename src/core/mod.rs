pub use synthwave_core::*;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
pub static SUN_WGSL: &str = include_str!("../../shaders/sun.wgsl");
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");
