use thiserror::Error;

/// Conditions the core reports to its callers.
///
/// Short audio buffers and out-of-bounds manual moves are routine and are
/// handled where they occur; they never show up here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthwaveError {
    #[error("vehicle {index} has not finished loading")]
    MissingAsset { index: usize },
    #[error("no vehicle profile at index {index}")]
    UnknownVehicle { index: usize },
    #[error("{name} must be a finite number, got {value}")]
    NonFinite { name: &'static str, value: f32 },
}

pub type Result<T> = std::result::Result<T, SynthwaveError>;
