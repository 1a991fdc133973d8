// src/math/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ErosionError {
    #[error("Insufficient points for operation: expected at least {expected}, got {actual}")]
    InsufficientPoints { expected: usize, actual: usize },

    #[error("Degenerate geometry: {reason}")]
    DegenerateGeometry { reason: String },

    #[error("Polygon difference primitive failed: {reason}")]
    PrimitiveFailure { reason: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Coordinate {value} cannot be represented on a lattice with scale {scale}")]
    CoordinateOverflow { value: f32, scale: f64 },

    #[error("Configuration could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ErosionError {
    /// Fehler, die ein Stempel als No-op überspringt statt ihn abzubrechen.
    pub fn is_degenerate(&self) -> bool {
        matches!(
            self,
            ErosionError::DegenerateGeometry { .. } | ErosionError::InsufficientPoints { .. }
        )
    }
}

pub type ErosionResult<T> = Result<T, ErosionError>;
