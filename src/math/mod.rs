// src/math/mod.rs
pub mod algorithms;
pub mod error;
pub mod geometry;
pub mod types;
pub mod utils;

// Re-exports für einfache Verwendung
pub use error::{ErosionError, ErosionResult};
pub use types::*;
