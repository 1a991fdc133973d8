// src/erosion/mod.rs
pub mod collider;
pub mod config;
pub mod engine;
pub mod pipeline;
pub mod stats;
pub mod stroke;

pub use collider::ColliderPathSet;
pub use config::BrushConfig;
pub use engine::{ErosionEngine, SkipReason, StampOutcome, StrokeReport};
pub use pipeline::{ErosionPipeline, TickReport};
pub use stats::{ErosionStats, ErosionSummary};
pub use stroke::StrokeSampler;
