// ./src/lib.rs
pub mod debug;
pub mod erosion;
pub mod input;
pub mod math;
pub mod plugin;
pub mod setup;

pub use erosion::{BrushConfig, ColliderPathSet, ErosionEngine, ErosionPipeline};
pub use plugin::{ScratchCollider, ScratchColliderPlugin};
