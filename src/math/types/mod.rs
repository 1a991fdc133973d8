// src/math/types/mod.rs
pub mod bounds;
pub mod int_point;

pub use bounds::*;
pub use int_point::*;

// Re-export häufig verwendete externe Typen
pub use bevy::math::{Affine2, Vec2};

// Einheitliche Typen für das gesamte Modul
pub type Point2D = Vec2;
