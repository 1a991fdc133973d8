// src/math/geometry/mod.rs

pub mod circle;
pub mod path;

pub use self::circle::CircleApproximator;
pub use self::path::{Orientation, Path};
