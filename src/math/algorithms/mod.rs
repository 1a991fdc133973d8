// src/math/algorithms/mod.rs
pub mod boolean;
pub mod quantize;

pub use boolean::{FillRule, GeoDifference, PolygonDifference};
pub use quantize::FixedPointQuantizer;
