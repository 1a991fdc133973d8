// src/debug/visualization/mod.rs
pub mod collider;
pub mod svg;
