// src/math/algorithms/quantize.rs

use crate::math::{
    error::*,
    geometry::path::Path,
    types::{IntPath, IntPoint},
    utils::constants::DEFAULT_FIXED_POINT_SCALE,
};
use bevy::math::Vec2;

/// Größter Gitterwert, der als f64 noch exakt darstellbar ist (2^53).
pub const MAX_LATTICE_COORD: f64 = 9_007_199_254_740_992.0;

/// Absolute Einrasttoleranz in Gitterschritten
const SNAP_TOLERANCE: f64 = 1e-3;

/// Bildet Gleitkomma-Koordinaten auf ein Ganzzahlgitter ab und zurück.
///
/// Vorwärts wird mit `scale` multipliziert und Richtung Null abgeschnitten,
/// rückwärts durch `scale` dividiert. Werte, die nur durch die f32-Rundung
/// knapp neben einem Gitterpunkt liegen, rasten auf diesen ein, damit
/// `quantize(dequantize(q)) == q` für jeden Gitterpunkt gilt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPointQuantizer {
    scale: f64,
}

impl FixedPointQuantizer {
    pub fn new(scale: f64) -> ErosionResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ErosionError::InvalidConfiguration {
                message: format!("fixed-point scale must be positive and finite, got {}", scale),
            });
        }
        Ok(Self { scale })
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Kantenlänge einer Gitterzelle in Welteinheiten
    pub fn resolution(&self) -> f32 {
        (1.0 / self.scale) as f32
    }

    pub fn quantize_value(&self, value: f32) -> ErosionResult<i64> {
        let scaled = f64::from(value) * self.scale;
        if !scaled.is_finite() || scaled.abs() > MAX_LATTICE_COORD {
            return Err(ErosionError::CoordinateOverflow {
                value,
                scale: self.scale,
            });
        }

        let nearest = scaled.round();
        let tolerance = SNAP_TOLERANCE.max(scaled.abs() * f64::from(f32::EPSILON) * 2.0);
        let lattice = if (scaled - nearest).abs() <= tolerance {
            nearest
        } else {
            scaled.trunc()
        };

        Ok(lattice as i64)
    }

    pub fn quantize_point(&self, point: Vec2) -> ErosionResult<IntPoint> {
        Ok(IntPoint::new(
            self.quantize_value(point.x)?,
            self.quantize_value(point.y)?,
        ))
    }

    pub fn quantize_path(&self, path: &Path) -> ErosionResult<IntPath> {
        path.vertices()
            .iter()
            .map(|v| self.quantize_point(*v))
            .collect()
    }

    pub fn quantize_paths(&self, paths: &[Path]) -> ErosionResult<Vec<IntPath>> {
        paths.iter().map(|p| self.quantize_path(p)).collect()
    }

    pub fn dequantize_point(&self, point: IntPoint) -> Vec2 {
        Vec2::new(
            (point.x as f64 / self.scale) as f32,
            (point.y as f64 / self.scale) as f32,
        )
    }

    /// Rückwandlung eines Gitter-Rings. Ringe, die dabei zu weniger als drei
    /// Punkten zusammenfallen, liefern `InsufficientPoints`.
    pub fn dequantize_path(&self, path: &[IntPoint]) -> ErosionResult<Path> {
        Path::new(path.iter().map(|p| self.dequantize_point(*p)).collect())
    }
}

impl Default for FixedPointQuantizer {
    fn default() -> Self {
        Self {
            scale: DEFAULT_FIXED_POINT_SCALE,
        }
    }
}
