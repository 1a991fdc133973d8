// src/erosion/config.rs
use crate::math::{
    algorithms::{FillRule, FixedPointQuantizer},
    error::*,
    geometry::CircleApproximator,
    utils::constants::{
        DEFAULT_BRUSH_RADIUS, DEFAULT_BRUSH_RESOLUTION, DEFAULT_FIXED_POINT_SCALE,
        DEFAULT_STAMP_SPACING,
    },
};
use bevy::log::warn;
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

/// Pinsel-Konfiguration; pro Sitzung unveränderlich.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    /// Radius in Welteinheiten
    pub radius: f32,
    /// Eckenzahl des Kreis-Polygons (mindestens 3)
    pub resolution: usize,
    /// Maximaler Stempelabstand als Vielfaches des Radius
    pub spacing: f32,
    /// Skalierung des Festkomma-Gitters
    pub scale: f64,
    pub fill_rule: FillRule,
}

impl BrushConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_fill_rule(mut self, fill_rule: FillRule) -> Self {
        self.fill_rule = fill_rule;
        self
    }

    /// Liest eine Konfiguration aus JSON; fehlende Felder erhalten Standardwerte.
    pub fn from_json_str(json: &str) -> ErosionResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> ErosionResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Ein Radius ≤ 0 ist kein Konfigurationsfehler: Stempel werden dann übersprungen.
    pub fn validate(&self) -> ErosionResult<()> {
        if self.resolution < 3 {
            return Err(ErosionError::InvalidConfiguration {
                message: format!("Brush resolution must be at least 3, got {}", self.resolution),
            });
        }

        if !self.spacing.is_finite() || self.spacing <= 0.0 {
            return Err(ErosionError::InvalidConfiguration {
                message: format!("Stamp spacing must be positive, got {}", self.spacing),
            });
        }

        if !self.radius.is_finite() {
            return Err(ErosionError::InvalidConfiguration {
                message: "Brush radius must be finite".to_string(),
            });
        }

        FixedPointQuantizer::new(self.scale)?;

        let lattice_cells_per_radius = f64::from(self.radius) * self.scale;
        if self.radius > 0.0 && lattice_cells_per_radius < 1.0 {
            return Err(ErosionError::InvalidConfiguration {
                message: format!(
                    "Scale {} cannot resolve a brush radius of {}",
                    self.scale, self.radius
                ),
            });
        }

        Ok(())
    }

    /// Korrigiert ungültige Werte auf Standardwerte und warnt dabei.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.resolution < 3 {
            warn!(
                "BrushConfig: resolution should be at least 3, using {}.",
                defaults.resolution
            );
            self.resolution = defaults.resolution;
        }
        if !self.spacing.is_finite() || self.spacing <= 0.0 {
            warn!(
                "BrushConfig: spacing should be positive, using {}.",
                defaults.spacing
            );
            self.spacing = defaults.spacing;
        }
        if self.spacing > 1.0 {
            warn!("BrushConfig: spacing above 1.0 leaves gaps between stamps.");
        }
        if !self.radius.is_finite() {
            warn!("BrushConfig: radius must be finite, using {}.", defaults.radius);
            self.radius = defaults.radius;
        }
        if FixedPointQuantizer::new(self.scale).is_err() {
            warn!("BrushConfig: scale must be positive, using {}.", defaults.scale);
            self.scale = defaults.scale;
        }
        self
    }

    pub fn circle(&self) -> ErosionResult<CircleApproximator> {
        CircleApproximator::new(self.resolution)
    }

    pub fn quantizer(&self) -> ErosionResult<FixedPointQuantizer> {
        FixedPointQuantizer::new(self.scale)
    }
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_BRUSH_RADIUS,
            resolution: DEFAULT_BRUSH_RESOLUTION,
            spacing: DEFAULT_STAMP_SPACING,
            scale: DEFAULT_FIXED_POINT_SCALE,
            fill_rule: FillRule::EvenOdd,
        }
    }
}
