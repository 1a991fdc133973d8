// src/math/geometry/circle.rs

use super::path::Path;
use crate::math::{error::*, utils::angles::deg_to_rad};
use bevy::math::Vec2;
use bevy::tasks::{ComputeTaskPool, TaskPool};

/// Ab dieser Eckenzahl wird die Vertex-Erzeugung auf den Compute-Pool verteilt.
pub const PARALLEL_VERTEX_THRESHOLD: usize = 1024;

/// Vertices pro Task beim verteilten Aufbau
const VERTICES_PER_TASK: usize = 256;

/// Baut reguläre N-Ecke als Näherung eines Kreises (der Pinsel-Stempel).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleApproximator {
    resolution: usize,
}

impl CircleApproximator {
    /// Erstellt einen Approximator mit `resolution` Ecken (mindestens 3).
    pub fn new(resolution: usize) -> ErosionResult<Self> {
        if resolution < 3 {
            return Err(ErosionError::InsufficientPoints {
                expected: 3,
                actual: resolution,
            });
        }
        Ok(Self { resolution })
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Erzeugt das N-Eck um `center`. Vertex k liegt bei k·(360°/N), gegen den Uhrzeigersinn.
    pub fn build(&self, center: Vec2, radius: f32) -> ErosionResult<Path> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ErosionError::DegenerateGeometry {
                reason: format!("brush radius must be positive, got {}", radius),
            });
        }

        let vertices = if self.resolution >= PARALLEL_VERTEX_THRESHOLD {
            self.vertices_parallel(center, radius)
        } else {
            (0..self.resolution)
                .map(|k| disc_vertex(center, radius, self.resolution, k))
                .collect()
        };

        Path::new(vertices)
    }

    /// Fork/Join über den Compute-Pool. Die Chunks kommen in Spawn-Reihenfolge zurück,
    /// der Ring ist vollständig, bevor der Aufrufer weiterarbeitet.
    fn vertices_parallel(&self, center: Vec2, radius: f32) -> Vec<Vec2> {
        let resolution = self.resolution;
        let pool = ComputeTaskPool::get_or_init(TaskPool::default);

        let chunks: Vec<Vec<Vec2>> = pool.scope(|scope| {
            let mut start = 0;
            while start < resolution {
                let end = (start + VERTICES_PER_TASK).min(resolution);
                scope.spawn(async move {
                    (start..end)
                        .map(|k| disc_vertex(center, radius, resolution, k))
                        .collect::<Vec<_>>()
                });
                start = end;
            }
        });

        chunks.into_iter().flatten().collect()
    }
}

impl Default for CircleApproximator {
    fn default() -> Self {
        Self {
            resolution: crate::math::utils::constants::DEFAULT_BRUSH_RESOLUTION,
        }
    }
}

fn disc_vertex(center: Vec2, radius: f32, resolution: usize, k: usize) -> Vec2 {
    let angle_step = 360.0 / resolution as f32;
    let angle = deg_to_rad(k as f32 * angle_step);
    center + Vec2::new(angle.cos(), angle.sin()) * radius
}
