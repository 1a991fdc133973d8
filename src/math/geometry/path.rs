// src/math/geometry/path.rs

use crate::math::{
    error::*,
    types::{Affine2, Bounds2D},
    utils::{constants::EPSILON, simple_geometry::ring_double_area},
};
use bevy::math::Vec2;
use std::fmt;

/// Gibt die Orientierung eines Pfades an.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
    Collinear, // Alle Punkte liegen auf einer Linie
}

/// Geschlossener Polygonrand. Der letzte Vertex ist implizit mit dem ersten verbunden
/// und wird nicht doppelt gespeichert.
///
/// Die Windungsrichtung ist bedeutsam: Außenränder laufen gegen den Uhrzeigersinn,
/// Löcher im Uhrzeigersinn.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    vertices: Vec<Vec2>,
}

impl Path {
    /// Erstellt einen Pfad aus mindestens drei Vertices.
    /// Ein explizit wiederholter Startpunkt am Ende wird entfernt.
    pub fn new(mut vertices: Vec<Vec2>) -> ErosionResult<Self> {
        if vertices.len() > 1 {
            if let (Some(first), Some(last)) = (vertices.first(), vertices.last()) {
                if first.distance_squared(*last) < EPSILON * EPSILON {
                    vertices.pop();
                }
            }
        }

        if vertices.len() < 3 {
            return Err(ErosionError::InsufficientPoints {
                expected: 3,
                actual: vertices.len(),
            });
        }

        if vertices.iter().any(|v| !v.is_finite()) {
            return Err(ErosionError::DegenerateGeometry {
                reason: "path contains non-finite coordinates".to_string(),
            });
        }

        Ok(Self { vertices })
    }

    /// Achsenparalleles Rechteck, gegen den Uhrzeigersinn.
    pub fn rectangle(min: Vec2, max: Vec2) -> ErosionResult<Self> {
        let bounds = Bounds2D::new(min, max)?;
        Self::new(vec![
            bounds.min,
            Vec2::new(bounds.max.x, bounds.min.y),
            bounds.max,
            Vec2::new(bounds.min.x, bounds.max.y),
        ])
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Ein gültiger Pfad ist nie leer; vorhanden für Clippy.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vorzeichenbehaftete Fläche (positiv bei Gegen-Uhrzeigersinn).
    pub fn signed_area(&self) -> f32 {
        (ring_double_area(&self.vertices) * 0.5) as f32
    }

    /// Betrag der Fläche.
    pub fn area(&self) -> f32 {
        self.signed_area().abs()
    }

    pub fn orientation(&self) -> Orientation {
        let double_area = ring_double_area(&self.vertices);
        if double_area.abs() < f64::from(EPSILON) {
            Orientation::Collinear
        } else if double_area > 0.0 {
            Orientation::CounterClockwise
        } else {
            Orientation::Clockwise
        }
    }

    /// Kehrt die Windungsrichtung um.
    pub fn reversed(&self) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Self { vertices }
    }

    /// Bringt den Pfad in die gewünschte Windungsrichtung.
    /// Kollineare Pfade bleiben unverändert.
    pub fn oriented(self, target: Orientation) -> Self {
        match (self.orientation(), target) {
            (Orientation::Clockwise, Orientation::CounterClockwise)
            | (Orientation::CounterClockwise, Orientation::Clockwise) => self.reversed(),
            _ => self,
        }
    }

    pub fn bounds(&self) -> Bounds2D {
        Bounds2D::from_points_iter(self.vertices.iter().copied()).unwrap_or_else(Bounds2D::empty)
    }

    /// Punkt-in-Polygon nach der Crossing-Number-Regel.
    /// Punkte exakt auf dem Rand gelten als nicht eindeutig.
    pub fn contains_point(&self, point: Vec2) -> bool {
        let n = self.vertices.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let vi = self.vertices[i];
            let vj = self.vertices[j];
            if (vi.y > point.y) != (vj.y > point.y) {
                let x_cross = (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x;
                if point.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Wendet eine affine Abbildung auf alle Vertices an.
    /// Spiegelnde Abbildungen kehren die Windungsrichtung um; sie wird wiederhergestellt.
    pub fn transformed(&self, transform: &Affine2) -> Self {
        let original = self.orientation();
        let vertices = self
            .vertices
            .iter()
            .map(|v| transform.transform_point2(*v))
            .collect();
        Self { vertices }.oriented(original)
    }
}

impl From<Path> for Vec<Vec2> {
    fn from(path: Path) -> Self {
        path.vertices
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Path({} vertices, area {:.4})",
            self.vertices.len(),
            self.signed_area()
        )
    }
}
