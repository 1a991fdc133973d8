// src/erosion/collider.rs

use crate::math::{
    error::*,
    geometry::{Orientation, Path},
    types::Bounds2D,
};
use bevy::math::Vec2;

/// Die maßgebliche Mehrpfad-Form eines Colliders.
///
/// Wird nur komplett ersetzt, nie inkrementell verändert. Die Pfadzahl darf
/// wachsen, schrumpfen oder auf Null fallen ("vollständig gelöscht").
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColliderPathSet {
    paths: Vec<Path>,
    generation: u64,
}

impl ColliderPathSet {
    /// Übernimmt eine Ausgangsform. Die Windungsrichtung wird nach
    /// Verschachtelungstiefe vereinheitlicht: gerade Tiefe gegen den Uhrzeigersinn,
    /// ungerade im Uhrzeigersinn.
    pub fn new(paths: Vec<Path>) -> Self {
        let depths: Vec<usize> = paths
            .iter()
            .map(|path| {
                let probe = path.vertices()[0];
                let own_area = path.area();
                paths
                    .iter()
                    .filter(|other| other.area() > own_area && other.contains_point(probe))
                    .count()
            })
            .collect();

        let paths = paths
            .into_iter()
            .zip(depths)
            .filter(|(path, _)| path.orientation() != Orientation::Collinear)
            .map(|(path, depth)| {
                if depth % 2 == 0 {
                    path.oriented(Orientation::CounterClockwise)
                } else {
                    path.oriented(Orientation::Clockwise)
                }
            })
            .collect();

        Self {
            paths,
            generation: 0,
        }
    }

    /// Ein einzelner Außenrand.
    pub fn from_boundary(vertices: Vec<Vec2>) -> ErosionResult<Self> {
        Ok(Self::new(vec![Path::new(vertices)?]))
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Gültiger Endzustand, kein Fehler.
    pub fn is_fully_erased(&self) -> bool {
        self.paths.is_empty()
    }

    /// Zählt jede Ersetzung; Konsumenten erkennen daran Änderungen.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Nettofläche: Außenränder positiv, Löcher negativ.
    pub fn area(&self) -> f32 {
        self.paths.iter().map(Path::signed_area).sum()
    }

    pub fn vertex_count(&self) -> usize {
        self.paths.iter().map(Path::len).sum()
    }

    pub fn bounds(&self) -> Bounds2D {
        self.paths
            .iter()
            .fold(Bounds2D::empty(), |acc, path| acc.union(&path.bounds()))
    }

    /// Gerade-Ungerade-Test über alle Pfade.
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.paths
            .iter()
            .filter(|path| path.contains_point(point))
            .count()
            % 2
            == 1
    }

    /// Ersetzt die komplette Form.
    pub fn replace(&mut self, paths: Vec<Path>) {
        self.paths = paths;
        self.generation += 1;
    }
}
