// src/math/types/bounds.rs

use crate::math::{error::*, types::*};
use std::fmt;

/// 2D Bounding Box (Axis-Aligned Bounding Box)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2D {
    pub min: Point2D,
    pub max: Point2D,
}

impl Bounds2D {
    /// Erstellt eine neue Bounding Box
    pub fn new(min: Point2D, max: Point2D) -> ErosionResult<Self> {
        if min.x > max.x || min.y > max.y {
            return Err(ErosionError::InvalidConfiguration {
                message: format!("Invalid bounds: min {:?} > max {:?}", min, max),
            });
        }

        Ok(Self { min, max })
    }

    /// Erstellt eine Bounding Box aus zwei beliebigen Punkten
    pub fn from_points(p1: Point2D, p2: Point2D) -> Self {
        Self {
            min: Point2D::new(p1.x.min(p2.x), p1.y.min(p2.y)),
            max: Point2D::new(p1.x.max(p2.x), p1.y.max(p2.y)),
        }
    }

    /// Erstellt eine Bounding Box die alle Punkte umschließt
    pub fn from_points_iter<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point2D>,
    {
        let mut points_iter = points.into_iter();
        let first_point = points_iter.next()?;

        let mut bounds = Self {
            min: first_point,
            max: first_point,
        };
        for point in points_iter {
            bounds.expand_to_include_point(point);
        }

        Some(bounds)
    }

    /// Leere Bounding Box (ungültig)
    pub fn empty() -> Self {
        Self {
            min: Point2D::new(f32::INFINITY, f32::INFINITY),
            max: Point2D::new(f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    /// Prüft ob die Bounding Box leer ist
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Breite der Bounding Box
    pub fn width(&self) -> f32 {
        (self.max.x - self.min.x).max(0.0)
    }

    /// Höhe der Bounding Box
    pub fn height(&self) -> f32 {
        (self.max.y - self.min.y).max(0.0)
    }

    /// Prüft ob ein Punkt in der Bounding Box liegt
    pub fn contains_point(&self, point: Point2D) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Prüft ob sich zwei Bounding Boxes überschneiden
    pub fn intersects(&self, other: &Bounds2D) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }

        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Vereinigt zwei Bounding Boxes
    pub fn union(&self, other: &Bounds2D) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }

        Self {
            min: Point2D::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point2D::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Erweitert die Bounding Box um einen Punkt
    pub fn expand_to_include_point(&mut self, point: Point2D) {
        if self.is_empty() {
            self.min = point;
            self.max = point;
        } else {
            self.min = self.min.min(point);
            self.max = self.max.max(point);
        }
    }

    /// Vergrößert die Box in alle Richtungen um `margin`
    pub fn expand(&self, margin: f32) -> Self {
        if self.is_empty() {
            return *self;
        }

        Self {
            min: self.min - Point2D::splat(margin),
            max: self.max + Point2D::splat(margin),
        }
    }
}

impl fmt::Display for Bounds2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "Bounds2D(empty)")
        } else {
            write!(f, "Bounds2D({:?} to {:?})", self.min, self.max)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_iter() {
        let bounds = Bounds2D::from_points_iter(vec![
            Vec2::new(1.0, 3.0),
            Vec2::new(-2.0, 0.5),
            Vec2::new(4.0, -1.0),
        ])
        .unwrap();

        assert_eq!(bounds.min, Vec2::new(-2.0, -1.0));
        assert_eq!(bounds.max, Vec2::new(4.0, 3.0));
        assert!(Bounds2D::from_points_iter(Vec::<Vec2>::new()).is_none());
    }

    #[test]
    fn test_intersects_touching_and_disjoint() {
        let a = Bounds2D::from_points(Vec2::ZERO, Vec2::new(2.0, 2.0));
        let touching = Bounds2D::from_points(Vec2::new(2.0, 0.0), Vec2::new(3.0, 1.0));
        let disjoint = Bounds2D::from_points(Vec2::new(5.0, 5.0), Vec2::new(6.0, 6.0));

        assert!(a.intersects(&touching));
        assert!(!a.intersects(&disjoint));
        assert!(!a.intersects(&Bounds2D::empty()));
    }

    #[test]
    fn test_union_with_empty() {
        let a = Bounds2D::from_points(Vec2::ZERO, Vec2::ONE);
        assert_eq!(Bounds2D::empty().union(&a), a);
        assert_eq!(a.expand(0.5).width(), 2.0);
    }
}
