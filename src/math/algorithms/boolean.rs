// src/math/algorithms/boolean.rs

use crate::math::{
    error::*,
    types::{IntPath, IntPoint},
};
use bevy::log::debug;
use geo::algorithm::orient::{Direction, Orient};
use geo::{Area, BooleanOps, Contains, Coord, LineString, MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Füllregel, nach der überlappende oder verschachtelte Ringe ausgewertet werden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillRule {
    /// Ein Punkt ist innen, wenn ein Strahl eine ungerade Anzahl Ränder kreuzt
    #[default]
    EvenOdd,
    /// Ein Punkt ist innen, wenn seine Windungszahl ungleich Null ist
    NonZero,
}

/// Boolean-Differenz `subject − clip` auf dem Festkomma-Gitter.
///
/// Implementierungen müssen deterministisch sein und für einfache
/// (nicht selbstschneidende) Eingaben eine Menge einfacher Ringe liefern:
/// Außenränder gegen den Uhrzeigersinn, Löcher im Uhrzeigersinn.
pub trait PolygonDifference {
    fn difference(
        &self,
        subject: &[IntPath],
        clip: &IntPath,
        fill_rule: FillRule,
    ) -> ErosionResult<Vec<IntPath>>;
}

impl<T: PolygonDifference + ?Sized> PolygonDifference for &T {
    fn difference(
        &self,
        subject: &[IntPath],
        clip: &IntPath,
        fill_rule: FillRule,
    ) -> ErosionResult<Vec<IntPath>> {
        (**self).difference(subject, clip, fill_rule)
    }
}

impl<T: PolygonDifference + ?Sized> PolygonDifference for Box<T> {
    fn difference(
        &self,
        subject: &[IntPath],
        clip: &IntPath,
        fill_rule: FillRule,
    ) -> ErosionResult<Vec<IntPath>> {
        (**self).difference(subject, clip, fill_rule)
    }
}

/// Produktions-Primitive auf Basis von `geo::BooleanOps`.
///
/// Die flache Ringliste wird gemäß der Füllregel in Polygone mit Löchern zerlegt.
/// Für abwechselnd orientierte, verschachtelte Ringe stimmen `EvenOdd` und
/// `NonZero` überein.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoDifference;

impl PolygonDifference for GeoDifference {
    fn difference(
        &self,
        subject: &[IntPath],
        clip: &IntPath,
        fill_rule: FillRule,
    ) -> ErosionResult<Vec<IntPath>> {
        if clip.len() < 3 {
            return Err(ErosionError::InsufficientPoints {
                expected: 3,
                actual: clip.len(),
            });
        }

        let subject_polygons = assemble_multi_polygon(subject, fill_rule);
        let clip_polygons = MultiPolygon::new(vec![Polygon::new(to_line_string(clip), vec![])]);

        // Der Sweep von geo kann bei fehlerhaften Eingaben paniken
        let result = catch_unwind(AssertUnwindSafe(|| {
            subject_polygons.difference(&clip_polygons)
        }))
        .map_err(|_| ErosionError::PrimitiveFailure {
            reason: format!(
                "geo difference panicked on {} subject rings ({:?})",
                subject.len(),
                fill_rule
            ),
        })?;

        let mut paths = Vec::new();
        for polygon in result.0 {
            let polygon = polygon.orient(Direction::Default);
            if let Some(exterior) = to_int_path(polygon.exterior())? {
                paths.push(exterior);
            }
            for interior in polygon.interiors() {
                if let Some(hole) = to_int_path(interior)? {
                    paths.push(hole);
                }
            }
        }

        debug!(
            "geo difference: {} subject rings -> {} result rings",
            subject.len(),
            paths.len()
        );
        Ok(paths)
    }
}

fn to_line_string(path: &[IntPoint]) -> LineString<f64> {
    LineString::from(
        path.iter()
            .map(|p| Coord {
                x: p.x as f64,
                y: p.y as f64,
            })
            .collect::<Vec<_>>(),
    )
}

/// Rundet einen Ergebnis-Ring zurück aufs Gitter. Ringe, die dabei zu weniger
/// als drei Punkten oder zu einer Linie zusammenfallen, entfallen.
fn to_int_path(ring: &LineString<f64>) -> ErosionResult<Option<IntPath>> {
    let mut path: IntPath = Vec::with_capacity(ring.0.len());
    for coord in &ring.0 {
        if !coord.x.is_finite() || !coord.y.is_finite() {
            return Err(ErosionError::PrimitiveFailure {
                reason: "result contains non-finite coordinates".to_string(),
            });
        }
        let point = IntPoint::new(coord.x.round() as i64, coord.y.round() as i64);
        if path.last() != Some(&point) {
            path.push(point);
        }
    }
    while path.len() > 1 && path.first() == path.last() {
        path.pop();
    }

    if path.len() < 3 || crate::math::types::int_path_double_area(&path) == 0 {
        return Ok(None);
    }
    Ok(Some(path))
}

impl FillRule {
    /// Ist eine Region mit Windungszahl `winding` (bzw. Randanzahl bei
    /// `EvenOdd`) gefüllt?
    fn is_filled(self, winding: i64) -> bool {
        match self {
            FillRule::EvenOdd => winding % 2 != 0,
            FillRule::NonZero => winding != 0,
        }
    }

    /// Beitrag eines Rings zur Windungszahl seines Inneren.
    fn ring_weight(self, double_area: i128) -> i64 {
        match self {
            FillRule::EvenOdd => 1,
            FillRule::NonZero => double_area.signum() as i64,
        }
    }
}

/// Wertet die flache Ringliste unter `fill_rule` aus und baut daraus Polygone
/// mit Löchern. Ein Ring wird Außenrand, wenn innen gefüllt und außen leer ist,
/// Loch im umgekehrten Fall; trennt er zwei gleich gefüllte Regionen, entfällt er.
fn assemble_multi_polygon(subject: &[IntPath], fill_rule: FillRule) -> MultiPolygon<f64> {
    let mut rings: Vec<(Polygon<f64>, f64, i64)> = subject
        .iter()
        .filter(|path| path.len() >= 3)
        .filter_map(|path| {
            let double_area = crate::math::types::int_path_double_area(path);
            if double_area == 0 {
                return None;
            }
            let polygon = Polygon::new(to_line_string(path), vec![]);
            let area = polygon.unsigned_area();
            Some((polygon, area, fill_rule.ring_weight(double_area)))
        })
        .collect();
    rings.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut roles: Vec<RingRole> = Vec::with_capacity(rings.len());
    let mut parents: Vec<Option<usize>> = Vec::with_capacity(rings.len());
    for i in 0..rings.len() {
        // Absteigend sortiert: nur größere Ringe können umschließen
        let containers: Vec<usize> = (0..i)
            .filter(|&j| rings[j].0.contains(&rings[i].0))
            .collect();
        let outside: i64 = containers.iter().map(|&j| rings[j].2).sum();
        let inside = outside + rings[i].2;

        let role = match (fill_rule.is_filled(outside), fill_rule.is_filled(inside)) {
            (false, true) => RingRole::Exterior,
            (true, false) => RingRole::Hole,
            _ => RingRole::Redundant,
        };
        let parent = containers
            .iter()
            .rev()
            .copied()
            .find(|&j| roles[j] == RingRole::Exterior);
        roles.push(role);
        parents.push(parent);
    }

    let mut holes: Vec<Vec<LineString<f64>>> = vec![Vec::new(); rings.len()];
    for i in 0..rings.len() {
        if roles[i] == RingRole::Hole {
            if let Some(parent) = parents[i] {
                holes[parent].push(rings[i].0.exterior().clone());
            }
        }
    }

    let mut polygons = Vec::new();
    for (i, (polygon, _, _)) in rings.into_iter().enumerate() {
        if roles[i] == RingRole::Exterior {
            let (exterior, _) = polygon.into_inner();
            polygons.push(Polygon::new(exterior, std::mem::take(&mut holes[i])));
        }
    }

    MultiPolygon::new(polygons)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RingRole {
    Exterior,
    Hole,
    Redundant,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::types::int_path_double_area;

    fn rect(x0: i64, y0: i64, x1: i64, y1: i64) -> IntPath {
        vec![
            IntPoint::new(x0, y0),
            IntPoint::new(x1, y0),
            IntPoint::new(x1, y1),
            IntPoint::new(x0, y1),
        ]
    }

    fn total_double_area(paths: &[IntPath]) -> i128 {
        paths.iter().map(|p| int_path_double_area(p)).sum()
    }

    /// Brute-Force-Referenz: Gerade-Ungerade-Test gegen alle Ringe
    fn even_odd_contains(paths: &[IntPath], x: f64, y: f64) -> bool {
        let mut inside = false;
        for path in paths {
            let n = path.len();
            let mut j = n - 1;
            for i in 0..n {
                let (xi, yi) = (path[i].x as f64, path[i].y as f64);
                let (xj, yj) = (path[j].x as f64, path[j].y as f64);
                if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
                    inside = !inside;
                }
                j = i;
            }
        }
        inside
    }

    fn int_disc(cx: i64, cy: i64, r: f64, n: usize) -> IntPath {
        (0..n)
            .map(|k| {
                let angle = (k as f64) * std::f64::consts::TAU / n as f64;
                IntPoint::new(
                    cx + (angle.cos() * r) as i64,
                    cy + (angle.sin() * r) as i64,
                )
            })
            .collect()
    }

    #[test]
    fn test_disjoint_clip_keeps_subject() {
        let subject = vec![rect(0, 0, 4000, 4000)];
        let clip = rect(10_000, 10_000, 11_000, 11_000);

        let result = GeoDifference
            .difference(&subject, &clip, FillRule::EvenOdd)
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(total_double_area(&result), 2 * 16_000_000);
    }

    #[test]
    fn test_inner_clip_creates_clockwise_hole() {
        let subject = vec![rect(0, 0, 4000, 4000)];
        let clip = rect(1000, 1000, 2000, 2000);

        let result = GeoDifference
            .difference(&subject, &clip, FillRule::EvenOdd)
            .unwrap();

        assert_eq!(result.len(), 2);
        let positive = result.iter().filter(|p| int_path_double_area(p) > 0).count();
        let negative = result.iter().filter(|p| int_path_double_area(p) < 0).count();
        assert_eq!((positive, negative), (1, 1));
        assert_eq!(total_double_area(&result), 2 * (16_000_000 - 1_000_000));
    }

    #[test]
    fn test_covering_clip_removes_everything() {
        let subject = vec![rect(0, 0, 1000, 1000)];
        let clip = rect(-500, -500, 1500, 1500);

        let result = GeoDifference
            .difference(&subject, &clip, FillRule::NonZero)
            .unwrap();

        assert!(result.is_empty());
    }

    #[test]
    fn test_clip_splits_subject() {
        let subject = vec![rect(0, 0, 4000, 1000)];
        let clip = rect(1500, -500, 2500, 1500);

        let result = GeoDifference
            .difference(&subject, &clip, FillRule::EvenOdd)
            .unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(total_double_area(&result), 2 * 3_000_000);
    }

    #[test]
    fn test_existing_hole_is_respected() {
        let outer = rect(0, 0, 4000, 4000);
        let mut hole = rect(1000, 1000, 3000, 3000);
        hole.reverse();
        // Clip überdeckt halb das Loch, halb Material
        let clip = rect(2000, 1500, 3500, 2500);

        let result = GeoDifference
            .difference(&[outer, hole], &clip, FillRule::EvenOdd)
            .unwrap();

        // Material 16M - 4M; entfernt wird nur der Teil außerhalb des Lochs: 500 x 1000
        assert_eq!(total_double_area(&result), 2 * (12_000_000 - 500_000));
    }

    #[test]
    fn test_fill_rule_decides_nested_same_winding_ring() {
        // Beide Ringe gegen den Uhrzeigersinn
        let subject = vec![rect(0, 0, 4000, 4000), rect(1000, 1000, 2000, 2000)];
        let clip = rect(10_000, 10_000, 11_000, 11_000);

        let even_odd = GeoDifference
            .difference(&subject, &clip, FillRule::EvenOdd)
            .unwrap();
        let non_zero = GeoDifference
            .difference(&subject, &clip, FillRule::NonZero)
            .unwrap();

        // Gerade-Ungerade: innerer Ring ist ein Loch; Nicht-Null: Windungszahl 2, gefüllt
        assert_eq!(even_odd.len(), 2);
        assert_eq!(total_double_area(&even_odd), 2 * 15_000_000);
        assert_eq!(non_zero.len(), 1);
        assert_eq!(total_double_area(&non_zero), 2 * 16_000_000);
    }

    #[test]
    fn test_non_zero_keeps_opposite_wound_hole() {
        let outer = rect(0, 0, 4000, 4000);
        let mut hole = rect(1000, 1000, 3000, 3000);
        hole.reverse();
        let clip = rect(10_000, 10_000, 11_000, 11_000);

        let result = GeoDifference
            .difference(&[outer, hole], &clip, FillRule::NonZero)
            .unwrap();

        assert_eq!(total_double_area(&result), 2 * 12_000_000);
    }

    #[test]
    fn test_rejects_degenerate_clip() {
        let subject = vec![rect(0, 0, 10, 10)];
        let clip = vec![IntPoint::new(0, 0), IntPoint::new(5, 5)];
        assert!(GeoDifference
            .difference(&subject, &clip, FillRule::EvenOdd)
            .is_err());
    }

    #[test]
    fn test_matches_sampled_reference_on_disc_cut() {
        let outer = rect(0, 0, 4000, 4000);
        let mut hole = rect(500, 500, 1500, 1500);
        hole.reverse();
        let subject = vec![outer, hole];
        let clip = int_disc(1500, 2000, 900.0, 20);

        let result = GeoDifference
            .difference(&subject, &clip, FillRule::EvenOdd)
            .unwrap();

        let mut mismatches = 0;
        let mut samples = 0;
        for ix in 0..80 {
            for iy in 0..80 {
                let x = -100.0 + ix as f64 * 53.3 + 0.37;
                let y = -100.0 + iy as f64 * 53.3 + 0.71;
                let expected = even_odd_contains(&subject, x, y)
                    && !even_odd_contains(std::slice::from_ref(&clip), x, y);
                if expected != even_odd_contains(&result, x, y) {
                    mismatches += 1;
                }
                samples += 1;
            }
        }
        assert!(
            mismatches * 200 < samples,
            "{} of {} samples disagree with the reference",
            mismatches,
            samples
        );
    }
}
