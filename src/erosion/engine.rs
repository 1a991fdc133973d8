// src/erosion/engine.rs

use super::{
    collider::ColliderPathSet,
    config::BrushConfig,
    stats::{ErosionStats, ErosionSummary},
    stroke::{StrokeSampler, MAX_STROKE_STEPS},
};
use crate::math::{
    algorithms::{FixedPointQuantizer, GeoDifference, PolygonDifference},
    error::*,
    geometry::{CircleApproximator, Orientation, Path},
};
use bevy::log::{debug, info, warn};
use bevy::math::Vec2;

/// Grund, aus dem ein Stempel ohne Aufruf der Primitive übersprungen wurde.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Radius ≤ 0 oder nicht endlich
    DegenerateBrush,
    /// Kreis-Polygon ohne Fläche
    DegenerateDisc,
    /// Die Form ist bereits vollständig gelöscht
    EmptySubject,
}

/// Ergebnis eines einzelnen Stempels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StampOutcome {
    /// Differenz berechnet und übernommen
    Applied {
        paths_before: usize,
        paths_after: usize,
    },
    /// Bounding Boxes disjunkt, die Form bleibt wie sie ist
    Unchanged,
    Skipped(SkipReason),
}

/// Zusammenfassung eines Hole- oder Line-Ereignisses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrokeReport {
    /// Anzahl der Interpolationspunkte
    pub points: usize,
    pub applied: usize,
    pub unchanged: usize,
    pub skipped: usize,
    /// Ein Stempel ist fehlgeschlagen, die restlichen Punkte wurden verworfen
    pub aborted: bool,
}

impl StrokeReport {
    pub fn merge(&mut self, other: StrokeReport) {
        self.points += other.points;
        self.applied += other.applied;
        self.unchanged += other.unchanged;
        self.skipped += other.skipped;
        self.aborted |= other.aborted;
    }
}

/// Erosions-Engine eines Colliders: faltet Kreis-Differenzen nacheinander
/// über die aktuelle Mehrpfad-Form.
///
/// Jeder Stempel hängt vom Ergebnis des vorherigen ab. Die Engine besitzt ihre
/// Form exklusiv; es gibt keinen zweiten Schreiber.
#[derive(Debug, Clone)]
pub struct ErosionEngine<D = GeoDifference> {
    brush: BrushConfig,
    circle: CircleApproximator,
    quantizer: FixedPointQuantizer,
    sampler: StrokeSampler,
    primitive: D,
    paths: ColliderPathSet,
    initial: ColliderPathSet,
    stats: ErosionStats,
}

impl ErosionEngine<GeoDifference> {
    pub fn new(brush: BrushConfig, paths: ColliderPathSet) -> ErosionResult<Self> {
        Self::with_primitive(brush, paths, GeoDifference)
    }
}

impl<D: PolygonDifference> ErosionEngine<D> {
    /// Erstellt eine Engine mit einer eigenen Differenz-Primitive.
    pub fn with_primitive(
        brush: BrushConfig,
        paths: ColliderPathSet,
        primitive: D,
    ) -> ErosionResult<Self> {
        brush.validate()?;
        Ok(Self {
            circle: brush.circle()?,
            quantizer: brush.quantizer()?,
            sampler: StrokeSampler::new(brush.spacing),
            brush,
            primitive,
            initial: paths.clone(),
            paths,
            stats: ErosionStats::default(),
        })
    }

    pub fn brush(&self) -> &BrushConfig {
        &self.brush
    }

    pub fn paths(&self) -> &ColliderPathSet {
        &self.paths
    }

    pub fn quantizer(&self) -> &FixedPointQuantizer {
        &self.quantizer
    }

    pub fn sampler(&self) -> &StrokeSampler {
        &self.sampler
    }

    pub fn primitive(&self) -> &D {
        &self.primitive
    }

    pub fn stats(&self) -> &ErosionStats {
        &self.stats
    }

    pub fn summary(&self) -> ErosionSummary {
        ErosionSummary {
            path_count: self.paths.len(),
            vertex_count: self.paths.vertex_count(),
            area: self.paths.area(),
            initial_area: self.initial.area(),
            stats: self.stats,
        }
    }

    /// Stellt die Ausgangsform wieder her und setzt die Zähler zurück.
    pub fn reset(&mut self) {
        self.paths.replace(self.initial.paths().to_vec());
        self.stats = ErosionStats::default();
        info!(
            "Collider reset to {} initial paths (area {:.3})",
            self.paths.len(),
            self.paths.area()
        );
    }

    /// Kreis-Polygon des Pinsels an `center`.
    pub fn disc_at(&self, center: Vec2) -> ErosionResult<Path> {
        self.circle.build(center, self.brush.radius)
    }

    /// Zieht `disc` von der aktuellen Form ab und ersetzt sie mit dem Ergebnis.
    ///
    /// Schlägt die Primitive fehl, bleibt die bisherige Form unverändert.
    pub fn subtract(&mut self, disc: &Path) -> ErosionResult<StampOutcome> {
        if self.paths.is_empty() {
            self.stats.stamps_skipped += 1;
            return Ok(StampOutcome::Skipped(SkipReason::EmptySubject));
        }
        if disc.orientation() == Orientation::Collinear {
            self.stats.stamps_skipped += 1;
            return Ok(StampOutcome::Skipped(SkipReason::DegenerateDisc));
        }
        if !self.paths.bounds().intersects(&disc.bounds()) {
            self.stats.stamps_unchanged += 1;
            return Ok(StampOutcome::Unchanged);
        }

        let result = self.difference(disc);
        let new_paths = match result {
            Ok(paths) => paths,
            Err(err) => {
                self.stats.stamps_failed += 1;
                return Err(err);
            }
        };

        let paths_before = self.paths.len();
        let paths_after = new_paths.len();
        self.paths.replace(new_paths);
        self.stats.stamps_applied += 1;

        if paths_before != paths_after {
            debug!(
                "Collider path count changed from {} to {}",
                paths_before, paths_after
            );
        }
        Ok(StampOutcome::Applied {
            paths_before,
            paths_after,
        })
    }

    /// Quantisieren, Primitive aufrufen, zurückskalieren. Ändert nichts am Zustand.
    fn difference(&self, disc: &Path) -> ErosionResult<Vec<Path>> {
        let subject = self.quantizer.quantize_paths(self.paths.paths())?;
        let clip = self.quantizer.quantize_path(disc)?;

        let rings = self
            .primitive
            .difference(&subject, &clip, self.brush.fill_rule)?;

        let mut paths = Vec::with_capacity(rings.len());
        for ring in &rings {
            match self.quantizer.dequantize_path(ring) {
                Ok(path) => paths.push(path),
                Err(err) if err.is_degenerate() => {
                    debug!("Dropping degenerate result ring with {} points", ring.len());
                }
                Err(err) => return Err(err),
            }
        }
        Ok(paths)
    }

    /// Stempelt den Pinsel einmal an `center`.
    pub fn stamp(&mut self, center: Vec2) -> ErosionResult<StampOutcome> {
        let disc = match self.disc_at(center) {
            Ok(disc) => disc,
            Err(err) if err.is_degenerate() => {
                self.stats.stamps_skipped += 1;
                return Ok(StampOutcome::Skipped(SkipReason::DegenerateBrush));
            }
            Err(err) => return Err(err),
        };
        self.subtract(&disc)
    }

    /// Ein Stempel für einen Kontakt ohne Bewegung.
    pub fn erase_hole(&mut self, center: Vec2) -> StrokeReport {
        self.erase_points(&[center])
    }

    /// Stempelt entlang `from → to` im Abstand von höchstens `radius · spacing`.
    pub fn erase_line(&mut self, from: Vec2, to: Vec2) -> StrokeReport {
        if self.sampler.is_clamped(from, to, self.brush.radius) {
            warn!(
                "Segment {:?} -> {:?} needs more than {} stamps; sampling coarser",
                from, to, MAX_STROKE_STEPS
            );
        }
        let points = self.sampler.sample(from, to, self.brush.radius);
        self.erase_points(&points)
    }

    /// Stempelt der Reihe nach; nach dem ersten Fehler wird der Rest verworfen.
    fn erase_points(&mut self, points: &[Vec2]) -> StrokeReport {
        let mut report = StrokeReport {
            points: points.len(),
            ..Default::default()
        };

        for (index, point) in points.iter().enumerate() {
            match self.stamp(*point) {
                Ok(StampOutcome::Applied { .. }) => report.applied += 1,
                Ok(StampOutcome::Unchanged) => report.unchanged += 1,
                Ok(StampOutcome::Skipped(_)) => report.skipped += 1,
                Err(err) => {
                    warn!(
                        "Stamp at {:?} failed: {}. Skipping {} remaining points of this segment.",
                        point,
                        err,
                        points.len() - index - 1
                    );
                    self.stats.segments_aborted += 1;
                    report.aborted = true;
                    break;
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{
        algorithms::FillRule,
        types::{IntPath, IntPoint},
    };
    use approx::assert_relative_eq;
    use rand::{Rng, SeedableRng, rngs::StdRng};
    use std::cell::Cell;

    fn square_set() -> ColliderPathSet {
        ColliderPathSet::new(vec![
            Path::new(vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(0.0, 4.0),
                Vec2::new(4.0, 4.0),
                Vec2::new(4.0, 0.0),
            ])
            .unwrap(),
        ])
    }

    fn ngon_area(n: usize, r: f32) -> f32 {
        0.5 * n as f32 * r * r * (std::f32::consts::TAU / n as f32).sin()
    }

    /// Primitive, die immer fehlschlägt
    struct FailingDifference;

    impl PolygonDifference for FailingDifference {
        fn difference(&self, _: &[IntPath], _: &IntPath, _: FillRule) -> ErosionResult<Vec<IntPath>> {
            Err(ErosionError::PrimitiveFailure {
                reason: "scripted failure".to_string(),
            })
        }
    }

    /// Delegiert an geo und schlägt ab dem `fail_from`-ten Aufruf fehl
    struct ScriptedDifference {
        fail_from: usize,
        calls: Cell<usize>,
    }

    impl PolygonDifference for ScriptedDifference {
        fn difference(
            &self,
            subject: &[IntPath],
            clip: &IntPath,
            fill_rule: FillRule,
        ) -> ErosionResult<Vec<IntPath>> {
            let call = self.calls.get() + 1;
            self.calls.set(call);
            if call >= self.fail_from {
                return FailingDifference.difference(subject, clip, fill_rule);
            }
            GeoDifference.difference(subject, clip, fill_rule)
        }
    }

    #[test]
    fn test_single_stamp_in_square_punches_hole() {
        let mut engine = ErosionEngine::new(BrushConfig::default(), square_set()).unwrap();

        let outcome = engine.stamp(Vec2::new(2.0, 2.0)).unwrap();

        assert_eq!(
            outcome,
            StampOutcome::Applied {
                paths_before: 1,
                paths_after: 2
            }
        );
        let paths = engine.paths().paths();
        let outer = paths.iter().filter(|p| p.signed_area() > 0.0).count();
        let holes = paths.iter().filter(|p| p.signed_area() < 0.0).count();
        assert_eq!((outer, holes), (1, 1));
        assert_relative_eq!(
            engine.paths().area(),
            16.0 - ngon_area(20, 0.5),
            epsilon = 5e-3
        );
    }

    #[test]
    fn test_disjoint_disc_leaves_paths_untouched() {
        let triangle = ColliderPathSet::new(vec![
            Path::new(vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(4.0, 0.0),
                Vec2::new(0.0, 4.0),
            ])
            .unwrap(),
        ]);
        let mut engine = ErosionEngine::new(BrushConfig::default(), triangle.clone()).unwrap();

        // Bounding Boxes überlappen, die Primitive läuft also tatsächlich
        let outcome = engine.stamp(Vec2::new(3.5, 3.5)).unwrap();
        assert!(matches!(outcome, StampOutcome::Applied { paths_after: 1, .. }));
        let result = &engine.paths().paths()[0];
        assert_eq!(result.len(), 3);
        for vertex in triangle.paths()[0].vertices() {
            assert!(result.vertices().contains(vertex));
        }

        // Weit entfernt: schneller Ausstieg ohne Primitive
        let before = engine.paths().clone();
        assert_eq!(engine.stamp(Vec2::new(50.0, 50.0)).unwrap(), StampOutcome::Unchanged);
        assert_eq!(engine.paths(), &before);
    }

    #[test]
    fn test_covering_disc_removes_convex_path() {
        let small = Path::rectangle(Vec2::new(10.0, 10.0), Vec2::new(10.4, 10.4)).unwrap();
        let big = Path::rectangle(Vec2::new(0.0, 0.0), Vec2::new(4.0, 4.0)).unwrap();
        let set = ColliderPathSet::new(vec![big, small]);
        let mut engine = ErosionEngine::new(BrushConfig::default(), set).unwrap();
        let area_before = engine.paths().area();

        let outcome = engine.stamp(Vec2::new(10.2, 10.2)).unwrap();

        assert_eq!(
            outcome,
            StampOutcome::Applied {
                paths_before: 2,
                paths_after: 1
            }
        );
        assert_relative_eq!(engine.paths().area(), area_before - 0.16, epsilon = 1e-3);
    }

    #[test]
    fn test_erasing_everything_is_terminal_not_error() {
        let tiny = ColliderPathSet::new(vec![
            Path::rectangle(Vec2::new(-0.1, -0.1), Vec2::new(0.1, 0.1)).unwrap(),
        ]);
        let mut engine = ErosionEngine::new(BrushConfig::default(), tiny).unwrap();

        engine.stamp(Vec2::ZERO).unwrap();
        assert!(engine.paths().is_fully_erased());

        assert_eq!(
            engine.stamp(Vec2::ZERO).unwrap(),
            StampOutcome::Skipped(SkipReason::EmptySubject)
        );
        assert_eq!(engine.summary().erased_fraction(), 1.0);
    }

    #[test]
    fn test_repeated_identical_stamp_is_stable() {
        let mut engine = ErosionEngine::new(BrushConfig::default(), square_set()).unwrap();
        let center = Vec2::new(0.3, 2.0);

        engine.stamp(center).unwrap();
        let first = engine.paths().clone();
        engine.stamp(center).unwrap();
        let second = engine.paths();

        assert_eq!(first.len(), second.len());
        assert_relative_eq!(first.area(), second.area(), epsilon = 1e-4);
    }

    #[test]
    fn test_line_across_thin_bar_splits_it() {
        let bar = ColliderPathSet::new(vec![
            Path::rectangle(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.1)).unwrap(),
        ]);
        let mut engine = ErosionEngine::new(BrushConfig::default(), bar).unwrap();

        let report = engine.erase_line(Vec2::new(5.0, -3.0), Vec2::new(5.0, 3.0));

        assert_eq!(report.points, 24);
        assert!(!report.aborted);
        assert!(report.applied >= 1);
        assert_eq!(engine.paths().len(), 2);
    }

    #[test]
    fn test_runaway_segment_is_bounded() {
        let mut engine = ErosionEngine::with_primitive(
            BrushConfig::default(),
            square_set(),
            FailingDifference,
        )
        .unwrap();

        // Weit außerhalb der Form: kein Aufruf der Primitive, aber begrenzte Arbeit
        let report = engine.erase_line(Vec2::new(1.0e4, 1.0e4), Vec2::new(-1.0e4, 1.0e4));

        assert_eq!(report.points, MAX_STROKE_STEPS);
        assert!(!report.aborted);
        assert_eq!(report.applied, 0);
    }

    #[test]
    fn test_zero_length_hole_stamps_once() {
        let mut engine = ErosionEngine::new(BrushConfig::default(), square_set()).unwrap();

        let report = engine.erase_hole(Vec2::new(2.0, 2.0));

        assert_eq!(report.points, 1);
        assert_eq!(report.applied, 1);
        assert_eq!(engine.stats().stamps_applied, 1);
        // Eine Linie der Länge Null erzeugt dagegen keinen Stempel
        assert_eq!(engine.erase_line(Vec2::ONE, Vec2::ONE).points, 0);
    }

    #[test]
    fn test_degenerate_brush_is_skipped() {
        let brush = BrushConfig::default().with_radius(0.0);
        let mut engine = ErosionEngine::new(brush, square_set()).unwrap();
        let before = engine.paths().clone();

        assert_eq!(
            engine.stamp(Vec2::new(2.0, 2.0)).unwrap(),
            StampOutcome::Skipped(SkipReason::DegenerateBrush)
        );
        assert_eq!(engine.paths(), &before);
        assert_eq!(engine.stats().stamps_skipped, 1);
    }

    #[test]
    fn test_primitive_failure_keeps_committed_paths() {
        let mut engine =
            ErosionEngine::with_primitive(BrushConfig::default(), square_set(), FailingDifference)
                .unwrap();
        let before = engine.paths().clone();

        let result = engine.stamp(Vec2::new(2.0, 2.0));

        assert!(matches!(result, Err(ErosionError::PrimitiveFailure { .. })));
        assert_eq!(engine.paths(), &before);
        assert_eq!(engine.stats().stamps_failed, 1);
    }

    #[test]
    fn test_failure_skips_rest_of_segment() {
        let primitive = ScriptedDifference {
            fail_from: 2,
            calls: Cell::new(0),
        };
        let mut engine =
            ErosionEngine::with_primitive(BrushConfig::default(), square_set(), primitive).unwrap();

        let report = engine.erase_line(Vec2::new(1.0, 2.0), Vec2::new(4.0, 2.0));

        assert_eq!(report.points, 12);
        assert_eq!(report.applied, 1);
        assert!(report.aborted);
        assert_eq!(engine.primitive().calls.get(), 2);
        assert_eq!(engine.stats().segments_aborted, 1);
        // Der erste Stempel bleibt erhalten
        assert_relative_eq!(
            engine.paths().area(),
            16.0 - ngon_area(20, 0.5),
            epsilon = 5e-3
        );

        // Der nächste Stempel wird wieder versucht, nicht wiederholt
        assert!(engine.stamp(Vec2::new(1.0, 1.0)).is_err());
        assert_eq!(engine.primitive().calls.get(), 3);
    }

    #[test]
    fn test_reset_restores_initial_shape() {
        let mut engine = ErosionEngine::new(BrushConfig::default(), square_set()).unwrap();
        engine.erase_line(Vec2::new(0.0, 2.0), Vec2::new(4.0, 2.0));
        assert!(engine.paths().area() < 16.0);

        let generation = engine.paths().generation();
        engine.reset();

        assert_relative_eq!(engine.paths().area(), 16.0);
        assert!(engine.paths().generation() > generation);
        assert_eq!(engine.stats().total_stamps(), 0);
    }

    #[test]
    fn test_random_strokes_keep_valid_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut engine = ErosionEngine::new(BrushConfig::default(), square_set()).unwrap();
        let mut previous_area = engine.paths().area();

        for _ in 0..40 {
            let from = Vec2::new(rng.random_range(-1.0..5.0), rng.random_range(-1.0..5.0));
            let to = Vec2::new(rng.random_range(-1.0..5.0), rng.random_range(-1.0..5.0));
            let report = engine.erase_line(from, to);
            assert!(!report.aborted);

            for path in engine.paths().paths() {
                assert!(path.len() >= 3);
                assert_ne!(path.orientation(), Orientation::Collinear);
            }
            let area = engine.paths().area();
            assert!(area >= -1e-3);
            assert!(area <= previous_area + 1e-2);
            previous_area = area;
        }
    }

    #[test]
    fn test_subtract_uses_quantized_lattice() {
        let mut engine = ErosionEngine::new(BrushConfig::default(), square_set()).unwrap();
        engine.stamp(Vec2::new(1.2345, 2.0)).unwrap();

        let quantizer = *engine.quantizer();
        for path in engine.paths().paths() {
            for vertex in path.vertices() {
                let lattice: IntPoint = quantizer.quantize_point(*vertex).unwrap();
                assert_eq!(quantizer.dequantize_point(lattice), *vertex);
            }
        }
    }
}
