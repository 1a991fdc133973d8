// src/erosion/stroke.rs

use crate::math::utils::constants::DEFAULT_STAMP_SPACING;
use bevy::math::Vec2;

/// Obergrenze der Stempel pro Segment. Längere Segmente werden gröber abgetastet.
pub const MAX_STROKE_STEPS: usize = 10_000;

/// Zerlegt eine Bewegung in Stempelpunkte, deren Abstand höchstens
/// `radius · spacing` beträgt. Ohne Zustand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeSampler {
    spacing: f32,
}

impl StrokeSampler {
    pub fn new(spacing: f32) -> Self {
        Self { spacing }
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Maximaler Abstand zweier Stempel für einen Pinsel mit `radius`.
    pub fn max_step(&self, radius: f32) -> f32 {
        radius * self.spacing
    }

    /// `ceil(distance / (radius · spacing))`, höchstens `MAX_STROKE_STEPS`;
    /// 0 für nicht positive Schrittweiten oder nicht endliche Strecken.
    pub fn step_count(&self, start: Vec2, end: Vec2, radius: f32) -> usize {
        let max_step = self.max_step(radius);
        if !max_step.is_finite() || max_step <= 0.0 {
            return 0;
        }
        let steps = (start.distance(end) / max_step).ceil();
        if steps.is_nan() {
            return 0;
        }
        if steps >= MAX_STROKE_STEPS as f32 {
            MAX_STROKE_STEPS
        } else {
            steps as usize
        }
    }

    /// Würde das Segment ohne Obergrenze mehr Stempel brauchen?
    pub fn is_clamped(&self, start: Vec2, end: Vec2, radius: f32) -> bool {
        let max_step = self.max_step(radius);
        max_step.is_finite()
            && max_step > 0.0
            && start.distance(end) / max_step > MAX_STROKE_STEPS as f32
    }

    /// Punkte bei t = i/steps für i ∈ [0, steps). Der Endpunkt selbst gehört
    /// zum nächsten Segment.
    pub fn sample(&self, start: Vec2, end: Vec2, radius: f32) -> Vec<Vec2> {
        let steps = self.step_count(start, end, radius);
        (0..steps)
            .map(|i| start.lerp(end, i as f32 / steps as f32))
            .collect()
    }
}

impl Default for StrokeSampler {
    fn default() -> Self {
        Self::new(DEFAULT_STAMP_SPACING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_step_count_formula() {
        let sampler = StrokeSampler::default();
        let radius = 0.5;
        // max. Schritt 0.25
        assert_eq!(sampler.step_count(Vec2::ZERO, Vec2::new(1.0, 0.0), radius), 4);
        assert_eq!(sampler.step_count(Vec2::ZERO, Vec2::new(1.1, 0.0), radius), 5);
        assert_eq!(sampler.step_count(Vec2::ZERO, Vec2::new(0.01, 0.0), radius), 1);
        assert_eq!(sampler.step_count(Vec2::ZERO, Vec2::ZERO, radius), 0);
    }

    #[test]
    fn test_consecutive_points_within_half_radius() {
        let sampler = StrokeSampler::default();
        let radius = 0.3;
        let start = Vec2::new(-2.0, 1.0);
        let end = Vec2::new(5.5, -3.25);

        let points = sampler.sample(start, end, radius);
        let expected_steps = (start.distance(end) / (radius * 0.5)).ceil() as usize;

        assert_eq!(points.len(), expected_steps);
        assert_eq!(points[0], start);
        for pair in points.windows(2) {
            assert!(pair[0].distance(pair[1]) <= radius * 0.5 + 1e-5);
        }
        // Lücke zum Endpunkt ebenfalls begrenzt
        assert!(points.last().unwrap().distance(end) <= radius * 0.5 + 1e-5);
    }

    #[test]
    fn test_linear_interpolation() {
        let sampler = StrokeSampler::default();
        let points = sampler.sample(Vec2::ZERO, Vec2::new(0.0, 1.0), 1.0);
        assert_eq!(points.len(), 2);
        assert_relative_eq!(points[1].y, 0.5);
    }

    #[test]
    fn test_huge_segment_is_capped() {
        let sampler = StrokeSampler::default();
        let start = Vec2::ZERO;
        let end = Vec2::new(1.0e9, 0.0);

        assert!(sampler.is_clamped(start, end, 0.5));
        assert_eq!(sampler.step_count(start, end, 0.5), MAX_STROKE_STEPS);
        assert_eq!(sampler.sample(start, end, 0.5).len(), MAX_STROKE_STEPS);
        assert_eq!(
            sampler.step_count(start, Vec2::new(f32::INFINITY, 0.0), 0.5),
            MAX_STROKE_STEPS
        );
        assert_eq!(sampler.step_count(start, Vec2::new(f32::NAN, 0.0), 0.5), 0);
        assert!(!sampler.is_clamped(start, Vec2::new(1.0, 0.0), 0.5));
    }

    #[test]
    fn test_degenerate_radius_yields_no_points() {
        let sampler = StrokeSampler::default();
        assert!(sampler.sample(Vec2::ZERO, Vec2::ONE, 0.0).is_empty());
        assert!(sampler.sample(Vec2::ZERO, Vec2::ONE, -1.0).is_empty());
        assert!(StrokeSampler::new(0.0).sample(Vec2::ZERO, Vec2::ONE, 1.0).is_empty());
    }
}
