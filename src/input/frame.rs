// src/input/frame.rs

use super::contact::ContactId;
use bevy::math::Vec2;

/// Herkunft eines Roh-Samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    /// Linke Maustaste
    Mouse,
    /// Finger mit der Touch-ID der Plattform
    Touch(u64),
}

/// Phase eines Samples innerhalb eines Frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplePhase {
    Began,
    Moved,
    Stationary,
    Ended,
    Canceled,
}

impl SamplePhase {
    pub fn is_held(self) -> bool {
        matches!(self, SamplePhase::Moved | SamplePhase::Stationary)
    }

    pub fn is_finished(self) -> bool {
        matches!(self, SamplePhase::Ended | SamplePhase::Canceled)
    }
}

/// Ein Roh-Sample in Gerätekoordinaten. Bei `Ended`/`Canceled` wird die Position ignoriert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub source: PointerSource,
    pub phase: SamplePhase,
    pub position: Vec2,
}

impl PointerSample {
    pub fn mouse(phase: SamplePhase, position: Vec2) -> Self {
        Self {
            source: PointerSource::Mouse,
            phase,
            position,
        }
    }

    pub fn touch(id: u64, phase: SamplePhase, position: Vec2) -> Self {
        Self {
            source: PointerSource::Touch(id),
            phase,
            position,
        }
    }

    pub fn is_touch(&self) -> bool {
        matches!(self.source, PointerSource::Touch(_))
    }
}

/// Alle Roh-Samples eines Polls, in der Reihenfolge, in der das Eingabesystem sie liefert.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputFrame {
    pub samples: Vec<PointerSample>,
}

impl InputFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: PointerSample) -> &mut Self {
        self.samples.push(sample);
        self
    }

    pub fn with(mut self, sample: PointerSample) -> Self {
        self.samples.push(sample);
        self
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Touch hat Vorrang: sobald ein verfolgbarer Finger im Frame liegt, zählt die
    /// Maus nicht. Touch-IDs außerhalb der Kapazität zählen nicht mit.
    pub fn has_touch(&self) -> bool {
        self.samples
            .iter()
            .any(|sample| sample.is_touch() && ContactId::from_source(sample.source).is_some())
    }
}
