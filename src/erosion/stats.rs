// src/erosion/stats.rs

/// Zähler über alle Stempel eines Colliders seit dem letzten Reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErosionStats {
    /// Stempel, bei denen die Differenz berechnet und übernommen wurde
    pub stamps_applied: usize,
    /// Stempel ohne Überschneidung mit der Form
    pub stamps_unchanged: usize,
    /// Übersprungen wegen degenerierter Geometrie
    pub stamps_skipped: usize,
    /// Abgebrochen wegen Fehler der Boolean-Primitive
    pub stamps_failed: usize,
    /// Liniensegmente, deren restliche Punkte nach einem Fehler verworfen wurden
    pub segments_aborted: usize,
}

impl ErosionStats {
    pub fn total_stamps(&self) -> usize {
        self.stamps_applied + self.stamps_unchanged + self.stamps_skipped + self.stamps_failed
    }
}

/// Momentaufnahme für Anzeige und Logging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErosionSummary {
    pub path_count: usize,
    pub vertex_count: usize,
    pub area: f32,
    pub initial_area: f32,
    pub stats: ErosionStats,
}

impl ErosionSummary {
    /// Anteil der bereits entfernten Fläche in [0, 1].
    pub fn erased_fraction(&self) -> f32 {
        if self.initial_area <= 0.0 {
            return 0.0;
        }
        (1.0 - self.area / self.initial_area).clamp(0.0, 1.0)
    }
}
