// src/erosion/pipeline.rs

use super::{
    collider::ColliderPathSet,
    engine::{ErosionEngine, StrokeReport},
};
use crate::input::{ContactEventKind, ContactTracker, EventQueue, InputFrame};
use crate::math::algorithms::{GeoDifference, PolygonDifference};
use bevy::log::debug;
use bevy::math::Affine2;

/// Ergebnis eines Frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Verarbeitete Kontakt-Ereignisse
    pub events: usize,
    pub stroke: StrokeReport,
    /// Die Form wurde in diesem Frame ersetzt
    pub changed: bool,
}

/// Verbindet Kontaktverfolgung und Erosion für genau einen Collider:
/// Rohsamples in Weltkoordinaten → lokale Ereignisse → Stempel.
#[derive(Debug)]
pub struct ErosionPipeline<D = GeoDifference> {
    tracker: ContactTracker,
    queue: EventQueue,
    engine: ErosionEngine<D>,
    world_to_local: Affine2,
}

impl<D: PolygonDifference> ErosionPipeline<D> {
    pub fn new(engine: ErosionEngine<D>) -> Self {
        Self {
            tracker: ContactTracker::new(),
            queue: EventQueue::new(),
            engine,
            world_to_local: Affine2::IDENTITY,
        }
    }

    /// Setzt die Lage des Colliders in der Welt.
    pub fn set_local_to_world(&mut self, local_to_world: Affine2) {
        self.world_to_local = local_to_world.inverse();
    }

    pub fn world_to_local(&self) -> Affine2 {
        self.world_to_local
    }

    /// Verarbeitet einen Frame: Samples in lokale Koordinaten, Ereignisse
    /// in Ankunftsreihenfolge auf die Engine anwenden.
    pub fn tick(&mut self, frame: &InputFrame) -> TickReport {
        let generation = self.engine.paths().generation();
        let world_to_local = self.world_to_local;
        self.tracker.poll(
            frame,
            |point| world_to_local.transform_point2(point),
            &mut self.queue,
        );

        let mut report = TickReport::default();
        while let Some(event) = self.queue.pop() {
            report.events += 1;
            let stroke = match event.kind {
                ContactEventKind::Hole(point) => self.engine.erase_hole(point),
                ContactEventKind::Line { from, to } => self.engine.erase_line(from, to),
                ContactEventKind::Start(_) | ContactEventKind::End => continue,
            };
            if stroke.aborted {
                debug!("Contact {:?}: segment aborted", event.contact);
            }
            report.stroke.merge(stroke);
        }

        report.changed = self.engine.paths().generation() != generation;
        report
    }

    /// Form zurücksetzen und alle Kontakte vergessen.
    pub fn reset(&mut self) {
        self.tracker.reset();
        self.queue.clear();
        self.engine.reset();
    }

    pub fn engine(&self) -> &ErosionEngine<D> {
        &self.engine
    }

    pub fn paths(&self) -> &ColliderPathSet {
        self.engine.paths()
    }

    pub fn tracker(&self) -> &ContactTracker {
        &self.tracker
    }
}
