// src/input/contact.rs

use super::{
    events::{ContactEventKind, EventQueue},
    frame::{InputFrame, PointerSample, PointerSource, SamplePhase},
};
use crate::math::utils::constants::EPSILON;
use bevy::log::debug;
use bevy::math::Vec2;

/// Maximal gleichzeitig verfolgte Finger
pub const MAX_TOUCH_COUNT: usize = 10;
/// Reservierter Zusatz-Slot; belegt von der Maus
pub const RESERVE_CONTACT_COUNT: usize = 1;
pub const CONTACT_CAPACITY: usize = MAX_TOUCH_COUNT + RESERVE_CONTACT_COUNT;
/// Die Maus liegt im reservierten Slot hinter den Fingern
pub const MOUSE_CONTACT: ContactId = ContactId(MAX_TOUCH_COUNT);

/// Index in die Kontakttabelle, immer `< CONTACT_CAPACITY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId(pub usize);

impl ContactId {
    /// Ordnet eine Quelle ihrem Slot zu. Touch-IDs ab `MAX_TOUCH_COUNT` liefern `None`.
    pub fn from_source(source: PointerSource) -> Option<Self> {
        match source {
            PointerSource::Mouse => Some(MOUSE_CONTACT),
            PointerSource::Touch(id) => usize::try_from(id)
                .ok()
                .filter(|id| *id < MAX_TOUCH_COUNT)
                .map(ContactId),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContactState {
    #[default]
    Idle,
    /// Gedrückt, noch kein gehaltenes Sample
    Started,
    Dragging,
    /// Im letzten Poll losgelassen; wird beim nächsten Poll wieder `Idle`
    Ended,
}

/// Zustand eines einzelnen Kontakts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Contact {
    state: ContactState,
    last_position: Option<Vec2>,
}

impl Contact {
    pub fn state(&self) -> ContactState {
        self.state
    }

    pub fn last_position(&self) -> Option<Vec2> {
        self.last_position
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, ContactState::Started | ContactState::Dragging)
    }

    /// Drücken: Start = Ende = abgebildete Position.
    fn press(&mut self, position: Vec2) -> ContactEventKind {
        self.state = ContactState::Started;
        self.last_position = Some(position);
        ContactEventKind::Start(position)
    }

    /// Gehaltenes Sample: das alte Ende wird zum Start, die neue Position zum Ende.
    fn advance(&mut self, position: Vec2) -> Option<ContactEventKind> {
        let start = self.last_position?;
        if !self.is_active() {
            return None;
        }

        self.state = ContactState::Dragging;
        self.last_position = Some(position);
        if start.abs_diff_eq(position, EPSILON) {
            Some(ContactEventKind::Hole(position))
        } else {
            Some(ContactEventKind::Line {
                from: start,
                to: position,
            })
        }
    }

    /// Loslassen oder Abbruch: die gemerkte Position wird verworfen.
    fn release(&mut self) -> Option<ContactEventKind> {
        let was_active = self.is_active();
        self.last_position = None;
        if was_active {
            self.state = ContactState::Ended;
            Some(ContactEventKind::End)
        } else {
            None
        }
    }
}

/// Ergebnis der Verarbeitung eines einzelnen Samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackOutcome {
    Emitted(ContactEventKind),
    /// Sample ohne Wirkung (z.B. Halten ohne vorheriges Drücken)
    Silent,
    /// Kontakt außerhalb der Kapazität
    Ignored,
}

/// Zustandsautomat für Maus und bis zu zehn Finger.
///
/// `poll` verarbeitet einen Roh-Frame und schreibt pro Sample höchstens ein
/// Ereignis in die Warteschlange. Touch hat Vorrang vor der Maus.
#[derive(Debug, Clone, Default)]
pub struct ContactTracker {
    contacts: [Contact; CONTACT_CAPACITY],
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Verarbeitet einen Frame. `map` bildet Geräte- auf lokale Koordinaten ab.
    /// Gibt die Anzahl erzeugter Ereignisse zurück.
    pub fn poll<F>(&mut self, frame: &InputFrame, map: F, queue: &mut EventQueue) -> usize
    where
        F: Fn(Vec2) -> Vec2,
    {
        for contact in self.contacts.iter_mut() {
            if contact.state == ContactState::Ended {
                contact.state = ContactState::Idle;
            }
        }

        let touch_priority = frame.has_touch();
        let mut emitted = 0;
        for sample in &frame.samples {
            // Loslassen der Maus wird auch unter Touch-Vorrang verarbeitet
            if touch_priority && !sample.is_touch() && !sample.phase.is_finished() {
                continue;
            }
            match self.track(sample, &map) {
                TrackOutcome::Emitted(kind) => {
                    if let Some(id) = ContactId::from_source(sample.source) {
                        queue.push(id, kind);
                        emitted += 1;
                    }
                }
                TrackOutcome::Ignored => {
                    debug!("Ignoring sample from {:?}: contact table is full", sample.source);
                }
                TrackOutcome::Silent => {}
            }
        }
        emitted
    }

    /// Verarbeitet ein einzelnes Sample ohne Touch-Vorrang.
    pub fn track<F>(&mut self, sample: &PointerSample, map: &F) -> TrackOutcome
    where
        F: Fn(Vec2) -> Vec2,
    {
        let Some(id) = ContactId::from_source(sample.source) else {
            return TrackOutcome::Ignored;
        };
        let Some(contact) = self.contacts.get_mut(id.0) else {
            return TrackOutcome::Ignored;
        };

        let kind = match sample.phase {
            SamplePhase::Began => Some(contact.press(map(sample.position))),
            phase if phase.is_held() => contact.advance(map(sample.position)),
            _ => contact.release(),
        };

        kind.map_or(TrackOutcome::Silent, TrackOutcome::Emitted)
    }

    pub fn contact(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.get(id.0)
    }

    pub fn active_count(&self) -> usize {
        self.contacts.iter().filter(|c| c.is_active()).count()
    }

    pub fn is_any_active(&self) -> bool {
        self.contacts.iter().any(Contact::is_active)
    }

    /// Vergisst alle Kontakte.
    pub fn reset(&mut self) {
        self.contacts = Default::default();
    }
}
