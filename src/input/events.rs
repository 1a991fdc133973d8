// src/input/events.rs

use super::contact::ContactId;
use bevy::math::Vec2;
use std::collections::VecDeque;

/// Ereignisart eines Kontakts, Positionen bereits lokal abgebildet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactEventKind {
    /// Kontakt gedrückt. Reine Markierung: gestempelt wird erst beim ersten
    /// gehaltenen Sample (`Hole` oder `Line`)
    Start(Vec2),
    /// Gehaltener Kontakt ohne Bewegung seit dem letzten Sample
    Hole(Vec2),
    /// Bewegung seit dem letzten Sample
    Line { from: Vec2, to: Vec2 },
    /// Loslassen oder Abbruch
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    pub contact: ContactId,
    pub kind: ContactEventKind,
}

/// Explizite Ereignis-Warteschlange zwischen Tracker und Pipeline.
/// Der Produzent schreibt während `poll`, der Konsument leert sie einmal pro Tick.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<ContactEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, contact: ContactId, kind: ContactEventKind) {
        self.events.push_back(ContactEvent { contact, kind });
    }

    pub fn pop(&mut self) -> Option<ContactEvent> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = ContactEvent> + '_ {
        self.events.drain(..)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_is_fifo() {
        let mut queue = EventQueue::new();
        queue.push(ContactId(0), ContactEventKind::Start(Vec2::ZERO));
        queue.push(ContactId(1), ContactEventKind::End);

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop().unwrap().contact, ContactId(0));
        let rest: Vec<_> = queue.drain().collect();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].kind, ContactEventKind::End);
        assert!(queue.is_empty());
    }
}
