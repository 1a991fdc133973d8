// src/input/mod.rs

pub mod contact;
pub mod events;
pub mod frame;

pub use contact::{
    CONTACT_CAPACITY, Contact, ContactId, ContactState, ContactTracker, MAX_TOUCH_COUNT,
    MOUSE_CONTACT, TrackOutcome,
};
pub use events::{ContactEvent, ContactEventKind, EventQueue};
pub use frame::{InputFrame, PointerSample, PointerSource, SamplePhase};
