//! Note press sources and the short-lived feedback they trigger.
//!
//! Mouse clicks and MIDI messages both reduce to a [`Note`]; the tutor loop
//! sends every note through the same press handler.

use crate::config::{FLASH_DURATION, PULSE_DURATION};
use crate::layout::{Layout, Note};
use crate::typing::Outcome;
use std::collections::HashMap;
use std::time::Instant;

/// Status byte of a note-on message on channel 1.
pub const MIDI_NOTE_ON: u8 = 144;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressSource {
    Mouse,
    Midi,
}

/// Note-on with positive velocity counts as a press; everything else
/// (note-off, zero-velocity note-on, controllers, clock) is dropped.
pub fn note_from_midi(message: &[u8]) -> Option<Note> {
    match message {
        [MIDI_NOTE_ON, note, velocity, ..] if *velocity > 0 => Some(*note),
        _ => None,
    }
}

/// Resolve a click at screen position `(x, y)` against a keyboard drawn
/// with its top-left corner at `origin`.
pub fn note_at_click(layout: &Layout, origin: (u16, u16), x: u16, y: u16) -> Option<Note> {
    let column = x.checked_sub(origin.0)?;
    let row = y.checked_sub(origin.1)?;
    layout.key_at(column, row).map(|k| k.note)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pulse {
    Success,
    Error,
}

/// Pending key flashes and the current phrase-box pulse, each with a deadline.
#[derive(Default)]
pub struct Feedback {
    flashes: HashMap<Note, Instant>,
    pulse: Option<(Pulse, Instant)>,
}

impl Feedback {
    pub fn flash(&mut self, note: Note, now: Instant) {
        self.flashes.insert(note, now + FLASH_DURATION);
    }

    pub fn react(&mut self, outcome: Outcome, now: Instant) {
        let pulse = match outcome {
            Outcome::Correct => Pulse::Success,
            Outcome::Wrong => Pulse::Error,
            Outcome::Ignored | Outcome::Erased => return,
        };
        self.pulse = Some((pulse, now + PULSE_DURATION));
    }

    pub fn is_lit(&self, note: Note, now: Instant) -> bool {
        self.flashes.get(&note).is_some_and(|until| now < *until)
    }

    pub fn pulse(&self, now: Instant) -> Option<Pulse> {
        self.pulse
            .filter(|(_, until)| now < *until)
            .map(|(p, _)| p)
    }

    /// Drop everything past its deadline
    pub fn expire(&mut self, now: Instant) {
        self.flashes.retain(|_, until| now < *until);
        if self.pulse.is_some_and(|(_, until)| now >= until) {
            self.pulse = None;
        }
    }
}
