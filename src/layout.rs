//! Piano keyboard layout: which notes are playable and what each key types.

use crate::error::{Result, TutorError};

/// MIDI-style note number.
pub type Note = u8;

/// Columns taken by one natural key (separator plus two interior cells).
pub const NATURAL_WIDTH: u16 = 3;
/// Columns taken by one accidental key.
pub const ACCIDENTAL_WIDTH: u16 = 2;
/// Total rows of the drawn keyboard.
pub const KEY_ROWS: u16 = 5;
/// Upper rows where accidentals sit on top of the naturals.
pub const ACCIDENTAL_ROWS: u16 = 3;

/// Pitch classes that are accidentals on a standard piano (C#, D#, F#, G#, A#).
pub const DEFAULT_ACCIDENTAL_OFFSETS: [u8; 5] = [1, 3, 6, 8, 10];

/// Symbols for natural keys, assigned in ascending note order.
pub const NATURAL_SYMBOLS: [char; 36] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '1', '2', '3', '4', '5', '6', '7', '8', '9', '0',
];

/// Symbols for accidental keys, assigned in ascending note order.
/// Blank slots leave the key in place but make it inert.
pub const ACCIDENTAL_SYMBOLS: [KeySymbol; 25] = [
    KeySymbol::Char('.'),
    KeySymbol::Char(','),
    KeySymbol::Char(':'),
    KeySymbol::Char(';'),
    KeySymbol::Char('\''),
    KeySymbol::Char('"'),
    KeySymbol::Char('-'),
    KeySymbol::Char('!'),
    KeySymbol::Char('?'),
    KeySymbol::Char('&'),
    KeySymbol::Space,
    KeySymbol::Blank,
    KeySymbol::Blank,
    KeySymbol::Blank,
    KeySymbol::Blank,
    KeySymbol::Blank,
    KeySymbol::Blank,
    KeySymbol::Blank,
    KeySymbol::Blank,
    KeySymbol::Blank,
    KeySymbol::Blank,
    KeySymbol::Blank,
    KeySymbol::Blank,
    KeySymbol::Blank,
    KeySymbol::Backspace,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyKind {
    Natural,
    Accidental,
}

/// What a key does when pressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeySymbol {
    Char(char),
    Space,
    Backspace,
    Blank,
}

impl KeySymbol {
    /// Character drawn on the key face
    pub fn label(&self) -> char {
        match self {
            KeySymbol::Char(c) => *c,
            KeySymbol::Space => '␣',
            KeySymbol::Backspace => '⤶',
            KeySymbol::Blank => ' ',
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Key {
    pub note: Note,
    pub kind: KeyKind,
    pub symbol: KeySymbol,
    /// Left column on the drawn keyboard. `None` for accidentals that lack a
    /// natural neighbour on either side; those still type but can't be clicked.
    pub column: Option<u16>,
}

/// Generated keyboard, keys kept in ascending note order.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    keys: Vec<Key>,
    naturals: Vec<Note>,
    accidentals: Vec<Note>,
}

impl Layout {
    /// Build the keyboard for `start..=end`.
    ///
    /// A reversed range gives an empty layout. More naturals than
    /// [`NATURAL_SYMBOLS`] is rejected instead of reusing symbols.
    pub fn generate(start: Note, end: Note, accidental_offsets: &[u8]) -> Result<Self> {
        let is_accidental = |note: Note| accidental_offsets.contains(&(note % 12));

        let naturals: Vec<Note> = (start..=end).filter(|&n| !is_accidental(n)).collect();
        if naturals.len() > NATURAL_SYMBOLS.len() {
            return Err(TutorError::AlphabetExhausted {
                naturals: naturals.len(),
                available: NATURAL_SYMBOLS.len(),
            });
        }

        let mut keys = Vec::new();
        let mut accidentals = Vec::new();
        let mut natural_index = 0;

        for note in start..=end {
            if is_accidental(note) {
                let symbol = ACCIDENTAL_SYMBOLS
                    .get(accidentals.len())
                    .copied()
                    .unwrap_or(KeySymbol::Blank);
                let left = naturals.iter().rposition(|&n| n < note);
                let column = match left {
                    Some(i) if i + 1 < naturals.len() => Some(accidental_column(i)),
                    _ => None,
                };
                keys.push(Key {
                    note,
                    kind: KeyKind::Accidental,
                    symbol,
                    column,
                });
                accidentals.push(note);
            } else {
                keys.push(Key {
                    note,
                    kind: KeyKind::Natural,
                    symbol: KeySymbol::Char(NATURAL_SYMBOLS[natural_index]),
                    column: Some(natural_index as u16 * NATURAL_WIDTH),
                });
                natural_index += 1;
            }
        }

        log::debug!(
            "generated layout {}..={}: {} naturals, {} accidentals",
            start,
            end,
            naturals.len(),
            accidentals.len()
        );

        Ok(Self {
            keys,
            naturals,
            accidentals,
        })
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn naturals(&self) -> &[Note] {
        &self.naturals
    }

    pub fn accidentals(&self) -> &[Note] {
        &self.accidentals
    }

    pub fn key(&self, note: Note) -> Option<&Key> {
        self.keys
            .binary_search_by_key(&note, |k| k.note)
            .ok()
            .map(|i| &self.keys[i])
    }

    /// Width of the drawn keyboard in columns
    pub fn width(&self) -> u16 {
        self.naturals.len() as u16 * NATURAL_WIDTH
    }

    /// Hit test in keyboard-local coordinates.
    pub fn key_at(&self, column: u16, row: u16) -> Option<&Key> {
        if row >= KEY_ROWS || column >= self.width() {
            return None;
        }

        if row < ACCIDENTAL_ROWS {
            let hit = self.keys.iter().find(|k| {
                k.kind == KeyKind::Accidental
                    && k.column
                        .is_some_and(|c| column >= c && column < c + ACCIDENTAL_WIDTH)
            });
            if hit.is_some() {
                return hit;
            }
        }

        let index = (column / NATURAL_WIDTH) as usize;
        self.naturals.get(index).and_then(|&n| self.key(n))
    }
}

/// Left column of an accidental centred between naturals `left` and `left + 1`.
fn accidental_column(left: usize) -> u16 {
    let left_center = left as u16 * NATURAL_WIDTH + NATURAL_WIDTH / 2;
    let right_center = left_center + NATURAL_WIDTH;
    // Doubled to keep the half column, rounded half up.
    let doubled = left_center + right_center;
    (doubled + 1 - ACCIDENTAL_WIDTH) / 2
}

#[cfg(test)]
impl Layout {
    pub fn note_for(&self, symbol: KeySymbol) -> Option<Note> {
        self.keys.iter().find(|k| k.symbol == symbol).map(|k| k.note)
    }
}
