use crate::input::Pulse;
use crate::layout::{KeyKind, KeySymbol};
use crate::typing::CharStatus;
use crossterm::style::Color;

/// Phrase character color by typing status
pub fn char_color(status: CharStatus) -> Color {
    match status {
        CharStatus::Pending => Color::Grey,
        CharStatus::Correct => Color::Green,
        CharStatus::Wrong => Color::Red,
    }
}

/// Phrase box border: pulse color while one is active
pub fn border_color(pulse: Option<Pulse>) -> Color {
    match pulse {
        Some(Pulse::Success) => Color::Green,
        Some(Pulse::Error) => Color::Red,
        None => Color::DarkGrey,
    }
}

/// Key body and label colors, lit keys drawn bright and bold
pub fn key_colors(kind: KeyKind, symbol: KeySymbol, lit: bool) -> (Color, Color, bool) {
    if lit {
        return (Color::Yellow, Color::Yellow, true);
    }
    match (kind, symbol) {
        (KeyKind::Natural, _) => (Color::White, Color::White, false),
        (KeyKind::Accidental, KeySymbol::Backspace) => (Color::DarkGrey, Color::Magenta, true),
        (KeyKind::Accidental, KeySymbol::Space) => (Color::DarkGrey, Color::Cyan, true),
        (KeyKind::Accidental, _) => (Color::DarkGrey, Color::Cyan, false),
    }
}
