//! Draws session state into the terminal buffer. Reads only; never mutates
//! the session.

use crate::colors::{border_color, char_color, key_colors};
use crate::input::{Feedback, Pulse};
use crate::layout::{KeyKind, Layout, ACCIDENTAL_ROWS, ACCIDENTAL_WIDTH, KEY_ROWS, NATURAL_WIDTH};
use crate::overlay::render_box;
use crate::prompt::NamePrompt;
use crate::session::{Phase, Session};
use crate::stopwatch::format_clock;
use crate::terminal::Terminal;
use crate::typing::{CharStatus, TypingState};
use crossterm::style::Color;
use std::time::Instant;

const TITLE_ROW: u16 = 0;
const PHRASE_ROW: u16 = 2;
const TIMER_ROW: u16 = 7;
const KEYBOARD_ROW: u16 = 9;
const FOOTER_ROW: u16 = KEYBOARD_ROW + KEY_ROWS + 2;
const CONTENT_HEIGHT: u16 = FOOTER_ROW + 1;

/// Everything one frame needs.
pub struct View<'a> {
    pub layout: &'a Layout,
    pub session: &'a Session,
    pub feedback: &'a Feedback,
    pub prompt: &'a NamePrompt,
    pub midi_status: &'a str,
}

fn content_top(height: u16) -> u16 {
    height.saturating_sub(CONTENT_HEIGHT) / 2
}

/// Screen position of the keyboard's top-left cell.
pub fn keyboard_origin(layout: &Layout, size: (u16, u16)) -> (u16, u16) {
    let (width, height) = size;
    let x = width.saturating_sub(layout.width() + 1) / 2;
    (x, content_top(height) + KEYBOARD_ROW)
}

pub fn draw(term: &mut Terminal, view: &View, now: Instant) {
    term.clear();
    let top = content_top(term.size().1) as i32;
    let session = view.session;

    let mut title = format!(
        "Stage {}/{}",
        session.stage_index() + 1,
        session.stage_count()
    );
    if session.is_final_stage() {
        title.push_str(" · timed");
    }
    if let Some(name) = session.name() {
        title.push_str(&format!(" · {}", name));
    }
    term.set_centered(top + TITLE_ROW as i32, &title, Some(Color::White), true);

    draw_phrase(
        term,
        session.typing(),
        view.feedback.pulse(now),
        top + PHRASE_ROW as i32,
    );

    if session.is_final_stage() {
        let clock = format_clock(session.elapsed(now));
        term.set_centered(top + TIMER_ROW as i32, &clock, Some(Color::Yellow), true);
    }

    let origin = keyboard_origin(view.layout, term.size());
    draw_keyboard(term, view.layout, view.feedback, origin, now);

    let footer = format!(
        "Click a key or play your MIDI keyboard · {} · Esc quits",
        view.midi_status
    );
    term.set_centered(top + FOOTER_ROW as i32, &footer, Some(Color::DarkGrey), false);

    if session.phase() == Phase::AwaitingName {
        render_box(term, &view.prompt.lines(), Color::White, Color::Grey);
    }
}

/// Keyboard alone at the top-left, for print mode
pub fn draw_layout(term: &mut Terminal, layout: &Layout) {
    draw_keyboard(term, layout, &Feedback::default(), (0, 0), Instant::now());
}

/// Phrase box: border, characters two columns apart, cursor marker below.
fn draw_phrase(term: &mut Terminal, typing: &TypingState, pulse: Option<Pulse>, y: i32) {
    let len = typing.phrase().len() as i32;
    let inner = len * 2 + 1;
    let (width, _) = term.size();
    // An error pulse nudges the box sideways.
    let shake = if pulse == Some(Pulse::Error) { 1 } else { 0 };
    let left = (width as i32 - inner - 2) / 2 + shake;
    let border = Some(border_color(pulse));

    term.set(left, y, '┌', border, false);
    term.set(left + inner + 1, y, '┐', border, false);
    term.set(left, y + 3, '└', border, false);
    term.set(left + inner + 1, y + 3, '┘', border, false);
    for x in 1..=inner {
        term.set(left + x, y, '─', border, false);
        term.set(left + x, y + 3, '─', border, false);
    }
    for row in [y + 1, y + 2] {
        term.set(left, row, '│', border, false);
        term.set(left + inner + 1, row, '│', border, false);
    }

    for (i, (&ch, &status)) in typing.phrase().iter().zip(typing.status()).enumerate() {
        let shown = if ch == ' ' && status == CharStatus::Wrong {
            '␣'
        } else {
            ch
        };
        let x = left + 2 + i as i32 * 2;
        term.set(x, y + 1, shown, Some(char_color(status)), status != CharStatus::Pending);
    }

    let cursor_x = left + 2 + typing.cursor() as i32 * 2;
    let cursor_color = if typing.is_frozen() { Color::Red } else { Color::Yellow };
    term.set(cursor_x, y + 2, '^', Some(cursor_color), true);
}

fn draw_keyboard(
    term: &mut Terminal,
    layout: &Layout,
    feedback: &Feedback,
    origin: (u16, u16),
    now: Instant,
) {
    let (ox, oy) = (origin.0 as i32, origin.1 as i32);

    for key in layout.keys().iter().filter(|k| k.kind == KeyKind::Natural) {
        let Some(column) = key.column else { continue };
        let x = ox + column as i32;
        let lit = feedback.is_lit(key.note, now);
        let (body, label, bold) = key_colors(key.kind, key.symbol, lit);

        for row in 0..KEY_ROWS as i32 {
            term.set(x, oy + row, '│', Some(Color::DarkGrey), false);
            if lit {
                for dx in 1..NATURAL_WIDTH as i32 {
                    term.set(x + dx, oy + row, '░', Some(body), false);
                }
            }
        }
        term.set(x + 1, oy + KEY_ROWS as i32 - 1, key.symbol.label(), Some(label), bold);
        term.set(x, oy + KEY_ROWS as i32, '┴', Some(Color::DarkGrey), false);
        for dx in 1..NATURAL_WIDTH as i32 {
            term.set(x + dx, oy + KEY_ROWS as i32, '─', Some(Color::DarkGrey), false);
        }
    }

    let right = ox + layout.width() as i32;
    if !layout.naturals().is_empty() {
        for row in 0..KEY_ROWS as i32 {
            term.set(right, oy + row, '│', Some(Color::DarkGrey), false);
        }
        term.set(right, oy + KEY_ROWS as i32, '┘', Some(Color::DarkGrey), false);
        term.set(ox, oy + KEY_ROWS as i32, '└', Some(Color::DarkGrey), false);
    }

    // Accidentals on top; ones without a column are not drawn.
    for key in layout.keys().iter().filter(|k| k.kind == KeyKind::Accidental) {
        let Some(column) = key.column else { continue };
        let x = ox + column as i32;
        let lit = feedback.is_lit(key.note, now);
        let (body, label, bold) = key_colors(key.kind, key.symbol, lit);

        for row in 0..ACCIDENTAL_ROWS as i32 - 1 {
            for dx in 0..ACCIDENTAL_WIDTH as i32 {
                term.set(x + dx, oy + row, '█', Some(body), false);
            }
        }
        let label_row = oy + ACCIDENTAL_ROWS as i32 - 1;
        term.set(x, label_row, key.symbol.label(), Some(label), bold);
        term.set(x + 1, label_row, ' ', None, false);
    }
}
