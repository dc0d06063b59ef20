use crate::config::{TutorConfig, FRAME_INTERVAL};
use crate::error::{Result, TutorError};
use crate::input::{note_at_click, Feedback, PressSource};
use crate::layout::{Layout, Note};
use crate::leaderboard::{JsonFileStore, KeyValueStore, Leaderboard, Record};
use crate::midi::MidiInput;
use crate::prompt::NamePrompt;
use crate::session::{Phase, Session, SessionEvent};
use crate::terminal::Terminal;
use crate::view::{self, View};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use std::time::{Duration, Instant};

/// A completed timed run. `save_error` is set when the record could not be
/// written to the leaderboard; the record itself is still returned.
#[derive(Debug)]
pub struct Finish {
    pub record: Record,
    pub save_error: Option<TutorError>,
}

/// Why the loop stopped
enum Control {
    Continue,
    Quit,
    Finished(Finish),
}

/// Single entry point for every press, whatever its source.
fn handle_press<S: KeyValueStore>(
    session: &mut Session,
    layout: &Layout,
    feedback: &mut Feedback,
    leaderboard: &mut Leaderboard<S>,
    note: Note,
    source: PressSource,
    now: Instant,
) -> Result<Control> {
    feedback.flash(note, now);
    let press = session.press(layout, note, now);
    feedback.react(press.outcome, now);
    log::trace!("{:?} note {} -> {:?}", source, note, press.outcome);

    match press.event {
        Some(SessionEvent::Finished(record)) => {
            let save_error = leaderboard.append(record.clone()).err();
            Ok(Control::Finished(Finish { record, save_error }))
        }
        Some(SessionEvent::StageLoaded(index)) => {
            log::info!("stage {} loaded", index + 1);
            Ok(Control::Continue)
        }
        Some(SessionEvent::NameRequested) | None => Ok(Control::Continue),
    }
}

fn handle_name_key(session: &mut Session, prompt: &mut NamePrompt, code: KeyCode) {
    match code {
        KeyCode::Char(c) => prompt.push(c),
        KeyCode::Backspace => prompt.pop(),
        KeyCode::Enter => {
            if let Some(name) = prompt.submit() {
                session.submit_name(&name);
            }
        }
        _ => {}
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Run the tutor until the final stage is recorded or the player quits.
/// Returns the finished run, if any.
pub fn run(config: TutorConfig) -> Result<Option<Finish>> {
    let layout = Layout::generate(config.note_start, config.note_end, &config.accidental_offsets)?;
    let mut session = Session::new(config.stages.clone(), config.player_name.clone())?;
    let mut leaderboard = Leaderboard::new(JsonFileStore::open(&config.store_path)?);

    let midi = if config.midi {
        match MidiInput::open(config.midi_port.as_deref()) {
            Ok(midi) => Some(midi),
            Err(e) => {
                log::warn!("MIDI unavailable, mouse only: {}", e);
                None
            }
        }
    } else {
        None
    };
    let midi_status = match &midi {
        Some(m) if !m.port_names().is_empty() => format!("MIDI: {}", m.port_names().join(", ")),
        Some(_) => "MIDI: no ports".to_string(),
        None => "MIDI off".to_string(),
    };

    let mut term = Terminal::new()?;
    let mut feedback = Feedback::default();
    let mut prompt = NamePrompt::default();
    let mut outcome = None;

    'main: loop {
        let frame_start = Instant::now();
        let mut timeout = FRAME_INTERVAL;

        // Drain terminal input until the frame is due
        while let Some(event) = term.next_event(timeout)? {
            let now = Instant::now();
            let control = match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if is_quit(&key) {
                        Control::Quit
                    } else {
                        if session.phase() == Phase::AwaitingName {
                            handle_name_key(&mut session, &mut prompt, key.code);
                        }
                        Control::Continue
                    }
                }
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    let origin = view::keyboard_origin(&layout, term.size());
                    match note_at_click(&layout, origin, mouse.column, mouse.row) {
                        Some(note) => handle_press(
                            &mut session,
                            &layout,
                            &mut feedback,
                            &mut leaderboard,
                            note,
                            PressSource::Mouse,
                            now,
                        )?,
                        None => Control::Continue,
                    }
                }
                Event::Resize(w, h) => {
                    term.resize(w, h);
                    term.clear_screen()?;
                    Control::Continue
                }
                _ => Control::Continue,
            };

            match control {
                Control::Continue => {}
                Control::Quit => break 'main,
                Control::Finished(finish) => {
                    outcome = Some(finish);
                    break 'main;
                }
            }

            timeout = FRAME_INTERVAL.saturating_sub(frame_start.elapsed());
            if timeout == Duration::ZERO {
                break;
            }
        }

        if let Some(midi) = &midi {
            for note in midi.drain() {
                let control = handle_press(
                    &mut session,
                    &layout,
                    &mut feedback,
                    &mut leaderboard,
                    note,
                    PressSource::Midi,
                    Instant::now(),
                )?;
                if let Control::Finished(finish) = control {
                    outcome = Some(finish);
                    break 'main;
                }
            }
        }

        let now = Instant::now();
        feedback.expire(now);
        let frame = View {
            layout: &layout,
            session: &session,
            feedback: &feedback,
            prompt: &prompt,
            midi_status: &midi_status,
        };
        view::draw(&mut term, &frame, now);
        term.present()?;
    }

    Ok(outcome)
}
