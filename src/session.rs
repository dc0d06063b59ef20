//! Stage sequencing: one owned value holding everything a run mutates.

use crate::error::{Result, TutorError};
use crate::layout::{KeySymbol, Layout, Note};
use crate::leaderboard::{Record, DEFAULT_PLAYER};
use crate::stopwatch::Stopwatch;
use crate::typing::{Outcome, TypingState};
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Typing,
    AwaitingName,
    Finished,
}

/// Stage change caused by a press or name submission.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    StageLoaded(usize),
    NameRequested,
    Finished(Record),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Press {
    pub outcome: Outcome,
    pub event: Option<SessionEvent>,
}

pub struct Session {
    stages: Vec<String>,
    stage: usize,
    typing: TypingState,
    phase: Phase,
    name: Option<String>,
    stopwatch: Stopwatch,
}

impl Session {
    pub fn new(stages: Vec<String>, name: Option<String>) -> Result<Self> {
        let first = stages.first().ok_or(TutorError::NoStage)?;
        let typing = TypingState::new(first);
        let mut session = Self {
            stages,
            stage: 0,
            typing,
            phase: Phase::Typing,
            name,
            stopwatch: Stopwatch::default(),
        };
        session.load_stage(0);
        Ok(session)
    }

    pub fn typing(&self) -> &TypingState {
        &self.typing
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn stage_index(&self) -> usize {
        self.stage
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn is_final_stage(&self) -> bool {
        self.stage + 1 == self.stages.len()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        self.stopwatch.elapsed(now)
    }

    /// Feed one note press. Unmapped notes and presses outside the typing
    /// phase do nothing.
    pub fn press(&mut self, layout: &Layout, note: Note, now: Instant) -> Press {
        let ignored = Press {
            outcome: Outcome::Ignored,
            event: None,
        };
        if self.phase != Phase::Typing {
            return ignored;
        }
        let Some(key) = layout.key(note) else {
            return ignored;
        };

        let keystroke = key.symbol != KeySymbol::Backspace && self.typing.accepts_input();
        if self.is_final_stage() && keystroke && !self.stopwatch.is_running() {
            self.stopwatch.start(now);
        }

        let evaluation = self.typing.evaluate(key.symbol, key.kind);
        let event = if evaluation.completed {
            self.complete_stage(now)
        } else {
            None
        };

        Press {
            outcome: evaluation.outcome,
            event,
        }
    }

    /// Accept the player's name. Blank input is rejected and changes nothing.
    pub fn submit_name(&mut self, input: &str) -> Option<SessionEvent> {
        let name = input.trim();
        if self.phase != Phase::AwaitingName || name.is_empty() {
            return None;
        }
        self.name = Some(name.to_string());
        let last = self.stages.len() - 1;
        self.load_stage(last);
        Some(SessionEvent::StageLoaded(last))
    }

    fn complete_stage(&mut self, now: Instant) -> Option<SessionEvent> {
        log::info!("stage {} complete", self.stage + 1);

        if self.is_final_stage() {
            let elapsed = self.stopwatch.stop(now)?;
            self.phase = Phase::Finished;
            return Some(SessionEvent::Finished(Record {
                name: self.name.clone().unwrap_or_else(|| DEFAULT_PLAYER.to_string()),
                time: elapsed.as_secs_f64(),
            }));
        }

        let next = self.stage + 1;
        if next + 1 == self.stages.len() && self.name.is_none() {
            self.phase = Phase::AwaitingName;
            return Some(SessionEvent::NameRequested);
        }

        self.load_stage(next);
        Some(SessionEvent::StageLoaded(next))
    }

    fn load_stage(&mut self, index: usize) {
        self.stage = index;
        self.typing = TypingState::new(&self.stages[index]);
        self.phase = Phase::Typing;
        if self.is_final_stage() {
            self.stopwatch.reset();
        }
        log::debug!("loaded stage {}: {:?}", index + 1, self.stages[index]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::DEFAULT_ACCIDENTAL_OFFSETS;
    use crate::typing::CharStatus;

    fn layout() -> Layout {
        Layout::generate(36, 96, &DEFAULT_ACCIDENTAL_OFFSETS).unwrap()
    }

    fn note(layout: &Layout, c: char) -> Note {
        let symbol = if c == ' ' {
            KeySymbol::Space
        } else {
            KeySymbol::Char(c.to_ascii_uppercase())
        };
        layout.note_for(symbol).unwrap()
    }

    fn type_phrase(session: &mut Session, layout: &Layout, text: &str, now: Instant) -> Vec<Press> {
        text.chars()
            .map(|c| session.press(layout, note(layout, c), now))
            .collect()
    }

    fn stages() -> Vec<String> {
        ["CAT DOG", "AEROPLANE", "TYPE ME AS FAST AS YOU CAN!"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn empty_stage_list_is_rejected() {
        assert!(matches!(Session::new(Vec::new(), None), Err(TutorError::NoStage)));
    }

    #[test]
    fn completing_first_stage_loads_second() {
        let layout = layout();
        let now = Instant::now();
        let mut session = Session::new(stages(), None).unwrap();

        let presses = type_phrase(&mut session, &layout, "CAT DOG", now);
        assert_eq!(
            presses.last().unwrap().event,
            Some(SessionEvent::StageLoaded(1))
        );
        let completions = presses.iter().filter(|p| p.event.is_some()).count();
        assert_eq!(completions, 1);
        assert_eq!(session.stage_index(), 1);
        assert_eq!(session.typing().cursor(), 0);
        assert!(session
            .typing()
            .status()
            .iter()
            .all(|s| *s == CharStatus::Pending));
    }

    #[test]
    fn second_stage_asks_for_name_then_final_stage_loads() {
        let layout = layout();
        let now = Instant::now();
        let mut session = Session::new(stages(), None).unwrap();
        type_phrase(&mut session, &layout, "CAT DOG", now);

        let presses = type_phrase(&mut session, &layout, "AEROPLANE", now);
        assert_eq!(
            presses.last().unwrap().event,
            Some(SessionEvent::NameRequested)
        );
        assert_eq!(session.phase(), Phase::AwaitingName);

        // Presses wait while the prompt is open.
        let idle = session.press(&layout, note(&layout, 'T'), now);
        assert_eq!(idle.outcome, Outcome::Ignored);

        assert_eq!(session.submit_name("   "), None);
        assert_eq!(session.phase(), Phase::AwaitingName);

        assert_eq!(session.submit_name("  Ada "), Some(SessionEvent::StageLoaded(2)));
        assert_eq!(session.name(), Some("Ada"));
        assert_eq!(session.phase(), Phase::Typing);
        assert!(session.is_final_stage());
    }

    #[test]
    fn known_name_skips_prompt() {
        let layout = layout();
        let now = Instant::now();
        let mut session = Session::new(stages(), Some("Bea".to_string())).unwrap();
        type_phrase(&mut session, &layout, "CAT DOG", now);
        let presses = type_phrase(&mut session, &layout, "AEROPLANE", now);
        assert_eq!(
            presses.last().unwrap().event,
            Some(SessionEvent::StageLoaded(2))
        );
    }

    #[test]
    fn final_stage_records_elapsed_time() {
        let layout = layout();
        let t0 = Instant::now();
        let mut session = Session::new(vec!["AB".into(), "C!".into()], Some("Cal".into())).unwrap();
        type_phrase(&mut session, &layout, "AB", t0);
        assert!(session.is_final_stage());
        assert_eq!(session.elapsed(t0 + Duration::from_secs(3)), Duration::ZERO);

        let start = t0 + Duration::from_secs(1);
        session.press(&layout, note(&layout, 'C'), start);
        let end = start + Duration::from_millis(2500);
        let last = session.press(&layout, layout.note_for(KeySymbol::Char('!')).unwrap(), end);

        assert_eq!(
            last.event,
            Some(SessionEvent::Finished(Record {
                name: "Cal".into(),
                time: 2.5,
            }))
        );
        assert_eq!(session.phase(), Phase::Finished);
        assert_eq!(
            session.press(&layout, note(&layout, 'A'), end).outcome,
            Outcome::Ignored
        );
    }

    #[test]
    fn backspace_does_not_start_final_timer() {
        let layout = layout();
        let t0 = Instant::now();
        let mut session = Session::new(vec!["AB".into()], None).unwrap();
        let backspace = layout.note_for(KeySymbol::Backspace).unwrap();

        session.press(&layout, backspace, t0);
        assert_eq!(session.elapsed(t0 + Duration::from_secs(1)), Duration::ZERO);

        let start = t0 + Duration::from_secs(2);
        session.press(&layout, note(&layout, 'A'), start);
        let finish = session.press(&layout, note(&layout, 'B'), start + Duration::from_secs(4));
        match finish.event {
            Some(SessionEvent::Finished(record)) => {
                assert_eq!(record.name, DEFAULT_PLAYER);
                assert_eq!(record.time, 4.0);
            }
            other => panic!("expected finish, got {:?}", other),
        }
    }

    #[test]
    fn unmapped_note_is_ignored() {
        let layout = layout();
        let mut session = Session::new(stages(), None).unwrap();
        let press = session.press(&layout, 10, Instant::now());
        assert_eq!(press.outcome, Outcome::Ignored);
        assert_eq!(session.typing().cursor(), 0);
    }

    #[test]
    fn wrong_key_on_final_stage_still_starts_timer() {
        let layout = layout();
        let t0 = Instant::now();
        let mut session = Session::new(vec!["A".into()], None).unwrap();
        let press = session.press(&layout, note(&layout, 'Z'), t0);
        assert_eq!(press.outcome, Outcome::Wrong);
        assert_eq!(
            session.elapsed(t0 + Duration::from_secs(1)),
            Duration::from_secs(1)
        );
    }
}
