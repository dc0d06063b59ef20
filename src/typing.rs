//! Cursor and per-character correctness for one target phrase.

use crate::layout::{KeyKind, KeySymbol};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharStatus {
    Pending,
    Correct,
    Wrong,
}

/// What a single press did to the phrase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Ignored,
    Erased,
    Correct,
    Wrong,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub outcome: Outcome,
    /// Set on the press that made every character correct.
    pub completed: bool,
}

impl Evaluation {
    fn of(outcome: Outcome) -> Self {
        Self {
            outcome,
            completed: false,
        }
    }
}

/// Typing progress through a phrase.
///
/// A wrong character still advances the cursor and freezes input; only
/// backspace moves back over it and unfreezes.
#[derive(Clone, Debug)]
pub struct TypingState {
    phrase: Vec<char>,
    status: Vec<CharStatus>,
    cursor: usize,
    frozen: bool,
}

impl TypingState {
    pub fn new(phrase: &str) -> Self {
        let phrase: Vec<char> = phrase.chars().collect();
        let status = vec![CharStatus::Pending; phrase.len()];
        Self {
            phrase,
            status,
            cursor: 0,
            frozen: false,
        }
    }

    pub fn phrase(&self) -> &[char] {
        &self.phrase
    }

    pub fn status(&self) -> &[CharStatus] {
        &self.status
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// True when a non-backspace press would be evaluated.
    pub fn accepts_input(&self) -> bool {
        !self.frozen && self.cursor < self.phrase.len()
    }

    pub fn is_complete(&self) -> bool {
        self.status.iter().all(|s| *s == CharStatus::Correct)
    }

    pub fn evaluate(&mut self, symbol: KeySymbol, kind: KeyKind) -> Evaluation {
        if symbol == KeySymbol::Backspace {
            if self.cursor == 0 {
                return Evaluation::of(Outcome::Ignored);
            }
            self.cursor -= 1;
            self.status[self.cursor] = CharStatus::Pending;
            self.frozen = false;
            return Evaluation::of(Outcome::Erased);
        }

        if !self.accepts_input() {
            return Evaluation::of(Outcome::Ignored);
        }

        let target = self.phrase[self.cursor];
        let matched = match (kind, symbol) {
            (_, KeySymbol::Blank) | (_, KeySymbol::Backspace) => {
                return Evaluation::of(Outcome::Ignored);
            }
            (KeyKind::Natural, KeySymbol::Char(c)) => c.to_uppercase().eq(target.to_uppercase()),
            (_, KeySymbol::Space) => target == ' ',
            (KeyKind::Accidental, KeySymbol::Char(c)) => c == target,
        };

        let outcome = if matched {
            self.status[self.cursor] = CharStatus::Correct;
            Outcome::Correct
        } else {
            self.status[self.cursor] = CharStatus::Wrong;
            self.frozen = true;
            Outcome::Wrong
        };
        self.cursor += 1;

        Evaluation {
            outcome,
            completed: outcome == Outcome::Correct && self.is_complete(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CharStatus::{Correct, Pending, Wrong};

    fn natural(c: char) -> (KeySymbol, KeyKind) {
        (KeySymbol::Char(c), KeyKind::Natural)
    }

    fn press(state: &mut TypingState, (symbol, kind): (KeySymbol, KeyKind)) -> Evaluation {
        state.evaluate(symbol, kind)
    }

    const BACKSPACE: (KeySymbol, KeyKind) = (KeySymbol::Backspace, KeyKind::Accidental);
    const SPACE: (KeySymbol, KeyKind) = (KeySymbol::Space, KeyKind::Accidental);

    #[test]
    fn wrong_press_freezes_until_backspace() {
        let mut state = TypingState::new("AB");

        assert_eq!(press(&mut state, natural('A')).outcome, Outcome::Correct);
        assert_eq!(state.status(), &[Correct, Pending]);
        assert_eq!(state.cursor(), 1);

        assert_eq!(press(&mut state, natural('X')).outcome, Outcome::Wrong);
        assert_eq!(state.status(), &[Correct, Wrong]);
        assert_eq!(state.cursor(), 2);
        assert!(state.is_frozen());

        assert_eq!(press(&mut state, natural('B')).outcome, Outcome::Ignored);
        assert_eq!(state.status(), &[Correct, Wrong]);
        assert_eq!(state.cursor(), 2);

        assert_eq!(press(&mut state, BACKSPACE).outcome, Outcome::Erased);
        assert_eq!(state.status(), &[Correct, Pending]);
        assert_eq!(state.cursor(), 1);
        assert!(!state.is_frozen());

        let last = press(&mut state, natural('B'));
        assert_eq!(last.outcome, Outcome::Correct);
        assert!(last.completed);
        assert_eq!(state.status(), &[Correct, Correct]);
        assert_eq!(state.cursor(), 2);
    }

    #[test]
    fn backspace_at_start_changes_nothing() {
        let mut state = TypingState::new("CAT");
        assert_eq!(press(&mut state, BACKSPACE).outcome, Outcome::Ignored);
        assert_eq!(state.cursor(), 0);
        assert_eq!(state.status(), &[Pending, Pending, Pending]);
        assert!(!state.is_frozen());
    }

    #[test]
    fn naturals_compare_case_insensitively() {
        let mut upper = TypingState::new("A");
        assert_eq!(press(&mut upper, natural('a')).outcome, Outcome::Correct);

        let mut lower = TypingState::new("a");
        assert_eq!(press(&mut lower, natural('A')).outcome, Outcome::Correct);
    }

    #[test]
    fn accidentals_compare_exactly() {
        let mut state = TypingState::new("A B!");
        press(&mut state, natural('A'));
        assert_eq!(press(&mut state, SPACE).outcome, Outcome::Correct);
        press(&mut state, natural('B'));
        let bang = (KeySymbol::Char('!'), KeyKind::Accidental);
        let done = press(&mut state, bang);
        assert_eq!(done.outcome, Outcome::Correct);
        assert!(done.completed);
    }

    #[test]
    fn space_key_only_matches_space() {
        let mut state = TypingState::new("A");
        assert_eq!(press(&mut state, SPACE).outcome, Outcome::Wrong);
        assert!(state.is_frozen());
    }

    #[test]
    fn blank_key_is_inert() {
        let mut state = TypingState::new("A");
        let blank = (KeySymbol::Blank, KeyKind::Accidental);
        assert_eq!(press(&mut state, blank).outcome, Outcome::Ignored);
        assert_eq!(state.cursor(), 0);
        assert!(!state.is_frozen());
    }

    #[test]
    fn presses_past_the_end_are_ignored() {
        let mut state = TypingState::new("A");
        assert!(press(&mut state, natural('A')).completed);
        assert_eq!(press(&mut state, natural('A')).outcome, Outcome::Ignored);
        assert_eq!(state.cursor(), 1);
    }

    #[test]
    fn cursor_counts_leading_evaluated_characters() {
        let mut state = TypingState::new("DOG CAT");
        let presses = [
            natural('D'),
            natural('O'),
            natural('Q'),
            natural('G'),
            BACKSPACE,
            BACKSPACE,
            BACKSPACE,
            BACKSPACE,
            natural('D'),
            SPACE,
        ];
        for p in presses {
            press(&mut state, p);
            let evaluated = state
                .status()
                .iter()
                .take_while(|s| **s != Pending)
                .count();
            assert_eq!(state.cursor(), evaluated);
            assert!(state.cursor() <= state.phrase().len());
            let wrong = state.status().iter().filter(|s| **s == Wrong).count();
            assert!(wrong <= 1);
            assert_eq!(wrong == 1, state.is_frozen());
        }
        assert_eq!(state.status()[..2], [Correct, Wrong]);
    }
}
