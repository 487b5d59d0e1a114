//! Quiz session state machine.
//! Draws random words from the filtered list, checks typed transliterations and
//! tracks what the UI may show or enable for the current word.

use super::VocabularyEntry;
use crate::error::QuizError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Whether the transliteration and arabic script are visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    Hidden,
    Shown,
}

/// Outcome of the answers given for the current word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Validation {
    Unanswered,
    /// Last submission was wrong. Still open for another attempt.
    Incorrect,
    /// Answered correctly; submission and reveal are locked until the next word.
    CorrectLocked,
}

/// Coarse state of the current word as seen by the confirm binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Unanswered,
    Revealed,
    CorrectLocked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
    /// Submission is disabled because the word is already locked.
    Ignored,
}

/// What a single confirm trigger ended up doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmAction {
    Submitted(Verdict),
    Advanced,
}

pub struct QuizSession {
    ledger_path: PathBuf,
    entries: Vec<VocabularyEntry>,
    current_index: usize,
    reveal: RevealState,
    validation: Validation,
    /// Text bound to the answer field.
    pub answer: String,
    rng: StdRng,
}

impl QuizSession {
    /// Starts a session over `entries` and draws the first word.
    pub fn start(
        ledger_path: impl AsRef<Path>,
        entries: Vec<VocabularyEntry>,
    ) -> Result<Self, QuizError> {
        Self::with_rng(ledger_path, entries, StdRng::from_entropy())
    }

    pub fn with_rng(
        ledger_path: impl AsRef<Path>,
        entries: Vec<VocabularyEntry>,
        rng: StdRng,
    ) -> Result<Self, QuizError> {
        if entries.is_empty() {
            return Err(QuizError::EmptySelection);
        }

        let mut session = Self {
            ledger_path: ledger_path.as_ref().to_path_buf(),
            entries,
            current_index: 0,
            reveal: RevealState::Hidden,
            validation: Validation::Unanswered,
            answer: String::new(),
            rng,
        };
        session.next_word();
        Ok(session)
    }

    pub fn current(&self) -> &VocabularyEntry {
        &self.entries[self.current_index]
    }

    pub fn ledger_path(&self) -> &Path {
        &self.ledger_path
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn reveal_state(&self) -> RevealState {
        self.reveal
    }

    pub fn validation(&self) -> Validation {
        self.validation
    }

    pub fn phase(&self) -> Phase {
        match (self.validation, self.reveal) {
            (Validation::CorrectLocked, _) => Phase::CorrectLocked,
            (_, RevealState::Shown) => Phase::Revealed,
            (_, RevealState::Hidden) => Phase::Unanswered,
        }
    }

    pub fn can_submit(&self) -> bool {
        self.validation != Validation::CorrectLocked
    }

    pub fn can_toggle_reveal(&self) -> bool {
        self.validation != Validation::CorrectLocked
    }

    /// Draws a new word uniformly at random (repeats allowed) and resets the
    /// per-word state.
    pub fn next_word(&mut self) {
        self.current_index = self.rng.gen_range(0..self.entries.len());
        self.reveal = RevealState::Hidden;
        self.validation = Validation::Unanswered;
        self.answer.clear();
        debug!(index = self.current_index, english = %self.current().english, "next word");
    }

    /// Compares `text` against the expected transliteration.
    pub fn submit_answer(&mut self, text: &str) -> Verdict {
        if !self.can_submit() {
            return Verdict::Ignored;
        }

        if self.current().accepts(text) {
            self.validation = Validation::CorrectLocked;
            self.reveal = RevealState::Shown;
            Verdict::Correct
        } else {
            self.validation = Validation::Incorrect;
            Verdict::Incorrect
        }
    }

    /// Flips the reveal state. Returns false when locked.
    pub fn toggle_reveal(&mut self) -> bool {
        if !self.can_toggle_reveal() {
            return false;
        }
        self.reveal = match self.reveal {
            RevealState::Hidden => RevealState::Shown,
            RevealState::Shown => RevealState::Hidden,
        };
        true
    }

    /// The return-key binding: submits the answer field while the word is
    /// open, advances to the next word once it is locked.
    pub fn confirm(&mut self) -> ConfirmAction {
        match self.phase() {
            Phase::CorrectLocked => {
                self.next_word();
                ConfirmAction::Advanced
            }
            Phase::Unanswered | Phase::Revealed => {
                let answer = self.answer.clone();
                ConfirmAction::Submitted(self.submit_answer(&answer))
            }
        }
    }

    /// Replaces the transliteration of the current word and returns the entry
    /// as it was before, so the caller can locate its ledger row.
    pub fn amend_transliteration(&mut self, arabic_latin: &str) -> VocabularyEntry {
        let entry = &mut self.entries[self.current_index];
        let previous = entry.clone();
        entry.arabic_latin = arabic_latin.trim().to_string();
        previous
    }

    /// Ends the session, handing back the ledger the tag selector should reopen.
    pub fn return_to_selector(self) -> PathBuf {
        self.ledger_path
    }
}
