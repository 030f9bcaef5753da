use serde::{Deserialize, Serialize};

use crate::vocab::{AnswerField, VocabularyEntry};

/// When typed input gets checked against the answer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Every keystroke is checked; an exact match wins without Enter.
    Live,
    /// Typing is free; only Enter checks the answer.
    #[default]
    Submit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Nothing to judge yet.
    Continuing,
    CorrectSoFar,
    Mismatch,
    Complete,
}

/// Checks typed input against one side of an entry, picked by `basis`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Validator {
    pub mode: ValidationMode,
    pub basis: AnswerField,
}

impl Validator {
    pub fn new(mode: ValidationMode, basis: AnswerField) -> Self {
        Self { mode, basis }
    }

    /// The text the player has to type for `word`.
    pub fn target<'a>(&self, word: &'a VocabularyEntry) -> &'a str {
        word.answer(self.basis)
    }

    pub fn on_keystroke(&self, word: &VocabularyEntry, value: &str) -> Verdict {
        match self.mode {
            ValidationMode::Live => verdict(self.target(word), value),
            ValidationMode::Submit => Verdict::Continuing,
        }
    }

    pub fn on_submit(&self, word: &VocabularyEntry, value: &str) -> Verdict {
        if normalize(value) == normalize(self.target(word)) {
            Verdict::Complete
        } else {
            Verdict::Mismatch
        }
    }
}

/// Case-insensitive prefix comparison of `value` against `target`.
pub fn verdict(target: &str, value: &str) -> Verdict {
    if value.is_empty() {
        return Verdict::Continuing;
    }
    let target = normalize(target);
    let value = normalize(value);
    if value == target {
        Verdict::Complete
    } else if target.starts_with(&value) {
        Verdict::CorrectSoFar
    } else {
        Verdict::Mismatch
    }
}

fn normalize(s: &str) -> String {
    s.to_lowercase()
}
