use std::time::{Duration, Instant};

use crate::game::timer::{TimerPolicy, TimerValue};
use crate::game::validator::ValidationMode;
use crate::vocab::{AnswerField, VocabularyEntry};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundStatus {
    Idle,
    /// A new word is being prepared; input and new-word triggers are ignored.
    Assigning,
    Active,
    Win,
    Loss,
}

impl RoundStatus {
    pub fn is_finished(self) -> bool {
        matches!(self, RoundStatus::Win | RoundStatus::Loss)
    }
}

/// Mutable per-session round data. Status lives in the machine's phase.
#[derive(Clone, Debug, Default)]
pub struct RoundState {
    pub current_word: Option<VocabularyEntry>,
    pub score: u32,
    pub input_value: String,
}

/// Key input after the front end has decoded it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Backspace,
    Enter,
}

/// Side effects for the embedding application to act on.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    WordAssigned { word: VocabularyEntry },
    Won { score: u32, word: VocabularyEntry },
    Lost { score: u32, word: VocabularyEntry },
    Mismatch,
}

/// Read-only view handed to the presentation layer after each update.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub status: RoundStatus,
    pub current_word: Option<VocabularyEntry>,
    pub answer_field: AnswerField,
    pub score: u32,
    pub timer: Option<TimerValue>,
    pub input_value: String,
    pub input_visible: bool,
    /// Short error flash after a wrong submit or keystroke.
    pub error_flag: bool,
    /// Set by the last mistake, cleared once input is back on track or the word changes.
    pub mistake: bool,
    pub auto_advance_at: Option<Instant>,
}

impl Snapshot {
    pub fn prompt(&self) -> Option<&str> {
        self.current_word
            .as_ref()
            .map(|w| w.prompt(self.answer_field))
    }

    pub fn answer(&self) -> Option<&str> {
        self.current_word
            .as_ref()
            .map(|w| w.answer(self.answer_field))
    }

    pub fn auto_advance_in(&self, now: Instant) -> Option<Duration> {
        self.auto_advance_at
            .map(|at| at.saturating_duration_since(now))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameSettings {
    pub timer: TimerPolicy,
    pub validation: ValidationMode,
    pub answer: AnswerField,
    pub seed_first_letter: bool,
    /// Delay between taking a word and committing it as the active round.
    pub commit_delay: Duration,
    /// Delay between committing a word and accepting input for it.
    pub reveal_delay: Duration,
    pub error_flash: Duration,
    /// `None` waits for an explicit `next` after a win.
    pub auto_advance: Option<Duration>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            timer: TimerPolicy::Fall {
                duration: Duration::from_secs(10),
                tick: Duration::from_millis(10),
            },
            validation: ValidationMode::Submit,
            answer: AnswerField::English,
            seed_first_letter: false,
            commit_delay: Duration::from_millis(150),
            reveal_delay: Duration::from_millis(100),
            error_flash: Duration::from_millis(400),
            auto_advance: Some(Duration::from_secs(3)),
        }
    }
}
