use std::time::Instant;

use tracing::{debug, info};

use crate::game::state::{
    GameEvent, GameSettings, KeyInput, RoundState, RoundStatus, Snapshot,
};
use crate::game::timer::{RoundTimer, TimerSignal, TimerValue};
use crate::game::validator::{Validator, Verdict};
use crate::vocab::VocabularyEntry;
use crate::vocab::source::WordSource;

enum Phase {
    Idle,
    Assigning {
        word: VocabularyEntry,
        reset_score: bool,
        commit_at: Instant,
    },
    Active {
        timer: RoundTimer,
        /// Input stays hidden until this passes.
        reveal_at: Option<Instant>,
    },
    Win {
        auto_advance_at: Option<Instant>,
    },
    Loss,
}

/// Scheduled work, in firing order for equal deadlines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Due {
    Commit,
    Reveal,
    ClearError,
    Timeout,
    AutoAdvance,
}

/// The round state machine. All time-dependent calls take the current
/// instant, so the caller owns the clock.
pub struct Game {
    source: WordSource,
    settings: GameSettings,
    validator: Validator,
    phase: Phase,
    round: RoundState,
    error_until: Option<Instant>,
    mistake: bool,
    last_timer: Option<TimerValue>,
    rounds_played: u64,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(source: WordSource, settings: GameSettings) -> Self {
        let validator = Validator::new(settings.validation, settings.answer);
        Self {
            source,
            settings,
            validator,
            phase: Phase::Idle,
            round: RoundState::default(),
            error_until: None,
            mistake: false,
            last_timer: None,
            rounds_played: 0,
            events: Vec::new(),
        }
    }

    pub fn status(&self) -> RoundStatus {
        match self.phase {
            Phase::Idle => RoundStatus::Idle,
            Phase::Assigning { .. } => RoundStatus::Assigning,
            Phase::Active { .. } => RoundStatus::Active,
            Phase::Win { .. } => RoundStatus::Win,
            Phase::Loss => RoundStatus::Loss,
        }
    }

    pub fn score(&self) -> u32 {
        self.round.score
    }

    pub fn rounds_played(&self) -> u64 {
        self.rounds_played
    }

    pub fn current_word(&self) -> Option<&VocabularyEntry> {
        self.round.current_word.as_ref()
    }

    /// True from the moment a new word is requested until its input is revealed.
    pub fn is_assigning(&self) -> bool {
        matches!(
            self.phase,
            Phase::Assigning { .. }
                | Phase::Active {
                    reveal_at: Some(_),
                    ..
                }
        )
    }

    pub fn input_visible(&self) -> bool {
        match self.phase {
            Phase::Active { reveal_at, .. } => reveal_at.is_none(),
            Phase::Win { .. } | Phase::Loss => true,
            Phase::Idle | Phase::Assigning { .. } => false,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let timer = match &self.phase {
            Phase::Active { timer, .. } => Some(timer.value()),
            Phase::Win { .. } | Phase::Loss => self.last_timer,
            Phase::Idle | Phase::Assigning { .. } => None,
        };
        let auto_advance_at = match self.phase {
            Phase::Win { auto_advance_at } => auto_advance_at,
            _ => None,
        };
        Snapshot {
            status: self.status(),
            current_word: self.round.current_word.clone(),
            answer_field: self.validator.basis,
            score: self.round.score,
            timer,
            input_value: self.round.input_value.clone(),
            input_visible: self.input_visible(),
            error_flag: self.error_until.is_some(),
            mistake: self.mistake,
            auto_advance_at,
        }
    }

    /// Take the side effects raised since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn start_game(&mut self, now: Instant) {
        self.tick(now);
        if matches!(self.phase, Phase::Idle) {
            info!("game started");
            self.begin_assign(now, true);
            self.tick(now);
        }
    }

    pub fn next(&mut self, now: Instant) {
        self.tick(now);
        if matches!(self.phase, Phase::Win { .. }) {
            self.begin_assign(now, false);
            self.tick(now);
        }
    }

    pub fn restart(&mut self, now: Instant) {
        self.tick(now);
        if matches!(self.phase, Phase::Loss) {
            self.begin_assign(now, true);
            self.tick(now);
        }
    }

    /// Route one key. Time is brought up to `now` first, so a timeout that is
    /// already due ends the round before this key can count.
    pub fn handle_key(&mut self, key: KeyInput, now: Instant) {
        self.tick(now);

        match self.status() {
            RoundStatus::Idle => {
                if key == KeyInput::Enter {
                    self.start_game(now);
                }
            }
            RoundStatus::Assigning => {
                debug!(?key, "ignored while assigning");
            }
            RoundStatus::Active => {
                if !self.input_visible() {
                    debug!(?key, "ignored before input reveal");
                    return;
                }
                match key {
                    KeyInput::Char(ch) => self.type_char(ch, now),
                    KeyInput::Backspace => self.backspace(now),
                    KeyInput::Enter => self.submit(now),
                }
            }
            RoundStatus::Win => {
                if key == KeyInput::Enter {
                    self.next(now);
                }
            }
            RoundStatus::Loss => {
                if key == KeyInput::Enter {
                    self.restart(now);
                }
            }
        }
    }

    /// Fire every scheduled action due by `now`, oldest first.
    pub fn tick(&mut self, now: Instant) {
        while let Some((at, due)) = self.next_due() {
            if at > now {
                break;
            }
            self.fire(due, at, now);
        }
        if let Phase::Active { timer, .. } = &mut self.phase {
            // Deadline is still ahead, so this only moves the display value
            timer.advance(now);
        }
    }

    fn next_due(&self) -> Option<(Instant, Due)> {
        let mut pending: Vec<(Instant, Due)> = Vec::with_capacity(3);
        match &self.phase {
            Phase::Assigning { commit_at, .. } => pending.push((*commit_at, Due::Commit)),
            Phase::Active { timer, reveal_at } => {
                if let Some(at) = reveal_at {
                    pending.push((*at, Due::Reveal));
                }
                if let Some(at) = self.error_until {
                    pending.push((at, Due::ClearError));
                }
                if let Some(at) = timer.deadline() {
                    pending.push((at, Due::Timeout));
                }
            }
            Phase::Win { auto_advance_at } => {
                if let Some(at) = auto_advance_at {
                    pending.push((*at, Due::AutoAdvance));
                }
            }
            Phase::Idle | Phase::Loss => {}
        }
        pending.into_iter().min()
    }

    /// Run `due`, scheduled for `at` and noticed at `now`. Expiries count from
    /// their deadline; word starts count from when they actually run.
    fn fire(&mut self, due: Due, at: Instant, now: Instant) {
        let started = at.max(now);
        match due {
            Due::Commit => self.commit_assign(started),
            Due::Reveal => {
                if let Phase::Active { reveal_at, .. } = &mut self.phase {
                    *reveal_at = None;
                }
            }
            Due::ClearError => self.error_until = None,
            Due::Timeout => {
                let timed_out = match &mut self.phase {
                    Phase::Active { timer, .. } => timer.advance(at) == TimerSignal::Timeout,
                    _ => false,
                };
                if timed_out {
                    self.lose();
                }
            }
            Due::AutoAdvance => {
                debug!("auto-advancing after win");
                self.begin_assign(started, false);
            }
        }
    }

    fn begin_assign(&mut self, now: Instant, reset_score: bool) {
        if self.is_assigning() {
            debug!("word assignment already in progress");
            return;
        }

        self.stop_timer();
        self.error_until = None;
        self.mistake = false;
        self.round.input_value.clear();

        let word = self.source.next();
        debug!(word = %word.english, reset_score, "assigning word");
        // Replacing the phase drops any pending auto-advance
        self.phase = Phase::Assigning {
            word,
            reset_score,
            commit_at: now + self.settings.commit_delay,
        };
    }

    fn commit_assign(&mut self, at: Instant) {
        let (word, reset_score) = match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Assigning {
                word, reset_score, ..
            } => (word, reset_score),
            other => {
                self.phase = other;
                return;
            }
        };

        if reset_score {
            self.round.score = 0;
        }
        self.round.input_value = if self.settings.seed_first_letter {
            first_letter(self.validator.target(&word))
        } else {
            String::new()
        };
        self.round.current_word = Some(word.clone());
        self.last_timer = None;
        self.rounds_played += 1;

        self.phase = Phase::Active {
            timer: RoundTimer::start(self.settings.timer, at),
            reveal_at: Some(at + self.settings.reveal_delay),
        };
        self.events.push(GameEvent::WordAssigned { word });
    }

    fn type_char(&mut self, ch: char, now: Instant) {
        self.round.input_value.extend(ch.to_lowercase());
        let verdict = self.keystroke_verdict();
        self.apply_keystroke_verdict(verdict, now);
    }

    fn backspace(&mut self, now: Instant) {
        self.round.input_value.pop();
        if self.round.input_value.is_empty() {
            // Nothing left that can be wrong
            self.mistake = false;
            if self.settings.seed_first_letter {
                self.round.input_value = first_letter(self.answer());
            }
        }
        let verdict = self.keystroke_verdict();
        self.apply_keystroke_verdict(verdict, now);
    }

    fn apply_keystroke_verdict(&mut self, verdict: Verdict, now: Instant) {
        match verdict {
            Verdict::Continuing => {}
            Verdict::CorrectSoFar => self.mistake = false,
            Verdict::Mismatch => self.flag_error(now),
            Verdict::Complete => self.win(now),
        }
    }

    fn keystroke_verdict(&self) -> Verdict {
        match &self.round.current_word {
            Some(word) => self.validator.on_keystroke(word, &self.round.input_value),
            None => Verdict::Continuing,
        }
    }

    fn submit(&mut self, now: Instant) {
        let verdict = match &self.round.current_word {
            Some(word) => self.validator.on_submit(word, &self.round.input_value),
            None => Verdict::Mismatch,
        };
        match verdict {
            Verdict::Complete => self.win(now),
            _ => self.flag_error(now),
        }
    }

    fn flag_error(&mut self, now: Instant) {
        self.error_until = Some(now + self.settings.error_flash);
        self.mistake = true;
        self.events.push(GameEvent::Mismatch);
    }

    fn win(&mut self, now: Instant) {
        let Some(word) = self.round.current_word.clone() else {
            return;
        };
        self.stop_timer();
        self.round.score += 1;
        self.error_until = None;
        self.mistake = false;
        self.phase = Phase::Win {
            auto_advance_at: self.settings.auto_advance.map(|d| now + d),
        };
        info!(score = self.round.score, word = %word.english, "round won");
        self.events.push(GameEvent::Won {
            score: self.round.score,
            word,
        });
    }

    fn lose(&mut self) {
        let Some(word) = self.round.current_word.clone() else {
            return;
        };
        self.stop_timer();
        self.error_until = None;
        self.mistake = false;
        self.round.input_value = self.validator.target(&word).to_string();
        self.phase = Phase::Loss;
        info!(score = self.round.score, word = %word.english, "round lost");
        self.events.push(GameEvent::Lost {
            score: self.round.score,
            word,
        });
    }

    /// Stop the active round's timer, keeping its last value for display.
    /// The timer itself is released when the phase is replaced.
    fn stop_timer(&mut self) {
        if let Phase::Active { timer, .. } = &mut self.phase {
            timer.stop();
            self.last_timer = Some(timer.value());
        }
    }

    fn answer(&self) -> &str {
        self.round
            .current_word
            .as_ref()
            .map(|w| self.validator.target(w))
            .unwrap_or("")
    }
}

fn first_letter(answer: &str) -> String {
    answer
        .chars()
        .next()
        .map(|c| c.to_lowercase().collect())
        .unwrap_or_default()
}
