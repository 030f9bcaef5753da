use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

use crate::config::Config;
use crate::game::{Game, GameEvent, KeyInput, Snapshot};
use crate::store::best_score::BestScore;
use crate::ui::theme::Theme;
use crate::vocab::Corpus;
use crate::vocab::source::WordSource;

const CELEBRATION: Duration = Duration::from_millis(1200);

pub struct App {
    pub game: Game,
    pub config: Config,
    pub theme: &'static Theme,
    pub best: BestScore,
    pub corpus_size: usize,
    pub should_quit: bool,
    pub celebrate_until: Option<Instant>,
    pub new_record: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let corpus = match &config.corpus_path {
            Some(path) => Corpus::from_path(path)
                .with_context(|| format!("loading word list {}", path.display()))?,
            None => Corpus::bundled().context("loading bundled word list")?,
        };
        info!(words = corpus.len(), "corpus loaded");
        let source = WordSource::new(corpus)?;
        Ok(Self::from_parts(config, source, BestScore::load()))
    }

    pub fn from_parts(config: Config, source: WordSource, best: BestScore) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        let corpus_size = source.len();
        let game = Game::new(source, config.game_settings());

        Self {
            game,
            config,
            theme,
            best,
            corpus_size,
            should_quit: false,
            celebrate_until: None,
            new_record: false,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.game.snapshot()
    }

    pub fn celebrating(&self, now: Instant) -> bool {
        self.celebrate_until.is_some_and(|until| now < until)
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            self.should_quit = true;
            return;
        }
        if let Some(input) = key_input(&key) {
            self.game.handle_key(input, now);
        }
        self.process_events(now);
    }

    pub fn tick(&mut self, now: Instant) {
        self.game.tick(now);
        self.process_events(now);
        if self.celebrate_until.is_some_and(|until| now >= until) {
            self.celebrate_until = None;
        }
    }

    fn process_events(&mut self, now: Instant) {
        for event in self.game.drain_events() {
            match event {
                GameEvent::WordAssigned { word } => {
                    debug!(word = %word.english, "word assigned");
                    self.new_record = false;
                }
                GameEvent::Won { score, .. } => {
                    if self.best.record(score) {
                        self.new_record = true;
                    }
                    self.celebrate_until = Some(now + CELEBRATION);
                }
                GameEvent::Lost { .. } => {
                    self.celebrate_until = None;
                }
                GameEvent::Mismatch => debug!("mismatch"),
            }
        }
    }
}

/// Map a terminal key press to game input; everything else is ignored.
pub fn key_input(key: &KeyEvent) -> Option<KeyInput> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    match key.code {
        KeyCode::Char(ch) => Some(KeyInput::Char(ch)),
        KeyCode::Backspace => Some(KeyInput::Backspace),
        KeyCode::Enter => Some(KeyInput::Enter),
        _ => None,
    }
}
