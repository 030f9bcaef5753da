use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::game::state::GameSettings;
use crate::game::timer::TimerPolicy;
use crate::game::validator::ValidationMode;
use crate::vocab::AnswerField;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    #[default]
    Fall,
    Countdown,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub corpus_path: Option<PathBuf>,
    #[serde(default)]
    pub answer_field: AnswerField,
    #[serde(default)]
    pub validation_mode: ValidationMode,
    #[serde(default)]
    pub timer_mode: TimerMode,
    #[serde(default = "default_round_secs")]
    pub round_secs: u32,
    #[serde(default = "default_fall_tick_ms")]
    pub fall_tick_ms: u64,
    /// 0 disables auto-advance after a win.
    #[serde(default = "default_auto_advance_ms")]
    pub auto_advance_ms: u64,
    #[serde(default = "default_error_flash_ms")]
    pub error_flash_ms: u64,
    #[serde(default = "default_commit_delay_ms")]
    pub commit_delay_ms: u64,
    #[serde(default = "default_reveal_delay_ms")]
    pub reveal_delay_ms: u64,
    #[serde(default)]
    pub seed_first_letter: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_theme() -> String {
    "paper".to_string()
}
fn default_round_secs() -> u32 {
    10
}
fn default_fall_tick_ms() -> u64 {
    10
}
fn default_auto_advance_ms() -> u64 {
    3000
}
fn default_error_flash_ms() -> u64 {
    400
}
fn default_commit_delay_ms() -> u64 {
    150
}
fn default_reveal_delay_ms() -> u64 {
    100
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            corpus_path: None,
            answer_field: AnswerField::default(),
            validation_mode: ValidationMode::default(),
            timer_mode: TimerMode::default(),
            round_secs: default_round_secs(),
            fall_tick_ms: default_fall_tick_ms(),
            auto_advance_ms: default_auto_advance_ms(),
            error_flash_ms: default_error_flash_ms(),
            commit_delay_ms: default_commit_delay_ms(),
            reveal_delay_ms: default_reveal_delay_ms(),
            seed_first_letter: false,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("typefall")
            .join("config.toml")
    }

    /// Reset values the game cannot run with to their defaults.
    pub fn normalize(&mut self) {
        if self.round_secs == 0 || self.round_secs > 600 {
            self.round_secs = default_round_secs();
        }
        if self.fall_tick_ms == 0 || self.fall_tick_ms > 1000 {
            self.fall_tick_ms = default_fall_tick_ms();
        }
        if self.error_flash_ms > 5000 {
            self.error_flash_ms = default_error_flash_ms();
        }
        if self.commit_delay_ms > 2000 {
            self.commit_delay_ms = default_commit_delay_ms();
        }
        if self.reveal_delay_ms > 2000 {
            self.reveal_delay_ms = default_reveal_delay_ms();
        }
    }

    pub fn game_settings(&self) -> GameSettings {
        let timer = match self.timer_mode {
            TimerMode::Fall => TimerPolicy::Fall {
                duration: Duration::from_secs(self.round_secs as u64),
                tick: Duration::from_millis(self.fall_tick_ms),
            },
            TimerMode::Countdown => TimerPolicy::Countdown {
                secs: self.round_secs,
            },
        };
        GameSettings {
            timer,
            validation: self.validation_mode,
            answer: self.answer_field,
            seed_first_letter: self.seed_first_letter,
            commit_delay: Duration::from_millis(self.commit_delay_ms),
            reveal_delay: Duration::from_millis(self.reveal_delay_ms),
            error_flash: Duration::from_millis(self.error_flash_ms),
            auto_advance: (self.auto_advance_ms > 0)
                .then(|| Duration::from_millis(self.auto_advance_ms)),
        }
    }
}
