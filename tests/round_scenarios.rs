use std::time::{Duration, Instant};

use typefall::game::timer::{TimerPolicy, TimerValue};
use typefall::game::{Game, GameEvent, GameSettings, KeyInput, RoundStatus};
use typefall::vocab::source::WordSource;
use typefall::vocab::{Corpus, VocabularyEntry};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn word(english: &str, translation: &str) -> VocabularyEntry {
    VocabularyEntry {
        english: english.to_string(),
        translation: translation.to_string(),
        word_type: "noun".to_string(),
        example: format!("The {english} is here."),
        example_translation: String::new(),
    }
}

fn game_with(words: &[&str], settings: GameSettings) -> Game {
    let corpus = Corpus::new(words.iter().map(|w| word(w, "dịch")).collect()).unwrap();
    Game::new(WordSource::with_seed(corpus, 2024).unwrap(), settings)
}

fn instant_settings() -> GameSettings {
    GameSettings {
        commit_delay: Duration::ZERO,
        reveal_delay: Duration::ZERO,
        ..GameSettings::default()
    }
}

fn type_answer(game: &mut Game, text: &str, now: Instant) {
    for ch in text.chars() {
        game.handle_key(KeyInput::Char(ch), now);
    }
    game.handle_key(KeyInput::Enter, now);
}

fn current_answer(game: &Game) -> String {
    game.current_word().unwrap().english.clone()
}

#[test]
fn correct_submission_wins_the_round() {
    let t0 = Instant::now();
    let mut game = game_with(&["cat"], instant_settings());

    game.start_game(t0);
    assert_eq!(game.status(), RoundStatus::Active);
    assert_eq!(game.current_word().unwrap().english, "cat");

    type_answer(&mut game, "cat", t0 + ms(500));
    assert_eq!(game.status(), RoundStatus::Win);
    assert_eq!(game.score(), 1);
}

#[test]
fn submission_is_case_insensitive() {
    let t0 = Instant::now();
    let mut game = game_with(&["cat"], instant_settings());
    game.start_game(t0);
    type_answer(&mut game, "CaT", t0 + ms(500));
    assert_eq!(game.status(), RoundStatus::Win);
}

#[test]
fn expiry_without_input_loses_and_keeps_score() {
    let t0 = Instant::now();
    let mut game = game_with(&["cat"], instant_settings());
    game.start_game(t0);

    game.tick(t0 + Duration::from_secs(9));
    assert_eq!(game.status(), RoundStatus::Active);

    game.tick(t0 + Duration::from_secs(10));
    assert_eq!(game.status(), RoundStatus::Loss);
    assert_eq!(game.score(), 0);

    let snap = game.snapshot();
    assert_eq!(snap.input_value, "cat");
    assert_eq!(snap.timer, Some(TimerValue::Progress(100.0)));
}

#[test]
fn restart_after_loss_resets_score_and_assigns() {
    let t0 = Instant::now();
    let mut game = game_with(&["cat"], instant_settings());
    game.start_game(t0);

    // Two wins on the single-word list
    type_answer(&mut game, "cat", t0 + ms(100));
    game.next(t0 + ms(200));
    type_answer(&mut game, "cat", t0 + ms(300));
    assert_eq!(game.score(), 2);
    game.next(t0 + ms(400));

    let lost_at = t0 + ms(400) + Duration::from_secs(10);
    game.tick(lost_at);
    assert_eq!(game.status(), RoundStatus::Loss);
    assert_eq!(game.score(), 2);

    game.restart(lost_at + ms(10));
    assert_eq!(game.status(), RoundStatus::Active);
    assert_eq!(game.score(), 0);
    assert_eq!(game.current_word().unwrap().english, "cat");
    assert_eq!(game.snapshot().input_value, "");
}

#[test]
fn manual_next_cancels_pending_auto_advance() {
    let t0 = Instant::now();
    let mut game = game_with(&["cat", "dog", "sun", "map"], GameSettings::default());
    game.start_game(t0);
    game.tick(t0 + ms(150));
    let ready = t0 + ms(250);
    game.tick(ready);

    let answer = current_answer(&game);
    type_answer(&mut game, &answer, ready);
    assert_eq!(game.status(), RoundStatus::Win);
    let auto_at = game.snapshot().auto_advance_at.unwrap();
    assert_eq!(auto_at, ready + Duration::from_secs(3));

    game.next(ready + ms(500));
    game.tick(ready + ms(750));
    assert_eq!(game.status(), RoundStatus::Active);
    assert_eq!(game.score(), 1);
    let second = current_answer(&game);
    assert_ne!(second, answer);
    game.drain_events();

    // The old auto-advance deadline passes without a second assignment
    game.tick(auto_at + ms(1));
    assert_eq!(game.status(), RoundStatus::Active);
    assert_eq!(current_answer(&game), second);
    assert!(
        !game
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::WordAssigned { .. }))
    );
}

#[test]
fn auto_advance_fires_once() {
    let t0 = Instant::now();
    let mut game = game_with(&["cat", "dog", "sun"], instant_settings());
    game.start_game(t0);
    let answer = current_answer(&game);
    type_answer(&mut game, &answer, t0);
    game.drain_events();

    game.tick(t0 + Duration::from_secs(3));
    assert_eq!(game.status(), RoundStatus::Active);
    game.tick(t0 + Duration::from_secs(6));

    let assigned = game
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::WordAssigned { .. }))
        .count();
    assert_eq!(assigned, 1);
    assert_eq!(game.score(), 1);
}

#[test]
fn wrong_submission_flags_error_and_keeps_timer() {
    let t0 = Instant::now();
    let mut game = game_with(&["cat"], instant_settings());
    game.start_game(t0);

    let wrong_at = t0 + Duration::from_secs(4);
    type_answer(&mut game, "cot", wrong_at);
    let snap = game.snapshot();
    assert_eq!(snap.status, RoundStatus::Active);
    assert!(snap.error_flag);
    assert!(snap.mistake);
    assert_eq!(snap.input_value, "cot");
    assert_eq!(snap.timer, Some(TimerValue::Progress(40.0)));

    game.tick(wrong_at + ms(399));
    assert!(game.snapshot().error_flag);
    game.tick(wrong_at + ms(400));
    assert!(!game.snapshot().error_flag);

    // Timer was not reset by the mistake
    game.tick(t0 + Duration::from_secs(10));
    assert_eq!(game.status(), RoundStatus::Loss);
}

#[test]
fn nothing_changes_after_the_round_is_decided() {
    let t0 = Instant::now();
    let mut game = game_with(&["cat", "dog"], instant_settings());
    game.start_game(t0);
    game.tick(t0 + Duration::from_secs(10));
    assert_eq!(game.status(), RoundStatus::Loss);
    let frozen = game.snapshot();

    let later = t0 + Duration::from_secs(11);
    for key in [KeyInput::Char('x'), KeyInput::Backspace] {
        game.handle_key(key, later);
    }
    game.next(later);
    game.start_game(later);
    game.tick(later + Duration::from_secs(60));
    assert_eq!(game.snapshot(), frozen);
}

#[test]
fn score_only_resets_on_restart() {
    let t0 = Instant::now();
    let mut game = game_with(&["cat", "dog", "sun"], instant_settings());
    game.start_game(t0);

    let mut now = t0;
    for expected in 1..=3 {
        let answer = current_answer(&game);
        type_answer(&mut game, &answer, now);
        assert_eq!(game.score(), expected);
        now += ms(100);
        game.next(now);
        assert_eq!(game.score(), expected);
    }

    now += Duration::from_secs(10);
    game.tick(now);
    assert_eq!(game.status(), RoundStatus::Loss);
    assert_eq!(game.score(), 3);

    game.handle_key(KeyInput::Enter, now);
    assert_eq!(game.score(), 0);
}

#[test]
fn late_keystroke_loses_to_due_timeout() {
    let t0 = Instant::now();
    let mut game = game_with(&["cat"], instant_settings());
    game.start_game(t0);
    for ch in "ca".chars() {
        game.handle_key(KeyInput::Char(ch), t0 + ms(100));
    }

    game.handle_key(KeyInput::Char('t'), t0 + Duration::from_secs(10));
    assert_eq!(game.status(), RoundStatus::Loss);
    assert_eq!(game.score(), 0);
    assert_eq!(game.snapshot().input_value, "cat");
}

#[test]
fn countdown_policy_reports_whole_seconds() {
    let t0 = Instant::now();
    let settings = GameSettings {
        timer: TimerPolicy::Countdown { secs: 5 },
        ..instant_settings()
    };
    let mut game = game_with(&["cat"], settings);
    game.start_game(t0);
    assert_eq!(
        game.snapshot().timer,
        Some(TimerValue::Remaining { secs: 5, total: 5 })
    );

    game.tick(t0 + ms(2_500));
    assert_eq!(
        game.snapshot().timer,
        Some(TimerValue::Remaining { secs: 3, total: 5 })
    );

    game.tick(t0 + Duration::from_secs(5));
    assert_eq!(game.status(), RoundStatus::Loss);
}

#[test]
fn word_sequence_covers_corpus_before_repeating() {
    let t0 = Instant::now();
    let words = ["cat", "dog", "sun", "map", "cup"];
    let mut game = game_with(&words, instant_settings());
    game.start_game(t0);

    let mut seen = Vec::new();
    let mut now = t0;
    for _ in 0..words.len() {
        let answer = current_answer(&game);
        seen.push(answer.clone());
        type_answer(&mut game, &answer, now);
        now += ms(10);
        game.next(now);
    }
    seen.sort();
    let mut expected: Vec<String> = words.iter().map(|w| w.to_string()).collect();
    expected.sort();
    assert_eq!(seen, expected);
}

#[test]
fn resuming_after_a_stall_in_win_starts_a_fresh_round() {
    let t0 = Instant::now();
    let mut game = game_with(&["cat", "dog", "sun"], instant_settings());
    game.start_game(t0);
    let answer = current_answer(&game);
    type_answer(&mut game, &answer, t0 + ms(100));
    assert_eq!(game.status(), RoundStatus::Win);

    let resumed = t0 + Duration::from_secs(20);
    game.tick(resumed);
    assert_eq!(game.status(), RoundStatus::Active);
    assert_eq!(game.score(), 1);
    assert_eq!(game.snapshot().timer, Some(TimerValue::Progress(0.0)));

    let next = current_answer(&game);
    type_answer(&mut game, &next, resumed + Duration::from_secs(2));
    assert_eq!(game.status(), RoundStatus::Win);
    assert_eq!(game.score(), 2);
}
