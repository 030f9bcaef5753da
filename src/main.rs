use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tracing::{error, info};

use typefall::app::App;
use typefall::config::{Config, TimerMode};
use typefall::event::{AppEvent, EventHandler};
use typefall::game::RoundStatus;
use typefall::game::validator::ValidationMode;
use typefall::logging;
use typefall::ui::components::fall_area::FallArea;
use typefall::ui::components::input_box::InputBox;
use typefall::ui::components::progress_bar::TimerBar;
use typefall::ui::components::result_panel::ResultPanel;
use typefall::ui::components::start_panel::StartPanel;
use typefall::ui::layout::{GameLayout, centered_rect};
use typefall::vocab::AnswerField;

#[derive(Parser)]
#[command(name = "typefall", version, about = "Type the falling word before it lands")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Word list (JSON array of vocabulary entries)")]
    corpus: Option<PathBuf>,

    #[arg(short, long, help = "Seconds per round")]
    seconds: Option<u32>,

    #[arg(long, help = "Check every keystroke instead of waiting for Enter")]
    live: bool,

    #[arg(long, help = "Show the English word and type its translation")]
    translate: bool,

    #[arg(long, help = "Whole-second countdown instead of a falling word")]
    countdown: bool,

    #[arg(long, help = "Start each answer with its first letter filled in")]
    seed_first_letter: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if cli.corpus.is_some() {
        config.corpus_path = cli.corpus;
    }
    if let Some(secs) = cli.seconds {
        config.round_secs = secs;
    }
    if cli.live {
        config.validation_mode = ValidationMode::Live;
    }
    if cli.translate {
        config.answer_field = AnswerField::Translation;
    }
    if cli.countdown {
        config.timer_mode = TimerMode::Countdown;
    }
    if cli.seed_first_letter {
        config.seed_first_letter = true;
    }
    config.normalize();

    let _log_guard = logging::init_tracing(&config.log_level);
    info!(theme = %config.theme, "starting typefall");

    let mut app = App::new(config)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Fast enough for a smooth fall; the round clock itself is Instant-based
    let events = EventHandler::new(Duration::from_millis(16));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        error!("{err:?}");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        let now = Instant::now();
        app.tick(now);
        terminal.draw(|frame| render(frame, app, now))?;

        match events.next()? {
            AppEvent::Key(key) => app.handle_key(key, Instant::now()),
            AppEvent::Tick | AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn render(frame: &mut ratatui::Frame, app: &App, now: Instant) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let snapshot = app.snapshot();

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let show_result = snapshot.status.is_finished();
    let layout = GameLayout::new(area, show_result);

    let record = if app.new_record && app.celebrating(now) {
        "  NEW BEST!"
    } else {
        ""
    };
    let header_info = format!(" Score {} | Best {}{record}", snapshot.score, app.best.get());
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " typefall ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            header_info,
            Style::default()
                .fg(if app.celebrating(now) {
                    colors.success()
                } else {
                    colors.header_fg()
                })
                .bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);

    if snapshot.status == RoundStatus::Idle {
        let panel = StartPanel {
            best: app.best.get(),
            corpus_size: app.corpus_size,
            theme: app.theme,
        };
        frame.render_widget(panel, centered_rect(60, 60, layout.field));
    } else {
        let field = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(layout.field);
        frame.render_widget(FallArea::new(&snapshot, app.theme), field[0]);
        if let Some(value) = snapshot.timer {
            frame.render_widget(TimerBar::new(value, app.theme), field[1]);
        }
    }

    if let (Some(result_area), Some(word)) = (layout.result, snapshot.current_word.as_ref()) {
        let passed = snapshot.status == RoundStatus::Win;
        frame.render_widget(ResultPanel::new(word, passed, app.theme), result_area);
    }

    frame.render_widget(InputBox::new(&snapshot, app.theme, now), layout.input);

    let hints = match snapshot.status {
        RoundStatus::Idle => " [Enter] Start  [Esc] Quit ",
        RoundStatus::Active => " [Enter] Submit  [Backspace] Delete  [Esc] Quit ",
        RoundStatus::Win => " [Enter] Next word  [Esc] Quit ",
        RoundStatus::Loss => " [Enter] Play again  [Esc] Quit ",
        RoundStatus::Assigning => " [Esc] Quit ",
    };
    let footer = Paragraph::new(Line::from(Span::styled(
        hints,
        Style::default().fg(colors.muted()),
    )));
    frame.render_widget(footer, layout.footer);
}
