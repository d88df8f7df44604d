use std::io;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use flashquote_core::{
    app::{ReaderApp, ReaderConfig, TickResult},
    content::{QuoteSource, StaticQuoteSource},
    settings::{PersistedSettings, SettingsStore, resolve_wpm},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[path = "main/fetch.rs"]
mod fetch;
#[path = "main/render.rs"]
mod render;
#[path = "main/storage.rs"]
mod storage;
#[path = "main/term_input.rs"]
mod term_input;

use fetch::{HttpQuoteSource, QUOTES_ENDPOINT};
use storage::JsonSettingsStore;
use term_input::TermInput;

const INPUT_POLL: Duration = Duration::from_millis(10);

#[derive(Debug, Parser)]
#[command(name = "flashquote", about = "Flash quotes one word at a time")]
struct Cli {
    /// Reading rate in words per minute. Multiples of 50, up to 1000.
    #[arg(long)]
    wpm: Option<i64>,

    /// Quote endpoint answering with a JSON array of strings.
    #[arg(long, default_value = QUOTES_ENDPOINT)]
    endpoint: String,

    /// Read from the built-in quote list instead of the network.
    #[arg(long)]
    offline: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut store = JsonSettingsStore::at_default_location();
    if store.is_none() {
        warn!("no config directory found, settings will not persist");
    }

    let stored = match store.as_mut() {
        Some(store) => store.load().unwrap_or_else(|error| {
            warn!("failed to load settings: {error}");
            None
        }),
        None => None,
    };

    if cli.offline {
        run(StaticQuoteSource::builtin(), cli.wpm, stored, store)
    } else {
        run(HttpQuoteSource::new(&cli.endpoint), cli.wpm, stored, store)
    }
}

fn run<QS>(
    source: QS,
    cli_wpm: Option<i64>,
    stored: Option<PersistedSettings>,
    mut store: Option<JsonSettingsStore>,
) -> anyhow::Result<()>
where
    QS: QuoteSource,
{
    let mut app = ReaderApp::new(source, TermInput::new(), ReaderConfig::default());

    if let Some(stored) = stored {
        app.apply_persisted_settings(&stored);
    }
    if let Some(candidate) = cli_wpm {
        // The flag resolves against whatever the stored pass left effective.
        let resolved = resolve_wpm(candidate, Some(app.wpm()));
        app.apply_persisted_settings(&PersistedSettings::new(resolved));
    }
    persist(&mut store, &app.persisted_settings());

    enable_raw_mode().context("enabling raw mode")?;
    let result = run_in_raw_mode(&mut app, &mut store);
    let _ = disable_raw_mode();
    result
}

/// Raw mode is already on; every exit from here, error paths included, must
/// leave the alternate screen before the caller turns raw mode back off.
fn run_in_raw_mode<QS>(
    app: &mut ReaderApp<QS, TermInput>,
    store: &mut Option<JsonSettingsStore>,
) -> anyhow::Result<()>
where
    QS: QuoteSource,
{
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;

    let result = Terminal::new(CrosstermBackend::new(stdout))
        .context("creating terminal")
        .and_then(|mut terminal| {
            let result = event_loop(&mut terminal, app, store);
            let _ = terminal.show_cursor();
            result
        });

    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    result
}

fn event_loop<QS>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut ReaderApp<QS, TermInput>,
    store: &mut Option<JsonSettingsStore>,
) -> anyhow::Result<()>
where
    QS: QuoteSource,
{
    let epoch = Instant::now();
    let mut force_redraw = true;

    loop {
        let pump = app
            .with_input_mut(|input| input.pump(INPUT_POLL))
            .context("reading terminal events")?;
        if pump.quit {
            return Ok(());
        }
        if pump.redraw {
            force_redraw = true;
        }

        let now_ms = epoch.elapsed().as_millis() as u64;
        let tick = app.tick(now_ms);

        if app.take_settings_dirty() {
            persist(store, &app.persisted_settings());
        }

        if force_redraw || tick == TickResult::RenderRequested {
            force_redraw = false;
            let entry = app.with_input_mut(|input| input.entry().map(str::to_owned));

            let mut draw_result = Ok(());
            app.with_screen(|screen| {
                draw_result = terminal
                    .draw(|frame| render::draw(frame, &screen, entry.as_deref()))
                    .map(|_| ());
            });
            draw_result.context("drawing frame")?;
        }
    }
}

fn persist(store: &mut Option<JsonSettingsStore>, settings: &PersistedSettings) {
    let Some(store) = store.as_mut() else {
        return;
    };

    if let Err(error) = store.save(settings) {
        warn!("failed to save settings: {error}");
    }
}
