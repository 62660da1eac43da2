use clap::{Parser, ValueEnum};
use color_eyre::Result;
use color_eyre::eyre::eyre;
use crossterm::event::{self, Event as CEvent};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use filterbox::config::Config;
use filterbox::core::{FilterCatalog, FilterState};
use filterbox::services::FilterSession;
use filterbox::tui::{App, Theme, ThemeName};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Compose filter chips from a catalog in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable file logging at the given level (overrides RUST_LOG)
    #[arg(long = "logging", value_enum)]
    logging: Option<LogLevel>,
    /// Path to a config file (overrides default config discovery)
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf>,
    /// Catalog file (json, json5, yaml or toml) replacing the configured filters
    #[arg(long = "catalog", value_name = "PATH")]
    catalog: Option<PathBuf>,
    /// JSON snapshot of a filter state to start from
    #[arg(long = "initial-state", value_name = "PATH")]
    initial_state: Option<PathBuf>,
    /// Print the final filter state as JSON on exit
    #[arg(long = "emit-json")]
    emit_json: bool,
    /// Color theme (overrides the config file)
    #[arg(long = "theme", value_enum)]
    theme: Option<ThemeName>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    filterbox::logging::init_with(None, args.logging.map(Into::into))?;

    let cfg = Config::from_path(args.config.as_ref())?;
    let catalog = match &args.catalog {
        Some(path) => FilterCatalog::load_from_file(path)?,
        None => cfg.filters.clone(),
    };
    info!("Starting with {} filters", catalog.len());

    let session = match &args.initial_state {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            let state: FilterState = serde_json::from_str(&text)?;
            FilterSession::with_state(catalog, state)
        }
        None => FilterSession::new(catalog),
    };

    let keybindings = cfg.keybindings();
    for warning in keybindings.validate() {
        warn!("{warning}");
    }
    let mut app = App::new(session);
    app.set_keybindings(keybindings);
    app.set_theme(Theme::from_name(args.theme.unwrap_or(cfg.theme)));

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    if let Err(e) = res {
        error!("Error: {e}");
        return Err(eyre!("{e}"));
    }

    if args.emit_json {
        println!("{}", serde_json::to_string_pretty(app.session().state())?);
    }
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;
        if app.should_quit() {
            debug!("Quit requested");
            break;
        }

        if event::poll(Duration::from_millis(100))? {
            if let CEvent::Key(key_event) = event::read()? {
                app.handle_key_event(key_event)
                    .map_err(|e| anyhow::anyhow!("{e}"))?;
            }
        }
    }
    Ok(())
}
