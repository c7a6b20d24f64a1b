//! Initiative tracker
//!
//! Main entry point for the terminal UI.

use std::fs::OpenOptions;
use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};

use it_core::{LogSink, MemoryStorage, RosterStorage, RosterStore, Tracker};
use it_save::{ExportDirSink, JsonFileStorage};
use it_tui::{App, Args, Config, Theme};

fn main() -> io::Result<()> {
    // Parse command-line arguments before terminal setup
    let config = Config::from_args(Args::parse());

    if let Err(e) = init_logging(&config) {
        eprintln!("Logging disabled, cannot open {}: {}", config.log_file.display(), e);
    }

    let storage: Box<dyn RosterStorage> = if config.ephemeral {
        Box::new(MemoryStorage::new())
    } else {
        Box::new(JsonFileStorage::in_dir(&config.data_dir))
    };
    let roster = RosterStore::load(storage);
    info!("starting with {} saved combatants", roster.len());

    let theme = if config.light { Theme::light() } else { Theme::detect() };
    let mut app = App::new(
        Tracker::new(roster),
        ExportDirSink::new(&config.export_dir),
        theme,
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Draw and dispatch events until the user quits
fn run<B, S, L>(terminal: &mut Terminal<B>, app: &mut App<S, L>) -> io::Result<()>
where
    B: Backend,
    S: RosterStorage,
    L: LogSink,
{
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;

            if let Some(intent) = app.handle_event(event) {
                app.execute(intent);
            }

            if app.should_quit() {
                return Ok(());
            }
        }
    }
}

/// Send log records to the configured file; the terminal belongs to the UI
fn init_logging(config: &Config) -> io::Result<()> {
    if let Some(dir) = config.log_file.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    env_logger::Builder::new()
        .filter_level(config.log_level)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
