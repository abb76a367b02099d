use std::env;
use std::path::PathBuf;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::app::App;
use crate::config::resolve_config_path;
use crate::controller::PlaylistController;
use crate::logging;
use crate::media::{AudioPlayer, MediaEvent};
use crate::source::SourceRegistry;

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    if logging::init(&settings.log)? {
        info!(config = ?resolve_config_path(), "allegro starting");
    }

    let args: Vec<PathBuf> = env::args_os().skip(1).map(PathBuf::from).collect();

    let sources = SourceRegistry::new();
    let (event_tx, event_rx) = mpsc::channel::<MediaEvent>();
    let audio_player = AudioPlayer::new(sources.clone(), event_tx)?;
    let mut controller = PlaylistController::new(audio_player, App::new(), sources, &settings);

    startup::load_initial_selection(&mut controller, &settings, &args);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut controller, &event_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    controller.media().quit();
    info!("allegro stopped");

    run_result
}
