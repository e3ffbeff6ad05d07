use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::{PlaybackController, RodioOutput};
use crate::mpris::ControlCmd;
use crate::prefs::{MemoryStore, PreferenceStore, Preferences, TomlFileStore};

mod event_loop;
mod logging;
mod mpris_sync;
mod settings;


pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_problem) = settings::load_settings();

    let _log_guard = match logging::init_logging(&settings) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("nexus: logging disabled: {e}");
            None
        }
    };
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");
    if let Some(problem) = &config_problem {
        eprintln!("nexus: {problem}");
        tracing::warn!("{problem}");
    }

    let store: Box<dyn PreferenceStore> = match settings.preferences_path() {
        Some(path) => {
            let store = TomlFileStore::open(path);
            tracing::debug!(path = %store.path().display(), "preference store");
            Box::new(store)
        }
        None => {
            tracing::warn!("no state directory, preferences will not persist");
            Box::new(MemoryStore::new())
        }
    };
    let prefs = Preferences::hydrate(store.as_ref());

    // The only startup failure that stops the app.
    let output = RodioOutput::open_default().inspect_err(|e| tracing::error!("{e}"))?;
    let player = PlaybackController::new(Box::new(output), prefs.volume, prefs.muted);

    let mut app = App::new(
        player,
        store,
        prefs,
        settings.embed.base_url.clone(),
        settings.library.clone(),
    );

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx.clone());
    mpris_sync::update_mpris(&mpris, &app);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = {
        let mut state = event_loop::EventLoopState::new(&app);
        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &mpris,
            &control_tx,
            &control_rx,
            &mut state,
        )
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &run_result {
        tracing::error!("event loop failed: {e}");
    }
    tracing::info!("exiting");
    run_result
}
