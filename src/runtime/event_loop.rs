use std::error::Error;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Input, Mode};
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::mpris_sync::{Published, update_mpris};
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Last track/playback pair pushed to MPRIS.
    pub last_published: Published,
}

impl EventLoopState {
    pub fn new(app: &App) -> Self {
        Self {
            pending_gg: false,
            last_published: Published::of(app),
        }
    }
}

/// Main terminal event loop: ticks playback, draws, drains MPRIS commands and
/// handles keys. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn Error>> {
    let poll = Duration::from_millis(settings.audio.tick_ms);

    loop {
        app.tick();

        // Covers changes from keys, media keys and end of track alike.
        let now = Published::of(app);
        if now != state.last_published {
            update_mpris(mpris, app);
            state.last_published = now;
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, app) {
                return Ok(());
            }
        }

        if event::poll(poll)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, control_tx, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply a command from MPRIS (or a key routed through the same channel).
/// Returns `true` when the app should quit.
pub fn handle_control_cmd(cmd: ControlCmd, app: &mut App) -> bool {
    tracing::debug!(?cmd, "control command");
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => app.play(),
        ControlCmd::Pause | ControlCmd::Stop => app.pause(),
        ControlCmd::PlayPause => app.toggle_playback(),
        ControlCmd::Next => app.next(),
        ControlCmd::Prev => app.prev(),
    }
    false
}

/// Initial text of the add-music prompt.
fn prompt_start(settings: &config::Settings) -> String {
    let dir = settings
        .library
        .start_path
        .clone()
        .or_else(|| std::env::current_dir().ok())
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    if dir.is_empty() || dir.ends_with('/') {
        dir
    } else {
        format!("{dir}/")
    }
}

/// Returns `true` when the app should quit.
pub fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    control_tx: &mpsc::Sender<ControlCmd>,
    state: &mut EventLoopState,
) -> bool {
    app.clear_status();
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match app.input {
        Input::AddMusic(_) => {
            state.pending_gg = false;
            match key.code {
                KeyCode::Esc => app.blur(),
                KeyCode::Enter => app.submit_add_music(),
                KeyCode::Backspace => app.pop_input_char(),
                KeyCode::Char(c) if !ctrl && !c.is_control() => app.push_input_char(c),
                _ => {}
            }
            return false;
        }
        Input::YoutubeUrl => {
            state.pending_gg = false;
            match key.code {
                KeyCode::Esc | KeyCode::Enter => app.blur(),
                KeyCode::Backspace => app.pop_input_char(),
                KeyCode::Char('u') if ctrl => app.clear_url(),
                KeyCode::Char(c) if !ctrl && !c.is_control() => app.push_input_char(c),
                _ => {}
            }
            return false;
        }
        Input::None => {}
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('c') if ctrl => return true,
        KeyCode::Tab => app.toggle_mode(),
        KeyCode::F(1) => app.set_mode(Mode::Local),
        KeyCode::F(2) => app.set_mode(Mode::YouTube),
        _ => match app.mode {
            Mode::Local => handle_local_key(key, settings, app, control_tx, state),
            Mode::YouTube => {
                if matches!(
                    key.code,
                    KeyCode::Char('i') | KeyCode::Char('/') | KeyCode::Enter
                ) {
                    app.focus_url();
                }
            }
        },
    }

    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }
    false
}

fn handle_local_key(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    control_tx: &mpsc::Sender<ControlCmd>,
    state: &mut EventLoopState,
) {
    let seek_step = settings.controls.seek_step_percent;
    let volume_step = settings.controls.volume_step;

    match key.code {
        KeyCode::Char('a') => app.open_add_music(prompt_start(settings)),
        KeyCode::Char('j') | KeyCode::Down => app.cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => app.cursor_up(),
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.cursor_top();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => app.cursor_bottom(),
        KeyCode::Enter => app.play_cursor(),
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('l') | KeyCode::Char('n') => {
            let _ = control_tx.send(ControlCmd::Next);
        }
        KeyCode::Char('h') => {
            let _ = control_tx.send(ControlCmd::Prev);
        }
        KeyCode::Char('L') => app.seek_by(seek_step),
        KeyCode::Char('H') => app.seek_by(-seek_step),
        KeyCode::Char(c @ '0'..='9') => {
            if let Some(d) = c.to_digit(10) {
                app.seek(f64::from(d) * 10.0);
            }
        }
        KeyCode::Char('m') => app.toggle_mute(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.adjust_volume(volume_step),
        KeyCode::Char('-') => app.adjust_volume(-volume_step),
        _ => {}
    }
}
