//! Application model: the composition of library, player and preferences.
//!
//! Every user intent lands on one `App` method. The methods only dispatch to
//! the component that owns the state and persist preferences when they change;
//! rendering reads straight from the components.

use crate::audio::{AudioError, PlaybackController};
use crate::config::LibrarySettings;
use crate::embed::resolve_embed;
use crate::library::{Library, Track, expand_home, scan_selection};
use crate::prefs::{PrefKey, PreferenceStore, Preferences};

use super::mode::Mode;

/// Which text field, if any, currently receives typed characters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Input {
    #[default]
    None,
    /// Add-music prompt with the path typed so far.
    AddMusic(String),
    /// The YouTube URL box.
    YoutubeUrl,
}

/// The main application model.
pub struct App {
    pub mode: Mode,
    pub library: Library,
    pub player: PlaybackController,
    pub youtube_url: String,
    /// Highlighted row of the track list.
    pub cursor: usize,
    pub input: Input,
    /// Transient one-line message (last error or notice).
    pub status: Option<String>,

    prefs: Box<dyn PreferenceStore>,
    embed_base: String,
    library_settings: LibrarySettings,
}

impl App {
    /// Compose the app from a player and a preference store.
    /// `prefs` must already be hydrated from `store`.
    pub fn new(
        player: PlaybackController,
        store: Box<dyn PreferenceStore>,
        prefs: Preferences,
        embed_base: String,
        library_settings: LibrarySettings,
    ) -> Self {
        Self {
            mode: prefs.mode,
            library: Library::new(),
            player,
            youtube_url: String::new(),
            cursor: 0,
            input: Input::None,
            status: None,
            prefs: store,
            embed_base,
            library_settings,
        }
    }

    // ----- mode -----

    pub fn set_mode(&mut self, mode: Mode) {
        self.input = Input::None;
        self.mode = mode;
        self.prefs.write(PrefKey::Mode, mode.as_str());
        tracing::info!(mode = mode.as_str(), "mode changed");
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode.other());
    }

    // ----- volume -----

    pub fn set_volume(&mut self, level: f32) {
        self.player.set_volume(level);
        let stored = self.player.volume();
        self.prefs.write(PrefKey::Volume, &format_volume(stored));
    }

    pub fn adjust_volume(&mut self, delta: f32) {
        self.set_volume(self.player.volume() + delta);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.player.set_muted(muted);
        self.prefs
            .write(PrefKey::Muted, if muted { "true" } else { "false" });
    }

    pub fn toggle_mute(&mut self) {
        self.set_muted(!self.player.muted());
    }

    // ----- library -----

    /// Open the add-music prompt pre-filled with `start`.
    pub fn open_add_music(&mut self, start: String) {
        self.input = Input::AddMusic(start);
    }

    /// Resolve the prompt's path into a selection and start playing it.
    pub fn submit_add_music(&mut self) {
        let Input::AddMusic(raw) = std::mem::take(&mut self.input) else {
            return;
        };
        if raw.trim().is_empty() {
            return;
        }

        let path = expand_home(&raw);
        match scan_selection(&path, &self.library_settings) {
            Ok(tracks) => {
                if tracks.is_empty() {
                    self.status = Some(format!("No audio files in {}", path.display()));
                }
                self.load_selection(tracks);
            }
            Err(e) => {
                tracing::warn!("{e}");
                self.status = Some(e.to_string());
            }
        }
    }

    pub fn load_selection(&mut self, tracks: Vec<Track>) {
        let res = self.library.load_selection(tracks, &mut self.player);
        self.cursor = 0;
        self.report(res);
    }

    /// Play the highlighted row.
    pub fn play_cursor(&mut self) {
        self.select(self.cursor);
    }

    pub fn select(&mut self, index: usize) {
        let res = self.library.select_index(index, &mut self.player);
        self.follow_current();
        self.report(res);
    }

    pub fn next(&mut self) {
        let res = self.library.next(&mut self.player);
        self.follow_current();
        self.report(res);
    }

    pub fn prev(&mut self) {
        let res = self.library.prev(&mut self.player);
        self.follow_current();
        self.report(res);
    }

    pub fn cursor_down(&mut self) {
        if !self.library.is_empty() {
            self.cursor = (self.cursor + 1).min(self.library.len() - 1);
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_top(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_bottom(&mut self) {
        self.cursor = self.library.len().saturating_sub(1);
    }

    fn follow_current(&mut self) {
        if let Some(i) = self.library.current_index() {
            self.cursor = i;
        }
    }

    // ----- transport -----

    pub fn play(&mut self) {
        self.player.play();
    }

    pub fn pause(&mut self) {
        self.player.pause();
    }

    pub fn toggle_playback(&mut self) {
        self.player.toggle();
    }

    pub fn seek(&mut self, percent: f64) {
        self.player.seek(percent);
    }

    pub fn seek_by(&mut self, delta_percent: f64) {
        self.player.seek_by(delta_percent);
    }

    /// Forward the time-advanced notification to the player.
    pub fn tick(&mut self) {
        self.player.tick();
    }

    // ----- youtube -----

    pub fn focus_url(&mut self) {
        self.input = Input::YoutubeUrl;
    }

    pub fn clear_url(&mut self) {
        self.youtube_url.clear();
    }

    /// Embed address for the current URL text; empty when nothing can be embedded.
    pub fn embed_address(&self) -> String {
        resolve_embed(&self.youtube_url, &self.embed_base)
    }

    // ----- input -----

    pub fn push_input_char(&mut self, c: char) {
        match &mut self.input {
            Input::AddMusic(path) => path.push(c),
            Input::YoutubeUrl => self.youtube_url.push(c),
            Input::None => {}
        }
    }

    pub fn pop_input_char(&mut self) {
        match &mut self.input {
            Input::AddMusic(path) => {
                path.pop();
            }
            Input::YoutubeUrl => {
                self.youtube_url.pop();
            }
            Input::None => {}
        }
    }

    pub fn blur(&mut self) {
        self.input = Input::None;
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    fn report(&mut self, res: Result<(), AudioError>) {
        if let Err(e) = res {
            self.status = Some(e.to_string());
        }
    }
}

/// Decimal string used for the stored volume.
fn format_volume(v: f32) -> String {
    // Round away f32 noise from repeated +/- steps (0.70000005 -> "0.7").
    let rounded = (v * 1000.0).round() / 1000.0;
    rounded.to_string()
}
