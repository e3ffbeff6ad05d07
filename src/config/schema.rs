use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/nexus/config.toml` or `~/.config/nexus/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `NEXUS__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub controls: ControlsSettings,
    pub library: LibrarySettings,
    pub embed: EmbedSettings,
    pub storage: StorageSettings,
    pub logging: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// How often playback progress is refreshed (milliseconds).
    /// This is also the input poll interval of the event loop.
    pub tick_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self { tick_ms: 250 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered at the top of the sidebar.
    pub header_text: String,

    /// Footer title shown while nothing has been loaded.
    pub no_song_text: String,

    /// Hint shown in the empty YouTube URL box.
    pub url_placeholder: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: "Nexus Sound".to_string(),
            no_song_text: "No song".to_string(),
            url_placeholder: "Paste a YouTube link".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Seek bar step, in percent of the track, when pressing `H` / `L`.
    pub seek_step_percent: f64,
    /// Volume step when pressing `+` / `-`.
    pub volume_step: f32,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            seek_step_percent: 5.0,
            volume_step: 0.05,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackDisplayField {
    /// "artist - title" when an artist tag exists, else the title.
    Display,
    Title,
    Artist,
    Album,
    /// File name without extension.
    Filename,
    Path,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio when scanning a directory
    /// (case-insensitive, without dot). Explicitly chosen files are never filtered.
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,

    /// Which fields to use to build `Track.display` and its ordering.
    ///
    /// Example: ["artist", "title"] -> "Artist - Title"
    pub display_fields: Vec<TrackDisplayField>,
    /// Separator used to join `display_fields`.
    pub display_separator: String,

    /// Path pre-filled in the add-music prompt. Defaults to the working directory.
    pub start_path: Option<PathBuf>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec![
                "mp3".into(),
                "flac".into(),
                "wav".into(),
                "ogg".into(),
                "m4a".into(),
            ],
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
            display_fields: vec![TrackDisplayField::Artist, TrackDisplayField::Title],
            display_separator: " - ".to_string(),
            start_path: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbedSettings {
    /// Base of the generated embed address; the video id is appended after a `/`.
    pub base_url: String,
}

impl Default for EmbedSettings {
    fn default() -> Self {
        Self {
            base_url: crate::embed::YOUTUBE_EMBED_BASE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Where volume/muted/mode are persisted.
    /// Defaults to `preferences.toml` inside the state directory.
    pub preferences_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub level: String,
    /// Directory for the rolling log file. Defaults to the state directory.
    pub directory: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}
