use std::collections::BTreeMap;

use crate::app::Mode;

/// The persisted preference keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PrefKey {
    Volume,
    Muted,
    Mode,
}

impl PrefKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Volume => "volume",
            Self::Muted => "muted",
            Self::Mode => "mode",
        }
    }
}

/// What a store held at startup; `None` means missing or malformed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StoredPreferences {
    pub volume: Option<f32>,
    pub muted: Option<bool>,
    pub mode: Option<Mode>,
}

/// Best-effort string key/value storage for preferences.
///
/// Implementations absorb their own failures: a read that fails is a missing
/// key, a write that fails is logged and forgotten.
pub trait PreferenceStore {
    fn read(&self, key: PrefKey) -> Option<String>;

    fn write(&mut self, key: PrefKey, value: &str);

    /// Read and parse every key.
    fn load(&self) -> StoredPreferences {
        StoredPreferences {
            volume: self.read(PrefKey::Volume).as_deref().and_then(parse_volume),
            muted: self.read(PrefKey::Muted).as_deref().and_then(parse_muted),
            mode: self.read(PrefKey::Mode).as_deref().and_then(Mode::parse),
        }
    }
}

fn parse_volume(raw: &str) -> Option<f32> {
    raw.trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 1.0))
}

fn parse_muted(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Effective preferences after applying defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preferences {
    pub volume: f32,
    pub muted: bool,
    pub mode: Mode,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            volume: 0.8,
            muted: false,
            mode: Mode::Local,
        }
    }
}

impl Preferences {
    /// Load once from `store`; anything missing keeps its default.
    pub fn hydrate(store: &dyn PreferenceStore) -> Self {
        let stored = store.load();
        let defaults = Self::default();
        let prefs = Self {
            volume: stored.volume.unwrap_or(defaults.volume),
            muted: stored.muted.unwrap_or(defaults.muted),
            mode: stored.mode.unwrap_or(defaults.mode),
        };
        tracing::debug!(?stored, ?prefs, "preferences hydrated");
        prefs
    }
}

/// Volatile store used by tests and when no state directory can be resolved.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with(mut self, key: PrefKey, value: &str) -> Self {
        self.entries.insert(key.as_str().to_string(), value.to_string());
        self
    }
}

impl PreferenceStore for MemoryStore {
    fn read(&self, key: PrefKey) -> Option<String> {
        self.entries.get(key.as_str()).cloned()
    }

    fn write(&mut self, key: PrefKey, value: &str) {
        self.entries
            .insert(key.as_str().to_string(), value.to_string());
    }
}
