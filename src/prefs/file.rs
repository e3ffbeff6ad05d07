use std::fs;
use std::path::{Path, PathBuf};

use toml::{Table, Value};

use super::store::{PrefKey, PreferenceStore};

/// Preferences persisted as a flat TOML table of strings.
///
/// The whole table is rewritten on every change. Non-string values found
/// on disk are treated as missing.
#[derive(Debug)]
pub struct TomlFileStore {
    path: PathBuf,
    table: Table,
}

impl TomlFileStore {
    /// Open the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let table = read_table(&path).unwrap_or_default();
        Self { path, table }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), String> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| format!("create {}: {e}", dir.display()))?;
        }
        let text = toml::to_string(&self.table).map_err(|e| e.to_string())?;
        fs::write(&self.path, text).map_err(|e| format!("write {}: {e}", self.path.display()))
    }
}

fn read_table(path: &Path) -> Option<Table> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!(path = %path.display(), "preferences unreadable: {e}");
            return None;
        }
    };
    match toml::from_str::<Table>(&text) {
        Ok(table) => Some(table),
        Err(e) => {
            tracing::warn!(path = %path.display(), "preferences malformed, using defaults: {e}");
            None
        }
    }
}

impl PreferenceStore for TomlFileStore {
    fn read(&self, key: PrefKey) -> Option<String> {
        match self.table.get(key.as_str()) {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        }
    }

    fn write(&mut self, key: PrefKey, value: &str) {
        self.table
            .insert(key.as_str().to_string(), Value::String(value.to_string()));
        if let Err(e) = self.persist() {
            tracing::warn!("saving preference {} failed: {e}", key.as_str());
        }
    }
}
