//! Durable volume/muted/mode preferences.
//!
//! The app is handed a `PreferenceStore` at startup, hydrates `Preferences`
//! from it once, and writes back on every change.

mod file;
mod store;

pub use file::TomlFileStore;
pub use store::{MemoryStore, PrefKey, PreferenceStore, Preferences};
