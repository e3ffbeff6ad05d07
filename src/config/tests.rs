use super::load::{default_config_path, default_state_dir, resolve_config_path};
use super::schema::*;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Serializes tests that read or mutate process environment variables.
pub(crate) fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_nexus_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("NEXUS_CONFIG_PATH", "/tmp/nexus-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/nexus-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        PathBuf::from("/tmp/xdg-config-home")
            .join("nexus")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("nexus")
            .join("config.toml")
    );
}

#[test]
fn state_dir_and_preferences_path_follow_xdg_state_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_STATE_HOME", "/tmp/xdg-state");

    assert_eq!(
        default_state_dir().unwrap(),
        PathBuf::from("/tmp/xdg-state/nexus")
    );

    let s = Settings::default();
    assert_eq!(
        s.preferences_path().unwrap(),
        PathBuf::from("/tmp/xdg-state/nexus/preferences.toml")
    );
    assert_eq!(s.log_dir().unwrap(), PathBuf::from("/tmp/xdg-state/nexus"));
}

#[test]
fn explicit_storage_path_wins_over_state_dir() {
    let mut s = Settings::default();
    s.storage.preferences_path = Some(PathBuf::from("/srv/prefs.toml"));
    assert_eq!(s.preferences_path().unwrap(), PathBuf::from("/srv/prefs.toml"));
}

#[test]
fn defaults_validate() {
    assert!(Settings::default().validate().is_ok());
}

#[test]
fn validate_rejects_zero_tick_and_bad_steps() {
    let mut s = Settings::default();
    s.audio.tick_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.controls.seek_step_percent = 0.0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.controls.volume_step = 1.5;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.embed.base_url = "  ".to_string();
    assert!(s.validate().is_err());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
tick_ms = 100

[controls]
seek_step_percent = 10.0
volume_step = 0.1

[ui]
header_text = "hello"
no_song_text = "nothing"

[library]
extensions = ["mp3"]
recursive = false
include_hidden = true
follow_links = false
display_fields = ["filename"]
display_separator = "::"
start_path = "/music"

[embed]
base_url = "https://example.test/embed"

[storage]
preferences_path = "/tmp/prefs.toml"

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("NEXUS_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("NEXUS__AUDIO__TICK_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.tick_ms, 100);
    assert_eq!(s.controls.seek_step_percent, 10.0);
    assert_eq!(s.controls.volume_step, 0.1);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.no_song_text, "nothing");
    // Untouched keys keep their defaults.
    assert_eq!(s.ui.url_placeholder, UiSettings::default().url_placeholder);
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(!s.library.recursive);
    assert!(s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(s.library.display_fields, vec![TrackDisplayField::Filename]);
    assert_eq!(s.library.display_separator, "::");
    assert_eq!(s.library.start_path, Some(PathBuf::from("/music")));
    assert_eq!(s.embed.base_url, "https://example.test/embed");
    assert_eq!(
        s.storage.preferences_path,
        Some(PathBuf::from("/tmp/prefs.toml"))
    );
    assert_eq!(s.logging.level, "debug");
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
tick_ms = 250
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("NEXUS_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("NEXUS__AUDIO__TICK_MS", "40");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.tick_ms, 40);
}
