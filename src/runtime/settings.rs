use crate::config;

/// Settings to run with, plus why the defaults were used instead, if they were.
///
/// The problem is reported by the caller once logging is up.
pub fn load_settings() -> (config::Settings, Option<String>) {
    settle(config::Settings::load())
}

pub(super) fn settle(
    loaded: Result<config::Settings, ::config::ConfigError>,
) -> (config::Settings, Option<String>) {
    match loaded {
        Ok(s) => match s.validate() {
            Ok(()) => (s, None),
            Err(msg) => (
                config::Settings::default(),
                Some(format!("invalid config, using defaults: {msg}")),
            ),
        },
        Err(e) => (
            config::Settings::default(),
            Some(format!("failed to load config, using defaults: {e}")),
        ),
    }
}
