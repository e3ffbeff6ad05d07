use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::prelude::*;
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::display::DisplayParts;
use super::model::Track;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
        return false;
    };
    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.'))
        .any(|e| !e.is_empty() && e.eq_ignore_ascii_case(ext))
}

fn clean(tag_value: Option<Cow<'_, str>>) -> Option<String> {
    tag_value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

/// Expand a leading `~` to `$HOME`.
pub fn expand_home(input: &str) -> PathBuf {
    let input = input.trim();
    let home = std::env::var_os("HOME").map(PathBuf::from);
    match (input.strip_prefix('~'), home) {
        (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with('/') => {
            home.join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(input),
    }
}

/// Turn a user-chosen path into an ordered selection.
///
/// A file selects itself, whatever its extension. A directory is walked for
/// files matching `settings.extensions` and the result is sorted by display
/// name.
pub fn scan_selection(path: &Path, settings: &LibrarySettings) -> Result<Vec<Track>, ScanError> {
    let meta = std::fs::metadata(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ScanError::NotFound(path.to_path_buf()),
        _ => ScanError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    if meta.is_file() {
        return Ok(vec![read_track(path, settings)]);
    }

    let mut walker = WalkDir::new(path).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut tracks: Vec<Track> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .filter(|e| e.path().is_file())
        .filter(|e| is_audio_file(e.path(), settings))
        .map(|e| read_track(e.path(), settings))
        .collect();

    tracks.sort_by_key(|t| t.display.to_lowercase());
    tracing::debug!(path = %path.display(), count = tracks.len(), "scanned directory");
    Ok(tracks)
}

/// Build a `Track` for `path`, using tags when lofty can read them.
fn read_track(path: &Path, settings: &LibrarySettings) -> Track {
    let mut title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();
    let mut artist: Option<String> = None;
    let mut album: Option<String> = None;
    let mut duration: Option<Duration> = None;

    match lofty::read_from_path(path) {
        Ok(tagged) => {
            duration = Some(tagged.properties().duration()).filter(|d| !d.is_zero());

            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                if let Some(t) = clean(tag.title()) {
                    title = t;
                }
                artist = clean(tag.artist());
                album = clean(tag.album());
            }
        }
        Err(e) => tracing::debug!(path = %path.display(), "no tags: {e}"),
    }

    let display = DisplayParts {
        path,
        title: &title,
        artist: artist.as_deref(),
        album: album.as_deref(),
    }
    .compose(&settings.display_fields, &settings.display_separator);

    Track {
        path: path.to_path_buf(),
        title,
        artist,
        album,
        duration,
        display,
    }
}
