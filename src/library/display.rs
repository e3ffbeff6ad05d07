use std::path::Path;

use crate::config::TrackDisplayField;

/// Metadata a display name can be assembled from.
pub(super) struct DisplayParts<'a> {
    pub path: &'a Path,
    pub title: &'a str,
    pub artist: Option<&'a str>,
    pub album: Option<&'a str>,
}

fn non_blank(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

impl DisplayParts<'_> {
    fn field(&self, field: TrackDisplayField, sep: &str) -> Option<String> {
        match field {
            TrackDisplayField::Display => {
                let title = non_blank(self.title);
                match (self.artist.and_then(non_blank), title) {
                    (Some(a), Some(t)) => Some(format!("{a}{sep}{t}")),
                    (a, t) => a.or(t).map(str::to_string),
                }
            }
            TrackDisplayField::Title => non_blank(self.title).map(str::to_string),
            TrackDisplayField::Artist => self.artist.and_then(non_blank).map(str::to_string),
            TrackDisplayField::Album => self.album.and_then(non_blank).map(str::to_string),
            TrackDisplayField::Filename => self
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(non_blank)
                .map(str::to_string),
            TrackDisplayField::Path => Some(self.path.display().to_string()),
        }
    }

    /// Join the configured `fields` with `sep`, falling back to the title
    /// when none of them produced anything.
    pub fn compose(&self, fields: &[TrackDisplayField], sep: &str) -> String {
        let parts: Vec<String> = fields.iter().filter_map(|f| self.field(*f, sep)).collect();
        if parts.is_empty() {
            self.title.to_string()
        } else {
            parts.join(sep)
        }
    }
}
