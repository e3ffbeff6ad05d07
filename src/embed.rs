//! YouTube link to embed address.

/// Default embed base for YouTube videos.
pub const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed";

/// Map a pasted watch URL to `{base}/{id}`, or an empty string.
///
/// Only the `...?v=<id>&...` shape is understood: the id is whatever follows
/// the first `v=` up to the next `&`. Short links, playlists and
/// percent-encoding are not handled.
pub fn resolve_embed(url: &str, base: &str) -> String {
    let Some((_, rest)) = url.split_once("v=") else {
        return String::new();
    };
    let id = rest.split('&').next().unwrap_or_default();
    if id.is_empty() {
        return String::new();
    }
    format!("{}/{}", base.trim_end_matches('/'), id)
}
