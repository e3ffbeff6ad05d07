use crate::audio::{AudioError, PlaybackController};

use super::model::Track;

/// The user's current selection and the index of the track handed to the player.
///
/// The sequence is only ever replaced as a whole, so `current` stays valid
/// for as long as the selection it was set against.
#[derive(Debug, Default)]
pub struct Library {
    tracks: Vec<Track>,
    current: Option<usize>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    /// Replace the selection and start the first track.
    ///
    /// An empty selection clears the current index and leaves the player alone.
    pub fn load_selection(
        &mut self,
        tracks: Vec<Track>,
        player: &mut PlaybackController,
    ) -> Result<(), AudioError> {
        self.tracks = tracks;
        self.current = None;
        tracing::info!(count = self.tracks.len(), "selection replaced");
        if self.tracks.is_empty() {
            return Ok(());
        }
        self.select_index(0, player)
    }

    /// Load the track at `index`. Out-of-range indices are ignored.
    ///
    /// The index is recorded even when loading fails, so `next` moves past a
    /// track that cannot be decoded.
    pub fn select_index(
        &mut self,
        index: usize,
        player: &mut PlaybackController,
    ) -> Result<(), AudioError> {
        let Some(track) = self.tracks.get(index) else {
            return Ok(());
        };
        self.current = Some(index);
        player.load(track)
    }

    /// Advance with wraparound. No-op without a current track.
    pub fn next(&mut self, player: &mut PlaybackController) -> Result<(), AudioError> {
        match self.current {
            Some(i) if !self.tracks.is_empty() => {
                self.select_index((i + 1) % self.tracks.len(), player)
            }
            _ => Ok(()),
        }
    }

    /// Step back with wraparound to the last track. No-op without a current track.
    pub fn prev(&mut self, player: &mut PlaybackController) -> Result<(), AudioError> {
        match self.current {
            Some(i) if !self.tracks.is_empty() => {
                let len = self.tracks.len();
                self.select_index((i + len - 1) % len, player)
            }
            _ => Ok(()),
        }
    }
}
