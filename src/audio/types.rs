//! Audio-related small types.
//!
//! The playback state machine and the error type shared by every media
//! output implementation.

use std::path::PathBuf;

use thiserror::Error;

/// The state of the single media output handle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing loaded (startup, or the last load failed).
    #[default]
    Empty,
    Paused,
    Playing,
}

impl PlaybackState {
    pub fn is_loaded(self) -> bool {
        !matches!(self, Self::Empty)
    }
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    Device(#[from] rodio::StreamError),

    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    #[error("seek failed: {0}")]
    Seek(String),
}
