use std::path::Path;
use std::time::Duration;

use super::types::AudioError;

/// The platform side of playback: one replaceable playable resource.
///
/// `PlaybackController` is the only owner of an output and drives it
/// synchronously, so implementations need no internal locking.
pub trait MediaOutput {
    /// Bind a fresh resource for `path`, releasing the previous binding.
    /// The new resource starts paused at position zero.
    ///
    /// Returns the decoder's own total-duration hint, if it has one.
    fn open(&mut self, path: &Path) -> Result<Option<Duration>, AudioError>;

    /// Drop the current binding, if any.
    fn release(&mut self);

    fn play(&mut self);

    fn pause(&mut self);

    /// Output gain in `[0, 1]`.
    fn set_volume(&mut self, level: f32);

    fn seek(&mut self, position: Duration) -> Result<(), AudioError>;

    fn position(&self) -> Duration;

    /// True once a bound resource has played to its end.
    fn finished(&self) -> bool;
}
