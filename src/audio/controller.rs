use std::time::Duration;

use crate::library::Track;

use super::output::MediaOutput;
use super::types::{AudioError, PlaybackState};

/// Owns the media output and mirrors it into observable playback state.
///
/// Every method runs to completion before returning, so two playback
/// mutations never interleave.
pub struct PlaybackController {
    output: Box<dyn MediaOutput>,
    state: PlaybackState,
    title: Option<String>,
    duration: Option<Duration>,
    progress: f64,
    volume: f32,
    muted: bool,
    // Bumped by every `load`, so observers can tell two loads of the same index apart.
    generation: u64,
}

impl PlaybackController {
    /// Wrap `output`, applying the (restored) volume and mute flag right away.
    pub fn new(output: Box<dyn MediaOutput>, volume: f32, muted: bool) -> Self {
        let mut controller = Self {
            output,
            state: PlaybackState::Empty,
            title: None,
            duration: None,
            progress: 0.0,
            volume: volume.clamp(0.0, 1.0),
            muted,
            generation: 0,
        };
        controller.apply_volume();
        controller
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Title of the loaded track, `None` while Empty.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Progress through the loaded track in `[0, 100]`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    /// Gain actually sent to the output.
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    /// Total duration, if known and non-zero.
    pub fn duration(&self) -> Option<Duration> {
        self.duration.filter(|d| !d.is_zero())
    }

    /// Number of loads attempted so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn position(&self) -> Duration {
        if self.state.is_loaded() {
            self.output.position()
        } else {
            Duration::ZERO
        }
    }

    /// Replace whatever is loaded with `track` and start playing it.
    ///
    /// On failure the previous binding is already gone and the controller is Empty.
    pub fn load(&mut self, track: &Track) -> Result<(), AudioError> {
        self.output.release();
        self.progress = 0.0;
        self.generation += 1;

        match self.output.open(&track.path) {
            Ok(hint) => {
                self.duration = track.duration.or(hint);
                self.title = Some(track.display.clone());
                self.output.play();
                self.state = PlaybackState::Playing;
                tracing::info!(track = %track.display, "loaded");
                Ok(())
            }
            Err(e) => {
                self.duration = None;
                self.title = None;
                self.state = PlaybackState::Empty;
                tracing::warn!(track = %track.display, "load failed: {e}");
                Err(e)
            }
        }
    }

    pub fn play(&mut self) {
        if self.state != PlaybackState::Paused {
            return;
        }
        if self.output.finished() {
            self.progress = 0.0;
        }
        self.output.play();
        self.state = PlaybackState::Playing;
        tracing::debug!("play");
    }

    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        self.output.pause();
        self.state = PlaybackState::Paused;
        tracing::debug!("pause");
    }

    /// Play when paused, pause when playing.
    pub fn toggle(&mut self) {
        match self.state {
            PlaybackState::Empty => {}
            PlaybackState::Paused => self.play(),
            PlaybackState::Playing => self.pause(),
        }
    }

    /// Jump to `percent` of the track. No-op while the duration is unknown.
    pub fn seek(&mut self, percent: f64) {
        if !self.state.is_loaded() || !percent.is_finite() {
            return;
        }
        let Some(duration) = self.duration() else {
            return;
        };

        let percent = percent.clamp(0.0, 100.0);
        let target = duration.mul_f64(percent / 100.0);
        match self.output.seek(target) {
            Ok(()) => {
                self.progress = percent;
                tracing::debug!(?target, "seek");
            }
            Err(e) => tracing::warn!("{e}"),
        }
    }

    /// Seek relative to the current progress.
    pub fn seek_by(&mut self, delta_percent: f64) {
        self.seek(self.progress + delta_percent);
    }

    pub fn set_volume(&mut self, level: f32) {
        if !level.is_finite() {
            return;
        }
        self.volume = level.clamp(0.0, 1.0);
        self.apply_volume();
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.apply_volume();
    }

    pub fn toggle_mute(&mut self) {
        self.set_muted(!self.muted);
    }

    /// Time-advanced notification: refresh progress from the output.
    ///
    /// Skips the update when the duration is unknown. A track that ran out
    /// while playing leaves the controller Paused at 100%.
    pub fn tick(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }

        if self.output.finished() {
            // A drained output is not paused by itself.
            self.output.pause();
            self.state = PlaybackState::Paused;
            self.progress = 100.0;
            tracing::debug!("track ended");
            return;
        }

        if let Some(duration) = self.duration() {
            let pos = self.output.position().as_secs_f64();
            self.progress = (pos / duration.as_secs_f64() * 100.0).clamp(0.0, 100.0);
        }
    }

    fn apply_volume(&mut self) {
        let level = self.effective_volume();
        self.output.set_volume(level);
    }
}
