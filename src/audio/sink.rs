//! `rodio`-backed media output.
//!
//! One `Sink` at a time is bound to the default output stream. Seeking uses
//! `Sink::try_seek` and falls back to rebuilding the sink with
//! `Source::skip_duration` for decoders that cannot seek.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use super::output::MediaOutput;
use super::types::AudioError;

pub struct RodioOutput {
    stream: OutputStream,
    sink: Option<Sink>,
    path: Option<PathBuf>,
    // Position of the sink's first sample within the file, for rebuilt sinks.
    offset: Duration,
    volume: f32,
}

impl RodioOutput {
    /// Open the system default output device.
    pub fn open_default() -> Result<Self, AudioError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when OutputStream is dropped, which would scribble over the TUI.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            path: None,
            offset: Duration::ZERO,
            volume: 1.0,
        })
    }

    fn rebuild_at(&mut self, start_at: Duration, playing: bool) -> Result<(), AudioError> {
        let Some(path) = self.path.clone() else {
            return Ok(());
        };
        if let Some(old) = self.sink.take() {
            old.stop();
        }

        let (sink, _) = create_sink_at(&self.stream, &path, start_at)?;
        sink.set_volume(self.volume);
        if playing {
            sink.play();
        }
        self.sink = Some(sink);
        self.offset = start_at;
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.sink.as_ref().is_some_and(|s| !s.is_paused())
    }
}

impl MediaOutput for RodioOutput {
    fn open(&mut self, path: &Path) -> Result<Option<Duration>, AudioError> {
        self.release();

        let (sink, total) = create_sink_at(&self.stream, path, Duration::ZERO)?;
        sink.set_volume(self.volume);
        self.sink = Some(sink);
        self.path = Some(path.to_path_buf());
        self.offset = Duration::ZERO;
        Ok(total)
    }

    fn release(&mut self) {
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.path = None;
        self.offset = Duration::ZERO;
    }

    fn play(&mut self) {
        if self.finished() {
            // Ran to the end: start over, like a media element does.
            if let Err(e) = self.rebuild_at(Duration::ZERO, true) {
                tracing::warn!("restart failed: {e}");
            }
            return;
        }
        if let Some(s) = self.sink.as_ref() {
            s.play();
        }
    }

    fn pause(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.pause();
        }
    }

    fn set_volume(&mut self, level: f32) {
        self.volume = level;
        if let Some(s) = self.sink.as_ref() {
            s.set_volume(level);
        }
    }

    fn seek(&mut self, position: Duration) -> Result<(), AudioError> {
        let playing = self.is_playing() && !self.finished();
        let Some(sink) = self.sink.as_ref() else {
            return Ok(());
        };

        if sink.empty() {
            return self.rebuild_at(position, playing);
        }

        match sink.try_seek(position) {
            Ok(()) => {
                self.offset = Duration::ZERO;
                Ok(())
            }
            Err(e) => {
                tracing::debug!("try_seek unsupported, rebuilding sink: {e}");
                self.rebuild_at(position, playing)
                    .map_err(|rebuild| AudioError::Seek(format!("{e}; rebuild failed: {rebuild}")))
            }
        }
    }

    fn position(&self) -> Duration {
        self.sink
            .as_ref()
            .map_or(Duration::ZERO, |s| self.offset + s.get_pos())
    }

    fn finished(&self) -> bool {
        self.sink.as_ref().is_some_and(|s| s.empty())
    }
}

/// Create a paused `Sink` for the file at `path` that starts playback at `start_at`.
///
/// Also returns the decoder's total-duration hint.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    path: &Path,
    start_at: Duration,
) -> Result<(Sink, Option<Duration>), AudioError> {
    let file = File::open(path).map_err(|source| AudioError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let decoder = Decoder::new(BufReader::new(file)).map_err(|source| AudioError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let total = decoder.total_duration();

    let sink = Sink::connect_new(stream.mixer());
    // `skip_duration` is the seeking primitive of last resort; even Duration::ZERO is fine.
    sink.append(decoder.skip_duration(start_at));
    sink.pause();
    Ok((sink, total))
}
