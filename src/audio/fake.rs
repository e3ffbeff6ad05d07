//! Recording media output for headless tests.

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use super::output::MediaOutput;
use super::types::AudioError;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Open(PathBuf),
    Release,
    Play,
    Pause,
    Volume(f32),
    Seek(Duration),
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub calls: Vec<Call>,
    pub bound: Option<PathBuf>,
    pub position: Duration,
    pub finished: bool,
    /// Unpaused, like a rodio sink; a finished resource that gets seeked
    /// resumes audibly when this is still set.
    pub playing: bool,
    pub volume: f32,
    pub duration_hint: Option<Duration>,
    pub unreadable: HashSet<PathBuf>,
    pub fail_seek: bool,
}

impl FakeState {
    pub fn opened(&self) -> Vec<PathBuf> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Open(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }
}

/// Cloning shares the recorded state, so a test keeps one handle while the
/// controller owns the other.
#[derive(Debug, Clone, Default)]
pub struct FakeOutput {
    pub state: Rc<RefCell<FakeState>>,
}

impl FakeOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boxed(&self) -> Box<dyn MediaOutput> {
        Box::new(self.clone())
    }
}

impl MediaOutput for FakeOutput {
    fn open(&mut self, path: &Path) -> Result<Option<Duration>, AudioError> {
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::Open(path.to_path_buf()));
        if s.unreadable.contains(path) {
            return Err(AudioError::Open {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, "undecodable"),
            });
        }
        s.bound = Some(path.to_path_buf());
        s.position = Duration::ZERO;
        s.finished = false;
        s.playing = false;
        Ok(s.duration_hint)
    }

    fn release(&mut self) {
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::Release);
        s.bound = None;
        s.playing = false;
    }

    fn play(&mut self) {
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::Play);
        s.playing = true;
        if s.finished {
            s.finished = false;
            s.position = Duration::ZERO;
        }
    }

    fn pause(&mut self) {
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::Pause);
        s.playing = false;
    }

    fn set_volume(&mut self, level: f32) {
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::Volume(level));
        s.volume = level;
    }

    fn seek(&mut self, position: Duration) -> Result<(), AudioError> {
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::Seek(position));
        if s.fail_seek {
            return Err(AudioError::Seek("unseekable".to_string()));
        }
        s.position = position;
        s.finished = false;
        Ok(())
    }

    fn position(&self) -> Duration {
        self.state.borrow().position
    }

    fn finished(&self) -> bool {
        self.state.borrow().finished
    }
}
