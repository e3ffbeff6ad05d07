//! Playback: the controller state machine and the media outputs it drives.

mod controller;
mod output;
mod sink;
mod types;

pub use controller::PlaybackController;
pub use output::MediaOutput;
pub use sink::RodioOutput;
pub use types::{AudioError, PlaybackState};

#[cfg(test)]
pub(crate) mod fake;
