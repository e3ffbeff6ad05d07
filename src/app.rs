//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and composes the library, the
//! playback controller and the preference store behind intent methods.

mod mode;
mod model;

pub use mode::Mode;
pub use model::*;
