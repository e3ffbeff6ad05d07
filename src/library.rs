//! Local library: user-selected tracks, how they are found on disk and how
//! their display names are built.

mod display;
mod model;
mod playlist;
mod scan;

pub use model::Track;
pub use playlist::Library;
pub use scan::{ScanError, expand_home, scan_selection};

#[cfg(test)]
mod tests;
