//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema used to drive runtime
//! behavior and helpers to load configuration and resolve XDG paths.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
pub(crate) mod tests;
