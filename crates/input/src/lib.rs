//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`] values, picking
//! the key map of the screen currently shown. Key repeat comes from the
//! terminal itself; repeated presses map exactly like the first one.

pub mod map;

pub use blockfall_types as types;

pub use map::{map_key, should_quit};
