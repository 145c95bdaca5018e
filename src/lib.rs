//! Blockfall (workspace facade crate).
//!
//! Re-exports the game crates under one roof so the binary, integration tests
//! and benches can use `blockfall::{core, engine, input, term, types}`. Runtime
//! settings and log setup live here too.

pub mod config;
pub mod logging;

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub use config::{ConfigError, Settings};
