//! Game engine - screens, play session and render snapshots
//!
//! Builds the playable game on top of the pure rules in `blockfall-core`:
//!
//! - [`menu`]: main, options and pause menus with wrap-around selection
//! - [`screen`]: the screen enum and the pure `transition` function
//! - [`session`]: gravity, movement, rotation with wall kicks, locking, scoring
//! - [`engine`]: applies transition effects, drives the session, gates audio
//! - [`snapshot`]: plain-data view of a frame for renderers
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use blockfall_engine::{Command, Engine, EngineConfig, NoAudio, ScreenKind};
//!
//! let mut engine = Engine::new(EngineConfig::default(), NoAudio);
//! engine.apply_command(Command::MenuConfirm);
//! assert_eq!(engine.screen_kind(), ScreenKind::Playing);
//!
//! engine.apply_command(Command::HardDrop);
//! engine.update(Duration::from_millis(16));
//! assert_eq!(engine.snapshot().board.iter().flatten().flatten().count(), 4);
//! ```

pub mod audio;
pub mod engine;
pub mod menu;
pub mod screen;
pub mod session;
pub mod snapshot;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use audio::{AudioSink, NoAudio};
pub use engine::{Engine, EngineConfig};
pub use menu::{MainItem, MenuItem, MenuModel, OptionsItem, PauseItem};
pub use screen::{transition, Effect, Screen};
pub use session::{LockOutcome, Session};
pub use snapshot::{ActiveSnapshot, Snapshot};
pub use types::{Command, ScreenKind};
