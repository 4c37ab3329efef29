//! Application state and command dispatch.
//!
//! [`AppState`] is the explicit state struct the runtime owns; input events are
//! translated into [`Command`]s and applied one at a time.

pub mod app_state;
pub mod status;
pub mod types;

pub use app_state::{AppState, CellRect, rect_contains};
pub use status::{StatusBar, StatusLevel, StatusMessage};
pub use types::{Command, Effects, Focus};
