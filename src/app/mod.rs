//! Casebook application runtime: startup loading, terminal handling and the event loop.

/// Event and deferred-command channels.
mod channels;
/// Startup loading of settings, dataset and favorites.
pub mod init;
/// Event loop.
mod runtime;
/// Terminal setup and restoration utilities.
mod terminal;

pub use runtime::run;
