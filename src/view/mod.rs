//! View-state engine.
//!
//! Derives, from the record set, the favorites set, the search text and the
//! favorites-only flag, which cards are visible or highlighted and which
//! category groups still have visible members. Recomputation is pure and is
//! always run in full; the renderer only ever consumes the resulting
//! [`ViewModel`].

mod engine;
mod types;

pub use engine::{compute, compute_for_layout, normalize_term, record_matches};
pub use types::{CardState, CategoryState, NoResultsReason, ViewInputs, ViewModel};
