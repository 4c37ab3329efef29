//! Library entry for Casebook exposing core logic for integration tests.

pub mod catalog;
pub mod events;
pub mod favorites;
pub mod panel;
pub mod state;
pub mod theme;
pub mod ui;
pub mod view;
