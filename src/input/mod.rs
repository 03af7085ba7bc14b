//! Terminal input module.
//!
//! This module is intentionally independent of any UI layout. It maps
//! `crossterm` key events into [`crate::types::GameAction`]. Mouse events
//! carry screen coordinates and are resolved against the board layout by the
//! view's hit test, so they are dispatched in the runner instead.

pub mod map;

pub use map::{map_key_event, should_quit};
