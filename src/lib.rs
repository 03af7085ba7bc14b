//! Terminal Minesweeper.
//!
//! `core` holds the pure grid and session logic, `term` the framebuffer
//! renderer and board view, `input` the key mapping, and `types` the shared
//! plain data. The binary in `main.rs` wires them into an event loop.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
