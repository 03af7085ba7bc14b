//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the board view paints into a
//! plain framebuffer, and the renderer flushes diff-only updates to the
//! terminal. No widget/layout framework.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Allow precise control over aspect ratio (e.g. 2 chars wide per cell)
//! - Make mouse hit testing the exact inverse of the drawn layout

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{format_hms, BoardView, Theme, Viewport};
pub use renderer::TerminalRenderer;
