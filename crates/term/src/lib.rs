//! Terminal "game renderer" module.
//!
//! Renders snapshots into a plain framebuffer of styled glyphs, then flushes
//! only the glyphs that changed since the previous frame. No widget toolkit is
//! involved, which keeps the board geometry exact (two columns per cell).

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use twotris_core as core;
pub use twotris_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
