//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for the dice board. It avoids widget
//! toolkits and renders into a plain framebuffer that is diffed and flushed to
//! the terminal.
//!
//! Goals:
//! - Keep `core` deterministic and free of I/O
//! - Read only the per-tick `GameSnapshot`; never call back into the game
//! - Map terminal cells back to board pixels so mouse clicks hit-test exactly
//!   like the core does

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use dice_o_metric_core as core;
pub use dice_o_metric_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, BoardArea, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
