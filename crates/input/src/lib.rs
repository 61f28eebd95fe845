//! Terminal input module.
//!
//! Independent of the simulation. It maps `crossterm` key events into
//! [`crate::types::GameAction`], mouse events into [`PointerEvent`]s, and keeps the
//! keyboard hover [`Cursor`].

pub mod cursor;
pub mod map;

pub use dice_o_metric_types as types;

pub use cursor::Cursor;
pub use map::{handle_key_event, handle_mouse_event, should_quit, PointerEvent};
