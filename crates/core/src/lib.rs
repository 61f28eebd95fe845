//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the rules, state management, and per-tick simulation of
//! the isometric dice board. It has **zero dependencies** on terminal, input, or
//! I/O code, making it:
//!
//! - **Deterministic**: the same seed produces the same boards and move queues
//! - **Testable**: boards can be built from a layout and queues from a script
//! - **Portable**: runs headless, in the terminal shell, or under a benchmark
//!
//! # Module Structure
//!
//! - [`board`]: 8x8 grid of dice, movement, flood-fill matching, legality checks
//! - [`die`]: one cell's occupant: value, draw position, z-index
//! - [`animation`]: tagged drop/slide/kill/flyaway phases, one tick at a time
//! - [`move_queue`]: forced sequence of diagonal moves with a scrolling strip
//! - [`game_state`]: input gating, score bookkeeping, win/loss state machine
//! - [`geometry`]: isometric projection and diamond hit-testing
//! - [`scoring`]: match points and floating score labels
//! - [`rng`]: seeded LCG behind every random decision
//! - [`snapshot`]: per-tick read-only view for the renderer
//!
//! # Game Rules
//!
//! - Every selection applies the queue's **active move** to one die.
//! - A die next to a same-valued die in the move direction **matches**: the whole
//!   grid-connected cluster of that value is removed and scored.
//! - A die facing an empty cell **slides** until the next die or the edge.
//! - A die facing a different value (or a rock) is **bumped** and nothing happens.
//! - The level ends when the board is cleared (won), no value is left twice
//!   (complete), or the active move cannot do anything (game over).
//!
//! # Example
//!
//! ```
//! use dice_o_metric_core::GameState;
//!
//! let mut game = GameState::new(12345);
//!
//! // Dice drop in first; nothing can be selected until they land.
//! assert!(game.is_animating());
//! while game.is_animating() {
//!     game.tick();
//! }
//!
//! let snap = game.snapshot();
//! assert_eq!(snap.dice.len(), game.board().len());
//! ```
//!
//! # Timing
//!
//! The simulation advances in fixed ticks at
//! [`TICKS_PER_SECOND`](types::TICKS_PER_SECOND); call
//! [`GameState::tick`](game_state::GameState::tick) once per frame.

pub mod animation;
pub mod board;
pub mod die;
pub mod error;
pub mod game_state;
pub mod geometry;
pub mod move_queue;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use dice_o_metric_types as types;

// Re-export commonly used types for convenience
pub use animation::{Animation, AnimationEvent, FlashFrame, Visual};
pub use board::{BlockReason, Board, Layout, MoveResult, ScoreEvent};
pub use die::Die;
pub use error::{GridError, GridResult};
pub use game_state::{GameConfig, GameState};
pub use move_queue::{MoveQueue, QueueSlot};
pub use rng::SimpleRng;
pub use scoring::{calculate_match_score, FloatingScore};
pub use snapshot::{DieSnapshot, GameSnapshot};
