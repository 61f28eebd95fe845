//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation core, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! The playfield is an 8x8 grid drawn isometrically:
//!
//! - **Rows**: 8 (indexed 0-7), increasing toward the screen's lower right
//! - **Columns**: 8 (indexed 0-7), increasing toward the screen's upper right
//! - **Surface**: 320x240 board pixels, tiles 32x16 with a 2px gap
//!
//! # Timing Constants
//!
//! The simulation advances in fixed ticks, one per rendered frame:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICKS_PER_SECOND` | 30 | Fixed tick rate |
//! | `TICK_MS` | 33 | Wall-clock interval per tick |
//! | `DROP_STEPS` | 40 | Entrance animation length (jittered by `DROP_JITTER`) |
//! | `SLIDE_STEPS` | 10 | Slide interpolation steps (0.1 of the distance each) |
//! | `KILL_HOLD_TICKS` | 3 | Hold per cluster index before a matched die flashes |
//! | `FLASH_FRAME_TICKS` | 2 | Ticks per solid/wireframe flash frame |
//! | `FLASH_REPEATS` | 3 | Solid/wireframe pairs per kill |
//! | `FLYAWAY_ALPHA_STEP` | 16 | Alpha lost per tick while flying away |
//! | `QUEUE_SCROLL_STEP` | 4 | Pixels the move strip scrolls per tick |
//!
//! # Scoring
//!
//! A match of `n` dice showing `v` at level `l` scores
//! `BASE_SCORE * n * 2 + v * l`.
//!
//! # Examples
//!
//! ```
//! use dice_o_metric_types::{Axis, Direction, Move, BOARD_COLS, BOARD_ROWS};
//!
//! // Every direction maps to exactly one grid axis and step
//! let mv = Move::from_direction(Direction::NorthEast);
//! assert_eq!(mv.axis, Axis::Col);
//! assert_eq!(mv.delta, 1);
//! assert_eq!(mv.to_string(), "NE (col +1)");
//!
//! assert_eq!(BOARD_ROWS, 8);
//! assert_eq!(BOARD_COLS, 8);
//! ```

use std::fmt;

/// Board height in cells (8 rows)
pub const BOARD_ROWS: u8 = 8;

/// Board width in cells (8 columns)
pub const BOARD_COLS: u8 = 8;

/// Fixed tick rate of the simulation.
pub const TICKS_PER_SECOND: u32 = 30;

/// Fixed timestep interval in milliseconds (33ms ≈ 30 FPS)
pub const TICK_MS: u32 = 1000 / TICKS_PER_SECOND;

/// Points per matched die, doubled, before the face-value bonus.
pub const BASE_SCORE: u32 = 6;

/// Level a fresh game starts at.
pub const START_LEVEL: u32 = 1;

/// Percent chance that a spawned cell receives a die.
pub const SPAWN_FILL_PERCENT: u32 = 83;

/// Highest face value a die can show.
pub const MAX_FACE: i8 = 6;

/// Die value of a rock: immovable and never matches.
pub const ROCK: i8 = 0;

/// Die value of a die that finished dying and is awaiting removal.
pub const DEAD: i8 = -1;

/// Board surface size in pixels.
pub const BOARD_SURFACE_WIDTH: f32 = 320.0;
pub const BOARD_SURFACE_HEIGHT: f32 = 240.0;

/// Isometric footprint of a tile.
pub const TILE_WIDTH: f32 = 32.0;
pub const TILE_HEIGHT: f32 = 16.0;

/// Gap between neighbouring tiles.
pub const TILE_GAP: f32 = 2.0;

/// Full die sprite size (top face plus sides).
pub const DIE_SPRITE_WIDTH: f32 = 32.0;
pub const DIE_SPRITE_HEIGHT: f32 = 36.0;

/// Nominal number of steps in the entrance animation.
pub const DROP_STEPS: u32 = 40;

/// Maximum deviation of the entrance animation length, in steps.
pub const DROP_JITTER: u32 = 4;

/// Vertical offset an entering die starts from (above the board).
pub const DROP_START_OFFSET: f32 = -320.0;

/// Extra random delay (0..=N ticks) added to each die's staggered entrance.
pub const DROP_STAGGER_JITTER: u32 = 8;

/// Slide interpolation steps.
pub const SLIDE_STEPS: u32 = 10;

/// Ticks a matched die holds per cluster index before flashing.
pub const KILL_HOLD_TICKS: u32 = 3;

/// Ticks per flash frame while dying.
pub const FLASH_FRAME_TICKS: u32 = 2;

/// Solid/wireframe flash pairs per kill.
pub const FLASH_REPEATS: u32 = 3;

/// Total flash ticks of a kill animation.
pub const FLASH_TICKS: u32 = FLASH_FRAME_TICKS * 2 * FLASH_REPEATS;

/// Alpha lost per tick while flying away.
pub const FLYAWAY_ALPHA_STEP: u8 = 16;

/// Range of the random height a flying die rises to.
pub const FLYAWAY_RISE_MIN: u32 = 16;
pub const FLYAWAY_RISE_MAX: u32 = 40;

/// Number of slots on the move strip (lead-in + active + lookahead).
pub const MOVE_QUEUE_LEN: usize = 7;

/// Steady-state index of the active move on the strip.
pub const QUEUE_ACTIVE_SLOT: usize = 3;

/// Empty lead-in slots a fresh strip starts with.
pub const QUEUE_LEAD_IN: usize = 3;

/// Width of one move slot in pixels.
pub const QUEUE_SLOT_WIDTH: i32 = 68;

/// Pixels the strip scrolls per tick after a move is consumed.
pub const QUEUE_SCROLL_STEP: i32 = 4;

/// Ticks a floating score stays on screen.
pub const FLOATING_SCORE_TICKS: u32 = 30;

/// Pixels a floating score rises per tick.
pub const FLOATING_SCORE_RISE: f32 = 1.0;

/// One of the four diagonal (screen-space) move directions
///
/// - **NorthEast**: column + 1
/// - **NorthWest**: row - 1
/// - **SouthEast**: row + 1
/// - **SouthWest**: column - 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// All directions, in the order the move generator indexes them.
    pub const ALL: [Direction; 4] = [
        Direction::SouthEast,
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthWest,
    ];

    /// Short lowercase name, also the key sprite providers use for arrows.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::NorthEast => "ne",
            Direction::NorthWest => "nw",
            Direction::SouthEast => "se",
            Direction::SouthWest => "sw",
        }
    }

    /// Arrow glyph pointing the way the die travels on screen.
    pub fn arrow(&self) -> char {
        match self {
            Direction::NorthEast => '↗',
            Direction::NorthWest => '↖',
            Direction::SouthEast => '↘',
            Direction::SouthWest => '↙',
        }
    }
}

/// Grid axis a move travels along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Row,
    Col,
}

impl Axis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Row => "row",
            Axis::Col => "col",
        }
    }
}

/// A forced move from the queue
///
/// Immutable once created: a direction together with the grid axis and the
/// signed step it applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub direction: Direction,
    pub axis: Axis,
    pub delta: i8,
}

impl Move {
    /// Build the move for a direction
    ///
    /// # Examples
    ///
    /// ```
    /// use dice_o_metric_types::{Axis, Direction, Move};
    ///
    /// let se = Move::from_direction(Direction::SouthEast);
    /// assert_eq!((se.axis, se.delta), (Axis::Row, 1));
    ///
    /// let sw = Move::from_direction(Direction::SouthWest);
    /// assert_eq!((sw.axis, sw.delta), (Axis::Col, -1));
    /// ```
    pub const fn from_direction(direction: Direction) -> Self {
        let (axis, delta) = match direction {
            Direction::SouthEast => (Axis::Row, 1),
            Direction::NorthWest => (Axis::Row, -1),
            Direction::NorthEast => (Axis::Col, 1),
            Direction::SouthWest => (Axis::Col, -1),
        };
        Self {
            direction,
            axis,
            delta,
        }
    }

    /// Row/column step applied by this move.
    pub fn step(&self) -> (i8, i8) {
        match self.axis {
            Axis::Row => (self.delta, 0),
            Axis::Col => (0, self.delta),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {:+})",
            self.direction.as_str().to_uppercase(),
            self.axis.as_str(),
            self.delta
        )
    }
}

/// A cell coordinate on the board (always in range once constructed by the core).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct GridPos {
    pub row: u8,
    pub col: u8,
}

impl GridPos {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Continuous board-surface coordinate in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation toward `other` (`t` in 0.0..=1.0).
    pub fn lerp(self, other: Point, t: f32) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Point {
        Point {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Banner shown when play stops
///
/// - **Won**: every matchable die was cleared
/// - **Complete**: no value has two dice left, so nothing can match again
/// - **GameOver**: the active move has no legal target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Banner {
    Won,
    Complete,
    GameOver,
}

impl Banner {
    /// Identifier handed to the renderer.
    pub fn as_str(&self) -> &'static str {
        match self {
            Banner::Won => "won",
            Banner::Complete => "complete",
            Banner::GameOver => "game_over",
        }
    }

    /// Human readable banner text.
    pub fn title(&self) -> &'static str {
        match self {
            Banner::Won => "BOARD CLEARED",
            Banner::Complete => "LEVEL COMPLETE",
            Banner::GameOver => "GAME OVER",
        }
    }
}

/// Result of one win-condition evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Continue,
    Won,
    Complete,
    GameOver,
}

impl Outcome {
    /// Banner for a terminal outcome, `None` while play continues.
    pub fn banner(&self) -> Option<Banner> {
        match self {
            Outcome::Continue => None,
            Outcome::Won => Some(Banner::Won),
            Outcome::Complete => Some(Banner::Complete),
            Outcome::GameOver => Some(Banner::GameOver),
        }
    }
}

/// Controller phase: playing, or paused behind a banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    Playing,
    Paused(Banner),
}

impl GamePhase {
    pub fn is_playing(&self) -> bool {
        matches!(self, GamePhase::Playing)
    }

    pub fn banner(&self) -> Option<Banner> {
        match self {
            GamePhase::Playing => None,
            GamePhase::Paused(banner) => Some(*banner),
        }
    }
}

/// Shell-level actions produced by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move the hover cursor one row up (toward the screen's upper left)
    CursorUp,
    /// Move the hover cursor one row down
    CursorDown,
    /// Move the hover cursor one column left
    CursorLeft,
    /// Move the hover cursor one column right
    CursorRight,
    /// Select the die under the cursor with the active move
    Select,
    /// Continue to the next level from a won/complete banner
    Continue,
    /// Start over from the configured level
    Restart,
}
