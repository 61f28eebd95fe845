//! Error types for grid arithmetic.
//!
//! The simulation has no fatal errors. The only failure is a coordinate that
//! leaves the 8x8 grid, and callers inside the core turn it into a blocked move.

use thiserror::Error;

use crate::types::{BOARD_COLS, BOARD_ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({row}, {col}) is outside the {}x{} board", BOARD_ROWS, BOARD_COLS)]
    OutOfBounds { row: i16, col: i16 },
}

pub type GridResult<T> = Result<T, GridError>;
