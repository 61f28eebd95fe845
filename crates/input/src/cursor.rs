//! Keyboard hover cursor over the grid.

use crate::types::{GameAction, GridPos, BOARD_COLS, BOARD_ROWS};

/// Grid cell highlighted by the keyboard. Always on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    pos: GridPos,
}

impl Cursor {
    pub fn new(pos: GridPos) -> Self {
        Self {
            pos: GridPos::new(pos.row.min(BOARD_ROWS - 1), pos.col.min(BOARD_COLS - 1)),
        }
    }

    pub fn pos(&self) -> GridPos {
        self.pos
    }

    /// Jump to `pos` (e.g. after the mouse hovered a die).
    pub fn set(&mut self, pos: GridPos) {
        *self = Self::new(pos);
    }

    /// Apply a cursor action. Returns whether the cursor moved; other actions
    /// are ignored.
    pub fn apply(&mut self, action: GameAction) -> bool {
        let GridPos { row, col } = self.pos;
        let next = match action {
            GameAction::CursorUp => GridPos::new(row.saturating_sub(1), col),
            GameAction::CursorDown => GridPos::new((row + 1).min(BOARD_ROWS - 1), col),
            GameAction::CursorLeft => GridPos::new(row, col.saturating_sub(1)),
            GameAction::CursorRight => GridPos::new(row, (col + 1).min(BOARD_COLS - 1)),
            _ => return false,
        };
        let moved = next != self.pos;
        self.pos = next;
        moved
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new(GridPos::new(BOARD_ROWS / 2, BOARD_COLS / 2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_moves_along_grid_axes() {
        let mut cursor = Cursor::new(GridPos::new(3, 3));
        assert!(cursor.apply(GameAction::CursorUp));
        assert_eq!(cursor.pos(), GridPos::new(2, 3));
        assert!(cursor.apply(GameAction::CursorRight));
        assert_eq!(cursor.pos(), GridPos::new(2, 4));
    }

    #[test]
    fn test_cursor_clamps_to_board() {
        let mut cursor = Cursor::new(GridPos::new(0, 7));
        assert!(!cursor.apply(GameAction::CursorUp));
        assert!(!cursor.apply(GameAction::CursorRight));
        assert_eq!(cursor.pos(), GridPos::new(0, 7));

        cursor.set(GridPos::new(20, 20));
        assert_eq!(cursor.pos(), GridPos::new(7, 7));
    }

    #[test]
    fn test_non_cursor_actions_are_ignored() {
        let mut cursor = Cursor::default();
        let before = cursor.pos();
        assert!(!cursor.apply(GameAction::Select));
        assert!(!cursor.apply(GameAction::Restart));
        assert_eq!(cursor.pos(), before);
    }
}
