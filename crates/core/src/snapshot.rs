//! Read-only view of one tick for the renderer.

use arrayvec::ArrayVec;

use crate::animation::Visual;
use crate::move_queue::QueueSlot;
use crate::scoring::FloatingScore;
use crate::types::{Banner, GridPos, Point, MOVE_QUEUE_LEN};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DieSnapshot {
    pub cell: GridPos,
    pub value: i8,
    pub position: Point,
    pub visual: Visual,
    pub z_index: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameSnapshot {
    /// Back to front.
    pub dice: Vec<DieSnapshot>,
    pub shadows: Vec<Point>,
    pub queue: ArrayVec<QueueSlot, { MOVE_QUEUE_LEN + 1 }>,
    pub queue_offset_x: i32,
    pub score: u32,
    pub level: u32,
    pub moves: u32,
    pub banner: Option<Banner>,
    pub floating: Vec<FloatingScore>,
    pub hovered: Option<GridPos>,
    pub animating: bool,
    pub legal_move_exists: bool,
}

impl GameSnapshot {
    /// Reset every field, keeping allocated capacity.
    pub fn clear(&mut self) {
        self.dice.clear();
        self.shadows.clear();
        self.queue.clear();
        self.queue_offset_x = 0;
        self.score = 0;
        self.level = 0;
        self.moves = 0;
        self.banner = None;
        self.floating.clear();
        self.hovered = None;
        self.animating = false;
        self.legal_move_exists = false;
    }

    /// Whether the player can act on this frame.
    pub fn playable(&self) -> bool {
        self.banner.is_none() && !self.animating
    }

    pub fn die_at(&self, cell: GridPos) -> Option<&DieSnapshot> {
        self.dice.iter().find(|d| d.cell == cell)
    }
}
