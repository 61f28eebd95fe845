//! Move queue - the scrolling strip of upcoming moves
//!
//! Exactly one move is active at a time. The strip holds `MOVE_QUEUE_LEN` slots:
//! already-played moves to the left of the active one, a fixed look-ahead to the
//! right. A fresh queue starts with empty lead-in slots so the active move sits
//! at `QUEUE_ACTIVE_SLOT`.
//!
//! Advancing is two-phase. The active index jumps one slot right at once, then the
//! strip scrolls left one slot width over a few ticks; when the scroll completes
//! the oldest slot is dropped and the active index falls back.

use std::collections::VecDeque;

use arrayvec::ArrayVec;
use tracing::debug;

use crate::rng::SimpleRng;
use crate::types::{
    Move, MOVE_QUEUE_LEN, QUEUE_ACTIVE_SLOT, QUEUE_LEAD_IN, QUEUE_SCROLL_STEP, QUEUE_SLOT_WIDTH,
};

/// Upcoming moves visible to the right of the active one.
const LOOK_AHEAD: usize = MOVE_QUEUE_LEN - QUEUE_ACTIVE_SLOT - 1;

/// One drawable slot of the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueSlot {
    /// `None` for the empty lead-in slots.
    pub mv: Option<Move>,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct MoveQueue {
    played: VecDeque<Option<Move>>,
    active: Move,
    upcoming: VecDeque<Move>,
    /// Horizontal scroll offset in pixels, 0 at rest, down to `-QUEUE_SLOT_WIDTH`.
    offset_x: i32,
    scrolling: bool,
    rng: SimpleRng,
}

impl MoveQueue {
    /// Create a queue with random moves.
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let active = rng.next_move();
        let upcoming = (0..LOOK_AHEAD).map(|_| rng.next_move()).collect();
        Self::assemble(active, upcoming, rng)
    }

    /// Create a queue that plays `moves` in order before falling back to random
    /// moves. An empty slice behaves like [`MoveQueue::new`].
    pub fn from_moves(moves: &[Move], seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let mut scripted = moves.iter().copied();
        let active = scripted.next().unwrap_or_else(|| rng.next_move());
        let mut upcoming: VecDeque<Move> = scripted.collect();
        while upcoming.len() < LOOK_AHEAD {
            upcoming.push_back(rng.next_move());
        }
        Self::assemble(active, upcoming, rng)
    }

    fn assemble(active: Move, upcoming: VecDeque<Move>, rng: SimpleRng) -> Self {
        Self {
            played: std::iter::repeat(None).take(QUEUE_LEAD_IN).collect(),
            active,
            upcoming,
            offset_x: 0,
            scrolling: false,
            rng,
        }
    }

    /// The move currently applied to selected dice.
    pub fn active_move(&self) -> Move {
        self.active
    }

    /// Slot index of the active move: `QUEUE_ACTIVE_SLOT` at rest, one more while
    /// the strip scrolls.
    pub fn active_index(&self) -> usize {
        self.played.len()
    }

    /// Moves waiting after the active one, nearest first.
    pub fn upcoming(&self) -> impl Iterator<Item = Move> + '_ {
        self.upcoming.iter().copied()
    }

    /// Make the next move active and start the scroll.
    ///
    /// If a scroll is still running it is completed first, so the strip never
    /// falls more than one slot behind.
    pub fn advance(&mut self) {
        if self.scrolling {
            self.finish_scroll();
        }

        self.played.push_back(Some(self.active));
        self.active = match self.upcoming.pop_front() {
            Some(next) => next,
            None => self.rng.next_move(),
        };
        while self.upcoming.len() < LOOK_AHEAD {
            self.upcoming.push_back(self.rng.next_move());
        }

        self.scrolling = true;
        debug!(active = %self.active, "move queue advanced");
    }

    fn finish_scroll(&mut self) {
        self.played.pop_front();
        self.offset_x = 0;
        self.scrolling = false;
    }

    /// Advance the scroll animation by one tick.
    pub fn tick(&mut self) {
        if !self.scrolling {
            return;
        }
        self.offset_x -= QUEUE_SCROLL_STEP;
        if self.offset_x <= -QUEUE_SLOT_WIDTH {
            self.finish_scroll();
        }
    }

    pub fn is_animating(&self) -> bool {
        self.scrolling
    }

    pub fn offset_x(&self) -> i32 {
        self.offset_x
    }

    /// Every slot left to right. While scrolling the strip holds one extra slot
    /// that slides off the left edge.
    pub fn slots(&self) -> ArrayVec<QueueSlot, { MOVE_QUEUE_LEN + 1 }> {
        let mut out = ArrayVec::new();
        for mv in self.played.iter().copied() {
            out.push(QueueSlot { mv, active: false });
        }
        out.push(QueueSlot {
            mv: Some(self.active),
            active: true,
        });
        for mv in self.upcoming.iter().copied() {
            if out.is_full() {
                break;
            }
            out.push(QueueSlot {
                mv: Some(mv),
                active: false,
            });
        }
        out
    }
}
