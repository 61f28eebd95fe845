//! Board module - owns the dice and resolves moves
//!
//! The board is an 8x8 grid addressed by (row, col). Occupied cells live in an
//! ordered map so matched dice can be removed outright once their flyaway ends.
//!
//! Two different adjacencies are in play:
//! - **Moves** step along one grid axis (see [`Move`]); on screen they are diagonal.
//! - **Matches** flood-fill over the four grid neighbours of a cell.
//!
//! The only mutating entry points during play are [`Board::attempt_move`] and
//! [`Board::tick`]; everything else is a query.

use std::collections::{BTreeMap, HashSet};

use arrayvec::ArrayVec;
use tracing::{debug, trace};

use crate::animation::AnimationEvent;
use crate::die::Die;
use crate::error::{GridError, GridResult};
use crate::geometry::{canonical_position, hits_die};
use crate::rng::SimpleRng;
use crate::types::{
    GridPos, Move, Point, BOARD_COLS, BOARD_ROWS, DEAD, DROP_STAGGER_JITTER, MAX_FACE,
    SPAWN_FILL_PERCENT,
};

/// Cell layout for building boards by hand: `layout[row][col]`, -1 = empty.
pub type Layout = [[i8; BOARD_COLS as usize]; BOARD_ROWS as usize];

/// Produced by a match and consumed once by the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreEvent {
    pub die_value: i8,
    pub match_count: u32,
    pub average_position: Point,
}

/// Why a move had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockReason {
    /// The neighbouring cell is off the board.
    Edge,
    /// The neighbouring cell holds a die with a different value (or a rock).
    Bump,
    /// The selected cell is empty, a rock, or already dying.
    Immovable,
}

/// Outcome of [`Board::attempt_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveResult {
    Blocked(BlockReason),
    Matched { count: u32 },
    Slid { from: GridPos, to: GridPos },
}

impl MoveResult {
    /// Matches and slides consume the active move; blocked moves do not.
    pub fn consumes_move(&self) -> bool {
        !matches!(self, MoveResult::Blocked(_))
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    dice: BTreeMap<GridPos, Die>,
    /// Cosmetic floor markers, one per spawned die.
    shadows: Vec<Point>,
    pending_score: Option<ScoreEvent>,
    legal_move_exists: bool,
    rng: SimpleRng,
}

impl Board {
    /// Create a board and spawn a randomized grid of dropping dice.
    pub fn new(seed: u32) -> Self {
        let mut board = Self::empty(seed);
        board.spawn_grid();
        board
    }

    /// Create a board without dice.
    pub fn empty(seed: u32) -> Self {
        Self {
            dice: BTreeMap::new(),
            shadows: Vec::new(),
            pending_score: None,
            legal_move_exists: false,
            rng: SimpleRng::new(seed),
        }
    }

    /// Create a board of resting dice from a layout (-1 marks an empty cell).
    pub fn from_layout(layout: &Layout, seed: u32) -> Self {
        let mut board = Self::empty(seed);
        for (row, cells) in layout.iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                if value == DEAD {
                    continue;
                }
                let cell = GridPos::new(row as u8, col as u8);
                board.shadows.push(canonical_position(cell));
                board.dice.insert(cell, Die::new(cell, value));
            }
        }
        board
    }

    /// Fill the grid: each cell gets a die with `SPAWN_FILL_PERCENT` chance,
    /// face 0..=6 (0 is a rock), dropping in staggered by row and column.
    pub fn spawn_grid(&mut self) {
        self.dice.clear();
        self.shadows.clear();
        self.pending_score = None;

        for row in 0..BOARD_ROWS {
            for col in 0..BOARD_COLS {
                if !self.rng.chance(SPAWN_FILL_PERCENT) {
                    continue;
                }
                let cell = GridPos::new(row, col);
                let value = self.rng.next_range(MAX_FACE as u32 + 1) as i8;
                let delay = 5 * row as u32
                    + 2 * col as u32
                    + self.rng.range_inclusive(0, DROP_STAGGER_JITTER);

                let mut die = Die::new(cell, value);
                die.begin_drop(delay, &mut self.rng);
                self.shadows.push(canonical_position(cell));
                self.dice.insert(cell, die);
            }
        }

        debug!(dice = self.dice.len(), "spawned grid");
    }

    fn check_bounds(row: i16, col: i16) -> GridResult<GridPos> {
        if row < 0 || row >= BOARD_ROWS as i16 || col < 0 || col >= BOARD_COLS as i16 {
            return Err(GridError::OutOfBounds { row, col });
        }
        Ok(GridPos::new(row as u8, col as u8))
    }

    /// Die at (row, col); `Ok(None)` for an empty cell.
    pub fn get_at(&self, row: i8, col: i8) -> GridResult<Option<&Die>> {
        let cell = Self::check_bounds(row as i16, col as i16)?;
        Ok(self.die(cell))
    }

    /// Die stored at `cell`, including dice that are dying.
    pub fn die(&self, cell: GridPos) -> Option<&Die> {
        self.dice.get(&cell)
    }

    /// Die that logically occupies `cell` (dead dice count as absent).
    fn occupant(&self, cell: GridPos) -> Option<&Die> {
        self.dice.get(&cell).filter(|die| !die.is_dead())
    }

    pub fn is_occupied(&self, cell: GridPos) -> bool {
        self.occupant(cell).is_some()
    }

    pub fn len(&self) -> usize {
        self.dice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// All dice in (row, col) order.
    pub fn dice(&self) -> impl Iterator<Item = &Die> {
        self.dice.values()
    }

    /// All dice in draw order (back to front).
    pub fn dice_by_z(&self) -> Vec<&Die> {
        let mut dice: Vec<&Die> = self.dice.values().collect();
        dice.sort_by(|a, b| {
            a.z_index()
                .total_cmp(&b.z_index())
                .then(a.position().x.total_cmp(&b.position().x))
        });
        dice
    }

    pub fn shadows(&self) -> &[Point] {
        &self.shadows
    }

    /// Occupied cells directly above, below, left and right of `cell` in grid space.
    pub fn neighbors(&self, cell: GridPos) -> ArrayVec<GridPos, 4> {
        let mut out = ArrayVec::new();
        let row = cell.row as i16;
        let col = cell.col as i16;
        for (dr, dc) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            if let Ok(n) = Self::check_bounds(row + dr, col + dc) {
                if self.is_occupied(n) {
                    out.push(n);
                }
            }
        }
        out
    }

    /// Connected dice showing `match_value`, reachable from `origin` through grid
    /// neighbours. The origin is always part of the result, in first position;
    /// the rest follow in discovery order.
    pub fn find_matching_cluster(&self, origin: GridPos, match_value: i8) -> Vec<GridPos> {
        let mut cluster = vec![origin];
        let mut visited: HashSet<GridPos> = HashSet::from([origin]);
        let mut worklist = vec![origin];

        while let Some(cell) = worklist.pop() {
            for n in self.neighbors(cell) {
                if !visited.insert(n) {
                    continue;
                }
                let joins = self
                    .occupant(n)
                    .is_some_and(|die| die.value() == match_value && !die.is_dying());
                if joins {
                    cluster.push(n);
                    worklist.push(n);
                }
            }
        }

        cluster
    }

    /// The cell one step from (row, col) along `mv`.
    pub fn coords_in_direction(&self, row: i8, col: i8, mv: Move) -> GridResult<GridPos> {
        Self::check_bounds(row as i16, col as i16)?;
        let (dr, dc) = mv.step();
        Self::check_bounds(row as i16 + dr as i16, col as i16 + dc as i16)
    }

    fn step_from(&self, cell: GridPos, mv: Move) -> GridResult<GridPos> {
        self.coords_in_direction(cell.row as i8, cell.col as i8, mv)
    }

    /// Last free cell reached by walking from `cell` along `mv` until a die or the
    /// edge. Returns `cell` itself when the first step is already blocked.
    pub fn destination_for_slide(&self, cell: GridPos, mv: Move) -> GridPos {
        let mut dest = cell;
        while let Ok(next) = self.step_from(dest, mv) {
            if self.is_occupied(next) {
                break;
            }
            dest = next;
        }
        dest
    }

    /// Try to move the die at `cell` one step along `mv`.
    ///
    /// - edge of the board: `Blocked(Edge)`
    /// - same-valued neighbour: the mover's cluster is killed, `Matched`
    /// - different neighbour: `Blocked(Bump)`
    /// - free cell: the die slides as far as it can, `Slid`
    pub fn attempt_move(&mut self, cell: GridPos, mv: Move) -> MoveResult {
        let Some(mover) = self.occupant(cell) else {
            return MoveResult::Blocked(BlockReason::Immovable);
        };
        if mover.is_rock() || mover.is_dying() {
            return MoveResult::Blocked(BlockReason::Immovable);
        }
        let value = mover.value();

        let target = match self.step_from(cell, mv) {
            Ok(target) => target,
            Err(err) => {
                trace!(%cell, %mv, %err, "move blocked by edge");
                return MoveResult::Blocked(BlockReason::Edge);
            }
        };

        if let Some(other) = self.occupant(target) {
            if other.value() == value && !other.is_dying() {
                let count = self.kill_cluster(cell, value);
                return MoveResult::Matched { count };
            }
            trace!(%cell, %target, %mv, "move blocked by bump");
            return MoveResult::Blocked(BlockReason::Bump);
        }

        let dest = self.destination_for_slide(cell, mv);
        self.slide_die(cell, dest, mv);
        MoveResult::Slid {
            from: cell,
            to: dest,
        }
    }

    fn slide_die(&mut self, from: GridPos, to: GridPos, mv: Move) {
        let Some(mut die) = self.dice.remove(&from) else {
            return;
        };
        die.relocate(to);
        die.begin_slide(canonical_position(from), canonical_position(to), mv);
        self.dice.insert(to, die);
        debug!(%from, %to, %mv, "die slid");
    }

    /// Kill the cluster around `origin` and record the score event. Returns its size.
    fn kill_cluster(&mut self, origin: GridPos, value: i8) -> u32 {
        let cluster = self.find_matching_cluster(origin, value);
        let mut sum = Point::default();

        for (index, cell) in cluster.iter().enumerate() {
            if let Some(die) = self.dice.get_mut(cell) {
                let pos = die.position();
                sum = sum.offset(pos.x, pos.y);
                die.begin_kill(index as u32, &mut self.rng);
            }
        }

        let count = cluster.len() as u32;
        self.pending_score = Some(ScoreEvent {
            die_value: value,
            match_count: count,
            average_position: Point::new(sum.x / count as f32, sum.y / count as f32),
        });
        debug!(%origin, value, count, "matched cluster");
        count
    }

    /// Bookkeeping after a slide ends: a same-valued die waiting in the direction
    /// of travel completes a match.
    fn resolve_slide_end(&mut self, cell: GridPos, mv: Move) {
        let Some(value) = self
            .occupant(cell)
            .filter(|die| die.is_matchable())
            .map(|die| die.value())
        else {
            return;
        };
        let Ok(target) = self.step_from(cell, mv) else {
            return;
        };
        let bumped_match = self
            .occupant(target)
            .is_some_and(|other| other.value() == value && !other.is_dying());
        if bumped_match {
            self.kill_cluster(cell, value);
        }
    }

    /// Recompute whether the active move can do anything: some live, non-rock die
    /// has a free or same-valued neighbour in the move direction.
    pub fn recompute_legal_move_flag(&mut self, active: Move) -> bool {
        let legal = self
            .dice
            .values()
            .filter(|die| die.is_matchable())
            .any(|die| match self.step_from(die.cell(), active) {
                Ok(target) => match self.occupant(target) {
                    None => true,
                    Some(other) => other.value() == die.value(),
                },
                Err(_) => false,
            });
        self.legal_move_exists = legal;
        legal
    }

    pub fn legal_move_exists(&self) -> bool {
        self.legal_move_exists
    }

    /// Purge dice whose flyaway has finished.
    pub fn remove_dead_dice(&mut self) -> usize {
        let before = self.dice.len();
        self.dice
            .retain(|_, die| !(die.is_dead() && !die.is_animating()));
        before - self.dice.len()
    }

    /// Advance every animation one step, then resolve finished slides, purge
    /// dead dice and recompute the legal-move flag, in that order.
    pub fn tick(&mut self, active: Move) {
        let mut finished_slides: Vec<(GridPos, Move)> = Vec::new();
        for (cell, die) in self.dice.iter_mut() {
            if let Some(AnimationEvent::SlideFinished(mv)) = die.tick() {
                finished_slides.push((*cell, mv));
            }
        }

        for (cell, mv) in finished_slides {
            self.resolve_slide_end(cell, mv);
        }

        let removed = self.remove_dead_dice();
        if removed > 0 {
            trace!(removed, "purged dead dice");
        }

        self.recompute_legal_move_flag(active);
    }

    /// True while any die is mid-animation.
    pub fn is_animating(&self) -> bool {
        self.dice.values().any(Die::is_animating)
    }

    pub fn pending_score_event(&self) -> Option<&ScoreEvent> {
        self.pending_score.as_ref()
    }

    /// Take the pending score event, leaving none behind.
    pub fn take_score_event(&mut self) -> Option<ScoreEvent> {
        self.pending_score.take()
    }

    /// Count of live dice per face value, rocks excluded.
    pub fn value_tally(&self) -> BTreeMap<i8, u32> {
        let mut tally = BTreeMap::new();
        for die in self.dice.values().filter(|die| die.is_matchable()) {
            *tally.entry(die.value()).or_insert(0) += 1;
        }
        tally
    }

    /// Front-most die whose top face contains `point`.
    pub fn die_at_point(&self, point: Point) -> Option<GridPos> {
        self.dice
            .values()
            .filter(|die| !die.is_dead() && hits_die(die.position(), point))
            .max_by(|a, b| a.z_index().total_cmp(&b.z_index()))
            .map(Die::cell)
    }
}
