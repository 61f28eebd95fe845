//! Die module - one board cell's occupant
//!
//! A die owns its logical cell, its face value and its authoritative draw
//! position. While an animation runs the draw position is interpolated and may
//! differ from the cell's canonical position.

use crate::animation::{Animation, AnimationEvent, Visual};
use crate::geometry::{canonical_position, z_for};
use crate::rng::SimpleRng;
use crate::types::{
    GridPos, Move, Point, DEAD, DROP_JITTER, DROP_STEPS, FLYAWAY_RISE_MAX, FLYAWAY_RISE_MIN,
    MAX_FACE, ROCK,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Die {
    cell: GridPos,
    /// -1 = dead (awaiting removal), 0 = rock, 1..=6 = face value
    value: i8,
    position: Point,
    animation: Animation,
    /// Draw-order key; frozen while sliding so the mover keeps its layer.
    z_index: f32,
}

impl Die {
    /// Create a resting die at `cell`.
    pub fn new(cell: GridPos, value: i8) -> Self {
        Self {
            cell,
            value: value.clamp(DEAD, MAX_FACE),
            position: canonical_position(cell),
            animation: Animation::None,
            z_index: z_for(cell),
        }
    }

    pub fn cell(&self) -> GridPos {
        self.cell
    }

    pub fn row(&self) -> u8 {
        self.cell.row
    }

    pub fn col(&self) -> u8 {
        self.cell.col
    }

    pub fn value(&self) -> i8 {
        self.value
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn z_index(&self) -> f32 {
        self.z_index
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    pub fn visual(&self) -> Visual {
        self.animation.visual()
    }

    pub fn is_rock(&self) -> bool {
        self.value == ROCK
    }

    pub fn is_dead(&self) -> bool {
        self.value == DEAD
    }

    /// Live face value that can take part in a match.
    pub fn is_matchable(&self) -> bool {
        self.value > ROCK && !self.is_dying()
    }

    /// Matched and on its way out (dying, flying away or already dead).
    pub fn is_dying(&self) -> bool {
        self.is_dead() || self.animation.is_terminal()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_busy()
    }

    /// Schedule the entrance animation after `delay_ticks` of holding off-screen.
    pub fn begin_drop(&mut self, delay_ticks: u32, rng: &mut SimpleRng) {
        let steps = (DROP_STEPS as i32 + rng.jitter(DROP_JITTER)).max(1) as u32;
        self.animation = Animation::drop(delay_ticks, steps);
        self.position = self.animation.position(canonical_position(self.cell));
    }

    /// Move the logical cell; the board re-keys the die under its new cell.
    pub(crate) fn relocate(&mut self, cell: GridPos) {
        self.cell = cell;
    }

    /// Schedule a slide between two canonical positions. The z-index keeps its
    /// pre-slide value until the slide finishes.
    pub fn begin_slide(&mut self, from: Point, to: Point, mv: Move) {
        self.animation = Animation::slide(mv, from, to);
        self.position = from;
    }

    /// Schedule the kill sequence; `delay_multiplier` staggers a cluster.
    pub fn begin_kill(&mut self, delay_multiplier: u32, rng: &mut SimpleRng) {
        let rise = rng.range_inclusive(FLYAWAY_RISE_MIN, FLYAWAY_RISE_MAX) as f32;
        self.animation = Animation::kill(delay_multiplier, rise);
    }

    /// Advance the running animation by one tick.
    pub fn tick(&mut self) -> Option<AnimationEvent> {
        let event = self.animation.tick();
        match event {
            Some(AnimationEvent::SlideFinished(_)) | Some(AnimationEvent::Landed) => {
                self.z_index = z_for(self.cell);
            }
            Some(AnimationEvent::Expired) => {
                self.value = DEAD;
            }
            _ => {}
        }
        self.position = self.animation.position(canonical_position(self.cell));
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, DROP_START_OFFSET};

    #[test]
    fn new_die_rests_on_its_cell() {
        let cell = GridPos::new(2, 6);
        let die = Die::new(cell, 4);
        assert_eq!(die.position(), canonical_position(cell));
        assert_eq!(die.z_index(), z_for(cell));
        assert!(!die.is_animating());
        assert!(die.is_matchable());
    }

    #[test]
    fn rocks_never_match() {
        let die = Die::new(GridPos::new(0, 0), ROCK);
        assert!(die.is_rock());
        assert!(!die.is_matchable());
    }

    #[test]
    fn drop_length_is_jittered_within_bounds() {
        let mut rng = SimpleRng::new(5);
        for _ in 0..50 {
            let mut die = Die::new(GridPos::new(1, 1), 3);
            die.begin_drop(0, &mut rng);
            match *die.animation() {
                Animation::Dropping { steps, .. } => {
                    assert!((DROP_STEPS - DROP_JITTER..=DROP_STEPS + DROP_JITTER).contains(&steps))
                }
                ref other => panic!("unexpected animation {other:?}"),
            }
        }
    }

    #[test]
    fn dropping_die_starts_above_board() {
        let mut rng = SimpleRng::new(1);
        let cell = GridPos::new(4, 4);
        let mut die = Die::new(cell, 2);
        die.begin_drop(3, &mut rng);
        assert_eq!(
            die.position(),
            canonical_position(cell).offset(0.0, DROP_START_OFFSET)
        );
        while die.is_animating() {
            die.tick();
        }
        assert_eq!(die.position(), canonical_position(cell));
    }

    #[test]
    fn z_index_is_frozen_until_slide_ends() {
        let from_cell = GridPos::new(3, 3);
        let to_cell = GridPos::new(3, 6);
        let mv = Move::from_direction(Direction::NorthEast);
        let mut die = Die::new(from_cell, 5);
        let z_before = die.z_index();

        die.relocate(to_cell);
        die.begin_slide(canonical_position(from_cell), canonical_position(to_cell), mv);
        assert_eq!(die.cell(), to_cell);

        let mut finished = None;
        while die.is_animating() {
            assert_eq!(die.z_index(), z_before);
            finished = die.tick();
        }
        assert_eq!(finished, Some(AnimationEvent::SlideFinished(mv)));
        assert_eq!(die.z_index(), z_for(to_cell));
        assert_eq!(die.position(), canonical_position(to_cell));
    }

    #[test]
    fn kill_ends_with_dead_value() {
        let mut rng = SimpleRng::new(9);
        let mut die = Die::new(GridPos::new(7, 7), 6);
        die.begin_kill(1, &mut rng);
        assert!(die.is_dying());
        assert!(!die.is_matchable());

        let mut saw_flyaway = false;
        while die.is_animating() {
            if die.tick() == Some(AnimationEvent::FlyawayStarted) {
                saw_flyaway = true;
            }
        }
        assert!(saw_flyaway);
        assert!(die.is_dead());
        assert!(!die.is_animating());
    }
}
