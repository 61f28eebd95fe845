//! Scoring module - match points and floating score labels
//!
//! A match of `count` dice showing `value` at `level` is worth
//! `BASE_SCORE * count * 2 + value * level`.

use crate::types::{Point, BASE_SCORE, FLOATING_SCORE_RISE, FLOATING_SCORE_TICKS};

/// Points awarded for one matched cluster.
pub fn calculate_match_score(match_count: u32, die_value: i8, level: u32) -> u32 {
    let base = BASE_SCORE.saturating_mul(match_count).saturating_mul(2);
    let bonus = (die_value.max(0) as u32).saturating_mul(level);
    base.saturating_add(bonus)
}

/// A short-lived "+N" label drifting up from where a cluster was matched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatingScore {
    pub points: u32,
    pub position: Point,
    pub ticks_left: u32,
}

impl FloatingScore {
    pub fn new(points: u32, position: Point) -> Self {
        Self {
            points,
            position,
            ticks_left: FLOATING_SCORE_TICKS,
        }
    }

    /// Drift one step; returns false once the label has expired.
    pub fn tick(&mut self) -> bool {
        if self.ticks_left == 0 {
            return false;
        }
        self.ticks_left -= 1;
        self.position = self.position.offset(0.0, -FLOATING_SCORE_RISE);
        self.ticks_left > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_score_formula() {
        assert_eq!(calculate_match_score(3, 4, 2), 6 * 3 * 2 + 4 * 2);
        assert_eq!(calculate_match_score(3, 4, 2), 44);
        assert_eq!(calculate_match_score(2, 1, 1), 25);
    }

    #[test]
    fn test_value_and_level_scale_bonus_only() {
        let low = calculate_match_score(5, 1, 1);
        let high = calculate_match_score(5, 6, 3);
        assert_eq!(high - low, 6 * 3 - 1);
    }

    #[test]
    fn test_match_score_saturates() {
        assert_eq!(calculate_match_score(u32::MAX, 6, u32::MAX), u32::MAX);
    }

    #[test]
    fn test_floating_score_rises_then_expires() {
        let mut label = FloatingScore::new(44, Point::new(100.0, 100.0));
        let mut ticks = 0;
        while label.tick() {
            ticks += 1;
        }
        assert_eq!(ticks + 1, FLOATING_SCORE_TICKS);
        assert!(label.position.y < 100.0);
        assert!(!label.tick());
    }
}
