//! Per-die animation phases
//!
//! Each die runs at most one phase at a time. A phase is advanced exactly once
//! per tick and reports the transitions the board has to react to.
//!
//! - `Dropping`: eased entrance from above the board, after a stagger delay
//! - `Sliding`: linear move between two resting positions
//! - `Dying`: hold, then alternate solid/wireframe flash frames
//! - `Flyaway`: fade out while rising, after which the die is dead

use crate::types::{
    Move, Point, DROP_START_OFFSET, FLASH_FRAME_TICKS, FLASH_TICKS, FLYAWAY_ALPHA_STEP,
    KILL_HOLD_TICKS, SLIDE_STEPS,
};

/// Flash frame shown while a matched die is dying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlashFrame {
    Solid,
    Wireframe,
}

/// How the renderer should draw a die this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visual {
    Normal,
    Flash(FlashFrame),
    Fading { alpha: u8 },
}

/// Transition reported by [`Animation::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEvent {
    /// The entrance animation reached the resting position.
    Landed,
    /// A slide reached its destination; carries the move that caused it.
    SlideFinished(Move),
    /// The flash sequence ended and the die started flying away.
    FlyawayStarted,
    /// The flyaway faded out completely.
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Animation {
    #[default]
    None,
    Dropping {
        delay: u32,
        step: u32,
        steps: u32,
    },
    Sliding {
        mv: Move,
        from: Point,
        to: Point,
        step: u32,
    },
    Dying {
        frames_remaining: u32,
        rise_target: f32,
    },
    Flyaway {
        alpha: u8,
        rise: f32,
        target: f32,
    },
}

/// Monotonic ease-out curve on [0, 1].
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

impl Animation {
    pub fn drop(delay: u32, steps: u32) -> Self {
        Animation::Dropping {
            delay,
            step: 0,
            steps: steps.max(1),
        }
    }

    pub fn slide(mv: Move, from: Point, to: Point) -> Self {
        Animation::Sliding {
            mv,
            from,
            to,
            step: 0,
        }
    }

    /// Kill sequence: `3 * delay_multiplier` held ticks followed by the flash frames.
    pub fn kill(delay_multiplier: u32, rise_target: f32) -> Self {
        Animation::Dying {
            frames_remaining: KILL_HOLD_TICKS * delay_multiplier + FLASH_TICKS,
            rise_target,
        }
    }

    pub fn is_busy(&self) -> bool {
        !matches!(self, Animation::None)
    }

    /// Dying or flying away: the die is on its way out.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Animation::Dying { .. } | Animation::Flyaway { .. })
    }

    /// Draw position for a die whose resting position is `rest`.
    pub fn position(&self, rest: Point) -> Point {
        match *self {
            Animation::None | Animation::Dying { .. } => rest,
            Animation::Dropping { step, steps, .. } => {
                let progress = ease_out_quad(step as f32 / steps as f32);
                rest.offset(0.0, DROP_START_OFFSET * (1.0 - progress))
            }
            Animation::Sliding { from, to, step, .. } => {
                from.lerp(to, step as f32 / SLIDE_STEPS as f32)
            }
            Animation::Flyaway { rise, .. } => rest.offset(0.0, -rise),
        }
    }

    pub fn visual(&self) -> Visual {
        match *self {
            Animation::Dying {
                frames_remaining, ..
            } if frames_remaining <= FLASH_TICKS => {
                let elapsed = FLASH_TICKS - frames_remaining;
                if (elapsed / FLASH_FRAME_TICKS) % 2 == 0 {
                    Visual::Flash(FlashFrame::Solid)
                } else {
                    Visual::Flash(FlashFrame::Wireframe)
                }
            }
            Animation::Flyaway { alpha, .. } => Visual::Fading { alpha },
            _ => Visual::Normal,
        }
    }

    /// Advance one tick.
    pub fn tick(&mut self) -> Option<AnimationEvent> {
        match self {
            Animation::None => None,
            Animation::Dropping { delay, step, steps } => {
                if *delay > 0 {
                    *delay -= 1;
                    return None;
                }
                *step += 1;
                if *step >= *steps {
                    *self = Animation::None;
                    return Some(AnimationEvent::Landed);
                }
                None
            }
            Animation::Sliding { mv, step, .. } => {
                *step += 1;
                if *step >= SLIDE_STEPS {
                    let mv = *mv;
                    *self = Animation::None;
                    return Some(AnimationEvent::SlideFinished(mv));
                }
                None
            }
            Animation::Dying {
                frames_remaining,
                rise_target,
            } => {
                *frames_remaining = frames_remaining.saturating_sub(1);
                if *frames_remaining == 0 {
                    *self = Animation::Flyaway {
                        alpha: u8::MAX,
                        rise: 0.0,
                        target: *rise_target,
                    };
                    return Some(AnimationEvent::FlyawayStarted);
                }
                None
            }
            Animation::Flyaway {
                alpha,
                rise,
                target,
            } => {
                *alpha = alpha.saturating_sub(FLYAWAY_ALPHA_STEP);
                *rise = (*rise + ((*target - *rise) / 4.0).max(0.5)).min(*target);
                if *alpha == 0 {
                    *self = Animation::None;
                    return Some(AnimationEvent::Expired);
                }
                None
            }
        }
    }
}
