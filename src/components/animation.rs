//! Animation state machine for the thief.
//!
//! [`AnimationState`] selects a [`ThiefAnimation`] from what the physics step
//! produced (grounded flag, crouch flag, velocity) and advances the frame of
//! the current clip. It only reads body state; nothing in the simulation
//! depends on it except the choice between footstep and crawl sounds.

use serde::{Deserialize, Serialize};

use crate::components::physicsbody::PhysicsBody;

/// Horizontal speed under which the thief counts as standing still.
pub const MOVING_THRESHOLD: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ThiefAnimation {
    #[default]
    Idle,
    Walk,
    Crouch,
    Crawl,
    Jump,
    Fall,
}

impl ThiefAnimation {
    pub fn frame_count(self) -> usize {
        match self {
            ThiefAnimation::Idle => 4,
            ThiefAnimation::Walk => 8,
            ThiefAnimation::Crouch => 1,
            ThiefAnimation::Crawl => 6,
            ThiefAnimation::Jump | ThiefAnimation::Fall => 2,
        }
    }

    pub fn fps(self) -> f32 {
        match self {
            ThiefAnimation::Walk | ThiefAnimation::Crawl => 12.0,
            _ => 6.0,
        }
    }

    /// Pick the clip matching the body's current motion.
    pub fn from_body(body: &PhysicsBody) -> Self {
        let moving = body.velocity.x.abs() > MOVING_THRESHOLD;
        if !body.is_grounded {
            if body.velocity.y < 0.0 {
                ThiefAnimation::Jump
            } else {
                ThiefAnimation::Fall
            }
        } else if body.is_crouching {
            if moving {
                ThiefAnimation::Crawl
            } else {
                ThiefAnimation::Crouch
            }
        } else if moving {
            ThiefAnimation::Walk
        } else {
            ThiefAnimation::Idle
        }
    }

    pub fn is_crouched(self) -> bool {
        matches!(self, ThiefAnimation::Crouch | ThiefAnimation::Crawl)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationState {
    pub current: ThiefAnimation,
    pub previous: ThiefAnimation,
    pub frame_index: usize,
    pub elapsed_time: f32,
    pub facing_left: bool,
}

impl AnimationState {
    /// Switch to `next`, restarting the clip if it changed.
    pub fn transition(&mut self, next: ThiefAnimation) -> bool {
        if next == self.current {
            return false;
        }
        self.previous = self.current;
        self.current = next;
        self.frame_index = 0;
        self.elapsed_time = 0.0;
        true
    }

    /// Advance the current clip by `dt` seconds, looping at the end.
    pub fn advance(&mut self, dt: f32) {
        self.elapsed_time += dt;
        let frame_duration = 1.0 / self.current.fps();
        while self.elapsed_time >= frame_duration {
            self.elapsed_time -= frame_duration;
            self.frame_index = (self.frame_index + 1) % self.current.frame_count();
        }
    }
}
