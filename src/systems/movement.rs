//! Player-driven movement of the thief.
//!
//! Reads the shared [`InputState`](crate::resources::input::InputState) and
//! turns it into forces and velocity changes on the thief's
//! [`PhysicsBody`]:
//!
//! - while grounded, horizontal velocity decays by `ground_decay` every tick,
//!   is clamped to `move_velocity`, and a held direction adds a
//!   `move_force · mass` push that the physics step integrates;
//! - holding down while grounded crouches, halving the body height with the
//!   feet fixed;
//! - pressing the left mouse button while grounded starts a drag, releasing
//!   it launches the thief opposite to the drag, clamped to
//!   `max_jump_velocity`.
//!
//! Footstep and crawl loops are started and paused on transitions only.

use crate::components::forces::Force;
use crate::components::physicsbody::PhysicsBody;
use crate::components::transform::Transform;
use crate::events::audio::{Channel, fx};
use crate::math::Vector2;
use crate::resources::audio::AudioSink;
use crate::resources::gameconfig::EngineConfig;
use crate::resources::input::InputState;

/// Clamp a drag vector to `max` length, keeping its direction.
pub fn clamp_jump(drag: Vector2, max: f32) -> Vector2 {
    let length = drag.length();
    if length > max {
        drag * (max / length)
    } else {
        drag
    }
}

/// Mouse drag in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    start: Option<Vector2>,
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        self.start.is_some()
    }

    pub fn start(&self) -> Option<Vector2> {
        self.start
    }

    /// Track the mouse for this tick. Returns the launch velocity when a drag
    /// is released while grounded.
    pub fn update(&mut self, input: &InputState, grounded: bool, max: f32) -> Option<Vector2> {
        let mouse = &input.mouse;
        if mouse.left.just_pressed && grounded {
            self.start = mouse.position;
        }
        if !mouse.left.just_released {
            return None;
        }
        let start = self.start.take()?;
        let end = mouse.position?;
        if !grounded {
            return None;
        }
        Some(-clamp_jump(end - start, max))
    }
}

/// Which movement loop is currently playing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementSound {
    playing: Option<&'static str>,
}

impl MovementSound {
    pub fn playing(&self) -> Option<&'static str> {
        self.playing
    }

    fn set(&mut self, next: Option<&'static str>, audio: &AudioSink) {
        if next == self.playing {
            return;
        }
        match next {
            Some(id) => audio.play_on(id, Channel::Movement),
            None => audio.pause(Channel::Movement),
        }
        self.playing = next;
    }
}

/// Keyboard movement and crouch for one tick.
///
/// `grounded` is the body's grounded flag from the previous tick. `crawling`
/// selects the crawl loop over footsteps.
pub fn apply_movement(
    body: &mut PhysicsBody,
    transform: &mut Transform,
    input: &InputState,
    config: &EngineConfig,
    crawling: bool,
    sound: &mut MovementSound,
    audio: &AudioSink,
) {
    let grounded = body.is_grounded;
    if grounded {
        body.velocity.x *= config.ground_decay;
        clamp_ground_velocity(body, config.move_velocity);
    }

    if grounded && input.crouch_held() && !body.is_crouching {
        set_crouch(body, transform, true);
    } else if body.is_crouching && !input.crouch_held() {
        set_crouch(body, transform, false);
    }

    let (left, right) = (input.left_held(), input.right_held());
    if grounded {
        let push = config.move_force * body.mass;
        if left {
            body.add_force(Force::linear(Vector2::new(-1.0, 0.0), push));
        }
        if right {
            body.add_force(Force::linear(Vector2::new(1.0, 0.0), push));
        }
    }
    // Opposite keys cancel out.
    let walking = grounded && (left != right);

    let next = walking.then_some(if crawling || body.is_crouching {
        fx::CRAWL
    } else {
        fx::FOOTSTEPS
    });
    sound.set(next, audio);
}

/// Halve (or restore) the body height keeping the bottom edge in place.
fn set_crouch(body: &mut PhysicsBody, transform: &mut Transform, crouch: bool) {
    let factor = if crouch { 0.5 } else { 2.0 };
    let height = body.aabb.height() * factor;
    body.aabb.min.y = body.aabb.max.y - height;

    let feet = transform.translate.y + transform.scale.y * 0.5;
    transform.scale.y *= factor;
    transform.translate.y = feet - transform.scale.y * 0.5;

    body.position = Vector2::new(body.position.x, body.aabb.center().y);
    body.size = transform.scale;
    body.is_crouching = crouch;
}

/// Clamp grounded horizontal speed to `max`.
pub fn clamp_ground_velocity(body: &mut PhysicsBody, max: f32) {
    if body.is_grounded {
        body.velocity.x = body.velocity.x.clamp(-max, max);
    }
}
