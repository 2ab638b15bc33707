//! Category-driven collision response for the thief.
//!
//! [`collision_response`] is called once per confirmed contact between the
//! moving body and a collider. The pair is matched against the categories in
//! a fixed order, the first match wins:
//!
//! 1. `Wall` – positional correction, landing on top supports the body
//! 2. `Object` – pickup: sound, counter, deferred destruction
//! 3. `Switch` – `E` press while grounded flips it and everything it names
//! 4. `LockDoor` – solid while closed
//! 5. `Door` – `E` press opens/closes; closed doors push back horizontally
//! 6. `Laser Module` – nothing
//! 7. `Laser` – cooldown-gated damage and knockback
//! 8. `Vent` – `E` press opens/closes; closed vents push back on all sides
//!
//! Matching is by substring, so `LockDoor` must be tested before `Door` and
//! `Laser Module` before `Laser`. Unknown categories get no response.

use log::debug;

use crate::components::autodoor::AutoDoor;
use crate::components::laser::LaserComponent;
use crate::components::name::Name;
use crate::components::physicsbody::{PhysicsBody, category};
use crate::components::sprite::Sprite;
use crate::components::switch::Switch;
use crate::components::transform::Transform;
use crate::ecs::{Coordinator, EcsError, Entity};
use crate::events::audio::fx;
use crate::math::{Aabb, Vector2};
use crate::resources::framecontext::FrameContext;
use crate::resources::texturestore::TextureStore;
use crate::systems::collision::is_collision;

/// `(off, on)` texture pairs for the switch variants.
pub const SWITCH_TEXTURES: [(&str, &str); 3] = [
    ("Switches.png", "SwitchesOn.png"),
    ("Switch2.png", "Switch2On.png"),
    ("Lever.png", "LeverOn.png"),
];
/// `(closed, open)` texture pairs.
pub const LOCK_DOOR_TEXTURES: (&str, &str) = ("LockDoor.png", "LockDoorOpen.png");
pub const DOOR_TEXTURES: (&str, &str) = ("Door.png", "DoorOpen.png");
pub const VENT_TEXTURES: (&str, &str) = ("Vent.png", "VentOpen.png");

/// Width multiplier of an open door. The door grows away from its left edge.
pub const DOOR_OPEN_WIDTH: f32 = 2.0;

/// The moving body, detached from its stores for the duration of a pass.
#[derive(Debug, Clone)]
pub struct Mover {
    pub entity: Entity,
    pub body: PhysicsBody,
    pub transform: Transform,
}

/// State carried across contacts and ticks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseState {
    /// Seconds until a laser may hurt again.
    pub laser_cooldown: f32,
}

impl ResponseState {
    pub fn tick(&mut self, dt: f32) {
        self.laser_cooldown = (self.laser_cooldown - dt).max(0.0);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome {
    /// The mover rests on top of the collider.
    pub support: bool,
    /// The collider must be destroyed once the pass is over.
    pub destroy: bool,
    /// A laser knocked the mover back; its velocity must survive the tick.
    pub knockback: bool,
}

/// React to a contact between `mover` and `other` found at `hit_time`.
pub fn collision_response(
    mover: &mut Mover,
    other: Entity,
    hit_time: f32,
    coord: &mut Coordinator,
    ctx: &mut FrameContext,
    state: &mut ResponseState,
) -> Result<Outcome, EcsError> {
    let other_body = coord.get_component::<PhysicsBody>(other)?.clone();
    let mover_category = mover.body.category.clone();
    let hit = |tag: &str| is_collision(category::THIEF, tag, &mover_category, &other_body.category);
    let mut outcome = Outcome::default();

    if hit(category::WALL) {
        outcome.support = resolve_solid(mover, &other_body.aabb, hit_time);
    } else if hit(category::OBJECT) {
        debug!("{} picked up {}", mover.entity, other);
        ctx.audio.play(fx::PICKUP);
        ctx.objects_picked += 1;
        outcome.destroy = true;
    } else if hit(category::SWITCH) {
        if ctx.input.action_interact.just_pressed && mover.body.is_grounded {
            flip_switch(other, coord, ctx)?;
        }
    } else if hit(category::LOCK_DOOR) {
        let closed = coord.try_component::<AutoDoor>(other).is_none_or(|d| !d.is_open);
        if closed {
            outcome.support = resolve_solid(mover, &other_body.aabb, hit_time);
        }
    } else if hit(category::DOOR) {
        let mut open = door_is_open(coord, other);
        if ctx.input.action_interact.just_pressed {
            open = toggle_door(other, DOOR_TEXTURES, coord, ctx)?;
            resize_door(other, open, coord)?;
        }
        if !open {
            let aabb = coord.get_component::<PhysicsBody>(other)?.aabb;
            push_back_horizontal(mover, &aabb);
        }
    } else if hit(category::LASER_MODULE) {
        // Linking node only.
    } else if hit(category::LASER) {
        let emitting = coord
            .try_component::<LaserComponent>(other)
            .is_none_or(LaserComponent::is_emitting);
        if emitting && state.laser_cooldown <= 0.0 {
            ctx.health -= 1;
            ctx.audio.play(fx::ZAP);
            knockback(mover, &other_body.aabb, ctx.config.laser_knockback);
            outcome.knockback = true;
            state.laser_cooldown = ctx.config.laser_cooldown;
            debug!("{} zapped by {}, health {}", mover.entity, other, ctx.health);
        }
    } else if hit(category::VENT) {
        let mut open = door_is_open(coord, other);
        if ctx.input.action_interact.just_pressed {
            open = toggle_door(other, VENT_TEXTURES, coord, ctx)?;
        }
        if !open {
            outcome.support = if mover.body.aabb.overlaps(&other_body.aabb) {
                push_back_any(mover, &other_body.aabb)
            } else {
                resolve_predicted(mover, &other_body.aabb, hit_time)
            };
        }
    }

    Ok(outcome)
}

/// Keep the mover out of a solid box. Returns true when it ends up resting
/// on top.
fn resolve_solid(mover: &mut Mover, other: &Aabb, hit_time: f32) -> bool {
    let extents = mover.body.aabb.overlap_extents(other);
    if extents.x <= 0.0 || extents.y <= 0.0 {
        return resolve_predicted(mover, other, hit_time);
    }

    let body = &mut mover.body;
    let from_left = body.aabb.center().x < other.center().x;
    let from_above = body.aabb.center().y < other.center().y;
    if extents.x < extents.y {
        let dx = if from_left { -extents.x } else { extents.x };
        body.shift(Vector2::new(dx, 0.0));
        body.velocity.x = 0.0;
        false
    } else if from_above {
        body.shift(Vector2::new(0.0, -extents.y));
        body.velocity.y = 0.0;
        true
    } else {
        body.shift(Vector2::new(0.0, extents.y));
        if !body.is_grounded {
            body.velocity = Vector2::zero();
        }
        false
    }
}

/// Contact found by the sweep only: advance to the time of impact along the
/// approach axis and stop there.
fn resolve_predicted(mover: &mut Mover, other: &Aabb, hit_time: f32) -> bool {
    let body = &mut mover.body;
    let extents = body.aabb.overlap_extents(other);
    if extents.y > 0.0 {
        body.shift(Vector2::new(body.velocity.x * hit_time, 0.0));
        body.velocity.x = 0.0;
        false
    } else {
        let from_above = body.aabb.center().y < other.center().y;
        body.shift(Vector2::new(0.0, body.velocity.y * hit_time));
        body.velocity.y = 0.0;
        from_above
    }
}

/// Push the mover out of `other` along the smaller horizontal overlap.
fn push_back_horizontal(mover: &mut Mover, other: &Aabb) {
    let body = &mut mover.body;
    if !body.aabb.overlaps(other) {
        return;
    }
    let from_left = body.aabb.max.x - other.min.x;
    let from_right = other.max.x - body.aabb.min.x;
    let dx = if from_left < from_right {
        -from_left
    } else {
        from_right
    };
    body.shift(Vector2::new(dx, 0.0));
    body.velocity.x = 0.0;
}

/// Push the mover out of `other` through the nearest side. Returns true when
/// pushed out over the top.
fn push_back_any(mover: &mut Mover, other: &Aabb) -> bool {
    let body = &mut mover.body;
    let left = body.aabb.max.x - other.min.x;
    let right = other.max.x - body.aabb.min.x;
    let top = body.aabb.max.y - other.min.y;
    let bottom = other.max.y - body.aabb.min.y;
    let nearest = left.min(right).min(top).min(bottom);

    if nearest == top {
        body.shift(Vector2::new(0.0, -top));
        body.velocity.y = 0.0;
        true
    } else if nearest == bottom {
        body.shift(Vector2::new(0.0, bottom));
        body.velocity.y = 0.0;
        false
    } else if nearest == left {
        body.shift(Vector2::new(-left, 0.0));
        body.velocity.x = 0.0;
        false
    } else {
        body.shift(Vector2::new(right, 0.0));
        body.velocity.x = 0.0;
        false
    }
}

/// Knock the mover away from the laser through its nearest edge.
fn knockback(mover: &mut Mover, laser: &Aabb, speed: f32) {
    let body = &mut mover.body;
    let dist_left = (body.aabb.max.x - laser.min.x).abs();
    let dist_right = (laser.max.x - body.aabb.min.x).abs();
    let dist_top = (body.aabb.max.y - laser.min.y).abs();
    let dist_bottom = (laser.max.y - body.aabb.min.y).abs();
    let nearest = dist_left.min(dist_right).min(dist_top).min(dist_bottom);

    if nearest == dist_left {
        body.velocity.x = -speed;
    } else if nearest == dist_right {
        body.velocity.x = speed;
    } else if nearest == dist_top {
        body.velocity.y = -speed;
    } else {
        body.velocity.y = speed;
    }
}

fn door_is_open(coord: &Coordinator, door: Entity) -> bool {
    coord.try_component::<AutoDoor>(door).is_some_and(|d| d.is_open)
}

/// Flip a door or vent, swap its texture and play the door sound.
fn toggle_door(
    door: Entity,
    textures: (&str, &str),
    coord: &mut Coordinator,
    ctx: &mut FrameContext,
) -> Result<bool, EcsError> {
    if !coord.has_component::<AutoDoor>(door) {
        coord.add_component(door, AutoDoor::closed())?;
    }
    let open = coord.get_component_mut::<AutoDoor>(door)?.toggle();
    set_texture(coord, door, &ctx.textures, textures, open);
    ctx.audio.play(if textures == VENT_TEXTURES {
        fx::VENT
    } else {
        fx::DOOR
    });
    debug!("{} is now {}", door, if open { "open" } else { "closed" });
    Ok(open)
}

/// Widen an opening door (or narrow a closing one) keeping its left edge,
/// and move the body box along.
fn resize_door(door: Entity, open: bool, coord: &mut Coordinator) -> Result<(), EcsError> {
    let transform = coord.get_component_mut::<Transform>(door)?;
    let left = transform.translate.x - transform.scale.x * 0.5;
    if open {
        transform.scale.x *= DOOR_OPEN_WIDTH;
    } else {
        transform.scale.x /= DOOR_OPEN_WIDTH;
    }
    transform.translate.x = left + transform.scale.x * 0.5;
    let resized = *transform;

    let body = coord.get_component_mut::<PhysicsBody>(door)?;
    body.position = resized.translate;
    body.size = resized.scale;
    body.aabb = resized.aabb();
    Ok(())
}

fn flip_switch(switch: Entity, coord: &mut Coordinator, ctx: &mut FrameContext) -> Result<(), EcsError> {
    let toggled = coord
        .try_component_mut::<Switch>(switch)
        .map(|component| (component.toggle(), component.interactables.clone()));
    let (on, interactables) = match toggled {
        Some(state) => state,
        None => (!coord.get_component::<PhysicsBody>(switch)?.switch_on, Vec::new()),
    };
    coord.get_component_mut::<PhysicsBody>(switch)?.switch_on = on;

    let current = coord
        .try_component::<Sprite>(switch)
        .map(|s| s.texture_name.clone());
    if let Some(name) = current {
        if let Some(pair) = SWITCH_TEXTURES
            .iter()
            .find(|(off, on)| *off == name || *on == name)
        {
            set_texture(coord, switch, &ctx.textures, *pair, on);
        }
    }

    if !interactables.is_empty() {
        let targets: Vec<Entity> = coord
            .store::<Name>()?
            .iter()
            .filter(|(_, name)| interactables.iter().any(|i| i == name.as_str()))
            .map(|(entity, _)| entity)
            .collect();
        for target in targets {
            let Some((is_lock_door, is_laser)) = coord
                .try_component::<PhysicsBody>(target)
                .map(|b| (b.is(category::LOCK_DOOR), b.is(category::LASER)))
            else {
                continue;
            };
            if is_lock_door {
                if !coord.has_component::<AutoDoor>(target) {
                    coord.add_component(target, AutoDoor::closed())?;
                }
                let open = coord.get_component_mut::<AutoDoor>(target)?.toggle();
                set_texture(coord, target, &ctx.textures, LOCK_DOOR_TEXTURES, open);
            } else if is_laser {
                if let Some(laser) = coord.try_component_mut::<LaserComponent>(target) {
                    laser.toggle();
                }
            }
        }
    }

    ctx.audio.play(if on { fx::SWITCH_ON } else { fx::SWITCH_OFF });
    debug!("{} switched {}", switch, if on { "on" } else { "off" });
    Ok(())
}

/// Point the entity's sprite at the first or second texture of `pair`.
/// Unknown textures leave the id at zero.
fn set_texture(
    coord: &mut Coordinator,
    entity: Entity,
    textures: &TextureStore,
    pair: (&str, &str),
    second: bool,
) {
    let name = if second { pair.1 } else { pair.0 };
    if let Some(sprite) = coord.try_component_mut::<Sprite>(entity) {
        sprite.texture_name = name.to_string();
        sprite.texture_id = textures.id_or_missing(name);
    }
}
