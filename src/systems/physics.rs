//! Physics step.
//!
//! [`PhysicsSystem::update`] runs once per rendered frame:
//!
//! 1. nothing happens while the window is unfocused;
//! 2. the spatial grid is rebuilt from every body's box;
//! 3. unless the game is `Playing` or `Paused` the step stops here. A paused
//!    frame has a zero delta, so input and overlap checks still run while
//!    nothing moves;
//! 4. every body is processed: synced from its transform, integrated and
//!    written back. The thief additionally gets gravity, keyboard movement,
//!    drag-to-jump, collision handling and the world bounds.
//!
//! Grounded walking speed is clamped both inside the movement step and after
//! forces are integrated, except on a tick where a laser knocked the thief
//! back.
//!
//! Collision candidates come from the grid, are deduplicated and filtered to
//! game-object bodies, then tested with the swept box test. Entities a
//! response asks to destroy are destroyed once the whole candidate list has
//! been handled.

use log::debug;

use crate::components::animation::AnimationState;
use crate::components::physicsbody::{PhysicsBody, category};
use crate::components::renderlayer::RenderLayer;
use crate::components::transform::Transform;
use crate::ecs::{Coordinator, EcsError, Entity};
use crate::events::audio::fx;
use crate::events::collision::{CollisionEvent, Message};
use crate::math::Vector2;
use crate::resources::framecontext::FrameContext;
use crate::resources::gameconfig::EngineConfig;
use crate::resources::gamestate::GameStates;
use crate::resources::spatialgrid::SpatialGrid;
use crate::systems::collision::{SweepMode, rect_rect};
use crate::systems::movement::{DragState, MovementSound, apply_movement, clamp_ground_velocity};
use crate::systems::response::{Mover, Outcome, ResponseState, collision_response};

pub struct PhysicsSystem {
    grid: SpatialGrid,
    sweep_mode: SweepMode,
    drag: DragState,
    movement_sound: MovementSound,
    response: ResponseState,
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl PhysicsSystem {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            grid: SpatialGrid::new(config.world_width, config.world_height, config.cell_size),
            sweep_mode: config.sweep_mode(),
            drag: DragState::default(),
            movement_sound: MovementSound::default(),
            response: ResponseState::default(),
        }
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn sweep_mode(&self) -> SweepMode {
        self.sweep_mode
    }

    pub fn update(&mut self, coord: &mut Coordinator, ctx: &mut FrameContext) -> Result<(), EcsError> {
        if !ctx.window_focused {
            return Ok(());
        }

        let entities: Vec<Entity> = coord.system_entities::<PhysicsSystem>()?.iter().copied().collect();
        self.grid.clear();
        for &entity in &entities {
            if let Some(body) = coord.try_component::<PhysicsBody>(entity) {
                self.grid.add_entity(entity, &body.aabb);
            }
        }

        if !matches!(ctx.game_state.get(), GameStates::Playing | GameStates::Paused) {
            return Ok(());
        }

        for entity in entities {
            // a collision response earlier in this frame may have removed it
            if coord.is_alive(entity) {
                self.process_entity(entity, coord, ctx)?;
            }
        }
        Ok(())
    }

    fn process_entity(
        &mut self,
        entity: Entity,
        coord: &mut Coordinator,
        ctx: &mut FrameContext,
    ) -> Result<(), EcsError> {
        let dt = ctx.dt;
        let mut transform = *coord.get_component::<Transform>(entity)?;
        let mut body = coord.get_component::<PhysicsBody>(entity)?.clone();
        body.sync_with_transform(&transform);

        let is_thief = body.is(category::THIEF);
        let mut knocked_back = false;
        if is_thief {
            let crawling = coord
                .try_component::<AnimationState>(entity)
                .is_some_and(|a| a.current.is_crouched());
            let mut mover = Mover {
                entity,
                body,
                transform,
            };
            let config = &ctx.config;

            let on_ground = apply_gravity(&mut mover.body, config.gravity, config.ground_line, dt);
            apply_movement(
                &mut mover.body,
                &mut mover.transform,
                &ctx.input,
                config,
                crawling,
                &mut self.movement_sound,
                &ctx.audio,
            );

            let launch = self
                .drag
                .update(&ctx.input, mover.body.is_grounded, config.max_jump_velocity);
            if let Some(velocity) = launch {
                debug!("{} jumps with {:?}", entity, velocity);
                mover.body.velocity = velocity;
                mover.body.is_grounded = false;
                ctx.audio.play(fx::JUMP);
            }

            self.response.tick(dt);
            let contacts = self.handle_collisions(&mut mover, coord, ctx)?;
            mover.body.is_grounded = launch.is_none() && (on_ground || contacts.support);
            knocked_back = contacts.knockback;
            enforce_window_boundaries(&mut mover.body, ctx.config.world_width, ctx.config.world_height);

            body = mover.body;
            transform = mover.transform;
        }

        apply_forces(&mut body, dt);
        if is_thief && !knocked_back {
            clamp_ground_velocity(&mut body, ctx.config.move_velocity);
        }
        move_entity(&mut body, dt);

        transform.translate = body.position;
        transform.rotate = body.angle;
        *coord.get_component_mut::<PhysicsBody>(entity)? = body;
        *coord.get_component_mut::<Transform>(entity)? = transform;
        Ok(())
    }

    /// Test the mover against its grid neighbours and run the responses.
    /// The returned outcome says whether some collider supports the mover
    /// from below and whether a laser knocked it back.
    fn handle_collisions(
        &mut self,
        mover: &mut Mover,
        coord: &mut Coordinator,
        ctx: &mut FrameContext,
    ) -> Result<Outcome, EcsError> {
        let mut contacts = Outcome::default();
        if layer_of(coord, mover.entity) != RenderLayer::GameObject {
            return Ok(contacts);
        }

        let mut candidates = self.grid.nearby_entities(&mover.body.aabb);
        candidates.sort_unstable();
        candidates.dedup();

        let mut destroy: Vec<Entity> = Vec::new();
        for other in candidates {
            if other == mover.entity || !coord.is_alive(other) {
                continue;
            }
            if layer_of(coord, other) != RenderLayer::GameObject {
                continue;
            }
            let Some((aabb, velocity)) = coord
                .try_component::<PhysicsBody>(other)
                .map(|b| (b.aabb, b.velocity))
            else {
                continue;
            };
            let Some(hit_time) = rect_rect(
                &mover.body.aabb,
                mover.body.velocity,
                &aabb,
                velocity,
                ctx.dt,
                self.sweep_mode,
            ) else {
                continue;
            };

            let outcome = collision_response(mover, other, hit_time, coord, ctx, &mut self.response)?;
            contacts.support |= outcome.support;
            contacts.knockback |= outcome.knockback;
            if outcome.destroy {
                destroy.push(other);
            }
            ctx.broker.publish(Message::CollisionDetected(CollisionEvent {
                a: mover.entity,
                b: other,
                time: hit_time,
            }));
        }

        destroy.sort_unstable();
        destroy.dedup();
        for entity in destroy {
            if coord.is_alive(entity) {
                coord.destroy_entity(entity)?;
                debug!("destroyed {}", entity);
                ctx.broker.publish(Message::EntityDestroyed(entity));
            }
        }
        Ok(contacts)
    }
}

fn layer_of(coord: &Coordinator, entity: Entity) -> RenderLayer {
    coord
        .try_component::<RenderLayer>(entity)
        .copied()
        .unwrap_or_default()
}

/// Ground-line gravity. Above the line the body accelerates downwards and
/// `false` is returned; on or below it vertical velocity is zeroed and the
/// body counts as on the ground.
pub fn apply_gravity(body: &mut PhysicsBody, gravity: f32, ground_line: f32, dt: f32) -> bool {
    if body.aabb.max.y < ground_line {
        body.velocity.y += gravity * dt;
        false
    } else {
        body.velocity.y = 0.0;
        true
    }
}

/// Integrate the accumulated forces into velocity (semi-implicit Euler) and
/// clear them.
pub fn apply_forces(body: &mut PhysicsBody, dt: f32) {
    body.forces.validate_age(dt);

    let net_force = body.forces.net_force(body.velocity);
    body.acceleration = if body.mass > 0.0 {
        net_force / body.mass
    } else {
        Vector2::zero()
    };
    body.velocity += body.acceleration * dt;

    let torque = body.forces.net_torque();
    body.angular_acceleration = if body.inertia_mass > 0.0 {
        torque / body.inertia_mass
    } else {
        0.0
    };
    body.angular_velocity += body.angular_acceleration * dt;

    body.forces.clear();
}

/// Advance position, box and angle by the current velocities.
pub fn move_entity(body: &mut PhysicsBody, dt: f32) {
    body.shift(body.velocity * dt);
    body.angle += body.angular_velocity * dt;
}

/// Keep the body inside `[0, width] × [0, height]`, stopping it on the axis
/// it hit.
pub fn enforce_window_boundaries(body: &mut PhysicsBody, width: f32, height: f32) {
    if body.aabb.min.x < 0.0 {
        body.shift(Vector2::new(-body.aabb.min.x, 0.0));
        body.velocity.x = 0.0;
    } else if body.aabb.max.x > width {
        body.shift(Vector2::new(width - body.aabb.max.x, 0.0));
        body.velocity.x = 0.0;
    }
    if body.aabb.min.y < 0.0 {
        body.shift(Vector2::new(0.0, -body.aabb.min.y));
        body.velocity.y = 0.0;
    } else if body.aabb.max.y > height {
        body.shift(Vector2::new(0.0, height - body.aabb.max.y));
        body.velocity.y = 0.0;
    }
}
