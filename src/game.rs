//! Engine loop.
//!
//! [`Engine`] owns the [`Coordinator`], the per-frame [`FrameContext`] and
//! the registered systems, and runs one rendered frame per
//! [`Engine::update`] call:
//!
//! 1. pending game state changes are applied and the frame delta computed;
//! 2. debug and pause toggles are read from input;
//! 3. the physics step runs once with the frame delta;
//! 4. lasers and animations run once per elapsed fixed step;
//! 5. debug outlines are rebuilt while debug mode is on.
//!
//! The caller feeds input into [`Engine::ctx_mut`] before each frame and
//! reads transforms back afterwards.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};

use crate::components::animation::AnimationState;
use crate::components::autodoor::AutoDoor;
use crate::components::laser::LaserComponent;
use crate::components::name::Name;
use crate::components::physicsbody::PhysicsBody;
use crate::components::renderlayer::RenderLayer;
use crate::components::sprite::Sprite;
use crate::components::switch::Switch;
use crate::components::transform::Transform;
use crate::ecs::{Coordinator, EcsError, Entity, Signature};
use crate::resources::framecontext::FrameContext;
use crate::resources::gameconfig::EngineConfig;
use crate::resources::gamestate::GameStates;
use crate::resources::tilemap::{BinaryCollisionMap, CollisionFlags};
use crate::resources::worldtime::FixedStep;
use crate::systems::animation::AnimationSystem;
use crate::systems::debugoutline::{DebugOutlines, build_outlines};
use crate::systems::laser::LaserSystem;
use crate::systems::physics::PhysicsSystem;

pub struct Engine {
    coordinator: Coordinator,
    ctx: FrameContext,
    fixed: FixedStep,
    physics: Rc<RefCell<PhysicsSystem>>,
    animation: Rc<RefCell<AnimationSystem>>,
    laser: Rc<RefCell<LaserSystem>>,
    collision_map: Option<BinaryCollisionMap>,
    outlines: Option<DebugOutlines>,
}

impl Engine {
    /// Register every component type and system and set their signatures.
    pub fn new(config: EngineConfig) -> Result<Self, EcsError> {
        let mut coordinator = Coordinator::new();
        let transform = coordinator.register_component::<Transform>()?;
        let body = coordinator.register_component::<PhysicsBody>()?;
        coordinator.register_component::<Name>()?;
        coordinator.register_component::<RenderLayer>()?;
        coordinator.register_component::<Sprite>()?;
        coordinator.register_component::<Switch>()?;
        coordinator.register_component::<AutoDoor>()?;
        let laser = coordinator.register_component::<LaserComponent>()?;
        let animation = coordinator.register_component::<AnimationState>()?;

        let physics_system = coordinator.register_system(PhysicsSystem::new(&config))?;
        coordinator
            .set_system_signature::<PhysicsSystem>(Signature::empty().with(body).with(transform))?;
        let animation_system = coordinator.register_system(AnimationSystem)?;
        coordinator
            .set_system_signature::<AnimationSystem>(Signature::empty().with(body).with(animation))?;
        let laser_system = coordinator.register_system(LaserSystem)?;
        coordinator.set_system_signature::<LaserSystem>(Signature::empty().with(laser))?;

        info!(
            "Engine ready: world {}x{}, fixed step {:.4}s",
            config.world_width, config.world_height, config.fixed_step
        );
        Ok(Self {
            coordinator,
            fixed: FixedStep::new(config.fixed_step),
            ctx: FrameContext::new(config),
            physics: physics_system,
            animation: animation_system,
            laser: laser_system,
            collision_map: None,
            outlines: None,
        })
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    pub fn coordinator_mut(&mut self) -> &mut Coordinator {
        &mut self.coordinator
    }

    pub fn ctx(&self) -> &FrameContext {
        &self.ctx
    }

    pub fn ctx_mut(&mut self) -> &mut FrameContext {
        &mut self.ctx
    }

    /// Scene loading needs both halves at once.
    pub fn parts_mut(&mut self) -> (&mut Coordinator, &mut FrameContext) {
        (&mut self.coordinator, &mut self.ctx)
    }

    pub fn physics(&self) -> Rc<RefCell<PhysicsSystem>> {
        Rc::clone(&self.physics)
    }

    pub fn set_collision_map(&mut self, map: BinaryCollisionMap) {
        info!("Collision map {}x{}", map.width(), map.height());
        self.collision_map = Some(map);
    }

    pub fn collision_map(&self) -> Option<&BinaryCollisionMap> {
        self.collision_map.as_ref()
    }

    /// Sides of `entity` touching solid tiles of the collision map, if one
    /// is loaded and the entity has a transform. Map cells are `cell_size`
    /// world units wide.
    pub fn map_flags(&self, entity: Entity) -> Option<CollisionFlags> {
        let map = self.collision_map.as_ref()?;
        let t = self.coordinator.try_component::<Transform>(entity)?;
        let cell = self.ctx.config.cell_size;
        Some(map.check_instance_collision(t.translate / cell, t.scale / cell))
    }

    /// Outlines of the last frame, present while debug mode is on.
    pub fn outlines(&self) -> Option<&DebugOutlines> {
        self.outlines.as_ref()
    }

    pub fn is_quitting(&self) -> bool {
        self.ctx.game_state.get() == GameStates::Quitting
    }

    /// Run one rendered frame of `frame_dt` seconds. Returns how many fixed
    /// steps the animation and laser systems ran.
    pub fn update(&mut self, frame_dt: f32) -> Result<u32, EcsError> {
        let dt = self.ctx.begin_frame(frame_dt);

        if self.ctx.input.mode_debug.just_pressed {
            let on = self.ctx.debug.toggle();
            info!("Debug mode {}", if on { "on" } else { "off" });
        }
        if self.ctx.input.action_back.just_pressed {
            match self.ctx.game_state.get() {
                GameStates::Playing => self.ctx.game_state.request(GameStates::Paused),
                GameStates::Paused => self.ctx.game_state.request(GameStates::Playing),
                _ => {}
            }
        }

        self.physics
            .borrow_mut()
            .update(&mut self.coordinator, &mut self.ctx)?;

        let steps = if self.ctx.window_focused {
            self.fixed.steps(dt)
        } else {
            0
        };
        let step = self.fixed.step();
        for _ in 0..steps {
            self.laser.borrow_mut().update(&mut self.coordinator, step)?;
            self.animation.borrow_mut().update(&mut self.coordinator, step)?;
        }
        if steps > 0 {
            debug!("frame dt {:.4}: {} fixed steps", dt, steps);
        }

        self.outlines = if self.ctx.debug.enabled {
            Some(build_outlines(&self.coordinator, &self.ctx.config)?)
        } else {
            None
        };
        Ok(steps)
    }
}
