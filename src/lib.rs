//! Heist engine library.
//!
//! This module exposes the ECS framework, components, resources, systems and
//! events of the platformer core for use in the demo binary, integration
//! tests and as a reusable library.

pub mod components;
pub mod ecs;
pub mod events;
pub mod game;
pub mod math;
pub mod resources;
pub mod scene;
pub mod systems;
