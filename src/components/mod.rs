//! Components attached to entities through the
//! [`Coordinator`](crate::ecs::Coordinator).
//!
//! Submodules overview:
//! - [`animation`] – thief animation state machine driven by body state
//! - [`autodoor`] – open/closed state of doors, lock doors and vents
//! - [`forces`] – per-tick force accumulation on physics bodies
//! - [`laser`] – blinking laser barrier timers
//! - [`name`] – scene name used to link switches with their targets
//! - [`physicsbody`] – simulation state, collision category and bounding box
//! - [`renderlayer`] – draw layer, also filters collision candidates
//! - [`sprite`] – texture reference for the renderer
//! - [`switch`] – wall switch state and the names it controls
//! - [`transform`] – world placement shared with the renderer

pub mod animation;
pub mod autodoor;
pub mod forces;
pub mod laser;
pub mod name;
pub mod physicsbody;
pub mod renderlayer;
pub mod sprite;
pub mod switch;
pub mod transform;
