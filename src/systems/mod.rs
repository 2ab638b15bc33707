//! Engine systems.
//!
//! Submodules overview
//! - [`animation`] – select and advance thief animation clips from body state
//! - [`collision`] – swept box and circle tests, category matching
//! - [`debugoutline`] – body boxes and occupied grid cells for the overlay
//! - [`laser`] – blink timers of laser barriers
//! - [`movement`] – keyboard movement, crouch and drag-to-jump
//! - [`physics`] – the per-frame physics step
//! - [`response`] – category-driven collision response

pub mod animation;
pub mod collision;
pub mod debugoutline;
pub mod laser;
pub mod movement;
pub mod physics;
pub mod response;
