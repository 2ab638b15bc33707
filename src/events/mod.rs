//! Event and message types exchanged across systems.
//!
//! Submodules:
//! - [`audio`] – commands for the background audio thread
//! - [`collision`] – collision and destruction notifications from the physics step
pub mod audio;
pub mod collision;
