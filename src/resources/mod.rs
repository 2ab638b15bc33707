//! Long-lived data shared by the systems.
//!
//! Overview
//! - `audio` – fire-and-forget sink and the background audio thread bridge
//! - `debugmode` – toggles collision outlines and extra logs
//! - `framecontext` – per-frame delta, focus, game state, health and channels
//! - `gameconfig` – INI-backed engine tunables
//! - `gamestate` – authoritative and pending high-level game state
//! - `input` – per-frame keyboard and mouse state
//! - `messagebroker` – fan-out of collision and destruction messages
//! - `spatialgrid` – uniform broad-phase grid
//! - `texturestore` – texture ids keyed by file name
//! - `tilemap` – binary collision map for tile geometry
//! - `worldtime` – simulation time and fixed-step accumulator
pub mod audio;
pub mod debugmode;
pub mod framecontext;
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod messagebroker;
pub mod spatialgrid;
pub mod texturestore;
pub mod tilemap;
pub mod worldtime;
