//! Blinking laser barrier.
//!
//! A turned-on laser alternates between emitting (`is_active`) for
//! `active_time` seconds and idle for `inactive_time` seconds. Switches flip
//! `turned_on`; a turned-off laser never emits.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaserComponent {
    pub active_time: f32,
    pub inactive_time: f32,
    pub is_active: bool,
    pub timer: f32,
    pub turned_on: bool,
    /// Name of the laser module this beam is attached to.
    pub link_module_id: String,
}

impl Default for LaserComponent {
    fn default() -> Self {
        Self {
            active_time: 2.0,
            inactive_time: 1.0,
            is_active: true,
            timer: 0.0,
            turned_on: true,
            link_module_id: String::new(),
        }
    }
}

impl LaserComponent {
    pub fn new(active_time: f32, inactive_time: f32) -> Self {
        Self {
            active_time,
            inactive_time,
            ..Self::default()
        }
    }

    /// True while the beam can hurt.
    pub fn is_emitting(&self) -> bool {
        self.turned_on && self.is_active
    }

    pub fn toggle(&mut self) -> bool {
        self.turned_on = !self.turned_on;
        self.turned_on
    }

    /// Advance the blink cycle by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if !self.turned_on {
            self.is_active = false;
            self.timer = 0.0;
            return;
        }
        self.timer += dt;
        let phase = if self.is_active {
            self.active_time
        } else {
            self.inactive_time
        };
        if self.timer >= phase {
            self.timer -= phase;
            self.is_active = !self.is_active;
        }
    }
}
