//! Commands sent to the audio thread.
//!
//! The simulation never waits on audio: every command is pushed onto a
//! channel and forgotten. See [`AudioSink`](crate::resources::audio::AudioSink).

/// Sound effect ids used by the simulation.
pub mod fx {
    pub const FOOTSTEPS: &str = "Footsteps";
    pub const CRAWL: &str = "Crawl";
    pub const JUMP: &str = "Jump";
    pub const PICKUP: &str = "Pickup";
    pub const SWITCH_ON: &str = "SwitchOn";
    pub const SWITCH_OFF: &str = "SwitchOff";
    pub const DOOR: &str = "Door";
    pub const VENT: &str = "Vent";
    pub const ZAP: &str = "Zap";
}

/// Mixer channel a sound plays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Looping movement sounds (footsteps, crawling).
    Movement,
    /// One-shot effects.
    Effects,
}

/// Commands sent *to* the audio thread
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCmd {
    PlayFx {
        id: String,
        pan: f32,
        volume: f32,
        channel: Channel,
    },
    PauseChannel { channel: Channel },
    Shutdown,
}
