//! Per-frame simulation context.
//!
//! Everything the physics step reads or writes besides components lives
//! here: the frame delta used by the swept tests, the ground line, window
//! focus, game state, the player's health and pickup count, input, and the
//! outbound audio and message channels. Tests build an isolated context
//! instead of touching process-wide state.

use crate::resources::audio::AudioSink;
use crate::resources::debugmode::DebugMode;
use crate::resources::gameconfig::EngineConfig;
use crate::resources::gamestate::{GameState, GameStates};
use crate::resources::input::InputState;
use crate::resources::messagebroker::MessageBroker;
use crate::resources::texturestore::TextureStore;
use crate::resources::worldtime::WorldTime;

#[derive(Debug)]
pub struct FrameContext {
    /// Delta of the current frame; zero while paused.
    pub dt: f32,
    pub time: WorldTime,
    pub window_focused: bool,
    pub game_state: GameState,
    pub health: i32,
    pub objects_picked: u32,
    pub input: InputState,
    pub audio: AudioSink,
    pub broker: MessageBroker,
    pub textures: TextureStore,
    pub debug: DebugMode,
    pub config: EngineConfig,
}

impl Default for FrameContext {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl FrameContext {
    /// Focused context in the `Playing` state with a silent audio sink.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            dt: 0.0,
            time: WorldTime::default(),
            window_focused: true,
            game_state: GameState::with_state(GameStates::Playing),
            health: config.health,
            objects_picked: 0,
            input: InputState::default(),
            audio: AudioSink::silent(),
            broker: MessageBroker::new(),
            textures: TextureStore::new(),
            debug: DebugMode::default(),
            config,
        }
    }

    pub fn with_audio(mut self, audio: AudioSink) -> Self {
        self.audio = audio;
        self
    }

    /// Start a frame of `frame_dt` seconds: apply pending state changes and
    /// compute the simulation delta (zero while paused).
    pub fn begin_frame(&mut self, frame_dt: f32) -> f32 {
        self.game_state.apply_pending();
        let dt = if self.game_state.is_paused() {
            0.0
        } else {
            frame_dt
        };
        self.dt = self.time.advance(dt);
        self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paused_frame_has_zero_dt() {
        let mut ctx = FrameContext::default();
        assert!((ctx.begin_frame(0.016) - 0.016).abs() < 1e-6);
        ctx.game_state.request(GameStates::Paused);
        assert_eq!(ctx.begin_frame(0.016), 0.0);
        assert_eq!(ctx.dt, 0.0);
    }

    #[test]
    fn test_health_comes_from_config() {
        let config = EngineConfig {
            health: 7,
            ..EngineConfig::default()
        };
        let ctx = FrameContext::new(config);
        assert_eq!(ctx.health, 7);
        assert!(ctx.window_focused);
    }
}
