//! High-level game state.
//!
//! [`GameState`] holds the authoritative current state and any transition
//! requested during the frame. The engine applies the pending transition at
//! the start of the next update so every system in a frame sees one state.

use log::info;

/// Discrete high-level states the game can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStates {
    #[default]
    None,
    Setup,
    Playing,
    /// Systems still run, with a zero time delta.
    Paused,
    Quitting,
}

/// Representation of a requested next state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NextGameStates {
    #[default]
    Unchanged,
    Pending(GameStates),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameState {
    current: GameStates,
    next: NextGameStates,
}

impl GameState {
    /// Create a new state initialized to [`GameStates::None`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: GameStates) -> Self {
        Self {
            current: state,
            next: NextGameStates::Unchanged,
        }
    }

    /// Read-only access to the current state.
    pub fn get(&self) -> GameStates {
        self.current
    }

    pub fn pending(&self) -> NextGameStates {
        self.next
    }

    /// Update the current state immediately.
    pub fn set(&mut self, state: GameStates) {
        self.current = state;
    }

    /// Request a transition to `next`; applied by [`GameState::apply_pending`].
    pub fn request(&mut self, next: GameStates) {
        self.next = NextGameStates::Pending(next);
    }

    /// Apply a pending transition. Returns the new state if one happened.
    pub fn apply_pending(&mut self) -> Option<GameStates> {
        match std::mem::take(&mut self.next) {
            NextGameStates::Pending(state) if state != self.current => {
                info!("Game state {:?} -> {:?}", self.current, state);
                self.current = state;
                Some(state)
            }
            _ => None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.current == GameStates::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.current == GameStates::Paused
    }
}
