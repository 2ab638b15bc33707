//! Per-frame input snapshot.
//!
//! Captures the subset of keyboard and mouse state the simulation cares about.
//! The platform layer (or a test script) reports which keys are down each
//! frame through [`InputState::update`]; edges (`just_pressed`,
//! `just_released`) are derived from the previous frame, so interactions such
//! as flipping a switch fire once per key press no matter how long the key is
//! held. Defaults use A/D/S for movement, arrow keys as alternates and `E` to
//! interact.

use crate::math::Vector2;

/// Keys the engine binds actions to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Null,
    A,
    D,
    S,
    E,
    Left,
    Right,
    Down,
    Escape,
    F11,
}

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently active/pressed this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the key was just released this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: Key,
}

impl Default for BoolState {
    fn default() -> Self {
        Self::bound(Key::Null)
    }
}

impl BoolState {
    pub fn bound(key_binding: Key) -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding,
        }
    }

    /// Record this frame's level and derive the edges from the previous one.
    pub fn set(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

/// Left mouse button plus cursor position. `position` is `None` while the
/// cursor is outside the window.
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    pub position: Option<Vector2>,
    pub left: BoolState,
}

/// Resource capturing the per-frame input state relevant to gameplay.
#[derive(Debug, Clone)]
pub struct InputState {
    pub maindirection_left: BoolState,
    pub maindirection_right: BoolState,
    pub maindirection_down: BoolState,
    // Arrow keys
    pub secondarydirection_left: BoolState,
    pub secondarydirection_right: BoolState,
    pub secondarydirection_down: BoolState,
    // Actions
    pub action_interact: BoolState,
    pub action_back: BoolState,
    pub mode_debug: BoolState,
    pub mouse: MouseState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            maindirection_left: BoolState::bound(Key::A),
            maindirection_right: BoolState::bound(Key::D),
            maindirection_down: BoolState::bound(Key::S),
            secondarydirection_left: BoolState::bound(Key::Left),
            secondarydirection_right: BoolState::bound(Key::Right),
            secondarydirection_down: BoolState::bound(Key::Down),
            action_interact: BoolState::bound(Key::E),
            action_back: BoolState::bound(Key::Escape),
            mode_debug: BoolState::bound(Key::F11),
            mouse: MouseState::default(),
        }
    }
}

impl InputState {
    /// Poll every bound key through `is_down`.
    pub fn update(&mut self, is_down: impl Fn(Key) -> bool) {
        for state in [
            &mut self.maindirection_left,
            &mut self.maindirection_right,
            &mut self.maindirection_down,
            &mut self.secondarydirection_left,
            &mut self.secondarydirection_right,
            &mut self.secondarydirection_down,
            &mut self.action_interact,
            &mut self.action_back,
            &mut self.mode_debug,
        ] {
            state.set(is_down(state.key_binding));
        }
    }

    pub fn update_mouse(&mut self, position: Option<Vector2>, left_down: bool) {
        self.mouse.position = position;
        self.mouse.left.set(left_down);
    }

    pub fn left_held(&self) -> bool {
        self.maindirection_left.active || self.secondarydirection_left.active
    }

    pub fn right_held(&self) -> bool {
        self.maindirection_right.active || self.secondarydirection_right.active
    }

    pub fn crouch_held(&self) -> bool {
        self.maindirection_down.active || self.secondarydirection_down.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolstate_default() {
        let bs = BoolState::default();
        assert!(!bs.active);
        assert!(!bs.just_pressed);
        assert!(!bs.just_released);
        assert_eq!(bs.key_binding, Key::Null);
    }

    #[test]
    fn test_inputstate_default_key_bindings() {
        let input = InputState::default();
        assert_eq!(input.maindirection_left.key_binding, Key::A);
        assert_eq!(input.maindirection_right.key_binding, Key::D);
        assert_eq!(input.maindirection_down.key_binding, Key::S);
        assert_eq!(input.secondarydirection_left.key_binding, Key::Left);
        assert_eq!(input.secondarydirection_right.key_binding, Key::Right);
        assert_eq!(input.secondarydirection_down.key_binding, Key::Down);
        assert_eq!(input.action_interact.key_binding, Key::E);
        assert_eq!(input.action_back.key_binding, Key::Escape);
        assert_eq!(input.mode_debug.key_binding, Key::F11);
    }

    #[test]
    fn test_edges_fire_once_per_press() {
        let mut input = InputState::default();
        input.update(|k| k == Key::E);
        assert!(input.action_interact.just_pressed);
        input.update(|k| k == Key::E);
        assert!(input.action_interact.active);
        assert!(!input.action_interact.just_pressed);
        input.update(|_| false);
        assert!(input.action_interact.just_released);
        assert!(!input.action_interact.active);
    }

    #[test]
    fn test_alternate_bindings() {
        let mut input = InputState::default();
        input.update(|k| k == Key::Left || k == Key::Down);
        assert!(input.left_held());
        assert!(input.crouch_held());
        assert!(!input.right_held());
    }

    #[test]
    fn test_mouse_edges() {
        let mut input = InputState::default();
        input.update_mouse(Some(Vector2::new(1.0, 2.0)), true);
        assert!(input.mouse.left.just_pressed);
        input.update_mouse(None, false);
        assert!(input.mouse.left.just_released);
        assert!(input.mouse.position.is_none());
    }
}
