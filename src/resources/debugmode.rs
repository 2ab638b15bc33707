//! Debug toggle.
//!
//! While enabled the engine builds collision outlines for the renderer and
//! systems may print extra logs.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DebugMode {
    pub enabled: bool,
}

impl DebugMode {
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }
}
