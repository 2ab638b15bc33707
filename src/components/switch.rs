use serde::{Deserialize, Serialize};

/// Wall switch the thief can flip. `interactables` lists the [`Name`]s of
/// the lock doors and lasers it controls.
///
/// [`Name`]: crate::components::name::Name
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Switch {
    pub is_on: bool,
    pub interactables: Vec<String>,
}

impl Switch {
    pub fn new(interactables: Vec<String>) -> Self {
        Self {
            is_on: false,
            interactables,
        }
    }

    pub fn toggle(&mut self) -> bool {
        self.is_on = !self.is_on;
        self.is_on
    }
}
