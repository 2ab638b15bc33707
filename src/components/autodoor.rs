use serde::{Deserialize, Serialize};

/// Open/closed state shared by doors, lock doors and vents.
///
/// `switch_name` names the switch that drives a lock door; hand-operated
/// doors and vents leave it empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoDoor {
    pub switch_name: String,
    pub is_open: bool,
}

impl AutoDoor {
    pub fn closed() -> Self {
        Self::default()
    }

    pub fn linked_to(switch_name: impl Into<String>) -> Self {
        Self {
            switch_name: switch_name.into(),
            is_open: false,
        }
    }

    pub fn toggle(&mut self) -> bool {
        self.is_open = !self.is_open;
        self.is_open
    }
}
