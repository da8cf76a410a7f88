use crate::ElementType;
use serde::{Deserialize, Serialize};

/// A single move as it appears in a combatant's move list.
///
/// A `power` of zero marks a healing move; it is never a zero-damage attack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub name: String,
    #[serde(rename = "type")]
    pub element: ElementType,
    pub power: u32,
    /// Hit probability in (0, 1].
    pub accuracy: f64,
    #[serde(default)]
    pub description: String,
}

impl MoveData {
    pub fn new(name: &str, element: ElementType, power: u32, accuracy: f64, description: &str) -> Self {
        Self {
            name: name.to_string(),
            element,
            power,
            accuracy,
            description: description.to_string(),
        }
    }

    pub fn is_healing(&self) -> bool {
        self.power == 0
    }
}
