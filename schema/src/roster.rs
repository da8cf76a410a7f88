use crate::{ElementType, MoveData};
use serde::{Deserialize, Serialize};

/// Maximum number of moves a combatant may carry.
pub const MAX_MOVES: usize = 4;

/// Static definition of one combatant, as read from a roster file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantSpec {
    pub name: String,
    pub max_hp: u32,
    pub types: Vec<ElementType>,
    pub moves: Vec<MoveData>,
}

/// The two combatants of a battle. `left` is the human-controlled side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterSpec {
    pub left: CombatantSpec,
    pub right: CombatantSpec,
}
