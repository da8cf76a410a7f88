//! A module for defining AI behaviors for the automated opponent.

use crate::battle::rng::RandomSource;
use crate::combatant::Combatant;

/// A trait for any system that can pick a move for the automated side.
/// Implementations must return an index into `combatant.moves()`.
pub trait Behavior {
    /// Picks the slot of the move the combatant will use.
    fn select_move(&self, combatant: &Combatant, rng: &mut dyn RandomSource) -> usize;
}

/// Uniform random choice among the moves that would do something.
///
/// Healing moves are left out while the combatant is at full HP. When that
/// leaves nothing, every move is eligible again. Always consumes one draw.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPolicy;

impl RandomPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Slots of the moves the policy may choose from.
    pub fn eligible_moves(combatant: &Combatant) -> Vec<usize> {
        let eligible: Vec<usize> = combatant
            .moves()
            .iter()
            .enumerate()
            .filter(|(_, move_data)| !move_data.is_healing() || !combatant.is_full_hp())
            .map(|(index, _)| index)
            .collect();

        if eligible.is_empty() {
            (0..combatant.moves().len()).collect()
        } else {
            eligible
        }
    }
}

impl Behavior for RandomPolicy {
    fn select_move(&self, combatant: &Combatant, rng: &mut dyn RandomSource) -> usize {
        let pool = Self::eligible_moves(combatant);
        let draw = rng.next_unit("opponent move choice");
        let index = ((draw * pool.len() as f64).floor() as usize).min(pool.len().saturating_sub(1));
        pool.get(index).copied().unwrap_or(0)
    }
}
