use crate::errors::RosterError;
use schema::{CombatantSpec, ElementType, MoveData, MAX_MOVES};
use serde::Serialize;

/// Runtime snapshot of one combatant.
///
/// Combatants are values: changing HP produces a new snapshot through
/// [`Combatant::with_hp`] or [`Combatant::apply_delta`] instead of mutating a
/// shared instance. HP is always kept within `[0, max_hp]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Combatant {
    name: String,
    hp: u32,
    max_hp: u32,
    types: Vec<ElementType>,
    moves: Vec<MoveData>,
}

impl Combatant {
    /// Builds a full-HP combatant from its static definition.
    pub fn from_spec(spec: &CombatantSpec) -> Result<Self, RosterError> {
        validate_spec(spec)?;
        Ok(Self {
            name: spec.name.clone(),
            hp: spec.max_hp,
            max_hp: spec.max_hp,
            types: spec.types.clone(),
            moves: spec.moves.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn types(&self) -> &[ElementType] {
        &self.types
    }

    pub fn moves(&self) -> &[MoveData] {
        &self.moves
    }

    pub fn move_at(&self, index: usize) -> Option<&MoveData> {
        self.moves.get(index)
    }

    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    pub fn is_full_hp(&self) -> bool {
        self.hp >= self.max_hp
    }

    /// Whether the move in `index` can be chosen right now. Healing moves are
    /// only usable below max HP.
    pub fn can_use(&self, index: usize) -> bool {
        match self.moves.get(index) {
            Some(move_data) => !move_data.is_healing() || !self.is_full_hp(),
            None => false,
        }
    }

    /// Returns a copy with HP set to `hp`, clamped to `[0, max_hp]`.
    pub fn with_hp(&self, hp: u32) -> Self {
        Self {
            hp: hp.min(self.max_hp),
            ..self.clone()
        }
    }

    /// Returns a copy with `delta` added to HP, clamped to `[0, max_hp]`.
    pub fn apply_delta(&self, delta: i64) -> Self {
        let hp = (self.hp as i64 + delta).clamp(0, self.max_hp as i64);
        self.with_hp(hp as u32)
    }

    /// HP as a whole percentage of max HP, for HP bars.
    pub fn hp_percent(&self) -> u32 {
        ((self.hp as f64 / self.max_hp as f64) * 100.0).round() as u32
    }
}

fn validate_spec(spec: &CombatantSpec) -> Result<(), RosterError> {
    if spec.name.trim().is_empty() {
        return Err(RosterError::EmptyName);
    }
    if spec.max_hp == 0 {
        return Err(RosterError::ZeroMaxHp(spec.name.clone()));
    }
    if spec.types.is_empty() {
        return Err(RosterError::NoTypes(spec.name.clone()));
    }
    if spec.moves.is_empty() || spec.moves.len() > MAX_MOVES {
        return Err(RosterError::MoveCount {
            combatant: spec.name.clone(),
            count: spec.moves.len(),
        });
    }
    for move_data in &spec.moves {
        if !(move_data.accuracy > 0.0 && move_data.accuracy <= 1.0) {
            return Err(RosterError::InvalidAccuracy {
                combatant: spec.name.clone(),
                move_name: move_data.name.clone(),
                accuracy: move_data.accuracy,
            });
        }
    }
    Ok(())
}
