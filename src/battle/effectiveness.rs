use schema::ElementType;

/// Multiplier applied to super-effective matchups.
pub const SUPER_EFFECTIVE: f64 = 2.0;
/// Multiplier applied to resisted matchups.
pub const RESISTED: f64 = 0.5;

/// Static attacking-type to defending-type multiplier table.
///
/// The table is sparse: a pair that has no entry is neutral.
pub struct EffectivenessTable;

impl EffectivenessTable {
    /// Looks up the table entry for a single attacking/defending pair.
    /// Returns `None` when the pair has no entry.
    pub fn lookup(attacking: ElementType, defending: ElementType) -> Option<f64> {
        use ElementType::*;

        match (attacking, defending) {
            // Fire
            (Fire, Grass) | (Fire, Ice) => Some(SUPER_EFFECTIVE),
            (Fire, Water) | (Fire, Fire) => Some(RESISTED),

            // Water
            (Water, Fire) | (Water, Rock) => Some(SUPER_EFFECTIVE),
            (Water, Grass) | (Water, Electric) => Some(RESISTED),

            // Electric
            (Electric, Water) | (Electric, Flying) => Some(SUPER_EFFECTIVE),
            (Electric, Grass) | (Electric, Electric) => Some(RESISTED),

            // Grass
            (Grass, Water) | (Grass, Rock) => Some(SUPER_EFFECTIVE),
            (Grass, Fire) | (Grass, Grass) => Some(RESISTED),

            // Psychic
            (Psychic, Poison) | (Psychic, Fighting) => Some(SUPER_EFFECTIVE),
            (Psychic, Psychic) => Some(RESISTED),

            // Ice
            (Ice, Grass) | (Ice, Ground) => Some(SUPER_EFFECTIVE),
            (Ice, Fire) | (Ice, Water) => Some(RESISTED),

            // Fairy
            (Fairy, Dragon) | (Fairy, Dark) => Some(SUPER_EFFECTIVE),
            (Fairy, Fire) => Some(RESISTED),

            // Normal, Rock, Flying, Poison, Fighting, Dragon, Dark and Ground
            // have no entries.
            _ => None,
        }
    }

    /// Multiplier for a single pair, neutral when the pair has no entry.
    pub fn multiplier(attacking: ElementType, defending: ElementType) -> f64 {
        Self::lookup(attacking, defending).unwrap_or(1.0)
    }
}

/// Combined multiplier of a move type against every type of the defender.
pub fn effectiveness_for(move_type: ElementType, defender_types: &[ElementType]) -> f64 {
    defender_types
        .iter()
        .fold(1.0, |acc, defending| acc * EffectivenessTable::multiplier(move_type, *defending))
}
