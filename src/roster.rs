use crate::combatant::Combatant;
use crate::errors::{ConfigError, ConfigResult, RosterError};
use schema::{CombatantSpec, ElementType, MoveData, RosterSpec};
use std::path::Path;

/// The built-in exhibition match: Auraflare against Voltide.
pub fn default_roster() -> RosterSpec {
    RosterSpec {
        left: CombatantSpec {
            name: "Auraflare".to_string(),
            max_hp: 178,
            types: vec![ElementType::Fairy, ElementType::Fire],
            moves: vec![
                MoveData::new(
                    "Solar Pulse",
                    ElementType::Fire,
                    62,
                    0.95,
                    "Bathes the opponent in a flowing wave of solar fire.",
                ),
                MoveData::new(
                    "Lunar Gleam",
                    ElementType::Fairy,
                    55,
                    1.0,
                    "A shimmering beam of moonlit particles.",
                ),
                MoveData::new(
                    "Ethereal Bloom",
                    ElementType::Grass,
                    48,
                    0.9,
                    "Sprouts radiant petals that wrap the foe.",
                ),
                MoveData::new(
                    "Prismatic Shield",
                    ElementType::Normal,
                    0,
                    1.0,
                    "Projects a prism shield that heals slight wounds.",
                ),
            ],
        },
        right: CombatantSpec {
            name: "Voltide".to_string(),
            max_hp: 190,
            types: vec![ElementType::Electric, ElementType::Water],
            moves: vec![
                MoveData::new(
                    "Storm Cascade",
                    ElementType::Water,
                    58,
                    0.95,
                    "Crashes a spiralling torrent of charged water.",
                ),
                MoveData::new(
                    "Tempest Lance",
                    ElementType::Electric,
                    65,
                    0.9,
                    "Launches a piercing jet of stormlight.",
                ),
                MoveData::new(
                    "Cryo Veil",
                    ElementType::Ice,
                    45,
                    0.95,
                    "Shrouds the target in crystalline frost.",
                ),
                MoveData::new(
                    "Aqua Vitalize",
                    ElementType::Water,
                    0,
                    1.0,
                    "A soothing mist restores vitality.",
                ),
            ],
        },
    }
}

/// Checks both combatant definitions.
pub fn validate_roster(roster: &RosterSpec) -> Result<(), RosterError> {
    Combatant::from_spec(&roster.left)?;
    Combatant::from_spec(&roster.right)?;
    Ok(())
}

/// Loads and validates a roster from a RON file.
pub fn load_roster(path: &Path) -> ConfigResult<RosterSpec> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let roster = parse_roster(&content).map_err(|err| match err {
        RosterLoadError::Parse(source) => ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        },
        RosterLoadError::Invalid(err) => ConfigError::Roster(err),
    })?;
    Ok(roster)
}

enum RosterLoadError {
    Parse(ron::error::SpannedError),
    Invalid(RosterError),
}

fn parse_roster(content: &str) -> Result<RosterSpec, RosterLoadError> {
    let roster: RosterSpec = ron::from_str(content).map_err(RosterLoadError::Parse)?;
    validate_roster(&roster).map_err(RosterLoadError::Invalid)?;
    Ok(roster)
}
