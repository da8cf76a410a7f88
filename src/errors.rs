use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the duel application.
///
/// The battle core itself never fails: illegal selections are ignored. These
/// errors cover loading rosters and configuration and driving the terminal.
#[derive(Debug, Error)]
pub enum DuelError {
    /// Error related to configuration sources
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Error related to roster definitions
    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),
    /// Error reading input or writing the screen
    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Error encoding a snapshot for the JSON stream
    #[error("Snapshot encoding error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Errors related to roster definitions
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RosterError {
    /// Combatant name is blank
    #[error("Combatant name must not be empty")]
    EmptyName,
    /// Combatant max HP is zero
    #[error("{0} must have a positive max HP")]
    ZeroMaxHp(String),
    /// Combatant has no elemental type
    #[error("{0} must have at least one type")]
    NoTypes(String),
    /// Combatant carries no moves or more than four
    #[error("{combatant} must carry between 1 and 4 moves, found {count}")]
    MoveCount { combatant: String, count: usize },
    /// Move accuracy is outside (0, 1]
    #[error("{combatant}'s {move_name} has accuracy {accuracy}, expected a value in (0, 1]")]
    InvalidAccuracy {
        combatant: String,
        move_name: String,
        accuracy: f64,
    },
}

/// Errors related to configuration sources
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config or roster file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A config or roster file is not valid RON
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    /// An environment variable holds an unusable value
    #[error("Invalid value {value:?} for {key}")]
    InvalidEnv { key: String, value: String },
    /// A loaded value is out of range
    #[error("Invalid setting: {0}")]
    Invalid(String),
    /// The roster referenced by the configuration is invalid
    #[error(transparent)]
    Roster(#[from] RosterError),
}

/// Type alias for Results using DuelError
pub type DuelResult<T> = Result<T, DuelError>;

/// Type alias for Results using ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
