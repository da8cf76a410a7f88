//! Celestial Duel
//!
//! A deterministic turn-based battle between two elemental combatants. The
//! player drives the left side; a random policy drives the right. Every
//! random draw comes from a seeded generator, so a seed plus a sequence of
//! inputs always replays the same battle.

// --- MODULE DECLARATIONS ---
pub mod animation;
pub mod battle;
pub mod combatant;
pub mod config;
pub mod errors;
pub mod presenter;
pub mod roster;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{CombatantSpec, ElementType, MoveData, RosterSpec, MAX_MOVES};

// --- From this crate's modules ---
pub use animation::{AttackAnimation, AttackTrail};
pub use battle::ai::{Behavior, RandomPolicy};
pub use battle::engine::{Battle, BattleObserver, IgnoreReason, Submission};
pub use battle::rng::{Lcg, RandomSource};
pub use battle::state::{BattleEvent, BattlePhase, BattleSnapshot, EventLog, Side};
pub use combatant::Combatant;
pub use config::{DuelConfig, Timings};
pub use errors::{ConfigError, DuelError, DuelResult, RosterError};
pub use roster::{default_roster, load_roster};
