use crate::animation::AttackAnimation;
use crate::combatant::Combatant;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default number of narration lines kept in the log.
pub const DEFAULT_LOG_CAPACITY: usize = 12;

/// One of the two sides of a battle. `Left` is human-controlled.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    PlayerTurn,
    ResolvingPlayerAction,
    OpponentTurn,
    ResolvingOpponentAction,
    Finished(Side),
}

impl BattlePhase {
    /// True while an action is being resolved; new selections are refused.
    pub fn is_locked(self) -> bool {
        matches!(
            self,
            BattlePhase::ResolvingPlayerAction | BattlePhase::ResolvingOpponentAction
        )
    }

    pub fn is_player_turn(self) -> bool {
        matches!(
            self,
            BattlePhase::PlayerTurn | BattlePhase::ResolvingPlayerAction
        )
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            BattlePhase::Finished(side) => Some(side),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Battle Lifecycle
    BattleStarted {
        leader: String,
    },
    BattleReset {
        leader: String,
    },

    // Move Resolution
    Healed {
        combatant: String,
        move_name: String,
        amount: u32,
    },
    MoveMissed {
        attacker: String,
        move_name: String,
    },
    SuperEffective {
        defender: String,
    },
    NotVeryEffective {
        defender: String,
    },
    DamageDealt {
        attacker: String,
        move_name: String,
        damage: u32,
    },

    // Battle End
    BattleWon {
        victor: String,
    },
}

impl BattleEvent {
    /// Formats the event into the human-readable line shown in the battle log.
    pub fn format(&self) -> String {
        match self {
            BattleEvent::BattleStarted { leader } => {
                format!("Battle initialized. {} awaits your command.", leader)
            }
            BattleEvent::BattleReset { leader } => {
                format!("Battle reset. {} awaits your next instruction.", leader)
            }
            BattleEvent::Healed {
                combatant,
                move_name,
                amount,
            } => format!(
                "{} softly recovers {} HP with {}.",
                combatant, amount, move_name
            ),
            BattleEvent::MoveMissed {
                attacker,
                move_name,
            } => format!("{}'s {} gently dissipates; it missed.", attacker, move_name),
            BattleEvent::SuperEffective { defender } => format!(
                "It's super effective! {} absorbs intense damage.",
                defender
            ),
            BattleEvent::NotVeryEffective { defender } => format!(
                "It's not very effective... {} endures gracefully.",
                defender
            ),
            BattleEvent::DamageDealt {
                attacker,
                move_name,
                damage,
            } => format!("{} uses {} for {} damage.", attacker, move_name, damage),
            BattleEvent::BattleWon { victor } => {
                format!("{} takes the spotlight. Battle complete.", victor)
            }
        }
    }
}

/// Bounded narration log, newest line first.
#[derive(Debug, Clone)]
pub struct EventLog {
    lines: VecDeque<String>,
    capacity: usize,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Adds a line at the front and drops the oldest lines beyond capacity.
    pub fn push(&mut self, line: String) {
        self.lines.push_front(line);
        self.lines.truncate(self.capacity);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn newest(&self) -> Option<&str> {
        self.lines.front().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}

impl std::fmt::Display for EventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(f, "  {}", line)?;
        }
        Ok(())
    }
}

/// Read-only view of a battle handed to presenters after every transition.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BattleSnapshot {
    pub left: Combatant,
    pub right: Combatant,
    pub phase: BattlePhase,
    pub is_player_turn: bool,
    pub is_locked: bool,
    pub winner: Option<Side>,
    pub recent_events: Vec<String>,
    pub animation: Option<AttackAnimation>,
}

impl BattleSnapshot {
    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// One-line summary of whose move it is, or who won.
    pub fn status_text(&self) -> String {
        match self.winner {
            Some(side) => format!(
                "{} wins the exhibition battle!",
                self.combatant(side).name()
            ),
            None if self.is_player_turn => {
                format!("{} is waiting for your move.", self.left.name())
            }
            None => format!("{} is studying the field...", self.right.name()),
        }
    }
}
