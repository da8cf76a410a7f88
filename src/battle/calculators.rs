use crate::battle::effectiveness::effectiveness_for;
use crate::battle::rng::RandomSource;
use crate::battle::state::BattleEvent;
use crate::combatant::Combatant;
use schema::MoveData;

/// Share of max HP restored by a healing move.
pub const HEAL_FRACTION: f64 = 0.18;
/// Minimum damage dealt by any hit.
pub const DAMAGE_FLOOR: u32 = 8;
const VARIANCE_BASE: f64 = 0.9;
const VARIANCE_SPREAD: f64 = 0.2;
const SUPER_EFFECTIVE_THRESHOLD: f64 = 1.5;

/// What happened when a move was resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    Healed { amount: u32 },
    Missed,
    Hit { damage: u32, effectiveness: f64 },
}

/// The result of applying one move by one combatant to another.
///
/// The deltas are the HP changes that actually land after clamping. The
/// events are the narration for the move in emission order.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub outcome: MoveOutcome,
    pub attacker_hp_delta: i64,
    pub defender_hp_delta: i64,
    pub events: Vec<BattleEvent>,
}

impl Resolution {
    /// Number of random draws the resolution consumed.
    pub fn draws(&self) -> usize {
        match self.outcome {
            MoveOutcome::Healed { .. } => 0,
            MoveOutcome::Missed => 1,
            MoveOutcome::Hit { .. } => 2,
        }
    }
}

/// Calculate the outcome of `move_data` used by `attacker` against `defender`.
///
/// Draw order is fixed: no draw for a healing move, one accuracy draw, then
/// one variance draw on a hit. Apart from those draws the function is pure.
pub fn resolve_move<R: RandomSource + ?Sized>(
    attacker: &Combatant,
    defender: &Combatant,
    move_data: &MoveData,
    rng: &mut R,
) -> Resolution {
    if move_data.is_healing() {
        let amount = heal_amount(attacker);
        let healed_hp = attacker.hp().saturating_add(amount).min(attacker.max_hp());
        return Resolution {
            outcome: MoveOutcome::Healed { amount },
            attacker_hp_delta: healed_hp as i64 - attacker.hp() as i64,
            defender_hp_delta: 0,
            events: vec![BattleEvent::Healed {
                combatant: attacker.name().to_string(),
                move_name: move_data.name.clone(),
                amount,
            }],
        };
    }

    if rng.next_unit("accuracy") > move_data.accuracy {
        return Resolution {
            outcome: MoveOutcome::Missed,
            attacker_hp_delta: 0,
            defender_hp_delta: 0,
            events: vec![BattleEvent::MoveMissed {
                attacker: attacker.name().to_string(),
                move_name: move_data.name.clone(),
            }],
        };
    }

    let effectiveness = effectiveness_for(move_data.element, defender.types());
    let variance = VARIANCE_BASE + rng.next_unit("damage variance") * VARIANCE_SPREAD;
    let damage = calculate_damage(move_data.power, variance, effectiveness);
    let remaining_hp = defender.hp().saturating_sub(damage);

    let mut events = Vec::with_capacity(2);
    if effectiveness > SUPER_EFFECTIVE_THRESHOLD {
        events.push(BattleEvent::SuperEffective {
            defender: defender.name().to_string(),
        });
    } else if effectiveness > 0.0 && effectiveness < 1.0 {
        events.push(BattleEvent::NotVeryEffective {
            defender: defender.name().to_string(),
        });
    }
    events.push(BattleEvent::DamageDealt {
        attacker: attacker.name().to_string(),
        move_name: move_data.name.clone(),
        damage,
    });

    Resolution {
        outcome: MoveOutcome::Hit {
            damage,
            effectiveness,
        },
        attacker_hp_delta: 0,
        defender_hp_delta: remaining_hp as i64 - defender.hp() as i64,
        events,
    }
}

/// Nominal HP restored by a healing move, before clamping to max HP.
pub fn heal_amount(combatant: &Combatant) -> u32 {
    (combatant.max_hp() as f64 * HEAL_FRACTION).round() as u32
}

/// Damage of a hit: `round(power * variance * effectiveness)`, never below
/// [`DAMAGE_FLOOR`].
pub fn calculate_damage(power: u32, variance: f64, effectiveness: f64) -> u32 {
    let raw = (power as f64 * variance * effectiveness).round();
    (raw.max(0.0) as u32).max(DAMAGE_FLOOR)
}
