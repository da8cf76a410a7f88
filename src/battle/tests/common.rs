use crate::battle::ai::Behavior;
use crate::battle::engine::{Battle, BattleObserver};
use crate::battle::rng::RandomSource;
use crate::battle::state::BattleSnapshot;
use crate::combatant::Combatant;
use crate::config::{DuelConfig, Timings};
use crate::roster::default_roster;
use schema::{CombatantSpec, ElementType, MoveData, RosterSpec};
use std::cell::RefCell;
use std::rc::Rc;

/// A builder for creating test combatants with common defaults.
///
/// # Example
/// ```ignore
/// let combatant = TestCombatantBuilder::new("Emberling", 100)
///     .with_types(vec![ElementType::Fire])
///     .with_move("Spark", ElementType::Fire, 40, 1.0)
///     .with_hp(50)
///     .build();
/// ```
pub struct TestCombatantBuilder {
    name: String,
    max_hp: u32,
    types: Vec<ElementType>,
    moves: Vec<MoveData>,
    current_hp: Option<u32>,
}

impl TestCombatantBuilder {
    /// Creates a Normal-typed builder with no moves.
    pub fn new(name: &str, max_hp: u32) -> Self {
        Self {
            name: name.to_string(),
            max_hp,
            types: vec![ElementType::Normal],
            moves: Vec::new(),
            current_hp: None,
        }
    }

    pub fn with_types(mut self, types: Vec<ElementType>) -> Self {
        self.types = types;
        self
    }

    /// Adds a move. Power 0 makes it a healing move.
    pub fn with_move(mut self, name: &str, element: ElementType, power: u32, accuracy: f64) -> Self {
        self.moves
            .push(MoveData::new(name, element, power, accuracy, ""));
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.current_hp = Some(hp);
        self
    }

    /// Builds the static definition, ignoring any HP override.
    pub fn build_spec(&self) -> CombatantSpec {
        CombatantSpec {
            name: self.name.clone(),
            max_hp: self.max_hp,
            types: self.types.clone(),
            moves: self.moves.clone(),
        }
    }

    /// Builds the runtime `Combatant`.
    pub fn build(self) -> Combatant {
        let combatant = match Combatant::from_spec(&self.build_spec()) {
            Ok(combatant) => combatant,
            Err(err) => panic!("Invalid test combatant {}: {}", self.name, err),
        };
        match self.current_hp {
            Some(hp) => combatant.with_hp(hp),
            None => combatant,
        }
    }
}

/// Default config with zero delays and no animation trails, so the only
/// draws are the resolver's and the policy's.
pub fn instant_config() -> DuelConfig {
    DuelConfig {
        timings: Timings::instant(),
        trail_count: 0,
        ..DuelConfig::default()
    }
}

/// Default timings, no animation trails.
pub fn timed_config() -> DuelConfig {
    DuelConfig {
        trail_count: 0,
        ..DuelConfig::default()
    }
}

/// Creates a battle between two test combatants.
pub fn test_battle(left: CombatantSpec, right: CombatantSpec, config: &DuelConfig) -> Battle {
    let roster = RosterSpec { left, right };
    match Battle::new(&roster, config) {
        Ok(battle) => battle,
        Err(err) => panic!("Failed to create test battle: {}", err),
    }
}

/// Creates a battle with the built-in roster.
pub fn default_battle(config: &DuelConfig) -> Battle {
    match Battle::new(&default_roster(), config) {
        Ok(battle) => battle,
        Err(err) => panic!("Failed to create default battle: {}", err),
    }
}

/// An opponent that always picks the same slot and never draws.
pub struct FixedPolicy(pub usize);

impl Behavior for FixedPolicy {
    fn select_move(&self, _combatant: &Combatant, _rng: &mut dyn RandomSource) -> usize {
        self.0
    }
}

/// Everything an observer was told, shared with the test body.
#[derive(Default)]
pub struct Recording {
    pub narration: Vec<String>,
    pub states: Vec<BattleSnapshot>,
}

pub struct RecordingObserver(pub Rc<RefCell<Recording>>);

impl BattleObserver for RecordingObserver {
    fn on_narration(&mut self, line: &str) {
        self.0.borrow_mut().narration.push(line.to_string());
    }

    fn on_state_changed(&mut self, snapshot: &BattleSnapshot) {
        self.0.borrow_mut().states.push(snapshot.clone());
    }
}

/// Subscribes a recording observer and returns the shared recording.
pub fn record(battle: &mut Battle) -> Rc<RefCell<Recording>> {
    let recording = Rc::new(RefCell::new(Recording::default()));
    battle.subscribe(Box::new(RecordingObserver(Rc::clone(&recording))));
    recording
}
