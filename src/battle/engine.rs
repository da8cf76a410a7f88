use crate::animation::AttackAnimation;
use crate::battle::ai::{Behavior, RandomPolicy};
use crate::battle::calculators::{resolve_move, Resolution};
use crate::battle::rng::Lcg;
use crate::battle::scheduler::TaskQueue;
use crate::battle::state::{BattleEvent, BattlePhase, BattleSnapshot, EventLog, Side};
use crate::combatant::Combatant;
use crate::config::{DuelConfig, Timings};
use crate::errors::RosterError;
use schema::RosterSpec;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Result of a player move submission.
///
/// Ignored submissions change nothing and emit no narration; callers are free
/// to drop this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Accepted,
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// An action is still being resolved.
    Locked,
    /// The opponent holds the turn.
    NotPlayersTurn,
    BattleFinished,
    /// No move in that slot.
    UnknownMove(usize),
    /// Healing move chosen at full HP.
    HealAtFullHp,
}

/// Receives everything a presenter needs to stay in sync with a battle.
pub trait BattleObserver {
    /// Called once per narration line, in emission order.
    fn on_narration(&mut self, _line: &str) {}

    /// Called after every transition with the new state.
    fn on_state_changed(&mut self, _snapshot: &BattleSnapshot) {}
}

/// Transitions that land some time after an action is committed.
#[derive(Debug, Clone)]
enum DeferredTask {
    ApplyResolution { attacker: Side, resolution: Resolution },
    ClearAnimation,
    ConcludeTurn { next: Side },
    OpponentAction,
}

/// The battle state machine.
///
/// Owns both combatants, the random source, the narration log and the queue
/// of deferred transitions. All random draws for an action happen when the
/// action is committed; the queue only decides when the results become
/// visible.
pub struct Battle {
    initial_left: Combatant,
    initial_right: Combatant,
    left: Combatant,
    right: Combatant,
    phase: BattlePhase,
    rng: Lcg,
    log: EventLog,
    tasks: TaskQueue<DeferredTask>,
    animation: Option<AttackAnimation>,
    animation_counter: u32,
    timings: Timings,
    trail_count: usize,
    behavior: Box<dyn Behavior>,
    observers: Vec<Box<dyn BattleObserver>>,
}

impl Battle {
    /// Create a new battle with both combatants at full HP and the player to move.
    pub fn new(roster: &RosterSpec, config: &DuelConfig) -> Result<Self, RosterError> {
        let left = Combatant::from_spec(&roster.left)?;
        let right = Combatant::from_spec(&roster.right)?;

        let mut battle = Self {
            initial_left: left.clone(),
            initial_right: right.clone(),
            left,
            right,
            phase: BattlePhase::PlayerTurn,
            rng: Lcg::new(config.seed),
            log: EventLog::new(config.log_capacity),
            tasks: TaskQueue::new(),
            animation: None,
            animation_counter: 0,
            timings: config.timings,
            trail_count: config.trail_count,
            behavior: Box::new(RandomPolicy::new()),
            observers: Vec::new(),
        };
        let leader = battle.left.name().to_string();
        battle.narrate(BattleEvent::BattleStarted { leader });
        info!(
            left = battle.left.name(),
            right = battle.right.name(),
            seed = config.seed,
            "battle started"
        );
        Ok(battle)
    }

    /// Replaces the opponent's move selection policy.
    pub fn with_behavior(mut self, behavior: Box<dyn Behavior>) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn subscribe(&mut self, observer: Box<dyn BattleObserver>) {
        self.observers.push(observer);
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn winner(&self) -> Option<Side> {
        self.phase.winner()
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn animation(&self) -> Option<&AttackAnimation> {
        self.animation.as_ref()
    }

    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    /// Current virtual time of the deferred task clock.
    pub fn now(&self) -> Duration {
        self.tasks.now()
    }

    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            left: self.left.clone(),
            right: self.right.clone(),
            phase: self.phase,
            is_player_turn: self.phase.is_player_turn(),
            is_locked: self.phase.is_locked(),
            winner: self.phase.winner(),
            recent_events: self.log.lines().map(str::to_string).collect(),
            animation: self.animation.clone(),
        }
    }

    /// Checks whether the player may use the move in `move_index` right now.
    pub fn validate_player_move(&self, move_index: usize) -> Result<(), IgnoreReason> {
        match self.phase {
            BattlePhase::PlayerTurn => {}
            BattlePhase::ResolvingPlayerAction | BattlePhase::ResolvingOpponentAction => {
                return Err(IgnoreReason::Locked)
            }
            BattlePhase::OpponentTurn => return Err(IgnoreReason::NotPlayersTurn),
            BattlePhase::Finished(_) => return Err(IgnoreReason::BattleFinished),
        }

        if self.left.move_at(move_index).is_none() {
            return Err(IgnoreReason::UnknownMove(move_index));
        }
        if !self.left.can_use(move_index) {
            return Err(IgnoreReason::HealAtFullHp);
        }
        Ok(())
    }

    /// Per-slot legality of the player's moves, for enabling move buttons.
    pub fn legal_moves(&self) -> Vec<bool> {
        (0..self.left.moves().len())
            .map(|index| self.validate_player_move(index).is_ok())
            .collect()
    }

    /// Commits the player's move if it is legal; otherwise does nothing.
    pub fn submit_player_move(&mut self, move_index: usize) -> Submission {
        if let Err(reason) = self.validate_player_move(move_index) {
            debug!(move_index, ?reason, "player move ignored");
            return Submission::Ignored(reason);
        }
        debug!(move_index, "player move accepted");
        self.commit_action(Side::Left, move_index);
        Submission::Accepted
    }

    /// Restarts the battle from any state.
    ///
    /// Pending deferred transitions are cancelled first, so nothing scheduled
    /// before the reset can touch the new battle. The generator is perturbed
    /// rather than reseeded, so the next battle plays out differently.
    pub fn request_reset(&mut self) {
        let cancelled = self.tasks.cancel_all();
        self.left = self.initial_left.clone();
        self.right = self.initial_right.clone();
        self.phase = BattlePhase::PlayerTurn;
        self.animation = None;
        self.animation_counter = 0;
        self.rng.perturb();
        self.log.clear();
        let leader = self.left.name().to_string();
        self.narrate(BattleEvent::BattleReset { leader });
        info!(cancelled, rng_state = self.rng.state(), "battle reset");
        self.publish_state();
    }

    /// Moves the task clock forward by `elapsed`, firing every transition that
    /// falls due on the way.
    pub fn advance(&mut self, elapsed: Duration) {
        let deadline = self.tasks.now() + elapsed;
        while let Some(task) = self.tasks.pop_due(deadline) {
            self.fire(task);
        }
        self.tasks.advance_clock(deadline);
    }

    /// Time left until the next deferred transition, if any is pending.
    pub fn time_until_next_task(&self) -> Option<Duration> {
        self.tasks.time_until_next()
    }

    /// Fires pending transitions in order until none remain. The battle then
    /// waits for the player or has finished.
    pub fn run_until_idle(&mut self) {
        while let Some(wait) = self.tasks.time_until_next() {
            self.advance(wait);
        }
    }

    fn commit_action(&mut self, side: Side, move_index: usize) {
        let (attacker, defender) = match side {
            Side::Left => (&self.left, &self.right),
            Side::Right => (&self.right, &self.left),
        };
        let Some(move_data) = attacker.move_at(move_index).cloned() else {
            warn!(?side, move_index, "no move in slot, action dropped");
            return;
        };
        self.phase = match side {
            Side::Left => BattlePhase::ResolvingPlayerAction,
            Side::Right => BattlePhase::ResolvingOpponentAction,
        };

        self.animation_counter += 1;
        let animation = AttackAnimation::generate(
            self.animation_counter,
            side,
            move_data.element,
            self.trail_count,
            &mut self.rng,
        );
        let resolution = resolve_move(attacker, defender, &move_data, &mut self.rng);
        debug!(
            ?side,
            move_name = %move_data.name,
            outcome = ?resolution.outcome,
            "action committed"
        );
        self.animation = Some(animation);

        self.tasks.schedule(
            self.timings.hit_delay(),
            DeferredTask::ApplyResolution {
                attacker: side,
                resolution,
            },
        );
        self.tasks
            .schedule(self.timings.clear_animation(), DeferredTask::ClearAnimation);
        self.tasks.schedule(
            self.timings.conclude_delay(),
            DeferredTask::ConcludeTurn {
                next: side.opponent(),
            },
        );
        self.publish_state();
    }

    fn fire(&mut self, task: DeferredTask) {
        debug!(?task, now_ms = self.tasks.now().as_millis() as u64, "task fired");
        match task {
            DeferredTask::ApplyResolution {
                attacker,
                resolution,
            } => self.apply_resolution(attacker, resolution),
            DeferredTask::ClearAnimation => {
                self.animation = None;
                self.publish_state();
            }
            DeferredTask::ConcludeTurn { next } => self.conclude_turn(next),
            DeferredTask::OpponentAction => self.opponent_action(),
        }
    }

    fn apply_resolution(&mut self, attacker: Side, resolution: Resolution) {
        let (attacker_slot, defender_slot) = match attacker {
            Side::Left => (&mut self.left, &mut self.right),
            Side::Right => (&mut self.right, &mut self.left),
        };
        *attacker_slot = attacker_slot.apply_delta(resolution.attacker_hp_delta);
        *defender_slot = defender_slot.apply_delta(resolution.defender_hp_delta);

        for event in resolution.events {
            self.narrate(event);
        }

        // A hit landing after its turn was already handed over ends the
        // battle here; no later conclude step will look at it.
        if !self.phase.is_locked() && self.phase.winner().is_none() {
            if let Some(winner) = self.check_win_conditions(attacker.opponent()) {
                let dropped = self.tasks.cancel_all();
                debug!(dropped, "late knockout, pending tasks dropped");
                self.finish(winner);
                return;
            }
        }
        self.publish_state();
    }

    fn conclude_turn(&mut self, next: Side) {
        if let Some(winner) = self.check_win_conditions(next) {
            self.finish(winner);
            return;
        }

        match next {
            Side::Left => self.phase = BattlePhase::PlayerTurn,
            Side::Right => {
                self.phase = BattlePhase::OpponentTurn;
                self.tasks
                    .schedule(self.timings.opponent_delay(), DeferredTask::OpponentAction);
            }
        }
        debug!(phase = ?self.phase, "turn handed over");
        self.publish_state();
    }

    fn finish(&mut self, winner: Side) {
        self.phase = BattlePhase::Finished(winner);
        let victor = self.combatant(winner).name().to_string();
        info!(?winner, victor = %victor, "battle finished");
        self.narrate(BattleEvent::BattleWon { victor });
        self.publish_state();
    }

    /// Winner after an action, if a combatant fainted. `next` is the side
    /// that would act next.
    fn check_win_conditions(&self, next: Side) -> Option<Side> {
        match (self.left.is_fainted(), self.right.is_fainted()) {
            (false, false) => None,
            (true, false) => Some(Side::Right),
            (false, true) => Some(Side::Left),
            // A single action only damages its defender, so this cannot
            // happen; the side that just acted keeps the win.
            (true, true) => Some(next.opponent()),
        }
    }

    fn opponent_action(&mut self) {
        if self.phase != BattlePhase::OpponentTurn {
            warn!(phase = ?self.phase, "opponent action outside opponent turn");
            return;
        }
        if self.right.is_fainted() {
            warn!("fainted opponent cannot act");
            return;
        }
        let move_count = self.right.moves().len();
        let mut choice = self.behavior.select_move(&self.right, &mut self.rng);
        if choice >= move_count {
            warn!(choice, move_count, "behavior chose a missing slot, using the last move");
            choice = move_count.saturating_sub(1);
        }
        self.commit_action(Side::Right, choice);
    }

    fn narrate(&mut self, event: BattleEvent) {
        let line = event.format();
        debug!(line = %line, "narration");
        self.log.push(line.clone());
        for observer in self.observers.iter_mut() {
            observer.on_narration(&line);
        }
    }

    fn publish_state(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in self.observers.iter_mut() {
            observer.on_state_changed(&snapshot);
        }
    }
}
