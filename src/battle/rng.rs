//! Deterministic random sources for battle resolution.
//!
//! Every random decision in a battle (accuracy checks, damage variance, the
//! opponent's move choice and the cosmetic attack trails) is drawn from a
//! [`RandomSource`]. The live engine uses [`Lcg`]; tests script exact draws
//! with [`ScriptedRng`].

use tracing::trace;

const LCG_MULTIPLIER: u32 = 1_664_525;
const LCG_INCREMENT: u32 = 1_013_904_223;
const LCG_MODULUS: f64 = 4_294_967_296.0;

/// Offset applied to the generator state between battles.
pub const RESEED_OFFSET: u32 = 0x9e37_79b9;

/// Default seed of a fresh battle.
pub const DEFAULT_SEED: u32 = 0x1234_5678;

/// A stream of uniform draws in `[0, 1)`.
pub trait RandomSource {
    /// Returns the next draw. `reason` names what the draw is for and only
    /// shows up in traces.
    fn next_unit(&mut self, reason: &str) -> f64;
}

/// Linear-congruential generator over a 32-bit state.
///
/// `s' = s * 1664525 + 1013904223 (mod 2^32)`, output `s' / 2^32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advances the state and returns the draw.
    pub fn next_value(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        self.state as f64 / LCG_MODULUS
    }

    /// Shifts the current state by [`RESEED_OFFSET`] so the next battle does
    /// not replay the previous one.
    pub fn perturb(&mut self) {
        self.state = self.state.wrapping_add(RESEED_OFFSET);
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RandomSource for Lcg {
    fn next_unit(&mut self, reason: &str) -> f64 {
        let value = self.next_value();
        trace!(value, state = self.state, reason, "rng draw");
        value
    }
}

/// A random source that replays a fixed list of draws.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    outcomes: Vec<f64>,
    index: usize,
}

impl ScriptedRng {
    pub fn new_for_test(outcomes: Vec<f64>) -> Self {
        Self { outcomes, index: 0 }
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.index
    }
}

impl RandomSource for ScriptedRng {
    fn next_unit(&mut self, reason: &str) -> f64 {
        if self.index >= self.outcomes.len() {
            panic!(
                "ScriptedRng exhausted! Tried to get a value for: '{}'. Need more scripted values.",
                reason
            );
        }
        let outcome = self.outcomes[self.index];
        self.index += 1;
        trace!(outcome, reason, "scripted draw");
        outcome
    }
}
