//! Attack animation descriptors.
//!
//! The presenter draws each attack as a stream of glyphs travelling across
//! the field. The trail positions are jittered with draws from the battle's
//! random source at commit time, so a replayed battle animates identically.

use crate::battle::rng::RandomSource;
use crate::battle::state::Side;
use schema::ElementType;
use serde::{Deserialize, Serialize};

/// Default number of trails per attack.
pub const DEFAULT_TRAIL_COUNT: usize = 6;

const TRAIL_BASE: f64 = 40.0;
const TRAIL_SPACING: f64 = 6.0;
const START_JITTER: f64 = 14.0;
const END_JITTER: f64 = 22.0;
const TRAIL_MIN: f64 = 26.0;
const TRAIL_MAX: f64 = 74.0;

/// Vertical start and end of one glyph's path, in percent of the field height.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct AttackTrail {
    pub start_top: f64,
    pub end_top: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AttackAnimation {
    pub id: u32,
    pub side: Side,
    pub element: ElementType,
    pub trails: Vec<AttackTrail>,
}

impl AttackAnimation {
    /// Builds the animation for an attack, consuming two draws per trail.
    pub fn generate<R: RandomSource + ?Sized>(
        id: u32,
        side: Side,
        element: ElementType,
        trail_count: usize,
        rng: &mut R,
    ) -> Self {
        let trails = (0..trail_count)
            .map(|index| {
                let base = TRAIL_BASE + index as f64 * TRAIL_SPACING;
                let start_jitter = (rng.next_unit("trail start") - 0.5) * START_JITTER;
                let end_jitter = (rng.next_unit("trail end") - 0.5) * END_JITTER;
                AttackTrail {
                    start_top: (base + start_jitter).clamp(TRAIL_MIN, TRAIL_MAX),
                    end_top: (base + end_jitter).clamp(TRAIL_MIN, TRAIL_MAX),
                }
            })
            .collect();

        Self {
            id,
            side,
            element,
            trails,
        }
    }

    /// One glyph per trail, cycling through the element's glyph set.
    pub fn glyphs(&self) -> Vec<&'static str> {
        let set = self.element.glyphs();
        (0..self.trails.len()).map(|i| set[i % set.len()]).collect()
    }
}
