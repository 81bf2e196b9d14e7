//! Planner configuration (§3/§4/§5/§9).
//!
//! Defaults mirror the distilled spec exactly; `retrying()` produces the
//! single relaxed pass the tour optimiser falls back to (§4.5, and
//! DESIGN.md's Open Question decision on the exact margin/penalty delta).

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub width: i32,
    pub height: i32,

    /// Cells within which the robot anchor is forbidden around an obstacle.
    pub safe_margin: i32,
    /// Cells within which traversal incurs `danger_penalty` but is not rejected.
    pub danger_margin: i32,
    pub danger_penalty: i32,

    /// Offset K along the face normal for the canonical standoff pose.
    pub standoff_offset: i32,
    /// Max candidate standoff poses generated per obstacle (§4.4).
    pub max_candidates: usize,

    pub straight_cost: i32,
    pub turn_cost: i32,

    /// Widens arc radius and footprint; referenced by the spec but left
    /// unused by every CLI/server path (§9).
    pub big_turn: bool,

    /// Wall-clock budget checked between permutations, never mid-leg (§5 [ADD]).
    pub time_budget: Option<Duration>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            safe_margin: 2,
            danger_margin: 1,
            danger_penalty: 10,
            standoff_offset: 2,
            max_candidates: 8,
            straight_cost: 10,
            // 10 * sqrt(2), rounded, matching the "implementation-defined
            // integer, default ~15" note in spec §4.2.
            turn_cost: 15,
            big_turn: false,
            time_budget: None,
        }
    }
}

impl PlannerConfig {
    /// The single relaxed retry pass from §4.5: safe margin shrinks by one
    /// (floor zero), danger penalty doubles. Monotonic relaxation, applied
    /// exactly once by `tour::plan_tour`.
    pub fn retrying(&self) -> Self {
        Self {
            safe_margin: (self.safe_margin - 1).max(0),
            danger_penalty: self.danger_penalty * 2,
            ..self.clone()
        }
    }
}
