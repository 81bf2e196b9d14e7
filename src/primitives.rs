//! Motion primitives (C2).
//!
//! Six deterministic primitives, tried in a fixed declared order on every
//! expansion (spec §2 [ADD]: successor-generation order is itself part of
//! the determinism contract, alongside the `(f, g_insertion_counter)`
//! tie-break in `search.rs`). Arc primitives enumerate their swept
//! footprint explicitly rather than only checking the endpoint (spec §9).

use crate::config::PlannerConfig;
use crate::direction::Direction;
use crate::grid::Grid;
use crate::pose::GeoPose;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Fwd,
    Bwd,
    FwdLeft,
    FwdRight,
    BwdLeft,
    BwdRight,
}

/// The order primitives are tried in during A* expansion; iterating this
/// array (rather than an arbitrary `match`) is what makes successor order
/// reproducible.
pub const ALL: [Primitive; 6] = [
    Primitive::Fwd,
    Primitive::Bwd,
    Primitive::FwdLeft,
    Primitive::FwdRight,
    Primitive::BwdLeft,
    Primitive::BwdRight,
];

impl Primitive {
    /// Token emitted by the command synthesiser for a single instance of
    /// this primitive (straight runs are aggregated later in `commands.rs`).
    pub fn token(self) -> &'static str {
        match self {
            Primitive::Fwd => "FW10",
            Primitive::Bwd => "BW10",
            Primitive::FwdLeft => "FL",
            Primitive::FwdRight => "FR",
            Primitive::BwdLeft => "BL",
            Primitive::BwdRight => "BR",
        }
    }

    pub fn is_straight(self) -> bool {
        matches!(self, Primitive::Fwd | Primitive::Bwd)
    }

    fn turn_radius(self, config: &PlannerConfig) -> i32 {
        if config.big_turn {
            3
        } else {
            2
        }
    }

    /// Heading after executing this primitive, independent of position.
    pub(crate) fn end_dir(self, start: Direction) -> Direction {
        match self {
            Primitive::Fwd | Primitive::Bwd => start,
            Primitive::FwdLeft => start.rotate(-2),
            Primitive::FwdRight => start.rotate(2),
            Primitive::BwdLeft => start.rotate(2),
            Primitive::BwdRight => start.rotate(-2),
        }
    }

    /// Base cost before the endpoint's obstacle penalty is added (§4.2).
    fn base_cost(self, config: &PlannerConfig) -> i32 {
        if self.is_straight() {
            config.straight_cost
        } else {
            config.turn_cost
        }
    }

    /// Rotates a (lateral, forward) offset defined in the robot's own
    /// "facing north" frame into the grid frame for `facing`. North->d is
    /// `k` quarter-turns clockwise, where `k = facing.angle() / 2`; a
    /// single clockwise quarter turn maps `(x, y) -> (y, -x)`.
    fn rotate_to_frame(facing: Direction, lateral: i32, forward: i32) -> (i32, i32) {
        let mut v = (lateral, forward);
        for _ in 0..(facing.angle() / 2) {
            v = (v.1, -v.0);
        }
        v
    }

    /// The anchor offsets (relative to the start pose) of every point
    /// along this primitive's swept path, in emission order, ending with
    /// the final anchor. Straight primitives have a single-step path;
    /// arcs are sampled at a midpoint so the swept footprint check in
    /// `feasible_successor` covers more than just the two endpoints.
    fn swept_offsets(self, start: Direction, config: &PlannerConfig) -> Vec<(i32, i32)> {
        match self {
            Primitive::Fwd => vec![start.unit_step()],
            Primitive::Bwd => {
                let (dx, dy) = start.unit_step();
                vec![(-dx, -dy)]
            }
            Primitive::FwdLeft | Primitive::FwdRight | Primitive::BwdLeft | Primitive::BwdRight => {
                let r = self.turn_radius(config);
                let lateral_sign = match self {
                    Primitive::FwdLeft => -1,
                    Primitive::FwdRight => 1,
                    Primitive::BwdLeft => 1,
                    Primitive::BwdRight => -1,
                    _ => unreachable!(),
                };
                let forward_sign = match self {
                    Primitive::FwdLeft | Primitive::FwdRight => 1,
                    Primitive::BwdLeft | Primitive::BwdRight => -1,
                    _ => unreachable!(),
                };
                let lateral = lateral_sign * r;
                let forward = forward_sign * r;
                let mid1 = Self::rotate_to_frame(start, 0, forward / 2);
                let mid2 = Self::rotate_to_frame(start, lateral / 2, forward);
                let end = Self::rotate_to_frame(start, lateral, forward);
                vec![mid1, mid2, end]
            }
        }
    }

    /// Attempts to execute this primitive from `pose`, returning the
    /// successor pose and its edge cost if every swept footprint cell is
    /// in-bounds and collision-free under `grid`'s current margins.
    /// The net `(dx, dy)` anchor displacement of executing this primitive
    /// in full, ignoring collision (used by `commands.rs` to classify
    /// which primitive connects two adjacent poses in a stitched trace).
    pub(crate) fn net_offset(self, start: Direction, config: &PlannerConfig) -> (i32, i32) {
        *self
            .swept_offsets(start, config)
            .last()
            .expect("swept_offsets is never empty")
    }

    pub fn feasible_successor(self, grid: &Grid, pose: &GeoPose) -> Option<(GeoPose, i32)> {
        let config = grid.config();
        let end_dir = self.end_dir(pose.dir);
        let offsets = self.swept_offsets(pose.dir, config);
        let last_index = offsets.len() - 1;
        let mut last = (pose.x, pose.y);
        for (i, (dx, dy)) in offsets.into_iter().enumerate() {
            let anchor = (pose.x + dx, pose.y + dy);
            let heading = if i == last_index { end_dir } else { pose.dir };
            let candidate = GeoPose::new(anchor.0, anchor.1, heading);
            if !grid.is_in_bounds(&candidate) {
                return None;
            }
            if !footprint_is_safe(grid, anchor.0, anchor.1) {
                return None;
            }
            last = anchor;
        }
        let end_pose = GeoPose::new(last.0, last.1, end_dir);
        let cost = self.base_cost(config) + grid.obstacle_penalty(&end_pose);
        Some((end_pose, cost))
    }
}

/// Every cell of the 3x3 footprint anchored at `(x, y)` is individually
/// clear of the safe margin (spec §9: arc sweeps must reject intermediate
/// cells one at a time, not just the anchor).
fn footprint_is_safe(grid: &Grid, x: i32, y: i32) -> bool {
    for fx in x..x + 3 {
        for fy in y..y + 3 {
            if !grid.cell_is_safe(fx, fy) {
                return false;
            }
        }
    }
    true
}
