//! Standoff-pose candidate generation (C4).
//!
//! Grounded on the same shape as `grid.rs`'s obstacle-penalty lookup:
//! pure functions over `Grid` and `Obstacle`, returning owned `Vec`s
//! rather than iterators, since callers (`tour.rs`) need to try
//! candidates in order and stop at the first reachable one.

use crate::direction::Direction;
use crate::grid::{Grid, Obstacle};
use crate::pose::GeoPose;

/// A candidate photo pose for one obstacle, ranked `rank` with `0` the
/// canonical standoff (spec §4.4: "the primary candidate is always
/// emitted first, when feasible").
#[derive(Debug, Clone)]
pub struct Candidate {
    pub pose: GeoPose,
    pub rank: usize,
}

/// The anchor cell whose 3x3 footprint is centered `offset` cells out
/// from `obstacle` along `along`, looking back along `along.opposite()`.
fn anchor_at(obstacle: &Obstacle, along: Direction, offset: i32) -> GeoPose {
    let (dx, dy) = along.unit_step();
    let center_x = obstacle.x + dx * offset;
    let center_y = obstacle.y + dy * offset;
    GeoPose::new(center_x, center_y, along.opposite())
}

/// Generates standoff candidates for `obstacle`, in priority order,
/// dropping any that fall outside the grid or collide with an obstacle
/// footprint, and capped at `grid.config().max_candidates` (§4.4).
///
/// Candidate order: the canonical offset-K pose; then offset K-1 and
/// K+1 along the viewing axis; then the K offset shifted one cell
/// laterally in each direction. All secondary candidates keep the
/// canonical heading (facing back at the obstacle) — only the anchor
/// moves.
pub fn generate(grid: &Grid, obstacle: &Obstacle) -> Vec<Candidate> {
    let k = grid.config().standoff_offset;
    let along = obstacle.face_dir;
    let lateral = along.rotate(2);
    let (lx, ly) = lateral.unit_step();

    let mut raw = vec![anchor_at(obstacle, along, k)];
    if k > 1 {
        raw.push(anchor_at(obstacle, along, k - 1));
    }
    raw.push(anchor_at(obstacle, along, k + 1));
    for &(dx, dy) in &[(lx, ly), (-lx, -ly)] {
        let base = anchor_at(obstacle, along, k);
        raw.push(GeoPose::new(base.x + dx, base.y + dy, base.dir));
    }

    raw.into_iter()
        .filter(|pose| grid.is_in_bounds(pose) && grid.is_collision_free(pose))
        .take(grid.config().max_candidates)
        .enumerate()
        .map(|(rank, pose)| Candidate { pose, rank })
        .collect()
}
