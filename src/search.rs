//! A* pose-to-pose search (C3).
//!
//! The `BinaryHeap` + reversed-`Ord` shape is grounded on
//! `renekris-tower-defense-bevy`'s grid `find_path` (a `PathNode` wrapping
//! an `f_cost`, ordered for a min-heap). The goal-*set* heuristic, the
//! `states`-map-keyed-by-position outdated-entry check, and the
//! deterministic tie-break counter are grounded on
//! `RagnarGrootKoerkamp-astar-pairwise-aligner`'s `astar.rs`
//! (`QueueElement { f, data }`, re-pushing a node whose cached `g` is
//! stale rather than trusting every heap entry).

use crate::grid::Grid;
use crate::pose::GeoPose;
use crate::primitives::ALL as ALL_PRIMITIVES;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Turn penalty component of the heuristic (spec §4.3).
fn turn_penalty(from: crate::direction::Direction, to: crate::direction::Direction) -> i32 {
    if from == to {
        0
    } else if from.is_opposite_to(to) {
        20
    } else {
        10
    }
}

/// Admissible lower bound on the cost from `p` to the nearest pose in `goals`.
fn heuristic(p: &GeoPose, goals: &[GeoPose]) -> i32 {
    goals
        .iter()
        .map(|g| p.manhattan(g) + turn_penalty(p.dir, g.dir))
        .min()
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueueEntry {
    f: i32,
    g: i32,
    /// Monotonically increasing insertion order; the deterministic
    /// tie-break so permutation results are reproducible (spec §4.3).
    seq: u64,
    pose: GeoPose,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse so the lowest (f, seq) pops first.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub struct SearchResult {
    pub path: Vec<GeoPose>,
    pub cost: i32,
}

/// Runs A* from `start` to the nearest pose in `goals` (by total cost, not
/// heuristic distance). Returns `None` if the open set empties before any
/// goal is reached (spec §4.3's Failure case); the tour optimiser treats
/// this as infinite leg cost.
pub fn search(grid: &Grid, start: GeoPose, goals: &[GeoPose]) -> Option<SearchResult> {
    if goals.is_empty() {
        return None;
    }

    let mut open = BinaryHeap::new();
    let mut best_g: FxHashMap<GeoPose, i32> = FxHashMap::default();
    let mut came_from: FxHashMap<GeoPose, GeoPose> = FxHashMap::default();
    let mut seq_counter: u64 = 0;

    best_g.insert(start, 0);
    open.push(QueueEntry {
        f: heuristic(&start, goals),
        g: 0,
        seq: seq_counter,
        pose: start,
    });

    while let Some(entry) = open.pop() {
        // Stale heap entry: a cheaper path to this pose was already found.
        if entry.g > *best_g.get(&entry.pose).unwrap_or(&i32::MAX) {
            continue;
        }

        if goals.contains(&entry.pose) {
            return Some(SearchResult {
                path: reconstruct(&came_from, entry.pose, start),
                cost: entry.g,
            });
        }

        for primitive in ALL_PRIMITIVES {
            let Some((next, edge_cost)) = primitive.feasible_successor(grid, &entry.pose) else {
                continue;
            };
            let tentative_g = entry.g + edge_cost;
            if tentative_g < *best_g.get(&next).unwrap_or(&i32::MAX) {
                best_g.insert(next, tentative_g);
                came_from.insert(next, entry.pose);
                seq_counter += 1;
                open.push(QueueEntry {
                    f: tentative_g + heuristic(&next, goals),
                    g: tentative_g,
                    seq: seq_counter,
                    pose: next,
                });
            }
        }
    }

    None
}

fn reconstruct(
    came_from: &FxHashMap<GeoPose, GeoPose>,
    mut current: GeoPose,
    start: GeoPose,
) -> Vec<GeoPose> {
    let mut path = vec![current];
    while current != start {
        current = came_from[&current];
        path.push(current);
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;
    use crate::direction::Direction;

    #[test]
    fn search_fails_on_empty_goal_set() {
        let grid = Grid::new(PlannerConfig::default());
        let start = GeoPose::new(1, 1, Direction::North);
        assert!(search(&grid, start, &[]).is_none());
    }

    #[test]
    fn search_finds_trivial_path_when_already_at_goal() {
        let grid = Grid::new(PlannerConfig::default());
        let start = GeoPose::new(1, 1, Direction::North);
        let result = search(&grid, start, &[start]).unwrap();
        assert_eq!(result.cost, 0);
        assert_eq!(result.path, vec![start]);
    }

    #[test]
    fn search_prefers_straight_run_over_detour() {
        let grid = Grid::new(PlannerConfig::default());
        let start = GeoPose::new(1, 1, Direction::North);
        let goal = GeoPose::new(1, 5, Direction::North);
        let result = search(&grid, start, &[goal]).unwrap();
        assert_eq!(result.cost, 40); // four unit forward steps at cost 10 each
        assert_eq!(result.path.len(), 5);
    }

    #[test]
    fn heuristic_is_admissible_against_reported_cost() {
        let grid = Grid::new(PlannerConfig::default());
        let start = GeoPose::new(1, 1, Direction::North);
        let goal = GeoPose::new(9, 9, Direction::West);
        let result = search(&grid, start, &[goal]).unwrap();
        assert!(heuristic(&start, &[goal]) <= result.cost);
    }

    #[test]
    fn search_is_deterministic_across_runs() {
        let grid = Grid::new(PlannerConfig::default());
        let start = GeoPose::new(1, 1, Direction::North);
        let goal = GeoPose::new(7, 9, Direction::South);
        let a = search(&grid, start, &[goal]).unwrap();
        let b = search(&grid, start, &[goal]).unwrap();
        assert_eq!(a.cost, b.cost);
        assert_eq!(
            a.path.iter().map(|p| (p.x, p.y, p.dir)).collect::<Vec<_>>(),
            b.path.iter().map(|p| (p.x, p.y, p.dir)).collect::<Vec<_>>()
        );
    }
}
