//! Tour optimisation over obstacles (C5).
//!
//! Brute-force permutation search grounded on
//! `RagnarGrootKoerkamp-astar-pairwise-aligner`'s `itertools::Itertools`
//! usage pattern for enumerating candidate orderings; the
//! memoize-pairwise-leg-cost shape and the retry-once-on-failure policy
//! are the teacher's own (`butterfly-route`'s `RouteGraph::route` retries
//! contraction lookups once before giving up) generalised to this
//! domain's one relaxed-margin retry (§4.5).

use crate::error::{PlannerError, PlannerResult};
use crate::grid::Grid;
use crate::pose::GeoPose;
use crate::search::{search, SearchResult};
use crate::standoff::{self, Candidate};
use itertools::Itertools;
use rustc_hash::FxHashMap;
use std::time::Instant;

/// One leg of the tour: the chosen standoff pose for an obstacle and the
/// path that reaches it from the previous leg's end (or the robot start).
pub struct Leg {
    pub obstacle_id: String,
    pub target: GeoPose,
    pub path: Vec<GeoPose>,
    pub cost: i32,
}

pub struct Tour {
    pub legs: Vec<Leg>,
    pub total_cost: i32,
}

/// Finds the order in which to visit every obstacle's standoff pose that
/// minimises total A* cost, starting from `start` (spec §4.5).
///
/// Obstacle ids are visited in the order given by `obstacle_ids`, which
/// the caller controls (normally `Grid::obstacles()`'s natural order);
/// all `N!` permutations of that list are tried, bounded by
/// `grid.config().time_budget` if set (checked between permutations,
/// never mid-leg, §5 [ADD]). If no permutation completes without a leg
/// failing, the whole search is retried once against `grid.retrying()`
/// (§4.5) before giving up.
pub fn plan_tour(grid: &Grid, start: GeoPose, obstacle_ids: &[String]) -> PlannerResult<Tour> {
    match best_tour(grid, start, obstacle_ids) {
        Some(tour) => Ok(tour),
        None => {
            let relaxed = grid.retrying();
            best_tour(&relaxed, start, obstacle_ids).ok_or_else(|| {
                PlannerError::Unreachable(obstacle_ids.join(", "))
            })
        }
    }
}

fn best_tour(grid: &Grid, start: GeoPose, obstacle_ids: &[String]) -> Option<Tour> {
    if obstacle_ids.is_empty() {
        return Some(Tour {
            legs: Vec::new(),
            total_cost: 0,
        });
    }

    let candidates: FxHashMap<&str, Vec<Candidate>> = obstacle_ids
        .iter()
        .map(|id| {
            let obstacle = grid.obstacle(id).expect("obstacle id must exist in grid");
            (id.as_str(), standoff::generate(grid, obstacle))
        })
        .collect();

    // Memoizes A* legs by (source pose, obstacle id) so a leg shared by
    // multiple permutations (same prefix) is only ever searched once.
    let mut leg_cache: FxHashMap<(GeoPose, String), Option<SearchResult>> = FxHashMap::default();
    let mut best: Option<Tour> = None;
    let deadline = grid.config().time_budget.map(|d| (Instant::now(), d));

    for permutation in obstacle_ids.iter().permutations(obstacle_ids.len()) {
        if let Some((started, budget)) = deadline {
            if started.elapsed() >= budget {
                break;
            }
        }

        if let Some(tour) = try_permutation(grid, start, &permutation, &candidates, &mut leg_cache)
        {
            if best.as_ref().map_or(true, |b| tour.total_cost < b.total_cost) {
                best = Some(tour);
            }
        }
    }

    best
}

fn try_permutation(
    grid: &Grid,
    start: GeoPose,
    order: &[&String],
    candidates: &FxHashMap<&str, Vec<Candidate>>,
    leg_cache: &mut FxHashMap<(GeoPose, String), Option<SearchResult>>,
) -> Option<Tour> {
    let mut current = start;
    let mut legs = Vec::with_capacity(order.len());
    let mut total_cost = 0;

    for &id in order {
        let options = candidates.get(id.as_str())?;
        if options.is_empty() {
            return None;
        }
        let goals: Vec<GeoPose> = options.iter().map(|c| c.pose).collect();

        let key = (current, id.clone());
        let result = leg_cache
            .entry(key)
            .or_insert_with(|| search(grid, current, &goals))
            .as_ref()?;

        legs.push(Leg {
            obstacle_id: id.clone(),
            target: *result.path.last().expect("non-empty path"),
            path: result.path.clone(),
            cost: result.cost,
        });
        total_cost += result.cost;
        current = *result.path.last().expect("non-empty path");
    }

    Some(Tour { legs, total_cost })
}
