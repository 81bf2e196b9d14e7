//! Grid and obstacle registry (C1).
//!
//! Shape grounded on the teacher's `RouteGraph`: a struct owning a lookup
//! table (there, OSM node coordinates; here, obstacles) plus `add_*`
//! and accessor methods, re-specialized to a fixed-size bounded grid.

use crate::config::PlannerConfig;
use crate::direction::Direction;
use crate::error::{PlannerError, PlannerResult};
use crate::pose::GeoPose;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: String,
    pub x: i32,
    pub y: i32,
    pub face_dir: Direction,
}

/// The robot's 3x3 footprint occupies `[x, x+2] x [y, y+2]` for an anchor
/// at `(x, y)`.
const FOOTPRINT: i32 = 3;

#[derive(Debug, Clone)]
pub struct Grid {
    config: PlannerConfig,
    obstacles: FxHashMap<String, Obstacle>,
}

impl Grid {
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config,
            obstacles: FxHashMap::default(),
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Returns a copy of this grid under the single relaxed retry pass
    /// (§4.5), leaving the obstacle set untouched.
    pub fn retrying(&self) -> Self {
        Self {
            config: self.config.retrying(),
            obstacles: self.obstacles.clone(),
        }
    }

    pub fn add_obstacle(&mut self, id: String, x: i32, y: i32, face_dir: Direction) -> PlannerResult<()> {
        if self.obstacles.contains_key(&id) {
            return Err(PlannerError::DuplicateObstacle(id));
        }
        if x < 0 || y < 0 || x >= self.config.width || y >= self.config.height {
            return Err(PlannerError::ObstacleOutOfBounds { id, x, y });
        }
        self.obstacles.insert(id.clone(), Obstacle { id, x, y, face_dir });
        Ok(())
    }

    pub fn obstacle(&self, id: &str) -> Option<&Obstacle> {
        self.obstacles.get(id)
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.values()
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    /// The 3x3 footprint anchored at `pose` lies entirely within
    /// `[0, W-1] x [0, H-1]` (spec §4.1).
    pub fn is_in_bounds(&self, pose: &GeoPose) -> bool {
        pose.x >= 0
            && pose.y >= 0
            && pose.x + FOOTPRINT - 1 <= self.config.width - 1
            && pose.y + FOOTPRINT - 1 <= self.config.height - 1
    }

    /// Chebyshev distance from the obstacle's own cell to the cell
    /// nearest to it within the robot's footprint.
    fn chebyshev_to_footprint(&self, obstacle: &Obstacle, pose: &GeoPose) -> i32 {
        let nearest_x = pose.x.max(obstacle.x.min(pose.x + FOOTPRINT - 1));
        let nearest_y = pose.y.max(obstacle.y.min(pose.y + FOOTPRINT - 1));
        (nearest_x - obstacle.x).abs().max((nearest_y - obstacle.y).abs())
    }

    /// Rejects a pose whose footprint comes strictly inside `safe_margin`
    /// of any obstacle, Chebyshev-distance-wise (spec §4.1). A footprint
    /// sitting exactly `safe_margin` cells out is the boundary case the
    /// canonical standoff pose itself lands on (offset K defaults to the
    /// same value as the margin, spec §8 scenario 1), so it counts as
    /// clear rather than colliding.
    pub fn is_collision_free(&self, pose: &GeoPose) -> bool {
        self.obstacles
            .values()
            .all(|o| self.chebyshev_to_footprint(o, pose) >= self.config.safe_margin)
    }

    /// A single grid cell, in isolation, within the safe margin of an
    /// obstacle. Used by the arc-primitive swept-footprint check (C2),
    /// which must reject intermediate cells individually rather than
    /// only the endpoint footprint. Shares `is_collision_free`'s
    /// boundary-inclusive convention.
    pub fn cell_is_safe(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.config.width || y >= self.config.height {
            return false;
        }
        self.obstacles
            .values()
            .all(|o| (x - o.x).abs().max((y - o.y).abs()) >= self.config.safe_margin)
    }

    /// Additive traversal cost: 0 outside any danger margin, a positive
    /// constant inside it (spec §4.1).
    pub fn obstacle_penalty(&self, pose: &GeoPose) -> i32 {
        let within_danger = self.obstacles.iter().any(|(_, o)| {
            self.chebyshev_to_footprint(o, pose) <= self.config.safe_margin + self.config.danger_margin
        });
        if within_danger {
            self.config.danger_penalty
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(PlannerConfig::default())
    }

    #[test]
    fn bounds_reject_footprint_hanging_off_the_edge() {
        let g = grid();
        assert!(g.is_in_bounds(&GeoPose::new(1, 1, Direction::North)));
        assert!(g.is_in_bounds(&GeoPose::new(17, 17, Direction::North))); // 17+2 = 19 = W-1
        assert!(!g.is_in_bounds(&GeoPose::new(18, 1, Direction::North))); // 18+2 = 20 > 19
        assert!(!g.is_in_bounds(&GeoPose::new(-1, 1, Direction::North)));
    }

    #[test]
    fn collision_free_respects_safe_margin() {
        let mut g = grid();
        g.add_obstacle("1".into(), 10, 10, Direction::North).unwrap();
        // Anchor at (10,10) has footprint touching the obstacle cell directly: unsafe.
        assert!(!g.is_collision_free(&GeoPose::new(10, 10, Direction::North)));
        // Far away: safe.
        assert!(g.is_collision_free(&GeoPose::new(1, 1, Direction::North)));
    }

    #[test]
    fn penalty_is_zero_outside_danger_margin() {
        let mut g = grid();
        g.add_obstacle("1".into(), 10, 10, Direction::North).unwrap();
        assert_eq!(g.obstacle_penalty(&GeoPose::new(1, 1, Direction::North)), 0);
    }

    #[test]
    fn duplicate_obstacle_id_is_rejected() {
        let mut g = grid();
        g.add_obstacle("1".into(), 5, 5, Direction::North).unwrap();
        let err = g.add_obstacle("1".into(), 6, 6, Direction::North).unwrap_err();
        assert!(matches!(err, PlannerError::DuplicateObstacle(_)));
    }

    #[test]
    fn out_of_bounds_obstacle_is_rejected() {
        let mut g = grid();
        let err = g.add_obstacle("1".into(), -1, 5, Direction::North).unwrap_err();
        assert!(matches!(err, PlannerError::ObstacleOutOfBounds { .. }));
    }
}
