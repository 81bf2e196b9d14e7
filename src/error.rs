//! Typed planner errors (spec §7).
//!
//! Library-level code returns `PlannerError`; the CLI and TCP boundary
//! wrap these in `anyhow::Result` with `.context(...)`, never the other
//! way around.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("obstacle {id} at ({x}, {y}) is out of bounds or collides with the grid edge")]
    ObstacleOutOfBounds { id: String, x: i32, y: i32 },

    #[error("duplicate obstacle id {0}")]
    DuplicateObstacle(String),

    #[error("no reachable standoff pose for obstacle {0}")]
    Unreachable(String),

    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),

    #[error("planning timed out after {0:?}")]
    Timeout(std::time::Duration),
}

pub type PlannerResult<T> = Result<T, PlannerError>;
