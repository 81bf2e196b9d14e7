//! A* tour planning for a grid-bound photo-inspection robot.
//!
//! Pipeline:
//! - `direction`/`pose`: discrete pose model (C1)
//! - `grid`: bounded grid, obstacle registry, margin/collision checks (C1)
//! - `primitives`: the six motion primitives and their swept-footprint
//!   feasibility check (C2)
//! - `search`: A* pose-to-pose search over a goal set (C3)
//! - `standoff`: standoff-pose candidate generation per obstacle (C4)
//! - `tour`: brute-force permutation tour optimisation with memoized legs (C5)
//! - `stitch`: path concatenation and snap tagging (C6)
//! - `commands`: command token synthesis and its inverse (C7)
//! - `request`/`plan`/`server`/`cli`/`simulate`: the JSON/TCP/CLI boundary (C8)

pub mod cli;
pub mod commands;
pub mod config;
pub mod direction;
pub mod error;
pub mod grid;
pub mod plan;
pub mod pose;
pub mod primitives;
pub mod request;
pub mod search;
pub mod server;
pub mod simulate;
pub mod standoff;
pub mod stitch;
pub mod tour;

pub use config::PlannerConfig;
pub use direction::Direction;
pub use error::{PlannerError, PlannerResult};
pub use grid::{Grid, Obstacle};
pub use pose::{GeoPose, Pose};
