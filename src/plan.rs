//! End-to-end planning: wires C1/C4/C5/C6/C7 together into the single
//! entry point the CLI and TCP boundary both call (spec §6 [ADD]).

use crate::commands::CommandFrame;
use crate::config::PlannerConfig;
use crate::error::PlannerResult;
use crate::grid::Grid;
use crate::pose::{GeoPose, Pose};
use crate::request::PlanRequest;
use crate::{commands, stitch, tour};

pub struct PlanOutcome {
    pub distance: i32,
    pub commands: Vec<String>,
}

/// Builds the grid and runs the tour + stitch stages shared by `plan`
/// and `plan_frames`; returns the grid (callers need its config for
/// `commands::synthesize*`) and the stitched trace.
pub(crate) fn build_trace(
    request: &PlanRequest,
    config: PlannerConfig,
) -> PlannerResult<(Grid, Vec<Pose>, i32)> {
    let mut grid = Grid::new(config);
    for obstacle in &request.obstacles {
        grid.add_obstacle(obstacle.id.clone(), obstacle.x, obstacle.y, obstacle.direction)?;
    }

    let start = GeoPose::new(request.robot.x, request.robot.y, request.robot.direction);
    let obstacle_ids: Vec<String> = request.obstacles.iter().map(|o| o.id.clone()).collect();

    let tour = tour::plan_tour(&grid, start, &obstacle_ids)?;
    let trace = stitch::stitch(start, &tour);
    let total_cost = tour.total_cost;
    Ok((grid, trace, total_cost))
}

/// Builds a `Grid` from `request`, plans a tour over every obstacle, and
/// synthesises the final command sequence. Surfaces `PlannerError`
/// directly (obstacle validation, unreachable standoff poses); callers
/// at the boundary (`server.rs`, `cli.rs`) translate that into the
/// wire-level error shape appropriate to their protocol.
pub fn plan(request: &PlanRequest, config: PlannerConfig) -> PlannerResult<PlanOutcome> {
    let (grid, trace, total_cost) = build_trace(request, config)?;
    let command_tokens = commands::synthesize(&trace, grid.config());

    Ok(PlanOutcome {
        distance: total_cost,
        commands: command_tokens,
    })
}

/// Same as `plan`, but returns each command token paired with the pose
/// it reaches — the data behind §6's extended response form
/// (`ExtendedResponse::from_frames`).
pub fn plan_frames(request: &PlanRequest, config: PlannerConfig) -> PlannerResult<Vec<CommandFrame>> {
    let (grid, trace, _total_cost) = build_trace(request, config)?;
    Ok(commands::synthesize_with_poses(&trace, grid.config()))
}
