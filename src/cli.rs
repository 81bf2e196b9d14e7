//! CLI commands (C8 [ADD]).
//!
//! Three subcommands: `serve` runs the TCP boundary, `plan` runs one
//! planning pass offline against a JSON file and prints the
//! `testalgo.py`-style envelope, `simulate` renders the resulting pose
//! trace as a sequence of ASCII-grid frames.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::config::PlannerConfig;
use crate::request::{ExtendedResponse, PlanEnvelope, RequestEnvelope};
use crate::{plan, server, simulate, stitch, tour};

#[derive(Parser)]
#[command(name = "grid-tour-planner")]
#[command(about = "A* tour planning for a grid-bound photo-inspection robot", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the TCP planner service.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "50000")]
        port: u16,

        /// Reject any peer whose address isn't this one. Pass an unroutable
        /// value (e.g. an IPv6 address) to effectively disable the check
        /// for local testing.
        #[arg(long, default_value = "192.168.8.8")]
        client_addr: IpAddr,

        /// "text" or "json" structured log output.
        #[arg(long, default_value = "text")]
        log_format: String,
    },

    /// Plan one tour from a JSON request file and print the result.
    Plan {
        /// Path to a JSON file shaped like the `serve` request body.
        input: PathBuf,

        /// Print the extended `{commands_string, coords}` form instead
        /// of the `{data: {distance, commands}, error}` envelope.
        #[arg(long)]
        extended: bool,
    },

    /// Render the planned pose trace as ASCII-grid frames.
    Simulate {
        /// Path to a JSON file shaped like the `serve` request body.
        input: PathBuf,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve {
                port,
                client_addr,
                log_format,
            } => {
                init_tracing(&log_format);
                server::run_server(port, Some(client_addr), PlannerConfig::default())
            }
            Commands::Plan { input, extended } => run_plan(&input, extended),
            Commands::Simulate { input } => run_simulate(&input),
        }
    }
}

fn load_request(input: &PathBuf) -> Result<RequestEnvelope> {
    let body = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    serde_json::from_str(&body)
        .with_context(|| format!("failed to parse request JSON from {}", input.display()))
}

fn run_plan(input: &PathBuf, extended: bool) -> Result<()> {
    let envelope = load_request(input)?;
    let config = PlannerConfig::default();

    if extended {
        let frames = plan::plan_frames(&envelope.data, config)?;
        let response = ExtendedResponse::from_frames(&frames);
        println!("{}", serde_json::to_string(&response)?);
        return Ok(());
    }

    let result = plan::plan(&envelope.data, config);
    let output = match result {
        Ok(outcome) => PlanEnvelope::ok(outcome.distance, outcome.commands),
        Err(err) => PlanEnvelope::err(err.to_string()),
    };

    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

fn run_simulate(input: &PathBuf) -> Result<()> {
    let envelope = load_request(input)?;
    let config = PlannerConfig::default();

    let mut grid = crate::grid::Grid::new(config.clone());
    for obstacle in &envelope.data.obstacles {
        grid.add_obstacle(obstacle.id.clone(), obstacle.x, obstacle.y, obstacle.direction)?;
    }
    let start = crate::pose::GeoPose::new(
        envelope.data.robot.x,
        envelope.data.robot.y,
        envelope.data.robot.direction,
    );
    let obstacle_ids: Vec<String> = envelope.data.obstacles.iter().map(|o| o.id.clone()).collect();

    let tour = tour::plan_tour(&grid, start, &obstacle_ids)?;
    let trace = stitch::stitch(start, &tour);

    for (i, pose) in trace.iter().enumerate() {
        println!("-- frame {i} --");
        println!("{}", simulate::render(&grid, &pose.geo));
        if let Some(tag) = &pose.snap {
            println!("(SNAP {tag})");
        }
        println!();
    }

    Ok(())
}

/// Initialise structured logging, grounded on the teacher's own
/// `step9::init_tracing`: `"json"` for structured JSON lines, anything
/// else for human-readable text; `RUST_LOG` overrides the default filter.
pub fn init_tracing(log_format: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_format {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().with_env_filter(filter).with_target(false).init();
        }
    }
}
