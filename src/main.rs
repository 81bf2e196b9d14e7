use anyhow::Result;
use clap::Parser;
use grid_tour_planner::cli::Cli;

fn main() -> Result<()> {
    Cli::parse().run()
}
