//! Solves the 10x10 stochastic gridworld and prints its value function and
//! policy, followed by the policy drawn as a grid of arrows.

use clap::Parser;
use valiter::cli::{init_logging, report, SolveArgs};
use valiter::models::gridworld::{render_policy, GridworldConfig, Teleport};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct GridworldArgs {
    #[command(flatten)]
    solve: SolveArgs,
    /// Teleport only the first in-bounds outcome of a move out of a reward
    /// cell, as the classic script does
    #[arg(long)]
    first_outcome_teleport: bool,
}

fn main() -> valiter::Result<()> {
    init_logging();
    let args = GridworldArgs::parse();
    let grid = GridworldConfig {
        teleport: if args.first_outcome_teleport {
            Teleport::FirstOutcome
        } else {
            Teleport::AllOutcomes
        },
        ..GridworldConfig::default()
    };
    let result = args.solve.solve(&grid.build(), grid.gamma)?;
    print!("{}", report(&result));
    println!();
    print!("{}", render_policy(grid.size, &result));
    Ok(())
}
