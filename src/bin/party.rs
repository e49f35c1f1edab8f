//! Solves the "partying when sick" model and prints its value function and
//! policy.

use clap::Parser;
use valiter::cli::{init_logging, report, SolveArgs};
use valiter::models::party::{self, party};

fn main() -> valiter::Result<()> {
    init_logging();
    let args = SolveArgs::parse();
    let result = args.solve(&party(), party::GAMMA)?;
    print!("{}", report(&result));
    Ok(())
}
