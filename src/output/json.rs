//! JSON output for generated plans

use std::io;

use crate::traversal::TraversalPlan;

/// Print a generated plan (algorithm, steps, metrics) as pretty JSON.
pub fn print_plan_json(plan: &TraversalPlan) -> io::Result<()> {
    let json = serde_json::to_string_pretty(plan).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}
