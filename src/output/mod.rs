//! Terminal presentation for trees, step logs, and metrics
//!
//! Everything here sits on the far side of the observer seam: the playback
//! engine knows nothing about display, these types subscribe to it.

mod json;
mod log;
mod tree;

pub use json::print_plan_json;
pub use log::LogPrinter;
pub use tree::TreeFormatter;
