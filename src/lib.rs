//! Treelapse - step-through visualizer for recursive and iterative tree traversal

pub mod error;
pub mod output;
pub mod playback;
pub mod traversal;
pub mod tree;

pub use error::TreeError;
pub use output::{LogPrinter, TreeFormatter, print_plan_json};
pub use playback::{
    PlaybackConfig, PlaybackController, PlaybackObserver, PlaybackSnapshot, PlaybackState,
    RunMetrics, StackSimulator, StepEvent,
};
pub use traversal::{Algorithm, PlanMetrics, Step, StepKind, TraversalPlan};
pub use tree::{Node, load_tree, sample_project};
