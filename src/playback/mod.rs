//! Playback of generated step sequences
//!
//! This module turns a static [`TraversalPlan`](crate::traversal::TraversalPlan)
//! into an animation: a controller advances a cursor through the plan at a
//! configurable pace, emitting each step to an observer, under
//! start / pause / resume / reset control. Alongside it, a stack simulator
//! reconstructs the call-stack or explicit-stack view for display.

mod controller;
mod metrics;
mod stack;

pub use controller::{
    PlaybackConfig, PlaybackController, PlaybackObserver, PlaybackSnapshot, PlaybackState,
    StepEvent,
};
pub use metrics::RunMetrics;
pub use stack::StackSimulator;
