//! Wall-clock metrics for a single playback run

use std::time::{Duration, Instant};

use crate::traversal::PlanMetrics;

/// Metrics for the run currently owned by a playback controller.
///
/// Combines the plan-derived totals with start/finish timestamps. Cleared on
/// every reset; the start stamp is set when a fresh run begins and the finish
/// stamp when the cursor reaches the end of the plan.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunMetrics {
    started: Option<Instant>,
    finished: Option<Instant>,
    plan: PlanMetrics,
}

impl RunMetrics {
    pub(crate) fn start(&mut self, plan: PlanMetrics) {
        self.started = Some(Instant::now());
        self.finished = None;
        self.plan = plan;
    }

    pub(crate) fn finish(&mut self) {
        self.finished = Some(Instant::now());
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    /// Plan totals: step count, max depth, max stack size.
    pub fn plan(&self) -> PlanMetrics {
        self.plan
    }

    pub fn is_started(&self) -> bool {
        self.started.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    /// Wall-clock time of the run so far, or the final figure once finished.
    /// Zero before the run starts.
    pub fn elapsed(&self) -> Duration {
        match (self.started, self.finished) {
            (Some(start), Some(finish)) => finish.duration_since(start),
            (Some(start), None) => start.elapsed(),
            _ => Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let mut metrics = RunMetrics::default();
        assert!(!metrics.is_started());
        assert_eq!(metrics.elapsed(), Duration::ZERO);

        metrics.start(PlanMetrics {
            total_steps: 7,
            max_depth: 2,
            max_stack_size: 2,
        });
        assert!(metrics.is_started());
        assert!(!metrics.is_finished());
        assert_eq!(metrics.plan().total_steps, 7);

        metrics.finish();
        assert!(metrics.is_finished());
        let frozen = metrics.elapsed();
        assert_eq!(metrics.elapsed(), frozen);

        metrics.clear();
        assert!(!metrics.is_started());
        assert_eq!(metrics.plan(), PlanMetrics::default());
    }
}
