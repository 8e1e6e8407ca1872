//! Integration tests for the playback controller


use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use harness::example_tree;
use treelapse::{
    Algorithm, PlaybackConfig, PlaybackController, PlaybackObserver, PlaybackState, RunMetrics,
    StepEvent, StepKind, TraversalPlan, sample_project,
};

/// Observer that records every emission for later inspection.
#[derive(Clone, Default)]
struct Recorder {
    events: Arc<Mutex<Vec<StepEvent>>>,
    finishes: Arc<Mutex<usize>>,
}

impl Recorder {
    fn events(&self) -> Vec<StepEvent> {
        self.events.lock().unwrap().clone()
    }

    fn finishes(&self) -> usize {
        *self.finishes.lock().unwrap()
    }

    fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    fn step_ids(&self) -> Vec<(StepKind, String)> {
        self.events()
            .iter()
            .map(|e| (e.step.kind, e.step.node_id.clone()))
            .collect()
    }
}

impl PlaybackObserver for Recorder {
    fn on_step(&mut self, event: &StepEvent) {
        self.events.lock().unwrap().push(event.clone());
    }

    fn on_finished(&mut self, _metrics: &RunMetrics) {
        *self.finishes.lock().unwrap() += 1;
    }
}

fn controller_with_recorder(
    algorithm: Algorithm,
    delay: Duration,
) -> (PlaybackController, Recorder) {
    let recorder = Recorder::default();
    let controller = PlaybackController::new(
        sample_project(),
        PlaybackConfig { algorithm, delay },
        Box::new(recorder.clone()),
    )
    .unwrap();
    (controller, recorder)
}

fn plan_ids(algorithm: Algorithm) -> Vec<(StepKind, String)> {
    TraversalPlan::generate(&sample_project(), algorithm)
        .unwrap()
        .steps()
        .iter()
        .map(|s| (s.kind, s.node_id.clone()))
        .collect()
}

fn settle() {
    thread::sleep(Duration::from_millis(50));
}

#[test]
fn test_full_run_emits_every_step_in_order() {
    for algorithm in [Algorithm::Recursive, Algorithm::Iterative] {
        let (controller, recorder) = controller_with_recorder(algorithm, Duration::ZERO);
        controller.start();
        assert!(controller.wait_until_complete(Duration::from_secs(10)));

        assert_eq!(recorder.step_ids(), plan_ids(algorithm));
        assert_eq!(recorder.finishes(), 1);

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.state, PlaybackState::Completed);
        assert_eq!(snapshot.cursor, snapshot.total_steps);
        assert_eq!(snapshot.visited.len(), controller.tree().node_count());
        assert!(snapshot.metrics.is_finished());
    }
}

#[test]
fn test_pause_resume_cursor_continuity() {
    let (controller, recorder) = controller_with_recorder(
        Algorithm::Recursive,
        Duration::from_millis(10),
    );

    controller.start();
    thread::sleep(Duration::from_millis(150));
    controller.pause();
    settle();

    let paused = controller.snapshot();
    assert_eq!(paused.state, PlaybackState::Paused);
    assert!(paused.cursor > 0, "some steps should have been emitted");
    assert!(
        paused.cursor < paused.total_steps,
        "pause should land mid-run"
    );

    // No steps flow while paused.
    thread::sleep(Duration::from_millis(100));
    assert_eq!(controller.snapshot().cursor, paused.cursor);

    // Pausing again changes nothing.
    controller.pause();
    settle();
    assert_eq!(controller.snapshot().cursor, paused.cursor);
    assert_eq!(controller.snapshot().state, PlaybackState::Paused);

    // Resume finishes the run with no duplicated or skipped steps.
    controller.start();
    assert!(controller.wait_until_complete(Duration::from_secs(30)));
    assert_eq!(recorder.step_ids(), plan_ids(Algorithm::Recursive));
    assert_eq!(recorder.finishes(), 1);
}

#[test]
fn test_reset_returns_to_idle_from_any_state() {
    let (controller, recorder) = controller_with_recorder(Algorithm::Iterative, Duration::ZERO);

    // From completed.
    controller.start();
    assert!(controller.wait_until_complete(Duration::from_secs(10)));
    controller.reset();
    settle();

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.state, PlaybackState::Idle);
    assert_eq!(snapshot.cursor, 0);
    assert_eq!(snapshot.total_steps, 0);
    assert!(snapshot.visited.is_empty());
    assert!(snapshot.stack.is_empty());
    assert!(snapshot.current.is_none());
    assert!(!snapshot.metrics.is_started());

    // Resetting twice is the same as once.
    controller.reset();
    settle();
    assert_eq!(controller.snapshot().state, PlaybackState::Idle);

    // A fresh start behaves like a first-ever run.
    let first_run = recorder.step_ids();
    recorder.clear();
    controller.start();
    assert!(controller.wait_until_complete(Duration::from_secs(10)));
    assert_eq!(recorder.step_ids(), first_run);
}

#[test]
fn test_reset_while_paused_discards_run() {
    let (controller, _recorder) = controller_with_recorder(
        Algorithm::Recursive,
        Duration::from_millis(10),
    );

    controller.start();
    thread::sleep(Duration::from_millis(100));
    controller.pause();
    settle();
    assert!(controller.snapshot().cursor > 0);

    controller.reset();
    settle();
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.state, PlaybackState::Idle);
    assert_eq!(snapshot.cursor, 0);
    assert!(snapshot.visited.is_empty());
}

#[test]
fn test_invalid_transitions_are_noops() {
    let (controller, recorder) = controller_with_recorder(Algorithm::Recursive, Duration::ZERO);

    // Pause before any start.
    controller.pause();
    settle();
    assert_eq!(controller.snapshot().state, PlaybackState::Idle);
    assert!(recorder.events().is_empty());

    // Pause after completion.
    controller.start();
    assert!(controller.wait_until_complete(Duration::from_secs(10)));
    controller.pause();
    settle();
    assert_eq!(controller.snapshot().state, PlaybackState::Completed);
}

#[test]
fn test_visited_marked_on_visit_for_iterative() {
    let recorder = Recorder::default();
    let controller = PlaybackController::new(
        example_tree(),
        PlaybackConfig {
            algorithm: Algorithm::Iterative,
            delay: Duration::ZERO,
        },
        Box::new(recorder.clone()),
    )
    .unwrap();

    controller.start();
    assert!(controller.wait_until_complete(Duration::from_secs(10)));

    let mut seen = 0;
    for event in recorder.events() {
        match event.step.kind {
            StepKind::Visit => {
                seen += 1;
                assert!(
                    event.visited.contains(&event.step.node_id),
                    "a visit marks its node immediately"
                );
            }
            StepKind::Push => assert!(
                !event.visited.contains(&event.step.node_id),
                "pushing must not mark a node visited"
            ),
            _ => unreachable!("iterative plans only visit and push"),
        }
        assert_eq!(event.visited.len(), seen);
    }
}

#[test]
fn test_visited_marked_early_for_recursive_folders() {
    let recorder = Recorder::default();
    let controller = PlaybackController::new(
        example_tree(),
        PlaybackConfig {
            algorithm: Algorithm::Recursive,
            delay: Duration::ZERO,
        },
        Box::new(recorder.clone()),
    )
    .unwrap();

    controller.start();
    assert!(controller.wait_until_complete(Duration::from_secs(10)));

    // The root shows as visited from its very first step, long before its
    // descendants complete.
    let events = recorder.events();
    assert_eq!(events[0].step.kind, StepKind::Visit);
    assert!(events[0].visited.contains("root"));
    assert_eq!(events[0].visited.len(), 1);
}

#[test]
fn test_stack_snapshot_follows_iterative_pushes() {
    let recorder = Recorder::default();
    let controller = PlaybackController::new(
        example_tree(),
        PlaybackConfig {
            algorithm: Algorithm::Iterative,
            delay: Duration::ZERO,
        },
        Box::new(recorder.clone()),
    )
    .unwrap();

    controller.start();
    assert!(controller.wait_until_complete(Duration::from_secs(10)));

    let events = recorder.events();
    // visit root -> stack empty, push b -> [b], push a -> [b, a], visit a -> [b]
    assert!(events[0].stack.is_empty());
    assert_eq!(events[1].stack, vec!["b".to_string()]);
    assert_eq!(events[2].stack, vec!["b".to_string(), "a".to_string()]);
    assert_eq!(events[3].stack, vec!["b".to_string()]);
    // Drained by the final visit.
    assert!(events.last().unwrap().stack.is_empty());
}
