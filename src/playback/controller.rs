//! The playback state machine and its pacing worker

use std::collections::HashSet;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use log::{debug, warn};

use crate::error::TreeError;
use crate::traversal::{Algorithm, Step, StepKind, TraversalPlan};
use crate::tree::Node;

use super::metrics::RunMetrics;
use super::stack::StackSimulator;

/// Where the controller is in its lifecycle.
///
/// `Idle -> Running -> (Paused <-> Running) -> Completed`, with reset
/// returning to `Idle` from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Running,
    Paused,
    Completed,
}

impl PlaybackState {
    /// Status label as shown in the UI.
    pub fn label(&self) -> &'static str {
        match self {
            PlaybackState::Idle => "ready",
            PlaybackState::Running => "running",
            PlaybackState::Paused => "paused",
            PlaybackState::Completed => "complete",
        }
    }
}

/// Pacing and algorithm selection for a controller.
#[derive(Debug, Clone)]
pub struct PlaybackConfig {
    pub algorithm: Algorithm,
    /// Delay awaited between consecutive steps.
    pub delay: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Recursive,
            delay: Duration::from_millis(800),
        }
    }
}

/// Everything the presentation layer gets per emitted step.
///
/// An owned snapshot: observers run on the playback thread and must not need
/// to reach back into controller state.
#[derive(Debug, Clone)]
pub struct StepEvent {
    pub step: Step,
    /// Zero-based index of this step in the plan.
    pub cursor: usize,
    pub total_steps: usize,
    /// Ids of nodes marked visited so far, this step included.
    pub visited: HashSet<String>,
    /// Id of the node this step concerns.
    pub current_id: String,
    /// Simulated stack frames, bottom first.
    pub stack: Vec<String>,
    pub metrics: RunMetrics,
}

/// Receives step emissions from a playback run.
///
/// Injected at construction; the engine never touches a display surface
/// itself. Called from the playback thread.
pub trait PlaybackObserver: Send {
    fn on_step(&mut self, event: &StepEvent);

    /// Called once when the cursor reaches the end of the plan.
    fn on_finished(&mut self, _metrics: &RunMetrics) {}
}

/// Point-in-time view of the controller, for pull-style consumers.
#[derive(Debug, Clone)]
pub struct PlaybackSnapshot {
    pub state: PlaybackState,
    pub algorithm: Algorithm,
    pub cursor: usize,
    pub total_steps: usize,
    pub visited: HashSet<String>,
    pub current: Option<String>,
    pub stack: Vec<String>,
    pub metrics: RunMetrics,
}

enum Command {
    Start,
    Pause,
    Reset,
    SetDelay(Duration),
    SetAlgorithm(Algorithm),
    Shutdown,
}

struct RunState {
    state: PlaybackState,
    algorithm: Algorithm,
    delay: Duration,
    plan: Option<TraversalPlan>,
    cursor: usize,
    visited: HashSet<String>,
    current: Option<String>,
    stack: StackSimulator,
    metrics: RunMetrics,
}

impl RunState {
    fn new(config: &PlaybackConfig) -> Self {
        Self {
            state: PlaybackState::Idle,
            algorithm: config.algorithm,
            delay: config.delay,
            plan: None,
            cursor: 0,
            visited: HashSet::new(),
            current: None,
            stack: StackSimulator::new(config.algorithm),
            metrics: RunMetrics::default(),
        }
    }

    /// Discard the generated steps and every piece of state derived from
    /// them. The algorithm and delay settings survive.
    fn clear_run(&mut self) {
        self.plan = None;
        self.cursor = 0;
        self.visited.clear();
        self.current = None;
        self.stack = StackSimulator::new(self.algorithm);
        self.metrics.clear();
    }
}

struct Shared {
    state: Mutex<RunState>,
    cond: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, RunState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Plays a generated step sequence at a configurable pace.
///
/// The controller owns one run at a time: `start()` generates a fresh plan
/// and begins emitting steps to the injected observer, `pause()` halts at
/// the current cursor, `start()` again resumes without regenerating, and
/// `reset()` discards everything. Emission happens on a dedicated worker
/// thread; the inter-step delay doubles as the point where pause and reset
/// requests take effect, so a step is never interrupted midway.
///
/// Invalid transitions (pausing while idle, starting while running) are
/// deliberate no-ops rather than errors.
pub struct PlaybackController {
    tree: Arc<Node>,
    shared: Arc<Shared>,
    sender: Sender<Command>,
    worker: Option<JoinHandle<()>>,
}

impl PlaybackController {
    /// Validate the tree and spin up the playback worker in the idle state.
    pub fn new(
        tree: Node,
        config: PlaybackConfig,
        observer: Box<dyn PlaybackObserver>,
    ) -> Result<Self, TreeError> {
        tree.validate()?;
        let tree = Arc::new(tree);
        let shared = Arc::new(Shared {
            state: Mutex::new(RunState::new(&config)),
            cond: Condvar::new(),
        });
        let (sender, receiver) = unbounded();

        let worker = thread::spawn({
            let tree = Arc::clone(&tree);
            let shared = Arc::clone(&shared);
            move || worker_loop(&tree, &shared, &receiver, observer)
        });

        Ok(Self {
            tree,
            shared,
            sender,
            worker: Some(worker),
        })
    }

    /// Begin a fresh run, or resume if paused. No-op while already running.
    pub fn start(&self) {
        self.send(Command::Start);
    }

    /// Halt emission at the current cursor. No-op unless running.
    pub fn pause(&self) {
        self.send(Command::Pause);
    }

    /// Discard the current run and return to idle. Valid from any state.
    pub fn reset(&self) {
        self.send(Command::Reset);
    }

    /// Change the inter-step delay; applies from the next suspension point.
    pub fn set_delay(&self, delay: Duration) {
        self.send(Command::SetDelay(delay));
    }

    /// Select the algorithm for the next run and reset. Ignored while a run
    /// is in progress.
    pub fn set_algorithm(&self, algorithm: Algorithm) {
        self.send(Command::SetAlgorithm(algorithm));
    }

    pub fn state(&self) -> PlaybackState {
        self.shared.lock().state
    }

    pub fn tree(&self) -> &Node {
        &self.tree
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        let st = self.shared.lock();
        PlaybackSnapshot {
            state: st.state,
            algorithm: st.algorithm,
            cursor: st.cursor,
            total_steps: st.plan.as_ref().map_or(0, TraversalPlan::len),
            visited: st.visited.clone(),
            current: st.current.clone(),
            stack: st.stack.frames().to_vec(),
            metrics: st.metrics,
        }
    }

    /// Block until the current run completes. Returns false on timeout.
    pub fn wait_until_complete(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut st = self.shared.lock();
        while st.state != PlaybackState::Completed {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            let (guard, _timed_out) = self
                .shared
                .cond
                .wait_timeout(st, deadline - now)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            st = guard;
        }
        true
    }

    fn send(&self, cmd: Command) {
        if self.sender.send(cmd).is_err() {
            warn!("playback worker has shut down; command dropped");
        }
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        let _ = self.sender.send(Command::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// What a single emission attempt produced.
enum Advance {
    /// A step went out; wait out the delay before the next one.
    Emitted(Duration),
    /// Cursor hit the end of the plan.
    Finished,
    /// A pause or reset landed; park until the next command.
    NotRunning,
}

fn worker_loop(
    tree: &Node,
    shared: &Shared,
    receiver: &Receiver<Command>,
    mut observer: Box<dyn PlaybackObserver>,
) {
    loop {
        // Parked: nothing to emit until a command arrives.
        let Ok(cmd) = receiver.recv() else { return };
        if !apply_command(tree, shared, cmd) {
            return;
        }

        // Emission loop: one step per iteration while running, suspending on
        // the configured delay in between. Commands arriving mid-delay are
        // handled at the boundary, never mid-step.
        loop {
            match advance(shared, observer.as_mut()) {
                Advance::Emitted(delay) => match receiver.recv_timeout(delay) {
                    Ok(cmd) => {
                        if !apply_command(tree, shared, cmd) {
                            return;
                        }
                    }
                    Err(RecvTimeoutError::Timeout) => {}
                    Err(RecvTimeoutError::Disconnected) => return,
                },
                Advance::Finished | Advance::NotRunning => break,
            }
        }
    }
}

/// Apply one command to the state machine. Returns false on shutdown.
fn apply_command(tree: &Node, shared: &Shared, cmd: Command) -> bool {
    let mut st = shared.lock();
    match cmd {
        Command::Start => match st.state {
            PlaybackState::Running => debug!("start ignored: already running"),
            PlaybackState::Paused => {
                debug!("resuming at step {}", st.cursor);
                st.state = PlaybackState::Running;
            }
            PlaybackState::Idle | PlaybackState::Completed => {
                // The tree was validated at construction, so generation only
                // fails if the tree was somehow swapped out from under us.
                match TraversalPlan::generate(tree, st.algorithm) {
                    Ok(plan) => {
                        st.clear_run();
                        st.metrics.start(plan.metrics());
                        debug!(
                            "starting {} traversal: {} steps",
                            st.algorithm.label(),
                            plan.len()
                        );
                        st.plan = Some(plan);
                        st.state = PlaybackState::Running;
                    }
                    Err(err) => warn!("step generation failed: {err}"),
                }
            }
        },
        Command::Pause => {
            if st.state == PlaybackState::Running {
                debug!("paused at step {}", st.cursor);
                st.state = PlaybackState::Paused;
            } else {
                debug!("pause ignored in state {:?}", st.state);
            }
        }
        Command::Reset => {
            st.clear_run();
            st.state = PlaybackState::Idle;
            debug!("playback reset");
        }
        Command::SetDelay(delay) => st.delay = delay,
        Command::SetAlgorithm(algorithm) => {
            if st.state == PlaybackState::Running {
                warn!("algorithm change ignored while running");
            } else {
                st.algorithm = algorithm;
                st.clear_run();
                st.state = PlaybackState::Idle;
            }
        }
        Command::Shutdown => return false,
    }
    shared.cond.notify_all();
    true
}

/// Emit the step at the cursor, or complete the run if the cursor is past
/// the end. The observer is invoked outside the state lock.
fn advance(shared: &Shared, observer: &mut dyn PlaybackObserver) -> Advance {
    enum Pending {
        Step(StepEvent, Duration),
        Done(RunMetrics),
    }

    let pending = {
        let mut st = shared.lock();
        if st.state != PlaybackState::Running {
            return Advance::NotRunning;
        }

        let total = st.plan.as_ref().map_or(0, TraversalPlan::len);
        if st.cursor >= total {
            st.metrics.finish();
            st.state = PlaybackState::Completed;
            shared.cond.notify_all();
            debug!("traversal complete: {total} steps");
            Pending::Done(st.metrics)
        } else {
            let cursor = st.cursor;
            let Some(step) = st.plan.as_ref().and_then(|p| p.get(cursor)).cloned() else {
                return Advance::NotRunning;
            };

            // A node counts as visited on its visit step, and again on
            // complete for recursive runs, matching the tree highlighting.
            if matches!(step.kind, StepKind::Visit | StepKind::Complete) {
                st.visited.insert(step.node_id.clone());
            }
            st.stack.apply(&step);
            st.current = Some(step.node_id.clone());
            st.cursor += 1;

            let event = StepEvent {
                cursor,
                total_steps: total,
                visited: st.visited.clone(),
                current_id: step.node_id.clone(),
                stack: st.stack.frames().to_vec(),
                metrics: st.metrics,
                step,
            };
            Pending::Step(event, st.delay)
        }
    };

    match pending {
        Pending::Step(event, delay) => {
            observer.on_step(&event);
            Advance::Emitted(delay)
        }
        Pending::Done(metrics) => {
            observer.on_finished(&metrics);
            Advance::Finished
        }
    }
}
