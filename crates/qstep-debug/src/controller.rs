//! The step controller.
//!
//! ```text
//!            start(c)                 stop()
//!   Idle ─────────────→ Running ─────────────→ Idle
//!                       │  ↑
//!                       └──┘ toggle_breakpoint / step / continue
//! ```
//!
//! Every evaluator request is issued outside the state lock and tagged with
//! the session generation. When the answer arrives the lock is taken again
//! and the answer is applied only if the same session is still running;
//! otherwise it is dropped. This makes `stop()` and `start()` safe while a
//! request is pending.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use qstep_hal::{Evaluation, Evaluator, HalResult};
use qstep_ir::{Circuit, QuantumError, QubitState};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::error::{DebugError, DebugResult};
use crate::session::{DebugSession, Snapshot};

/// Result of a single [`StepController::step`].
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// The step succeeded and the cursor moved to `cursor`.
    Advanced {
        /// Cursor after the step.
        cursor: u32,
    },
    /// The evaluator failed. Cursor and states are unchanged.
    Failed(QuantumError),
    /// The cursor was already at the end. The evaluator was not called.
    EndOfCircuit,
    /// The session was stopped or replaced before the answer arrived.
    Discarded,
}

/// Why [`StepController::continue_to_breakpoint`] stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum StopReason {
    /// The next step to execute is a breakpoint.
    Breakpoint(u32),
    /// Every step has been executed.
    EndOfCircuit,
    /// An evaluation failed. Earlier steps of the same call are kept.
    EvaluationFailed(QuantumError),
    /// The session was stopped or replaced mid-run.
    Discarded,
}

/// Result of [`StepController::continue_to_breakpoint`].
#[derive(Debug, Clone, PartialEq)]
pub struct ContinueOutcome {
    /// Steps committed by this call.
    pub steps_taken: u32,
    /// Why the run stopped.
    pub reason: StopReason,
}

enum Phase {
    Idle,
    Running(DebugSession),
}

struct ControllerState {
    phase: Phase,
    /// States reported while idle.
    idle_states: Vec<QubitState>,
    /// Last generation handed out.
    generation: u64,
}

struct Inner {
    evaluator: Arc<dyn Evaluator>,
    state: Mutex<ControllerState>,
    snapshots: watch::Sender<Snapshot>,
}

/// What to do next inside an operation.
enum Next {
    Evaluate {
        circuit: Arc<Circuit>,
        from_cursor: u32,
    },
    EndOfCircuit,
    Breakpoint(u32),
    Discarded,
}

/// Outcome of applying one evaluator answer.
enum Applied {
    Advanced(u32),
    Failed(QuantumError),
    Discarded,
}

/// Breakpoint-aware stepped execution over an [`Evaluator`].
///
/// Cloning is cheap; clones share the same session.
#[derive(Clone)]
pub struct StepController {
    inner: Arc<Inner>,
}

impl StepController {
    /// Create an idle controller.
    pub fn new(evaluator: Arc<dyn Evaluator>) -> Self {
        let (snapshots, _) = watch::channel(Snapshot::default());
        Self {
            inner: Arc::new(Inner {
                evaluator,
                state: Mutex::new(ControllerState {
                    phase: Phase::Idle,
                    idle_states: Vec::new(),
                    generation: 0,
                }),
                snapshots,
            }),
        }
    }

    /// Name of the underlying evaluator.
    pub fn evaluator_name(&self) -> &str {
        self.inner.evaluator.name()
    }

    /// Validate `circuit` and open a session on it.
    ///
    /// A running session is replaced; any answer still pending for it will
    /// be discarded.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    pub fn start(&self, circuit: Circuit) -> DebugResult<Uuid> {
        qstep_ir::validate(&circuit)?;

        let mut state = self.inner.lock();
        state.generation += 1;
        let session = DebugSession::new(circuit, state.generation);
        let id = session.id;
        info!(
            "Debug session {} started ({} steps)",
            id,
            session.circuit.step_count()
        );
        state.phase = Phase::Running(session);
        self.inner.publish(&state);
        Ok(id)
    }

    /// Add `step` to the breakpoints, or remove it if present.
    ///
    /// Returns whether the breakpoint is now set.
    pub fn toggle_breakpoint(&self, step: u32) -> DebugResult<bool> {
        let mut state = self.inner.lock();
        let Phase::Running(session) = &mut state.phase else {
            return Err(DebugError::NotRunning);
        };
        let set = session.toggle_breakpoint(step);
        debug!("Breakpoint at step {} {}", step, if set { "set" } else { "cleared" });
        self.inner.publish(&state);
        Ok(set)
    }

    /// Execute the next step.
    ///
    /// All-or-nothing: on evaluator failure the cursor and states are kept
    /// and the error is recorded on the session.
    #[instrument(skip(self))]
    pub async fn step(&self) -> DebugResult<StepOutcome> {
        let in_flight = self.acquire()?;
        let generation = in_flight.generation;

        let outcome = match self.inner.next(generation, false) {
            Next::Evaluate {
                circuit,
                from_cursor,
            } => {
                let result = self.evaluate(&circuit, from_cursor).await;
                match self.inner.apply(generation, from_cursor, result) {
                    Applied::Advanced(cursor) => StepOutcome::Advanced { cursor },
                    Applied::Failed(e) => StepOutcome::Failed(e),
                    Applied::Discarded => StepOutcome::Discarded,
                }
            }
            Next::EndOfCircuit => StepOutcome::EndOfCircuit,
            Next::Breakpoint(_) | Next::Discarded => StepOutcome::Discarded,
        };
        Ok(outcome)
    }

    /// Step repeatedly until a breakpoint, the end, or a failure.
    ///
    /// Stops before executing a step whose target index `cursor + 1` is a
    /// breakpoint. Every step is its own evaluator request and is committed
    /// on its own, so a failure keeps the progress made before it.
    #[instrument(skip(self))]
    pub async fn continue_to_breakpoint(&self) -> DebugResult<ContinueOutcome> {
        let in_flight = self.acquire()?;
        let generation = in_flight.generation;

        let mut steps_taken = 0;
        let reason = loop {
            match self.inner.next(generation, true) {
                Next::Evaluate {
                    circuit,
                    from_cursor,
                } => {
                    let result = self.evaluate(&circuit, from_cursor).await;
                    match self.inner.apply(generation, from_cursor, result) {
                        Applied::Advanced(_) => steps_taken += 1,
                        Applied::Failed(e) => break StopReason::EvaluationFailed(e),
                        Applied::Discarded => break StopReason::Discarded,
                    }
                }
                Next::EndOfCircuit => break StopReason::EndOfCircuit,
                Next::Breakpoint(step) => break StopReason::Breakpoint(step),
                Next::Discarded => break StopReason::Discarded,
            }
        };

        debug!("Continue stopped after {} steps: {:?}", steps_taken, reason);
        Ok(ContinueOutcome {
            steps_taken,
            reason,
        })
    }

    /// Discard the session and reset states to ground.
    ///
    /// Safe at any time, including while a request is pending. Returns
    /// whether a session was running.
    #[instrument(skip(self))]
    pub fn stop(&self) -> bool {
        let mut state = self.inner.lock();
        let Phase::Running(session) = std::mem::replace(&mut state.phase, Phase::Idle) else {
            return false;
        };
        info!(
            "Debug session {} stopped at step {}",
            session.id, session.cursor
        );
        state.idle_states = QubitState::initial_states(session.circuit.qubit_count());
        self.inner.publish(&state);
        true
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Current view of the controller.
    pub fn snapshot(&self) -> Snapshot {
        let state = self.inner.lock();
        Inner::snapshot_of(&state)
    }

    /// Whether a session is running.
    pub fn is_running(&self) -> bool {
        matches!(self.inner.lock().phase, Phase::Running(_))
    }

    /// Receive a fresh [`Snapshot`] after every applied change.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.inner.snapshots.subscribe()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Mark the running session busy for the duration of one operation.
    fn acquire(&self) -> DebugResult<InFlight> {
        let mut state = self.inner.lock();
        let Phase::Running(session) = &mut state.phase else {
            return Err(DebugError::NotRunning);
        };
        if session.in_flight {
            return Err(DebugError::RequestInFlight(session.id));
        }
        session.in_flight = true;
        let generation = session.generation;
        self.inner.publish(&state);
        Ok(InFlight {
            inner: Arc::clone(&self.inner),
            generation,
        })
    }

    async fn evaluate(&self, circuit: &Circuit, from_cursor: u32) -> HalResult<Evaluation> {
        self.inner
            .evaluator
            .evaluate_prefix(circuit, from_cursor + 1)
            .await
    }
}

impl std::fmt::Debug for StepController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepController")
            .field("evaluator", &self.inner.evaluator.name())
            .field("running", &self.is_running())
            .finish()
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot_of(state: &ControllerState) -> Snapshot {
        match &state.phase {
            Phase::Running(session) => Snapshot::of_session(session),
            Phase::Idle => Snapshot::idle(&state.idle_states),
        }
    }

    fn publish(&self, state: &ControllerState) {
        self.snapshots.send_replace(Self::snapshot_of(state));
    }

    /// The running session, if it still carries `generation`.
    fn session_mut(state: &mut ControllerState, generation: u64) -> Option<&mut DebugSession> {
        match &mut state.phase {
            Phase::Running(session) if session.generation == generation => Some(session),
            _ => None,
        }
    }

    fn next(&self, generation: u64, honor_breakpoints: bool) -> Next {
        let mut state = self.lock();
        let Some(session) = Self::session_mut(&mut state, generation) else {
            return Next::Discarded;
        };
        if session.at_end() {
            return Next::EndOfCircuit;
        }
        let target = session.cursor + 1;
        if honor_breakpoints && session.breakpoints.contains(&target) {
            return Next::Breakpoint(target);
        }
        Next::Evaluate {
            circuit: Arc::clone(&session.circuit),
            from_cursor: session.cursor,
        }
    }

    fn apply(&self, generation: u64, from_cursor: u32, result: HalResult<Evaluation>) -> Applied {
        let mut state = self.lock();
        let Some(session) = Self::session_mut(&mut state, generation) else {
            debug!("Discarding answer for stale generation {}", generation);
            return Applied::Discarded;
        };

        let applied = match result {
            Ok(evaluation) => {
                session.cursor = from_cursor + 1;
                session.last_states = evaluation.states;
                session.last_measurements = evaluation.measurements;
                session.last_error = None;
                debug!("Session {} advanced to step {}", session.id, session.cursor);
                Applied::Advanced(session.cursor)
            }
            Err(e) => {
                let error = QuantumError::from(e);
                warn!(
                    "Session {} failed at step {}: {}",
                    session.id,
                    from_cursor + 1,
                    error
                );
                session.last_error = Some(error.clone());
                Applied::Failed(error)
            }
        };
        self.publish(&state);
        applied
    }
}

/// Clears the busy flag when an operation ends, including when its future
/// is dropped mid-await.
struct InFlight {
    inner: Arc<Inner>,
    generation: u64,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let mut state = self.inner.lock();
        if let Some(session) = Inner::session_mut(&mut state, self.generation) {
            session.in_flight = false;
            self.inner.publish(&state);
        }
    }
}
