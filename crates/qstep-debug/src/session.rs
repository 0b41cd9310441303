//! Debug session state and its published snapshot.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use qstep_ir::{Circuit, QuantumError, QubitState};
use uuid::Uuid;

/// Mutable context of one stepped execution.
///
/// Owned by the controller and changed only through its operations.
/// `cursor` counts executed steps and stays within `0..=step_count`.
#[derive(Debug, Clone)]
pub(crate) struct DebugSession {
    pub(crate) id: Uuid,
    pub(crate) circuit: Arc<Circuit>,
    pub(crate) breakpoints: BTreeSet<u32>,
    pub(crate) cursor: u32,
    pub(crate) last_error: Option<QuantumError>,
    pub(crate) last_states: Vec<QubitState>,
    pub(crate) last_measurements: BTreeMap<String, u64>,
    pub(crate) generation: u64,
    pub(crate) in_flight: bool,
}

impl DebugSession {
    pub(crate) fn new(circuit: Circuit, generation: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            last_states: QubitState::initial_states(circuit.qubit_count()),
            circuit: Arc::new(circuit),
            breakpoints: BTreeSet::new(),
            cursor: 0,
            last_error: None,
            last_measurements: BTreeMap::new(),
            generation,
            in_flight: false,
        }
    }

    /// Insert `step` if absent, remove it if present. Returns whether it is
    /// now set.
    pub(crate) fn toggle_breakpoint(&mut self, step: u32) -> bool {
        if self.breakpoints.remove(&step) {
            false
        } else {
            self.breakpoints.insert(step);
            true
        }
    }

    /// Breakpoints in ascending order.
    pub(crate) fn breakpoints(&self) -> impl Iterator<Item = u32> + '_ {
        self.breakpoints.iter().copied()
    }

    /// Whether every step has been executed.
    pub(crate) fn at_end(&self) -> bool {
        self.cursor >= self.circuit.step_count()
    }
}

/// Point-in-time view of the controller.
///
/// Published to subscribers after every applied change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    /// Whether a session is running.
    pub running: bool,
    /// Running session id.
    pub session_id: Option<Uuid>,
    /// Name of the circuit under debug.
    pub circuit_name: Option<String>,
    /// Executed steps.
    pub cursor: u32,
    /// Total steps of the circuit.
    pub step_count: u32,
    /// Breakpoints in ascending order.
    pub breakpoints: Vec<u32>,
    /// Whether an evaluation is pending.
    pub in_flight: bool,
    /// Error from the most recent evaluation.
    pub last_error: Option<QuantumError>,
    /// Per-qubit state. When idle, the ground state of the last circuit.
    pub last_states: Vec<QubitState>,
    /// Measurement counts from the last successful evaluation.
    pub last_measurements: BTreeMap<String, u64>,
}

impl Snapshot {
    pub(crate) fn of_session(session: &DebugSession) -> Self {
        Self {
            running: true,
            session_id: Some(session.id),
            circuit_name: Some(session.circuit.name().to_string()),
            cursor: session.cursor,
            step_count: session.circuit.step_count(),
            breakpoints: session.breakpoints().collect(),
            in_flight: session.in_flight,
            last_error: session.last_error.clone(),
            last_states: session.last_states.clone(),
            last_measurements: session.last_measurements.clone(),
        }
    }

    pub(crate) fn idle(states: &[QubitState]) -> Self {
        Self {
            last_states: states.to_vec(),
            ..Self::default()
        }
    }
}
