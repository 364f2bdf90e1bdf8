//! In-memory diagnostics adapter
//!
//! Keeps every decision point in order so callers (and tests) can assert
//! which path a call took.

use std::sync::Mutex;

use crate::error::PurifyError;
use crate::ports::{CallSummary, DiagnosticsSink, PurifyOutcome};

/// One recorded decision point.
#[derive(Clone, Debug, PartialEq)]
pub enum DiagnosticEvent {
    Entered(CallSummary),
    Rejected(PurifyError),
    ZeroDimensions,
    EmptyTensor,
    Exited(PurifyOutcome),
}

/// Records decision points in call order.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every event so far.
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Drop every recorded event.
    pub fn clear(&self) {
        match self.events.lock() {
            Ok(mut events) => events.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }

    fn push(&self, event: DiagnosticEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

impl DiagnosticsSink for RecordingDiagnostics {
    fn entered(&self, call: &CallSummary) {
        self.push(DiagnosticEvent::Entered(*call));
    }

    fn rejected(&self, error: &PurifyError) {
        self.push(DiagnosticEvent::Rejected(error.clone()));
    }

    fn zero_dimensions(&self) {
        self.push(DiagnosticEvent::ZeroDimensions);
    }

    fn empty_tensor(&self) {
        self.push(DiagnosticEvent::EmptyTensor);
    }

    fn exited(&self, outcome: &PurifyOutcome) {
        self.push(DiagnosticEvent::Exited(*outcome));
    }
}
