//! Outbound Ports (Driven Ports)
//!
//! The logging collaborator the boundary reports its decision points to.
//! Implementations must be stateless with respect to the algorithm: nothing
//! they do can influence the purification result.

use super::inbound::{CallSummary, PurifyOutcome};
use crate::error::PurifyError;

/// Diagnostics collaborator (Driven Port)
pub trait DiagnosticsSink: Send + Sync {
    /// A call entered the boundary.
    fn entered(&self, call: &CallSummary);

    /// Validation rejected the call.
    fn rejected(&self, error: &PurifyError);

    /// Declared rank was zero; nothing to do.
    fn zero_dimensions(&self);

    /// A zero-length dimension made the tensor empty.
    fn empty_tensor(&self);

    /// The call finished successfully.
    fn exited(&self, outcome: &PurifyOutcome);
}

impl<T: DiagnosticsSink + ?Sized> DiagnosticsSink for &T {
    fn entered(&self, call: &CallSummary) {
        (**self).entered(call)
    }

    fn rejected(&self, error: &PurifyError) {
        (**self).rejected(error)
    }

    fn zero_dimensions(&self) {
        (**self).zero_dimensions()
    }

    fn empty_tensor(&self) {
        (**self).empty_tensor()
    }

    fn exited(&self, outcome: &PurifyOutcome) {
        (**self).exited(outcome)
    }
}
