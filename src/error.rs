//! Errors raised by misuse of the instance lifecycle.

use thiserror::Error;

use crate::Phase;

/// Error returned by [`Instance`](crate::Instance) lifecycle operations.
///
/// Invoking a callback after unmount is not an error; such calls are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstanceError {
    #[error("cannot {operation} while the instance is {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: Phase,
    },

    #[error("dispatch limit of {limit} reached in a single flush; remaining callbacks stay queued")]
    DispatchLimitExceeded { limit: usize },
}
