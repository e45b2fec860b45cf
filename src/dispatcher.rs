//! Queue sender connecting wrapped callbacks to their instance.

use flume::Sender;

use crate::{SelfHandle, Update};

/// A unit of deferred work for the engine.
///
/// The job has already captured its payload and handler; the engine supplies
/// the state current at the time the job is popped, plus a fresh handle.
pub(crate) type Dispatch<State> =
    Box<dyn FnOnce(&State, &SelfHandle<State>) -> Update<State> + Send + 'static>;

/// Sending half of an instance's dispatch queue.
///
/// Every [`SelfHandle`] lent out by an instance carries a clone of the same
/// dispatcher, so callbacks created in any render pass feed one queue. The
/// queue is drained serially by [`Instance::flush`](crate::Instance::flush).
pub(crate) struct Dispatcher<State: 'static>(Sender<Dispatch<State>>);

impl<State: 'static> Clone for Dispatcher<State> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<State: 'static> Dispatcher<State> {
    pub(crate) fn new(sender: Sender<Dispatch<State>>) -> Self {
        Self(sender)
    }

    /// Queue a job.
    ///
    /// Once the instance is unmounted its receiver is gone and the job is
    /// dropped without touching any state.
    pub(crate) fn dispatch(&self, job: Dispatch<State>) {
        if self.0.send(job).is_err() {
            tracing::debug!("dispatch dropped: instance unmounted");
        }
    }

    pub(crate) fn is_disconnected(&self) -> bool {
        self.0.is_disconnected()
    }
}
