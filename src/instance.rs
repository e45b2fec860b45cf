//! The dispatch engine owning a live component instance.

use core::fmt;
use core::mem;

use flume::Receiver;

use crate::dispatcher::{Dispatch, Dispatcher};
use crate::{ComponentTemplate, InstanceConfig, InstanceError, Renderer, SelfHandle, Update};

/// Where an instance is in its lifecycle.
///
/// `Created -> Mounting -> Mounted -> Updating* -> Unmounting -> Unmounted`.
/// `Created` is the not-yet-mounted state; `Unmounted` is terminal.
///
/// `Mounting`, `Updating` and `Unmounting` only exist while the instance is
/// inside one of its own `&mut self` operations, so [`Instance::phase`] never
/// reports them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Created,
    Mounting,
    Mounted,
    Updating,
    Unmounting,
    Unmounted,
}

impl Phase {
    /// The phase an interrupted transition falls back to.
    ///
    /// A transition is only left half-done when a hook, handler or render
    /// panicked and the host caught the unwind. The instance then continues
    /// from the phase the transition started in (or, for teardown, the one it
    /// was heading to).
    fn settled(self) -> Phase {
        match self {
            Phase::Mounting => Phase::Created,
            Phase::Updating => Phase::Mounted,
            Phase::Unmounting => Phase::Unmounted,
            phase => phase,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Created => "created",
            Phase::Mounting => "mounting",
            Phase::Mounted => "mounted",
            Phase::Updating => "updating",
            Phase::Unmounting => "unmounting",
            Phase::Unmounted => "unmounted",
        })
    }
}

/// A live component instance and the engine driving it.
///
/// The instance exclusively owns its state. Render and hooks get a shared
/// reference and a fresh [`SelfHandle`]; the only way to change the state is
/// to return an [`Update`] envelope.
///
/// Callbacks created through a handle do not run their handler when invoked.
/// They queue it, and [`flush`](Self::flush) runs queued handlers one at a
/// time against the state current at that moment. Because every operation
/// that touches the state takes `&mut self`, a second event can never be
/// dispatched while an earlier one is being committed or rendered: a callback
/// fired from inside render or a hook is simply queued behind it.
///
/// # Example
///
/// ```rust
/// use oxide_component::{create_element, ComponentTemplate, Instance, PropMap, TestRenderer, Update};
///
/// let template = ComponentTemplate::<i32>::new("Counter").render(|count, this| {
///     create_element(
///         "button",
///         Some(PropMap::new().with(
///             "onClick",
///             this.update(|_: (), count: &i32, _| Update::Update(count + 1)),
///         )),
///         vec![count.to_string().into()],
///     )
/// });
///
/// let renderer = TestRenderer::new();
/// let mut instance = Instance::new(template, renderer.clone());
/// instance.mount().unwrap();
///
/// let on_click = renderer.callback::<()>(0, "onClick").unwrap();
/// on_click.emit(());
/// on_click.emit(());
/// instance.flush().unwrap();
///
/// assert_eq!(*instance.state(), 2);
/// assert_eq!(renderer.count(), 3);
/// ```
pub struct Instance<State: 'static, Render: Renderer> {
    template: ComponentTemplate<State>,
    renderer: Render,
    state: State,
    phase: Phase,
    dispatcher: Dispatcher<State>,
    receiver: Option<Receiver<Dispatch<State>>>,
    config: InstanceConfig,
    render_count: u64,
}

impl<State: 'static, Render: Renderer> Instance<State, Render> {
    /// Create an instance with the default [`InstanceConfig`].
    ///
    /// The initial state is computed here; nothing renders until
    /// [`mount`](Self::mount).
    pub fn new(template: ComponentTemplate<State>, renderer: Render) -> Self {
        Self::with_config(template, renderer, InstanceConfig::default())
    }

    /// Create an instance with an explicit [`InstanceConfig`].
    ///
    /// # Arguments
    ///
    /// * `template` - The component's behavior, usually from [`Component::make`](crate::Component::make)
    /// * `renderer` - Receives every element tree the instance renders
    /// * `config` - Engine limits
    pub fn with_config(template: ComponentTemplate<State>, renderer: Render, config: InstanceConfig) -> Self {
        let (sender, receiver) = flume::unbounded();
        let state = template.call_initial_state();

        Instance {
            template,
            renderer,
            state,
            phase: Phase::Created,
            dispatcher: Dispatcher::new(sender),
            receiver: Some(receiver),
            config,
            render_count: 0,
        }
    }

    /// The committed state.
    ///
    /// Read-only: the state only changes through envelopes returned by
    /// handlers and hooks.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Current lifecycle phase: `Created`, `Mounted` or `Unmounted`.
    pub fn phase(&self) -> Phase {
        self.phase.settled()
    }

    /// Number of element trees handed to the renderer.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Diagnostic name of the current template.
    pub fn display_name(&self) -> &str {
        self.template.display_name()
    }

    /// Engine limits this instance was created with.
    pub fn config(&self) -> &InstanceConfig {
        &self.config
    }

    /// Number of queued callback invocations awaiting [`flush`](Self::flush).
    pub fn pending(&self) -> usize {
        self.receiver.as_ref().map_or(0, Receiver::len)
    }

    /// Render for the first time, then run `did_mount` and commit its envelope.
    pub fn mount(&mut self) -> Result<(), InstanceError> {
        self.settle();
        self.expect_phase("mount", Phase::Created)?;
        let _span = tracing::debug_span!("mount", component = %self.template.display_name()).entered();

        self.phase = Phase::Mounting;
        self.render();
        self.phase = Phase::Mounted;
        tracing::debug!("mounted");

        let this = self.fresh_handle();
        let envelope = self.template.call_did_mount(&self.state, &this);
        self.apply(envelope);
        Ok(())
    }

    /// Run queued callback invocations in order, committing each envelope
    /// before the next handler runs.
    ///
    /// Returns the number of invocations processed. Invocations queued while
    /// flushing, by render or hooks, are processed in the same call.
    ///
    /// At most [`InstanceConfig::max_dispatches_per_flush`] invocations run per
    /// call; the rest stay queued and
    /// [`InstanceError::DispatchLimitExceeded`] is returned.
    pub fn flush(&mut self) -> Result<usize, InstanceError> {
        self.settle();
        match self.phase {
            Phase::Unmounted => return Ok(0),
            Phase::Mounted => {}
            phase => {
                return Err(InstanceError::InvalidPhase {
                    operation: "flush",
                    phase,
                })
            }
        }
        let _span = tracing::trace_span!("flush", component = %self.template.display_name()).entered();
        self.drain_queue()
    }

    /// Swap in the template built for new props and re-render.
    ///
    /// The new template's `will_receive_props` produces the next state; the
    /// instance always re-renders afterwards.
    pub fn receive_props(&mut self, template: ComponentTemplate<State>) -> Result<(), InstanceError> {
        self.settle();
        self.expect_phase("receive props", Phase::Mounted)?;
        let _span = tracing::debug_span!("receive_props", component = %template.display_name()).entered();

        self.template = template;
        let this = self.fresh_handle();
        match self.template.call_will_receive_props(&self.state, &this) {
            Some(next) => self.commit(next, true),
            None => {
                self.phase = Phase::Updating;
                self.template.call_will_update(&self.state, &self.state, &this);
                self.render();
                self.template.call_did_update(&self.state, &self.state, &this);
                self.phase = Phase::Mounted;
            }
        }
        Ok(())
    }

    /// Commit what is still queued, run `will_unmount` and tear the instance down.
    ///
    /// Callbacks fired while the instance was mounted are flushed first, so
    /// `will_unmount` sees their effect. Callbacks fired from `will_unmount`
    /// or later are dropped without effect. Should the queue keep refilling
    /// past [`InstanceConfig::max_dispatches_per_flush`], the remainder is
    /// discarded and teardown proceeds.
    pub fn unmount(&mut self) -> Result<(), InstanceError> {
        self.settle();
        self.expect_phase("unmount", Phase::Mounted)?;
        let _span = tracing::debug_span!("unmount", component = %self.template.display_name()).entered();

        if let Err(error) = self.drain_queue() {
            tracing::warn!(%error, "unmounting with callbacks still queued");
        }

        self.phase = Phase::Unmounting;
        if let Some(receiver) = self.receiver.take() {
            let discarded = receiver.drain().count();
            if discarded > 0 {
                tracing::debug!(discarded, "discarded queued callbacks");
            }
        }
        let this = self.fresh_handle();
        self.template.call_will_unmount(&self.state, &this);
        self.phase = Phase::Unmounted;
        tracing::debug!("unmounted");
        Ok(())
    }

    /// Move a transition interrupted by a caught panic to its settled phase.
    ///
    /// Every transition runs inside a `&mut self` call, so an intermediate
    /// phase seen at the start of the next call was left by an unwind.
    fn settle(&mut self) {
        let settled = self.phase.settled();
        if settled != self.phase {
            tracing::warn!(interrupted = %self.phase, resumed = %settled, "recovered from an interrupted transition");
            self.phase = settled;
        }
    }

    fn drain_queue(&mut self) -> Result<usize, InstanceError> {
        let limit = self.config.max_dispatches_per_flush.max(1);
        let mut processed = 0;
        while self.pending() > 0 {
            if processed == limit {
                tracing::warn!(limit, pending = self.pending(), "dispatch limit reached");
                return Err(InstanceError::DispatchLimitExceeded { limit });
            }
            let Some(job) = self.receiver.as_ref().and_then(|receiver| receiver.try_recv().ok()) else {
                break;
            };
            self.dispatch(job);
            processed += 1;
        }
        Ok(processed)
    }

    fn expect_phase(&self, operation: &'static str, expected: Phase) -> Result<(), InstanceError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(InstanceError::InvalidPhase {
                operation,
                phase: self.phase,
            })
        }
    }

    fn fresh_handle(&self) -> SelfHandle<State> {
        SelfHandle::new(self.dispatcher.clone())
    }

    fn dispatch(&mut self, job: Dispatch<State>) {
        let this = self.fresh_handle();
        let envelope = job(&self.state, &this);
        tracing::trace!(envelope = envelope.kind(), "dispatched");
        self.apply(envelope);
    }

    fn apply(&mut self, envelope: Update<State>) {
        match envelope {
            Update::NoUpdate => {}
            Update::Update(next) => self.commit(next, true),
            Update::SilentUpdate(next) => self.commit(next, false),
        }
    }

    /// `will_update`, replace, optionally render, `did_update`.
    fn commit(&mut self, next: State, rerender: bool) {
        self.phase = Phase::Updating;
        let this = self.fresh_handle();
        self.template.call_will_update(&self.state, &next, &this);
        let previous = mem::replace(&mut self.state, next);
        if rerender {
            self.render();
        }
        self.template.call_did_update(&previous, &self.state, &this);
        self.phase = Phase::Mounted;
    }

    fn render(&mut self) {
        let this = self.fresh_handle();
        let element = self.template.call_render(&self.state, &this);
        self.render_count += 1;
        tracing::trace!(render_count = self.render_count, "rendered");
        self.renderer.render(element);
    }
}

/// Dropping a mounted instance unmounts it, so `will_unmount` always runs.
impl<State: 'static, Render: Renderer> Drop for Instance<State, Render> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            return;
        }
        self.settle();
        if self.phase == Phase::Mounted {
            let _ = self.unmount();
        }
    }
}

impl<State: fmt::Debug + 'static, Render: Renderer> fmt::Debug for Instance<State, Render> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("display_name", &self.template.display_name())
            .field("state", &self.state)
            .field("phase", &self.phase)
            .field("render_count", &self.render_count)
            .finish_non_exhaustive()
    }
}
