//! The capability object lent to render and lifecycle hooks.

use std::sync::Arc;

use crate::dispatcher::Dispatcher;
use crate::{Callback, Update};

/// Capability to turn component handlers into plain callbacks.
///
/// A handle is created for every render and every lifecycle invocation and is
/// only ever lent out as `&SelfHandle`. It is deliberately not `Clone`: the
/// callbacks it produces are the things meant to outlive a render pass, not
/// the handle.
///
/// Handlers never see the state that was current when the callback was
/// created. The engine passes the state current at the moment the queued
/// invocation is processed, together with a fresh handle.
pub struct SelfHandle<State: 'static> {
    dispatcher: Dispatcher<State>,
}

impl<State: 'static> SelfHandle<State> {
    pub(crate) fn new(dispatcher: Dispatcher<State>) -> Self {
        Self { dispatcher }
    }

    /// Wrap a state-updating handler as a callback.
    ///
    /// Invoking the returned callback queues `handler(payload, state, self)`
    /// on the owning instance. The envelope it returns is committed by
    /// [`Instance::flush`](crate::Instance::flush).
    ///
    /// ```rust
    /// use oxide_component::{create_element, ComponentTemplate, PropMap, Update};
    ///
    /// let counter = ComponentTemplate::<i32>::new("Counter").render(|count, this| {
    ///     let on_click = this.update(|_: (), count: &i32, _| Update::Update(count + 1));
    ///     create_element(
    ///         "button",
    ///         Some(PropMap::new().with("onClick", on_click)),
    ///         vec![count.to_string().into()],
    ///     )
    /// });
    /// # let _ = counter;
    /// ```
    pub fn update<Payload, F>(&self, handler: F) -> Callback<Payload>
    where
        Payload: Send + 'static,
        F: Fn(Payload, &State, &SelfHandle<State>) -> Update<State> + Send + Sync + 'static,
    {
        let handler = Arc::new(handler);
        let dispatcher = self.dispatcher.clone();
        Callback::new(move |payload: Payload| {
            let handler = handler.clone();
            dispatcher.dispatch(Box::new(
                move |state: &State, this: &SelfHandle<State>| handler(payload, state, this),
            ));
        })
    }

    /// Wrap a fire-and-forget handler as a callback.
    ///
    /// Same as [`update`](Self::update) with the result treated as
    /// [`Update::NoUpdate`]; the handler still reads fresh state.
    pub fn handle<Payload, F>(&self, handler: F) -> Callback<Payload>
    where
        Payload: Send + 'static,
        F: Fn(Payload, &State, &SelfHandle<State>) + Send + Sync + 'static,
    {
        self.update(move |payload, state, this| {
            handler(payload, state, this);
            Update::NoUpdate
        })
    }

    /// Whether the owning instance has been unmounted.
    ///
    /// Callbacks created from this handle are no-ops once this is true.
    pub fn is_unmounted(&self) -> bool {
        self.dispatcher.is_disconnected()
    }
}
