//! The update envelope returned by handlers and `did_mount`.

/// Classification of a proposed state transition.
///
/// Handlers wrapped by [`SelfHandle::update`](crate::SelfHandle::update) and the
/// [`did_mount`](crate::ComponentTemplate::did_mount) hook return one of these. It is the only
/// way a component can change its own state; the engine owns the state and
/// decides whether the change is rendered.
///
/// # Example
///
/// ```rust
/// use oxide_component::Update;
///
/// fn on_click(count: &i32) -> Update<i32> {
///     if *count >= 10 {
///         Update::NoUpdate
///     } else {
///         Update::Update(count + 1)
///     }
/// }
///
/// assert_eq!(on_click(&3), Update::Update(4));
/// assert_eq!(on_click(&10), Update::NoUpdate);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use = "an update envelope does nothing unless returned to the engine"]
pub enum Update<State> {
    /// Keep the current state; nothing is rendered.
    NoUpdate,
    /// Replace the state and schedule a re-render.
    Update(State),
    /// Replace the state without re-rendering.
    ///
    /// Use this for instance-variable-like data (timer ids, subscriptions)
    /// that must survive across renders but does not affect the output.
    SilentUpdate(State),
}

impl<State> Update<State> {
    /// Whether committing this envelope schedules a render.
    pub fn rerenders(&self) -> bool {
        matches!(self, Update::Update(_))
    }

    /// Whether committing this envelope replaces the state.
    pub fn replaces_state(&self) -> bool {
        !matches!(self, Update::NoUpdate)
    }

    /// Map the carried state, keeping the classification.
    pub fn map<F, Next>(self, f: F) -> Update<Next>
    where
        F: FnOnce(State) -> Next,
    {
        match self {
            Update::NoUpdate => Update::NoUpdate,
            Update::Update(state) => Update::Update(f(state)),
            Update::SilentUpdate(state) => Update::SilentUpdate(f(state)),
        }
    }

    /// Take the carried state, if any.
    pub fn into_state(self) -> Option<State> {
        match self {
            Update::NoUpdate => None,
            Update::Update(state) | Update::SilentUpdate(state) => Some(state),
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Update::NoUpdate => "no_update",
            Update::Update(_) => "update",
            Update::SilentUpdate(_) => "silent_update",
        }
    }
}

impl<State> Default for Update<State> {
    fn default() -> Self {
        Update::NoUpdate
    }
}
