//! Component templates and the factory trait producing them.

use core::fmt;
use std::sync::Arc;

use crate::{Element, SelfHandle, Update};

type InitialStateFn<State> = dyn Fn() -> State + Send + Sync;
type RenderFn<State> = dyn Fn(&State, &SelfHandle<State>) -> Element + Send + Sync;
type DidMountFn<State> = dyn Fn(&State, &SelfHandle<State>) -> Update<State> + Send + Sync;
type WillReceivePropsFn<State> = dyn Fn(&State, &SelfHandle<State>) -> State + Send + Sync;
type TransitionFn<State> = dyn Fn(&State, &State, &SelfHandle<State>) + Send + Sync;
type WillUnmountFn<State> = dyn Fn(&State, &SelfHandle<State>) + Send + Sync;

/// Immutable record of a component's behavior.
///
/// A template starts from defaults and is specialised by overriding fields
/// with the builder methods. Every field is typed over the same `State`, so a
/// template whose fields disagree on the state shape does not compile:
///
/// ```rust,compile_fail
/// use oxide_component::{ComponentTemplate, Element};
///
/// let template = ComponentTemplate::<i32>::new("Counter")
///     .render(|label: &String, _| Element::text(label.clone()));
/// ```
///
/// Defaults: `render` yields [`Element::Null`], `did_mount` returns
/// [`Update::NoUpdate`], `will_receive_props` keeps the state, and the
/// remaining hooks do nothing.
///
/// `will_update`, `did_update` and `will_unmount` cannot return state. That
/// closes the only channel through which an update-observing hook could feed
/// another update.
pub struct ComponentTemplate<State: 'static> {
    display_name: Arc<str>,
    initial_state: Arc<InitialStateFn<State>>,
    render: Arc<RenderFn<State>>,
    did_mount: Arc<DidMountFn<State>>,
    will_receive_props: Option<Arc<WillReceivePropsFn<State>>>,
    will_update: Arc<TransitionFn<State>>,
    did_update: Arc<TransitionFn<State>>,
    will_unmount: Arc<WillUnmountFn<State>>,
}

impl<State: 'static> Clone for ComponentTemplate<State> {
    fn clone(&self) -> Self {
        Self {
            display_name: self.display_name.clone(),
            initial_state: self.initial_state.clone(),
            render: self.render.clone(),
            did_mount: self.did_mount.clone(),
            will_receive_props: self.will_receive_props.clone(),
            will_update: self.will_update.clone(),
            did_update: self.did_update.clone(),
            will_unmount: self.will_unmount.clone(),
        }
    }
}

impl<State: 'static> fmt::Debug for ComponentTemplate<State> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentTemplate")
            .field("display_name", &self.display_name)
            .field("will_receive_props", &self.will_receive_props.is_some())
            .finish_non_exhaustive()
    }
}

impl<State: Default + 'static> ComponentTemplate<State> {
    /// Template whose initial state is `State::default()`.
    pub fn new(display_name: impl Into<Arc<str>>) -> Self {
        Self::with_initial_state(display_name, State::default)
    }
}

impl ComponentTemplate<()> {
    /// Template for a component without state.
    pub fn stateless(display_name: impl Into<Arc<str>>) -> Self {
        Self::with_initial_state(display_name, || ())
    }
}

impl<State: 'static> ComponentTemplate<State> {
    /// Template whose initial state comes from `initial_state`, for state
    /// types without a useful `Default`.
    ///
    /// # Arguments
    ///
    /// * `display_name` - Name used in tracing fields and `Debug` output
    /// * `initial_state` - Called once per instance, when the instance is created
    pub fn with_initial_state<F>(display_name: impl Into<Arc<str>>, initial_state: F) -> Self
    where
        F: Fn() -> State + Send + Sync + 'static,
    {
        Self {
            display_name: display_name.into(),
            initial_state: Arc::new(initial_state),
            render: Arc::new(|_: &State, _: &SelfHandle<State>| Element::Null),
            did_mount: Arc::new(|_: &State, _: &SelfHandle<State>| Update::NoUpdate),
            will_receive_props: None,
            will_update: Arc::new(|_: &State, _: &State, _: &SelfHandle<State>| {}),
            did_update: Arc::new(|_: &State, _: &State, _: &SelfHandle<State>| {}),
            will_unmount: Arc::new(|_: &State, _: &SelfHandle<State>| {}),
        }
    }

    /// Name used in diagnostics only.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Replace the initial state producer.
    pub fn initial_state<F>(mut self, f: F) -> Self
    where
        F: Fn() -> State + Send + Sync + 'static,
    {
        self.initial_state = Arc::new(f);
        self
    }

    /// Map the current state to output. Must not mutate anything; use the
    /// handle to create callbacks instead.
    pub fn render<F>(mut self, f: F) -> Self
    where
        F: Fn(&State, &SelfHandle<State>) -> Element + Send + Sync + 'static,
    {
        self.render = Arc::new(f);
        self
    }

    /// Runs once, after the first render has been handed to the renderer.
    pub fn did_mount<F>(mut self, f: F) -> Self
    where
        F: Fn(&State, &SelfHandle<State>) -> Update<State> + Send + Sync + 'static,
    {
        self.did_mount = Arc::new(f);
        self
    }

    /// Runs on every prop change; the instance always re-renders afterwards.
    pub fn will_receive_props<F>(mut self, f: F) -> Self
    where
        F: Fn(&State, &SelfHandle<State>) -> State + Send + Sync + 'static,
    {
        self.will_receive_props = Some(Arc::new(f));
        self
    }

    /// Runs before any state replacement with `(previous, next)`.
    pub fn will_update<F>(mut self, f: F) -> Self
    where
        F: Fn(&State, &State, &SelfHandle<State>) + Send + Sync + 'static,
    {
        self.will_update = Arc::new(f);
        self
    }

    /// Runs after any state replacement with `(previous, current)`.
    pub fn did_update<F>(mut self, f: F) -> Self
    where
        F: Fn(&State, &State, &SelfHandle<State>) + Send + Sync + 'static,
    {
        self.did_update = Arc::new(f);
        self
    }

    /// Runs once before teardown.
    pub fn will_unmount<F>(mut self, f: F) -> Self
    where
        F: Fn(&State, &SelfHandle<State>) + Send + Sync + 'static,
    {
        self.will_unmount = Arc::new(f);
        self
    }

    pub(crate) fn call_initial_state(&self) -> State {
        (self.initial_state)()
    }

    pub(crate) fn call_render(&self, state: &State, this: &SelfHandle<State>) -> Element {
        (self.render)(state, this)
    }

    pub(crate) fn call_did_mount(&self, state: &State, this: &SelfHandle<State>) -> Update<State> {
        (self.did_mount)(state, this)
    }

    /// `None` when the hook was left at its default.
    pub(crate) fn call_will_receive_props(&self, state: &State, this: &SelfHandle<State>) -> Option<State> {
        self.will_receive_props.as_ref().map(|f| f(state, this))
    }

    pub(crate) fn call_will_update(&self, previous: &State, next: &State, this: &SelfHandle<State>) {
        (self.will_update)(previous, next, this)
    }

    pub(crate) fn call_did_update(&self, previous: &State, current: &State, this: &SelfHandle<State>) {
        (self.did_update)(previous, current, this)
    }

    pub(crate) fn call_will_unmount(&self, state: &State, this: &SelfHandle<State>) {
        (self.will_unmount)(state, this)
    }
}

/// Component factory: maps props and children to a template.
///
/// `make` is pure. Anything effectful belongs in the lifecycle hooks of the
/// template it returns. Children come last and may be ignored freely.
///
/// ```rust
/// use oxide_component::{create_element, Component, ComponentTemplate, Element, PropMap};
///
/// /// `name` is required, `age` defaults to none, `class_name` to `"box"`.
/// struct GreetingProps {
///     name: String,
///     age: Option<u32>,
///     class_name: String,
/// }
///
/// struct Greeting;
///
/// impl Component for Greeting {
///     type Props = GreetingProps;
///     type State = ();
///
///     fn make(props: GreetingProps, _children: Vec<Element>) -> ComponentTemplate<()> {
///         ComponentTemplate::stateless("Greeting").render(move |_, _| {
///             let text = match props.age {
///                 Some(age) => format!("Hello {}, {}", props.name, age),
///                 None => format!("Hello {}", props.name),
///             };
///             create_element(
///                 "div",
///                 Some(PropMap::new().with("className", props.class_name.as_str())),
///                 vec![text.into()],
///             )
///         })
///     }
/// }
///
/// let element = Greeting::element(
///     GreetingProps { name: "Ada".into(), age: None, class_name: "box".into() },
///     vec![],
/// );
/// assert!(matches!(element, Element::Component(_)));
/// ```
pub trait Component: 'static {
    type Props;
    type State: 'static;

    fn make(props: Self::Props, children: Vec<Element>) -> ComponentTemplate<Self::State>;

    /// Build the template and wrap it as a component element.
    fn element(props: Self::Props, children: Vec<Element>) -> Element
    where
        Self: Sized,
    {
        Element::component(Self::make(props, children))
    }
}
