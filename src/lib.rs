//! Reducer-style components on top of an external virtual-DOM renderer.
//!
//! A component is a [`ComponentTemplate`]: an initial state, a render function
//! and a handful of lifecycle hooks, all typed over one `State`. An
//! [`Instance`] owns that state and is the only thing allowed to change it.
//!
//! Render and hooks receive a [`SelfHandle`] that turns handlers into plain
//! [`Callback`]s for the output tree. When a callback fires, its handler is
//! queued and later run against the state current at that moment, never the
//! state captured when the callback was created. The handler's [`Update`]
//! envelope says whether the new state is rendered (`Update`), stored without
//! rendering (`SilentUpdate`) or discarded (`NoUpdate`).
//!
//! ## Example
//!
//! ```rust
//! use oxide_component::{
//!     create_element, Component, ComponentTemplate, Element, Instance, PropMap, Renderer, Update,
//! };
//!
//! #[derive(Default)]
//! struct State {
//!     count: i32,
//!     timer_id: Option<u32>,
//! }
//!
//! struct Counter;
//!
//! impl Component for Counter {
//!     type Props = i32;
//!     type State = State;
//!
//!     fn make(step: i32, _children: Vec<Element>) -> ComponentTemplate<State> {
//!         ComponentTemplate::new("Counter")
//!             .did_mount(|state: &State, _| {
//!                 Update::SilentUpdate(State { timer_id: Some(1), ..*state })
//!             })
//!             .render(move |state: &State, this| {
//!                 let on_click = this.update(move |_: (), state: &State, _| {
//!                     Update::Update(State { count: state.count + step, ..*state })
//!                 });
//!                 create_element(
//!                     "button",
//!                     Some(PropMap::new().with("onClick", on_click)),
//!                     vec![state.count.to_string().into()],
//!                 )
//!             })
//!     }
//! }
//!
//! struct Host {
//!     last: Option<Element>,
//! }
//!
//! impl Renderer for &mut Host {
//!     fn render(&mut self, element: Element) {
//!         self.last = Some(element);
//!     }
//! }
//!
//! let mut host = Host { last: None };
//! let mut instance = Instance::new(Counter::make(5, vec![]), &mut host);
//! instance.mount().unwrap();
//! assert_eq!(instance.state().timer_id, Some(1));
//! ```

// Module declarations
mod callback;
mod config;
mod dispatcher;
mod element;
mod error;
mod instance;
mod renderer;
mod self_handle;
mod template;
mod update;

// Public re-exports
pub use callback::{AnyCallback, Callback};
pub use config::{InstanceConfig, DEFAULT_MAX_DISPATCHES_PER_FLUSH};
pub use element::{
    create_component_element, create_element, ComponentElement, Element, HostElement, Key, PropMap, PropValue,
};
pub use error::InstanceError;
pub use instance::{Instance, Phase};
pub use renderer::Renderer;
pub use self_handle::SelfHandle;
pub use template::{Component, ComponentTemplate};
pub use update::Update;

// Test utilities (only available with 'testing' feature or during tests)
#[cfg(any(test, feature = "testing"))]
pub use renderer::TestRenderer;
