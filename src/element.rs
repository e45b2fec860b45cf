//! Output elements handed to the external rendering library.

use core::any::Any;
use core::fmt;
use std::sync::Arc;

use crate::{AnyCallback, Callback, ComponentTemplate};

/// Reconciliation identity of a component element among its siblings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(Arc<str>);

impl Key {
    /// The key as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Key {
    fn from(key: &str) -> Self {
        Key(key.into())
    }
}

impl From<String> for Key {
    fn from(key: String) -> Self {
        Key(key.into())
    }
}

impl From<usize> for Key {
    fn from(key: usize) -> Self {
        Key(key.to_string().into())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single prop value.
#[derive(Clone, Debug, PartialEq)]
pub enum PropValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Callback(AnyCallback),
}

impl PropValue {
    /// The string value, or `None` for any other variant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Str(value) => Some(value),
            _ => None,
        }
    }

    /// The erased callback, or `None` for any other variant.
    pub fn as_callback(&self) -> Option<&AnyCallback> {
        match self {
            PropValue::Callback(callback) => Some(callback),
            _ => None,
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Str(value.to_owned())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Str(value)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::Int(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        PropValue::Int(value.into())
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Float(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<AnyCallback> for PropValue {
    fn from(callback: AnyCallback) -> Self {
        PropValue::Callback(callback)
    }
}

impl<Payload: 'static> From<Callback<Payload>> for PropValue {
    fn from(callback: Callback<Payload>) -> Self {
        PropValue::Callback(callback.erase())
    }
}

/// Ordered label-to-value mapping attached to a host element.
///
/// Built once with [`with`](Self::with) and immutable afterwards. Setting a
/// label twice replaces the earlier value in place, keeping its position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropMap {
    entries: Vec<(String, PropValue)>,
}

impl PropMap {
    /// An empty map. Passed to [`create_element`] it reads as no props at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `label` to `value`, replacing any earlier value for the same label.
    ///
    /// # Arguments
    ///
    /// * `label` - Prop name as the rendering library expects it, e.g. `"onClick"`
    /// * `value` - Anything convertible to a [`PropValue`], including typed [`Callback`]s
    ///
    /// # Example
    ///
    /// ```rust
    /// use oxide_component::{Callback, PropMap, PropValue};
    ///
    /// let props = PropMap::new()
    ///     .with("className", "primary")
    ///     .with("tabIndex", 1)
    ///     .with("className", "danger")
    ///     .with("onClick", Callback::new(|_: ()| {}));
    ///
    /// assert_eq!(props.len(), 3);
    /// assert_eq!(props.get("className"), Some(&PropValue::from("danger")));
    /// assert_eq!(props.iter().next().map(|(label, _)| label), Some("className"));
    /// ```
    pub fn with(mut self, label: impl Into<String>, value: impl Into<PropValue>) -> Self {
        let label = label.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == label) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((label, value)),
        }
        self
    }

    /// Value stored under `label`.
    pub fn get(&self, label: &str) -> Option<&PropValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, value)| value)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.entries.iter().map(|(label, value)| (label.as_str(), value))
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no label has been set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A leaf element: tag, props and child elements.
#[derive(Clone, Debug)]
pub struct HostElement {
    tag: Arc<str>,
    props: Option<PropMap>,
    children: Arc<[Element]>,
}

impl HostElement {
    /// Tag name, e.g. `"div"`.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Props of this element. An empty map given at construction reads as `None`.
    pub fn props(&self) -> Option<&PropMap> {
        self.props.as_ref()
    }

    /// Child elements in order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }
}

/// A component template wrapped for placement in an element tree.
#[derive(Clone)]
pub struct ComponentElement {
    template: Arc<dyn Any + Send + Sync>,
    display_name: Arc<str>,
    key: Option<Key>,
    ref_callback: Option<AnyCallback>,
}

impl ComponentElement {
    /// Wrap `template` without key or ref.
    pub fn new<State: 'static>(template: ComponentTemplate<State>) -> Self {
        Self {
            display_name: template.display_name().into(),
            template: Arc::new(template),
            key: None,
            ref_callback: None,
        }
    }

    /// Set the reconciliation key.
    pub fn with_key(mut self, key: impl Into<Key>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Attach a ref callback. The rendering library invokes it with whatever
    /// handle it exposes for the mounted component.
    pub fn with_ref<Payload: 'static>(mut self, callback: Callback<Payload>) -> Self {
        self.ref_callback = Some(callback.erase());
        self
    }

    /// Recover the template, if it was built for `State`.
    pub fn template<State: 'static>(&self) -> Option<ComponentTemplate<State>> {
        self.template.downcast_ref::<ComponentTemplate<State>>().cloned()
    }

    /// Display name of the wrapped template.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Reconciliation key, if any.
    pub fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    /// Ref callback, if any.
    pub fn ref_callback(&self) -> Option<&AnyCallback> {
        self.ref_callback.as_ref()
    }
}

impl fmt::Debug for ComponentElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentElement")
            .field("display_name", &self.display_name)
            .field("key", &self.key)
            .field("ref_callback", &self.ref_callback)
            .finish()
    }
}

/// Immutable node of the output tree.
#[derive(Clone, Debug)]
pub enum Element {
    /// Renders nothing.
    Null,
    Text(Arc<str>),
    /// Children without a wrapping host element.
    Fragment(Arc<[Element]>),
    Host(HostElement),
    Component(ComponentElement),
}

/// Build a leaf element.
///
/// `None` and an empty [`PropMap`] are equivalent; both are stored as `None`.
pub fn create_element(tag: impl Into<Arc<str>>, props: Option<PropMap>, children: Vec<Element>) -> Element {
    Element::Host(HostElement {
        tag: tag.into(),
        props: props.filter(|props| !props.is_empty()),
        children: children.into(),
    })
}

/// Build a component element with optional reconciliation key and ref.
pub fn create_component_element<State: 'static>(
    template: ComponentTemplate<State>,
    key: Option<Key>,
    ref_callback: Option<AnyCallback>,
) -> Element {
    let mut element = ComponentElement::new(template);
    element.key = key;
    element.ref_callback = ref_callback;
    Element::Component(element)
}

impl Element {
    /// [`Element::Null`].
    pub fn null() -> Self {
        Element::Null
    }

    /// A text node.
    pub fn text(text: impl Into<Arc<str>>) -> Self {
        Element::Text(text.into())
    }

    /// Group `children` without a host element.
    pub fn fragment(children: Vec<Element>) -> Self {
        Element::Fragment(children.into())
    }

    /// Shorthand for [`create_component_element`] without key or ref.
    pub fn component<State: 'static>(template: ComponentTemplate<State>) -> Self {
        Element::Component(ComponentElement::new(template))
    }

    /// Whether this is [`Element::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Element::Null)
    }

    /// First prop named `label`, searching host elements depth-first.
    ///
    /// Component elements are opaque until instantiated and are not searched.
    pub fn find_prop(&self, label: &str) -> Option<&PropValue> {
        match self {
            Element::Host(host) => host
                .props()
                .and_then(|props| props.get(label))
                .or_else(|| host.children().iter().find_map(|child| child.find_prop(label))),
            Element::Fragment(children) => children.iter().find_map(|child| child.find_prop(label)),
            Element::Null | Element::Text(_) | Element::Component(_) => None,
        }
    }

    /// Typed callback stored under `label`, see [`find_prop`](Self::find_prop).
    pub fn callback<Payload: 'static>(&self, label: &str) -> Option<Callback<Payload>> {
        self.find_prop(label)?.as_callback()?.downcast()
    }

    /// Concatenated text of the subtree, skipping component elements.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Element::Text(text) => out.push_str(text),
            Element::Host(host) => host.children().iter().for_each(|child| child.collect_text(out)),
            Element::Fragment(children) => children.iter().for_each(|child| child.collect_text(out)),
            Element::Null | Element::Component(_) => {}
        }
    }
}

impl From<&str> for Element {
    fn from(text: &str) -> Self {
        Element::text(text)
    }
}

impl From<String> for Element {
    fn from(text: String) -> Self {
        Element::text(text)
    }
}

impl From<ComponentElement> for Element {
    fn from(element: ComponentElement) -> Self {
        Element::Component(element)
    }
}
