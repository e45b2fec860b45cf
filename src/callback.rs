//! Plain callbacks attached to elements.

use core::any::{type_name, Any};
use core::fmt;
use std::sync::Arc;

/// An ordinary callback of shape `(Payload) -> ()`.
///
/// This is what [`SelfHandle::update`](crate::SelfHandle::update) and
/// [`SelfHandle::handle`](crate::SelfHandle::handle) return. It holds no
/// component state, so the renderer may keep it and invoke it whenever the
/// user interacts with the output.
pub struct Callback<Payload>(Arc<dyn Fn(Payload) + Send + Sync + 'static>);

impl<Payload> Clone for Callback<Payload> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<Payload> fmt::Debug for Callback<Payload> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callback").field(&type_name::<Payload>()).finish()
    }
}

impl<Payload> Callback<Payload> {
    /// Wrap a plain closure.
    ///
    /// Callbacks that read or change component state come from a
    /// [`SelfHandle`](crate::SelfHandle) instead; use this for anything that
    /// lives outside the instance, such as ref callbacks or test doubles.
    ///
    /// # Arguments
    ///
    /// * `f` - Closure run synchronously on every [`emit`](Self::emit)
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::atomic::{AtomicI32, Ordering};
    /// use std::sync::Arc;
    ///
    /// use oxide_component::Callback;
    ///
    /// let total = Arc::new(AtomicI32::new(0));
    /// let sink = total.clone();
    /// let add = Callback::new(move |amount: i32| {
    ///     sink.fetch_add(amount, Ordering::SeqCst);
    /// });
    ///
    /// add.emit(2);
    /// add.clone().emit(3);
    /// assert_eq!(total.load(Ordering::SeqCst), 5);
    /// ```
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Payload) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invoke the callback.
    pub fn emit(&self, payload: Payload) {
        (self.0)(payload)
    }

    /// Whether both callbacks share the same underlying closure.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<Payload: 'static> Callback<Payload> {
    /// Erase the payload type so the callback can live in a [`PropMap`](crate::PropMap).
    pub fn erase(self) -> AnyCallback {
        AnyCallback {
            payload: type_name::<Payload>(),
            inner: Arc::new(self),
        }
    }
}

impl<Payload, F> From<F> for Callback<Payload>
where
    F: Fn(Payload) + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Callback::new(f)
    }
}

/// A [`Callback`] with its payload type erased.
#[derive(Clone)]
pub struct AnyCallback {
    payload: &'static str,
    inner: Arc<dyn Any + Send + Sync>,
}

impl AnyCallback {
    /// Recover the typed callback.
    ///
    /// Returns `None` when `Payload` is not the type the callback was created for.
    pub fn downcast<Payload: 'static>(&self) -> Option<Callback<Payload>> {
        self.inner.downcast_ref::<Callback<Payload>>().cloned()
    }

    /// Name of the payload type, for diagnostics.
    pub fn payload_type(&self) -> &'static str {
        self.payload
    }
}

impl fmt::Debug for AnyCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AnyCallback").field(&self.payload).finish()
    }
}

impl PartialEq for AnyCallback {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
