//! Seam to the external rendering library.

#[cfg(any(test, feature = "testing"))]
use portable_atomic_util::Arc;
#[cfg(any(test, feature = "testing"))]
use spin::Mutex;

use crate::Element;
#[cfg(any(test, feature = "testing"))]
use crate::Callback;

/// Receiver of rendered element trees.
///
/// Implement this to hand output to a virtual-DOM library. The engine calls
/// [`render`](Self::render) once on mount and once for every committed
/// [`Update::Update`](crate::Update::Update) or prop change. Diffing and
/// committing to a real DOM are entirely the implementor's business.
///
/// # Example
///
/// ```rust
/// use oxide_component::{Element, Renderer};
///
/// struct ConsoleRenderer;
///
/// impl Renderer for ConsoleRenderer {
///     fn render(&mut self, element: Element) {
///         println!("{}", element.text_content());
///     }
/// }
/// ```
pub trait Renderer {
    fn render(&mut self, element: Element);
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, element: Element) {
        (**self).render(element)
    }
}

#[cfg(any(test, feature = "testing"))]
/// Renderer capturing every element tree it receives.
///
/// Only available with the `testing` feature. Clones share the same capture
/// storage, so keep one clone for assertions and give the other to the
/// instance.
///
/// ```rust
/// use oxide_component::{ComponentTemplate, Element, Instance, TestRenderer};
///
/// let renderer = TestRenderer::new();
/// let template = ComponentTemplate::<i32>::new("Counter")
///     .render(|count, _| Element::text(count.to_string()));
///
/// let mut instance = Instance::new(template, renderer.clone());
/// instance.mount().unwrap();
///
/// assert_eq!(renderer.count(), 1);
/// renderer.with_renders(|renders| assert_eq!(renders[0].text_content(), "0"));
/// ```
pub struct TestRenderer {
    renders: Arc<Mutex<Vec<Element>>>,
}

#[cfg(any(test, feature = "testing"))]
impl Clone for TestRenderer {
    fn clone(&self) -> Self {
        Self {
            renders: self.renders.clone(),
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl Renderer for TestRenderer {
    fn render(&mut self, element: Element) {
        self.renders.lock().push(element);
    }
}

#[cfg(any(test, feature = "testing"))]
impl Default for TestRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "testing"))]
impl TestRenderer {
    /// Renderer with empty capture storage.
    pub fn new() -> Self {
        Self {
            renders: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A boxed renderer sharing this renderer's capture storage.
    pub fn boxed(&self) -> Box<dyn Renderer + Send> {
        Box::new(self.clone())
    }

    /// Number of renders received so far.
    pub fn count(&self) -> usize {
        self.renders.lock().len()
    }

    /// The most recent render.
    pub fn last(&self) -> Option<Element> {
        self.renders.lock().last().cloned()
    }

    /// Typed callback stored under `label` in render number `index`.
    pub fn callback<Payload: 'static>(&self, index: usize, label: &str) -> Option<Callback<Payload>> {
        self.renders.lock().get(index)?.callback(label)
    }

    /// Access the captured renders with a closure.
    ///
    /// Do not invoke callbacks that render synchronously from inside the
    /// closure; the capture storage is locked for its duration.
    pub fn with_renders<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Vec<Element>) -> R,
    {
        let renders = self.renders.lock();
        f(&renders)
    }
}
