
use std::sync::Arc;

use oxide_component::{Callback, Component, Instance, Renderer, TestRenderer};
pub(crate) use counter::*;

mod freshness_tests;
mod property_tests;
mod serialization_tests;
mod unmount_tests;

pub(crate) const UNBOUNDED: i32 = i32::MAX;

pub(crate) struct CounterTest {
    pub(crate) instance: Instance<i32, Box<dyn Renderer + Send>>,
    pub(crate) renders: TestRenderer,
}

impl CounterTest {
    /// Callback `label` as rendered in render number `index`.
    pub(crate) fn callback<Payload: 'static>(&self, index: usize, label: &str) -> Callback<Payload> {
        self.renders
            .callback(index, label)
            .unwrap_or_else(|| panic!("render {index} has no `{label}` callback"))
    }

    /// Callback `label` from the latest render.
    pub(crate) fn latest<Payload: 'static>(&self, label: &str) -> Callback<Payload> {
        self.callback(self.renders.count() - 1, label)
    }

    pub(crate) fn flush(&mut self) -> usize {
        self.instance.flush().expect("flush within limit")
    }
}

pub(crate) fn counter_props(observer: MockLifecycleObserver, max: i32) -> CounterProps {
    CounterProps {
        observer: Arc::new(observer),
        step: 1,
        max,
    }
}

/// Mount a counter starting at zero.
pub(crate) fn mount_counter(observer: MockLifecycleObserver) -> CounterTest {
    mount_counter_with(counter_props(observer, UNBOUNDED))
}

pub(crate) fn mount_counter_with(props: CounterProps) -> CounterTest {
    let renders = TestRenderer::new();
    let mut instance = Instance::new(Counter::make(props, vec![]), renders.boxed());
    instance.mount().expect("fresh instance mounts");

    CounterTest { instance, renders }
}
