use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use mockall::predicate::eq;
use oxide_component::{
    create_element, ComponentTemplate, Instance, InstanceError, Phase, PropMap, TestRenderer, Update,
};

use super::{
    counter_props, mount_counter, mount_counter_with, permissive_observer, Counter, MockLifecycleObserver, UNBOUNDED,
};
use oxide_component::Component;

#[test]
fn given_unmounted_instance_when_stale_callbacks_invoked_should_be_no_ops() {
    let mut test = mount_counter(permissive_observer());
    let increment = test.callback::<()>(0, "onIncrement");
    let set = test.callback::<i32>(0, "onSet");

    test.instance.unmount().unwrap();
    increment.emit(());
    set.emit(99);

    assert_eq!(test.instance.flush(), Ok(0));
    assert_eq!(*test.instance.state(), 0);
    assert_eq!(test.renders.count(), 1);
}

#[test]
fn given_unmount_should_run_will_unmount_exactly_once() {
    let mut observer = MockLifecycleObserver::new();
    observer.expect_render().return_const(());
    observer.expect_did_mount().return_const(());
    observer.expect_will_unmount().times(1).return_const(());
    let mut test = mount_counter(observer);

    test.instance.unmount().unwrap();

    assert_eq!(
        test.instance.unmount(),
        Err(InstanceError::InvalidPhase {
            operation: "unmount",
            phase: Phase::Unmounted,
        })
    );
}

#[test]
fn given_unmounted_instance_should_reject_new_props() {
    let mut test = mount_counter_with(counter_props(permissive_observer(), UNBOUNDED));
    test.instance.unmount().unwrap();

    let result = test
        .instance
        .receive_props(Counter::make(counter_props(permissive_observer(), UNBOUNDED), vec![]));

    assert_eq!(
        result,
        Err(InstanceError::InvalidPhase {
            operation: "receive props",
            phase: Phase::Unmounted,
        })
    );
    assert_eq!(test.renders.count(), 1);
}

#[test]
fn given_pending_invocations_at_unmount_should_commit_them_before_will_unmount() {
    let mut observer = MockLifecycleObserver::new();
    observer.expect_render().return_const(());
    observer.expect_did_mount().return_const(());
    observer.expect_will_update().with(eq(0), eq(5)).times(1).return_const(());
    observer.expect_did_update().with(eq(0), eq(5)).times(1).return_const(());
    observer.expect_will_unmount().with(eq(5)).times(1).return_const(());
    let mut test = mount_counter(observer);
    test.callback::<i32>(0, "onShow").emit(5);

    test.instance.unmount().unwrap();

    assert_eq!(test.instance.pending(), 0);
    assert_eq!(*test.instance.state(), 5);
    assert_eq!(test.renders.count(), 2);
}

#[test]
fn given_mounted_instance_when_dropped_should_run_will_unmount_once() {
    let mut observer = MockLifecycleObserver::new();
    observer.expect_render().return_const(());
    observer.expect_did_mount().return_const(());
    observer.expect_will_unmount().with(eq(0)).times(1).return_const(());
    let test = mount_counter(observer);
    let increment = test.callback::<()>(0, "onIncrement");

    drop(test);
    increment.emit(());
}

/// Counter whose `will_update` rejects 13 by panicking.
fn superstitious_counter(unmounts: Arc<AtomicUsize>) -> ComponentTemplate<i32> {
    ComponentTemplate::new("Superstitious")
        .render(|count: &i32, this| {
            create_element(
                "button",
                Some(PropMap::new().with("onShow", this.update(|value: i32, _: &i32, _| Update::Update(value)))),
                vec![count.to_string().into()],
            )
        })
        .will_update(|_: &i32, next: &i32, _| {
            if *next == 13 {
                panic!("unlucky number");
            }
        })
        .will_unmount(move |_: &i32, _| {
            unmounts.fetch_add(1, Ordering::SeqCst);
        })
}

#[test]
fn given_caught_panic_in_a_hook_should_still_flush_and_unmount() {
    let unmounts = Arc::new(AtomicUsize::new(0));
    let renders = TestRenderer::new();
    let mut instance = Instance::new(superstitious_counter(unmounts.clone()), renders.clone());
    instance.mount().unwrap();
    let show = renders.callback::<i32>(0, "onShow").unwrap();

    show.emit(13);
    let result = panic::catch_unwind(AssertUnwindSafe(|| instance.flush()));

    assert!(result.is_err());
    assert_eq!(instance.phase(), Phase::Mounted);
    assert_eq!(*instance.state(), 0);

    show.emit(7);
    assert_eq!(instance.flush(), Ok(1));
    assert_eq!(*instance.state(), 7);
    assert_eq!(renders.count(), 2);

    assert_eq!(instance.unmount(), Ok(()));
    assert_eq!(instance.phase(), Phase::Unmounted);
    assert_eq!(unmounts.load(Ordering::SeqCst), 1);
}

#[test]
fn invalid_phase_error_names_operation_and_phase() {
    let error = InstanceError::InvalidPhase {
        operation: "unmount",
        phase: Phase::Unmounted,
    };

    assert_eq!(error.to_string(), "cannot unmount while the instance is unmounted");
}
