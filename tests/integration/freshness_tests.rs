use super::{mount_counter, permissive_observer};

#[test]
fn given_silent_updates_after_capture_when_stale_callback_invoked_should_observe_latest_state() {
    let mut test = mount_counter(permissive_observer());
    let stale_increment = test.callback::<()>(0, "onIncrement");
    let set = test.callback::<i32>(0, "onSet");

    set.emit(5);
    test.flush();
    set.emit(9);
    test.flush();
    stale_increment.emit(());
    test.flush();

    assert_eq!(*test.instance.state(), 10);
    // Mount plus the single `Update`; silent updates never rendered.
    assert_eq!(test.renders.count(), 2);
    assert_eq!(test.renders.last().unwrap().text_content(), "+10");
}

#[test]
fn given_callback_from_first_render_when_invoked_after_later_renders_should_use_current_state() {
    let mut test = mount_counter(permissive_observer());
    let first_increment = test.callback::<()>(0, "onIncrement");

    for _ in 0..3 {
        test.latest::<()>("onIncrement").emit(());
        test.flush();
    }
    first_increment.emit(());
    test.flush();

    assert_eq!(*test.instance.state(), 4);
    assert_eq!(test.renders.count(), 5);
}

#[test]
fn given_queued_invocations_when_flushed_should_each_see_the_previous_commit() {
    let mut test = mount_counter(permissive_observer());
    let increment = test.callback::<()>(0, "onIncrement");

    increment.emit(());
    increment.emit(());
    increment.emit(());
    assert_eq!(test.instance.pending(), 3);

    assert_eq!(test.flush(), 3);
    assert_eq!(*test.instance.state(), 3);
}

#[test]
fn given_fire_and_forget_handler_when_invoked_should_read_fresh_state_without_updating() {
    let mut observer = super::MockLifecycleObserver::new();
    observer.expect_render().return_const(());
    observer.expect_did_mount().return_const(());
    // Dropping the mounted instance unmounts it.
    observer.expect_will_unmount().times(1).return_const(());
    observer.expect_will_update().return_const(());
    observer.expect_did_update().return_const(());
    observer
        .expect_observed()
        .with(mockall::predicate::eq(42))
        .times(1)
        .return_const(());
    let mut test = mount_counter(observer);
    let observe = test.callback::<()>(0, "onObserve");

    test.callback::<i32>(0, "onSet").emit(42);
    test.flush();
    observe.emit(());
    test.flush();

    assert_eq!(*test.instance.state(), 42);
    assert_eq!(test.renders.count(), 1);
}
