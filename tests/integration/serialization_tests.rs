use std::sync::{Arc, Mutex};

use oxide_component::{
    create_element, ComponentTemplate, Element, Instance, InstanceConfig, InstanceError, PropMap, TestRenderer,
    Update,
};

#[test]
fn given_callback_fired_from_a_hook_should_run_after_the_current_commit() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let hook_log = log.clone();
    let template = ComponentTemplate::<i32>::new("FollowUp")
        .render(|count: &i32, this| {
            create_element(
                "button",
                Some(PropMap::new().with("onShow", this.update(|value: i32, _: &i32, _| Update::Update(value)))),
                vec![count.to_string().into()],
            )
        })
        .did_update(move |previous: &i32, current: &i32, this| {
            hook_log.lock().unwrap().push(format!("did_update {previous}->{current}"));
            if *current == 1 {
                let log = hook_log.clone();
                this.update(move |_: (), count: &i32, _| {
                    log.lock().unwrap().push(format!("follow-up saw {count}"));
                    Update::SilentUpdate(100)
                })
                .emit(());
            }
        });
    let renderer = TestRenderer::new();
    let mut instance = Instance::new(template, renderer.clone());
    instance.mount().unwrap();

    renderer.callback::<i32>(0, "onShow").unwrap().emit(1);

    assert_eq!(instance.flush(), Ok(2));
    assert_eq!(*instance.state(), 100);
    assert_eq!(renderer.count(), 2);
    assert_eq!(
        *log.lock().unwrap(),
        vec!["did_update 0->1", "follow-up saw 1", "did_update 1->100"]
    );
}

#[test]
fn given_a_hook_feeding_its_own_updates_flush_should_stop_at_the_limit() {
    let template = ComponentTemplate::<i32>::new("Runaway")
        .render(|count: &i32, _| Element::text(count.to_string()))
        .did_mount(|_, this| {
            this.update(|_: (), count: &i32, _| Update::Update(count + 1)).emit(());
            Update::NoUpdate
        })
        .did_update(|_, _, this| {
            this.update(|_: (), count: &i32, _| Update::Update(count + 1)).emit(());
        });
    let mut instance = Instance::with_config(
        template,
        TestRenderer::new(),
        InstanceConfig::default().max_dispatches_per_flush(5),
    );
    instance.mount().unwrap();

    assert_eq!(instance.flush(), Err(InstanceError::DispatchLimitExceeded { limit: 5 }));
    assert_eq!(*instance.state(), 5);
    assert_eq!(instance.pending(), 1);

    instance.unmount().unwrap();
    assert_eq!(*instance.state(), 10);
    assert_eq!(instance.pending(), 0);
}
