use proptest::prelude::*;

use super::{mount_counter, permissive_observer};

proptest! {
    #[test]
    fn stale_callback_observes_the_state_after_every_intervening_update(
        values in proptest::collection::vec(-1_000i32..1_000, 0..16),
    ) {
        let mut test = mount_counter(permissive_observer());
        let stale_increment = test.callback::<()>(0, "onIncrement");
        let set = test.callback::<i32>(0, "onSet");

        for value in &values {
            set.emit(*value);
            test.flush();
        }
        stale_increment.emit(());
        test.flush();

        let expected = values.last().copied().unwrap_or(0) + 1;
        prop_assert_eq!(*test.instance.state(), expected);
        prop_assert_eq!(test.renders.count(), 2);
    }

    #[test]
    fn no_update_is_idempotent(invocations in 0usize..32, start in -1_000i32..1_000) {
        let mut test = mount_counter(permissive_observer());
        test.callback::<i32>(0, "onShow").emit(start);
        test.flush();
        let baseline_renders = test.renders.count();
        let ignore = test.callback::<()>(0, "onIgnore");

        for _ in 0..invocations {
            ignore.emit(());
        }
        prop_assert_eq!(test.flush(), invocations);

        prop_assert_eq!(*test.instance.state(), start);
        prop_assert_eq!(test.renders.count(), baseline_renders);
    }

    #[test]
    fn each_update_renders_exactly_once(updates in 0usize..24, silent in 0usize..24) {
        let mut test = mount_counter(permissive_observer());
        let increment = test.callback::<()>(0, "onIncrement");
        let set = test.callback::<i32>(0, "onSet");

        for _ in 0..silent {
            set.emit(0);
        }
        for _ in 0..updates {
            increment.emit(());
        }
        test.flush();

        prop_assert_eq!(*test.instance.state(), updates as i32);
        prop_assert_eq!(test.renders.count(), updates + 1);
    }
}
