use std::collections::HashSet;

use futures_lite::future;
use kitbag::future::{delay, DelayOptions, FutureExt};
use kitbag::lang::{Object, Value};
use kitbag::object::{omit, pick};
use kitbag::runtime::block_on;
use kitbag::time::{Duration, Instant};
use proptest::prelude::*;

fn arb_object() -> impl Strategy<Value = Object> {
    prop::collection::vec(("[a-f]{1,2}", any::<i32>()), 0..8)
        .prop_map(|props| props.into_iter().collect())
}

fn arb_keys() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-h]{1,2}", 0..6)
}

proptest! {
    #[test]
    fn pick_and_omit_partition_own_keys(obj in arb_object(), keys in arb_keys()) {
        let picked = pick(&obj, &keys);
        let omitted = omit(&obj, &keys);

        let picked_keys: HashSet<&str> = picked.keys().collect();
        let omitted_keys: HashSet<&str> = omitted.keys().collect();
        prop_assert!(picked_keys.is_disjoint(&omitted_keys));
        prop_assert_eq!(picked.len() + omitted.len(), obj.len());
        for key in obj.keys() {
            prop_assert!(picked_keys.contains(key) || omitted_keys.contains(key));
            prop_assert_eq!(keys.iter().any(|k| k == key), picked_keys.contains(key));
        }
    }

    #[test]
    fn projections_keep_source_order(obj in arb_object(), keys in arb_keys()) {
        let order: Vec<&str> = obj.keys().collect();
        for projected in [pick(&obj, &keys), omit(&obj, &keys)] {
            let positions: Vec<usize> = projected
                .keys()
                .map(|key| order.iter().position(|k| *k == key).unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn full_projections_reproduce_the_source(obj in arb_object()) {
        let all: Vec<String> = obj.keys().map(str::to_owned).collect();
        prop_assert_eq!(pick(&obj, &all), obj.clone());
        prop_assert_eq!(omit(&obj, &Vec::<String>::new()), obj.clone());
        let value = Value::from(obj.clone());
        prop_assert_eq!(value.pick(&all), value.omit::<&str>(&[]));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn delay_never_resolves_early(ms in 0u64..25) {
        let dur = Duration::from_millis(ms);
        let elapsed = block_on(async {
            let start = Instant::now();
            let _ = delay(dur, DelayOptions::new()).await;
            start.elapsed()
        });
        prop_assert!(elapsed >= dur);
    }

    #[test]
    fn ready_operations_win_the_race(value in any::<i64>(), ms in 0u64..5) {
        let result = block_on(future::ready(value).deadline(Duration::from_millis(ms)));
        prop_assert_eq!(result, Ok(value));
    }

    #[test]
    fn operations_finishing_first_keep_their_output(value in any::<i32>(), ms in 0u64..10) {
        let result = block_on(async {
            let operation = async {
                let _ = delay(Duration::from_millis(ms), DelayOptions::new()).await;
                value
            };
            operation.deadline(Duration::from_millis(ms + 200)).await
        });
        prop_assert_eq!(result, Ok(value));
    }
}
