//! Property tests for cyclic enumeration navigation
//!
//! The inverse law: starting from any declared member, n `next` calls
//! followed by n `previous` calls restore the original value. A full lap
//! of `next` calls (one per declared key) also returns to the start.

mod common;

use common::setup;
use proptest::prelude::*;

const GEARS: [&str; 5] = ["reverse", "neutral", "first", "second", "over_drive"];

proptest! {
    #[test]
    fn next_then_equal_previous_restores_the_original_member(
        start in 0usize..GEARS.len(),
        steps in 0usize..32,
    ) {
        let store = setup();
        let mut car = store.new_record();
        car.set("gear", GEARS[start]).unwrap();

        for _ in 0..steps {
            car.next("gear").unwrap();
        }
        for _ in 0..steps {
            car.previous("gear").unwrap();
        }

        let current = car.token("gear").unwrap().unwrap();
        prop_assert_eq!(current.as_str(), GEARS[start]);
    }

    #[test]
    fn a_full_lap_of_next_calls_returns_to_the_start(
        start in 0usize..GEARS.len(),
    ) {
        let store = setup();
        let mut car = store.new_record();
        car.set("gear", GEARS[start]).unwrap();

        for _ in 0..GEARS.len() {
            car.next("gear").unwrap();
        }

        let current = car.token("gear").unwrap().unwrap();
        prop_assert_eq!(current.as_str(), GEARS[start]);
    }

    #[test]
    fn next_always_lands_on_a_declared_member(
        start in 0usize..GEARS.len(),
        steps in 1usize..64,
    ) {
        let store = setup();
        let mut car = store.new_record();
        car.set("gear", GEARS[start]).unwrap();

        for _ in 0..steps {
            let key = car.next("gear").unwrap();
            prop_assert!(GEARS.iter().any(|g| key == *g));
        }
    }
}
