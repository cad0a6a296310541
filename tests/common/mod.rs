//! Shared fixtures for the behavioral suite
//!
//! The RaceCar record type: two plain columns (`name`, `lights`), a
//! column-backed five-gear enumeration defaulting to `neutral`, and a
//! transient `choke` enumeration defaulting to `none`.

#![allow(dead_code)]

use enumattr::{registry, MemoryStore, ModelDescriptor, Record};
use std::sync::Arc;

/// Build (or fetch) the RaceCar descriptor from the process-wide registry
pub fn race_car_model() -> Arc<ModelDescriptor> {
    if let Some(model) = registry::get("race_car") {
        return model;
    }
    let model = ModelDescriptor::builder("race_car")
        .column("name")
        .column("lights")
        .enum_column(
            "gear",
            ["reverse", "neutral", "first", "second", "over_drive"],
            Some("neutral"),
        )
        .expect("gear definition")
        .enum_transient("choke", ["none", "medium", "full"], Some("none"))
        .expect("choke definition")
        .build()
        .expect("race_car descriptor");
    registry::register(model)
}

/// Fresh store per test, so persisted rows never leak between scenarios
pub fn setup() -> MemoryStore {
    MemoryStore::new(race_car_model())
}

/// Assert the four generated predicates for a car currently in second
/// gear: `gear_is_in_second`, `gear_not_in_second`, `gear_is_nil`,
/// `gear_is_not_nil`.
pub fn assert_predicate_methods(car: &Record) {
    assert!(
        car.predicate("gear_is_in_second").unwrap(),
        "gear_is_in_second should hold"
    );
    assert!(
        !car.predicate("gear_not_in_second").unwrap(),
        "gear_not_in_second should not hold"
    );
    assert!(
        !car.predicate("gear_is_nil").unwrap(),
        "gear_is_nil should not hold"
    );
    assert!(
        car.predicate("gear_is_not_nil").unwrap(),
        "gear_is_not_nil should hold"
    );
}
