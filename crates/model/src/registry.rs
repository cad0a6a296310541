//! Process-wide model registry
//!
//! Record types are configured once per process; the registry holds the
//! frozen descriptors so any part of the program can resolve a type by
//! name. Registration is first-write-wins: a second registration under an
//! existing name returns the descriptor already in place, keeping
//! configuration immutable after the fact.

use crate::descriptor::ModelDescriptor;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

static MODELS: Lazy<RwLock<HashMap<String, Arc<ModelDescriptor>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Register a descriptor under its model name
///
/// First-write-wins: if a descriptor with the same name is already
/// registered, the existing one is returned unchanged.
pub fn register(model: ModelDescriptor) -> Arc<ModelDescriptor> {
    let mut models = MODELS.write();
    models
        .entry(model.name().to_string())
        .or_insert_with(|| Arc::new(model))
        .clone()
}

/// Resolve a registered descriptor by model name
pub fn get(name: &str) -> Option<Arc<ModelDescriptor>> {
    MODELS.read().get(name).cloned()
}

/// Check whether a model name is registered
pub fn contains(name: &str) -> bool {
    MODELS.read().contains_key(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(name: &str, keys: &[&str]) -> ModelDescriptor {
        ModelDescriptor::builder(name)
            .enum_column("state", keys.iter().copied(), None)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_register_then_get_round_trips() {
        let registered = register(model("registry_widget", &["on", "off"]));
        let fetched = get("registry_widget").unwrap();
        assert!(Arc::ptr_eq(&registered, &fetched));
    }

    #[test]
    fn test_second_registration_is_ignored() {
        let first = register(model("registry_gadget", &["a", "b"]));
        let second = register(model("registry_gadget", &["c", "d"]));
        assert!(Arc::ptr_eq(&first, &second));
        assert!(second.enum_def("state").unwrap().contains_str("a"));
    }

    #[test]
    fn test_unknown_name_resolves_to_none() {
        assert!(get("registry_never_declared").is_none());
        assert!(!contains("registry_never_declared"));
    }
}
