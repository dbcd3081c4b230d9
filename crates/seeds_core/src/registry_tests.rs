use super::*;
use crate::seed_set::SeedSet;
use crate::SeedNode;
use async_trait::async_trait;
use seeds_endpoint::{Error as EndpointError, SeedPayload, SeedTransport};
use serde_json::{json, Value};

struct NullTransport;

#[async_trait]
impl SeedTransport for NullTransport {
    async fn request(&self, _path: &str, _payload: &SeedPayload) -> Result<Value, EndpointError> {
        Ok(Value::Null)
    }
}

fn handle(name: &str, seed_type: &str) -> SeedSetHandle {
    SeedSetHandle::new(SeedSet::new(
        name,
        vec![SeedNode::from(json!({ "type": seed_type }))],
        Arc::new(NullTransport),
    ))
}

#[test]
fn test_get_returns_registered_set() {
    let registry = SeedRegistry::new();
    let set = handle("users", "user");

    registry.register("users", set.clone());

    let found = registry.get("users").expect("set should be registered");
    assert!(found.same_set(&set));
    assert!(registry.contains("users"));
}

#[test]
fn test_get_unknown_name_is_none() {
    let registry = SeedRegistry::new();
    assert!(registry.get("nope").is_none());
    assert!(registry.is_empty());
}

#[test]
fn test_last_registration_wins() {
    let registry = SeedRegistry::new();
    let first = handle("shared", "user");
    let second = handle("shared", "post");

    registry.register("shared", first.clone());
    registry.register("shared", second.clone());

    let found = registry.get("shared").unwrap();
    assert!(found.same_set(&second));
    assert!(!found.same_set(&first));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_clones_share_entries() {
    let registry = SeedRegistry::new();
    let view = registry.clone();

    registry.register("b", handle("b", "x"));
    registry.register("a", handle("a", "x"));

    assert_eq!(view.names(), vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn test_generate_set_name_is_unique() {
    let first = generate_set_name();
    let second = generate_set_name();

    assert!(first.starts_with("seeds-"));
    assert_eq!(first.len(), "seeds-".len() + 10);
    assert_ne!(first, second);
}
