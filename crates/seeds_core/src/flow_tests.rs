use super::*;
use crate::seed_set::SeedSet;
use crate::SeedError;
use async_trait::async_trait;
use seeds_endpoint::{Error as EndpointError, SeedPayload, SeedTransport};
use serde_json::json;
use std::sync::{Arc, Mutex};

/// Records request paths; fails every request to `fail_path`.
#[derive(Default)]
struct RecordingTransport {
    paths: Mutex<Vec<String>>,
    fail_path: Option<String>,
}

impl RecordingTransport {
    fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

#[async_trait]
impl SeedTransport for RecordingTransport {
    async fn request(&self, path: &str, _payload: &SeedPayload) -> Result<Value, EndpointError> {
        self.paths.lock().unwrap().push(path.to_string());
        if self.fail_path.as_deref() == Some(path) {
            return Err(EndpointError::EndpointNotFound {
                path: path.to_string(),
            });
        }
        Ok(json!({ "id": path }))
    }
}

fn set_with(transport: &Arc<RecordingTransport>) -> SeedSetHandle {
    SeedSetHandle::new(SeedSet::new(
        "flow",
        vec![
            SeedNode::from(json!({ "type": "user" })),
            SeedNode::from(json!({ "type": "post" })),
        ],
        transport.clone(),
    ))
}

#[tokio::test]
async fn test_with_creates_runs_body_then_removes() {
    let transport = Arc::new(RecordingTransport::default());
    let set = set_with(&transport);
    let probe = transport.clone();

    let output = set
        .with(|values, definitions| async move {
            // Nothing has been removed while the body runs
            assert_eq!(probe.paths(), vec!["user/create", "post/create"]);
            assert_eq!(values, vec![json!({ "id": "user/create" }), json!({ "id": "post/create" })]);
            assert_eq!(definitions.len(), 2);
            "done"
        })
        .await
        .unwrap();

    assert_eq!(output, "done");
    assert_eq!(
        transport.paths(),
        vec!["user/create", "post/create", "user/remove", "post/remove"]
    );
}

#[tokio::test]
async fn test_with_skips_body_when_create_fails() {
    let transport = Arc::new(RecordingTransport {
        fail_path: Some("post/create".to_string()),
        ..Default::default()
    });
    let set = set_with(&transport);
    let mut ran = false;

    let result = set
        .with(|_, _| {
            ran = true;
            async {}
        })
        .await;

    assert!(matches!(result, Err(SeedError::Transport(_))));
    assert!(!ran);
    assert_eq!(transport.paths(), vec!["user/create", "post/create"]);
}

#[tokio::test]
async fn test_with_reports_removal_failure() {
    let transport = Arc::new(RecordingTransport {
        fail_path: Some("user/remove".to_string()),
        ..Default::default()
    });
    let set = set_with(&transport);

    let result = set.with(|_, _| async { 1 }).await;

    assert!(matches!(result, Err(SeedError::Transport(_))));
    assert_eq!(
        transport.paths(),
        vec!["user/create", "post/create", "user/remove"]
    );
}

#[tokio::test]
async fn test_with_teardown_leaves_removal_to_body() {
    let transport = Arc::new(RecordingTransport::default());
    let set = set_with(&transport);

    let kept = set
        .with_teardown(|values, _, _teardown| async move { values.len() })
        .await
        .unwrap();

    assert_eq!(kept, 2);
    assert_eq!(transport.paths(), vec!["user/create", "post/create"]);

    set.with_teardown(|_, _, teardown| async move { teardown.run().await })
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        transport.paths(),
        vec![
            "user/create",
            "post/create",
            "user/create",
            "post/create",
            "user/remove",
            "post/remove"
        ]
    );
}

#[tokio::test]
async fn test_attach_registers_suite_hooks() {
    let transport = Arc::new(RecordingTransport::default());
    let set = set_with(&transport);
    let mut hooks = HookQueue::new();

    set.attach(&mut hooks);

    assert_eq!(hooks.before_count(), 1);
    assert_eq!(hooks.after_count(), 1);
    assert!(transport.paths().is_empty());

    hooks.run_before_all().await.unwrap();
    assert_eq!(set.parse(1, "id").await.unwrap(), json!("post/create"));

    hooks.run_after_all().await.unwrap();
    assert_eq!(
        transport.paths(),
        vec!["user/create", "post/create", "user/remove", "post/remove"]
    );
    assert_eq!(hooks.before_count(), 0);
}

#[tokio::test]
async fn test_attach_without_suite_hooks_does_nothing() {
    struct NoSuiteHooks;
    impl LifecycleHooks for NoSuiteHooks {}

    let transport = Arc::new(RecordingTransport::default());
    let set = set_with(&transport);

    set.attach(&mut NoSuiteHooks).attach(&mut NoSuiteHooks);

    assert!(transport.paths().is_empty());
}
