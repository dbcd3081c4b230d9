use super::*;
use crate::seed_file::parse_seed_definitions;
use async_trait::async_trait;
use seeds_endpoint::{SeedPayload, SeedTransport};
use serde_json::json;
use std::sync::{Arc, Mutex};

/// Records request paths and fails the configured path.
#[derive(Default)]
struct MockTransport {
    paths: Mutex<Vec<String>>,
    fail_path: Option<&'static str>,
}

#[async_trait]
impl SeedTransport for MockTransport {
    async fn request(
        &self,
        path: &str,
        payload: &SeedPayload,
    ) -> Result<Value, seeds_endpoint::Error> {
        self.paths.lock().unwrap().push(path.to_string());
        if self.fail_path == Some(path) {
            return Err(seeds_endpoint::Error::UnexpectedStatus {
                path: path.to_string(),
                status: 500,
                body: "boom".to_string(),
            });
        }
        Ok(json!({ "id": self.paths.lock().unwrap().len(), "data": payload.data }))
    }
}

fn definitions() -> Vec<SeedNode> {
    parse_seed_definitions(
        r#"[
            { "type": "user", "data": { "name": "alice" } },
            { "type": "post", "data": { "author": { "$ref": { "seed": 0, "path": "id" } } } }
        ]"#,
    )
    .unwrap()
}

fn client_with(transport: &Arc<MockTransport>) -> SeedsClient {
    SeedsClient::new(transport.clone())
}

#[tokio::test]
async fn test_create_seeds_reports_values() {
    let transport = Arc::new(MockTransport::default());
    let client = client_with(&transport);

    let report = create_seeds(&client, definitions(), Some("blog")).await.unwrap();

    assert_eq!(
        report,
        SeedReport {
            name: "blog".to_string(),
            values: vec![
                json!({ "id": 1, "data": { "name": "alice" } }),
                json!({ "id": 2, "data": { "author": 1 } }),
            ],
            removed: false,
        }
    );
    assert!(client.get_seeds("blog").is_some());
    assert_eq!(
        *transport.paths.lock().unwrap(),
        vec!["user/create", "post/create"]
    );
}

#[tokio::test]
async fn test_run_seeds_removes_afterwards() {
    let transport = Arc::new(MockTransport::default());
    let client = client_with(&transport);

    let report = run_seeds(&client, definitions(), None, false).await.unwrap();

    assert!(report.removed);
    assert!(report.name.starts_with("seeds-"));
    assert_eq!(
        *transport.paths.lock().unwrap(),
        vec!["user/create", "post/create", "user/remove", "post/remove"]
    );
}

#[tokio::test]
async fn test_run_seeds_can_keep_seeds() {
    let transport = Arc::new(MockTransport::default());
    let client = client_with(&transport);

    let report = run_seeds(&client, definitions(), None, true).await.unwrap();

    assert!(!report.removed);
    assert_eq!(transport.paths.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_run_seeds_stops_at_failed_create() {
    let transport = Arc::new(MockTransport {
        fail_path: Some("post/create"),
        ..Default::default()
    });
    let client = client_with(&transport);

    let error = run_seeds(&client, definitions(), Some("blog"), false)
        .await
        .unwrap_err();

    assert!(matches!(error, Error::Seeds(_)));
    assert_eq!(
        *transport.paths.lock().unwrap(),
        vec!["user/create", "post/create"]
    );
}

#[test]
fn test_report_serializes_as_json() {
    let report = SeedReport {
        name: "blog".to_string(),
        values: vec![json!({ "id": 1 })],
        removed: true,
    };

    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        json!({ "name": "blog", "values": [{ "id": 1 }], "removed": true })
    );
}
