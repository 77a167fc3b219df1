//! Control-plane requests against a mock controller.

use std::time::Duration;

use pinecone_client::models::{Cloud, IndexSpec, Metric};
use pinecone_client::{
    ClientOptions, ConfigureIndexRequest, CreateIndexRequest, ErrorKind, PageParams, Pinecone,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn client(server: &MockServer) -> Pinecone {
    let options = ClientOptions::default().with_controller_host(server.uri());
    Pinecone::with_options(Some("test-key".into()), options).unwrap()
}

#[tokio::test]
async fn test_create_index_defaults_metric_to_cosine() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/indexes"))
        .and(body_json(json!({
            "name": "idx",
            "dimension": 1536,
            "metric": "cosine",
            "spec": {"serverless": {"cloud": "aws", "region": "us-east-1"}}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "name": "idx",
            "dimension": 1536,
            "metric": "cosine"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = CreateIndexRequest::new(IndexSpec::serverless(Cloud::Aws, "us-east-1"))
        .with_dimension(1536);
    let model = client(&server).create_index("idx", request).await.unwrap();

    assert_eq!(model.name, "idx");
    assert_eq!(model.metric, Metric::Cosine);
    assert_eq!(model.dimension, Some(1536));
}

#[tokio::test]
async fn test_default_headers_are_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/indexes"))
        .and(header("Api-Key", "test-key"))
        .and(header("X-Pinecone-Api-Version", "2025-10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "indexes": [
                {"name": "a", "dimension": 3, "metric": "cosine", "host": "a.svc.pinecone.io"},
                {"name": "b", "dimension": 8, "metric": "euclidean"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let indexes = client(&server).list_indexes().await.unwrap();

    assert_eq!(indexes.len(), 2);
    assert_eq!(indexes[1].metric, Metric::Euclidean);
}

#[tokio::test]
async fn test_user_agent_identifies_client() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections"))
        .and(|req: &Request| {
            req.headers
                .get("user-agent")
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v.starts_with("pinecone-rust-client/"))
        })
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"collections": []})))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client(&server).list_collections().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_without_collection_key_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/backups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    assert!(client(&server).list_backups().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_server_error_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/indexes"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "Internal Server Error"})),
        )
        .mount(&server)
        .await;

    let error = client(&server).list_indexes().await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Api);
    assert_eq!(error.status_code(), Some(500));
    assert_eq!(error.message(), "Internal Server Error");
}

#[tokio::test]
async fn test_unauthorized_is_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/assistants"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": {"message": "Invalid API Key"}})),
        )
        .mount(&server)
        .await;

    let error = client(&server).list_assistants().await.unwrap_err();

    assert!(error.is_auth());
    assert_eq!(error.status_code(), Some(401));
    assert_eq!(error.message(), "Invalid API Key");
}

#[tokio::test]
async fn test_names_are_percent_encoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/indexes/my%20index"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "my index"})))
        .expect(1)
        .mount(&server)
        .await;

    let model = client(&server).describe_index("my index").await.unwrap();
    assert_eq!(model.name, "my index");
}

#[tokio::test]
async fn test_delete_index_with_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/indexes/docs"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).delete_index("docs").await.unwrap();
}

#[tokio::test]
async fn test_configure_index_patches_supplied_fields() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/indexes/docs"))
        .and(body_json(json!({
            "spec": {"pod": {"replicas": 2}},
            "tags": {"env": "prod"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "docs"})))
        .expect(1)
        .mount(&server)
        .await;

    let request = ConfigureIndexRequest::default()
        .with_spec(json!({"pod": {"replicas": 2}}))
        .with_tag("env", "prod");
    client(&server).configure_index("docs", &request).await.unwrap();
}

#[tokio::test]
async fn test_accepted_without_body_is_success() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/indexes/docs"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/indexes"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let pinecone = client(&server);

    let request = ConfigureIndexRequest::default().with_tag("env", "prod");
    let model = pinecone.configure_index("docs", &request).await.unwrap();
    assert!(model.name.is_empty());
    assert_eq!(model.host(), None);

    let request = CreateIndexRequest::new(IndexSpec::serverless(Cloud::Aws, "us-east-1"))
        .with_dimension(8);
    let model = pinecone.create_index("idx", request).await.unwrap();
    assert_eq!(model.metric, Metric::Cosine);
}

#[tokio::test]
async fn test_transport_deadline_is_prefixed_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/indexes"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"indexes": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let options = ClientOptions::default()
        .with_controller_host(server.uri())
        .with_timeout(1);
    let pinecone = Pinecone::with_options(Some("test-key".into()), options).unwrap();

    let error = pinecone.list_indexes().await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Timeout);
    assert_eq!(error.status_code(), None);
    assert!(error.is_timeout());
    assert!(error.is_transport());
    assert!(
        error.message().starts_with("Failed to list indexes: "),
        "unexpected message: {}",
        error.message()
    );
}

#[tokio::test]
async fn test_list_restore_jobs_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/restore"))
        .and(query_param("limit", "5"))
        .and(query_param("paginationToken", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobs": [{"restore_job_id": "r1", "status": "Completed"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = PageParams::default().with_limit(5).with_pagination_token("abc");
    let jobs = client(&server).list_restore_jobs(&params).await.unwrap();

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0]["restore_job_id"], json!("r1"));
}

#[tokio::test]
async fn test_additional_header_overrides_content_type() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/collections"))
        .and(header("Content-Type", "application/vnd.custom+json"))
        .and(header("X-Project", "docs"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"name": "snap"})))
        .expect(1)
        .mount(&server)
        .await;

    let options = ClientOptions::default()
        .with_controller_host(server.uri())
        .with_header("Content-Type", "application/vnd.custom+json")
        .with_header("X-Project", "docs");
    let pinecone = Pinecone::with_options(Some("test-key".into()), options).unwrap();

    let request = pinecone_client::CreateCollectionRequest::new("snap", "docs");
    let collection = pinecone.create_collection(&request).await.unwrap();
    assert_eq!(collection["name"], json!("snap"));
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/backups/b1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let error = client(&server).describe_backup("b1").await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Decode);
}
