//! Data-plane requests against a mock index host.

use pinecone_client::models::{SparseValues, Vector};
use pinecone_client::{
    ClientOptions, DeleteRequest, HttpClient, Index, ListVectorIdsRequest, PineconeConfig,
    QueryRequest, StartImportRequest, UpdateRequest,
};
use serde_json::{Value, json};
use wiremock::matchers::{any, body_json, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn index(server: &MockServer) -> Index {
    let config = PineconeConfig::new("test-key", ClientOptions::default()).unwrap();
    Index::new("docs", HttpClient::from_config(&config, server.uri()).unwrap())
}

fn body(req: &Request) -> Value {
    serde_json::from_slice(&req.body).unwrap_or(Value::Null)
}

#[tokio::test]
async fn test_query_by_vector() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .and(|req: &Request| {
            let body = body(req);
            body["topK"] == json!(5)
                && body.get("id").is_none()
                && body["vector"].as_array().is_some_and(|v| v.len() == 2)
                && body["includeMetadata"] == json!(true)
        })
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "matches": [{"id": "v1", "score": 0.95}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = index(&server)
        .query(&QueryRequest::by_vector(vec![0.1, 0.2]).with_top_k(5))
        .await
        .unwrap();

    assert_eq!(response.matches[0].id, "v1");
    assert_eq!(response.matches[0].score, 0.95);
}

#[tokio::test]
async fn test_upsert_omits_absent_namespace() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/vectors/upsert"))
        .and(body_json(json!({
            "vectors": [{"id": "v1", "values": [0.5, 0.25], "metadata": {"genre": "drama"}}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"upsertedCount": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let vectors = [Vector::new("v1", vec![0.5, 0.25]).with_field("genre", "drama")];
    let response = index(&server).upsert(&vectors, None).await.unwrap();
    assert_eq!(response["upsertedCount"], json!(1));
}

#[tokio::test]
async fn test_fetch_repeats_ids() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vectors/fetch"))
        .and(|req: &Request| req.url.query() == Some("ids=v1&ids=v2&namespace=ns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "vectors": {"v1": {"id": "v1", "values": [0.5]}},
            "namespace": "ns"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = index(&server).fetch(&["v1", "v2"], Some("ns")).await.unwrap();

    assert_eq!(response.vectors.len(), 1);
    assert_eq!(response.vectors["v1"].values, vec![0.5]);
}

#[tokio::test]
async fn test_fetch_without_ids_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let error = index(&server).fetch::<String>(&[], None).await.unwrap_err();
    assert!(error.is_validation());
}

#[tokio::test]
async fn test_delete_all_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/vectors/delete"))
        .and(body_json(json!({"deleteAll": true, "namespace": "ns"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let request = DeleteRequest {
        ids: vec!["a".into()],
        filter: Some(json!({"genre": "drama"})),
        namespace: Some("ns".into()),
        delete_all: true,
    };
    index(&server).delete(&request).await.unwrap();
}

#[tokio::test]
async fn test_update_sparse_values() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/vectors/update"))
        .and(body_json(json!({
            "id": "v1",
            "sparseValues": {"indices": [0, 5], "values": [0.5, 0.25]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let sparse = SparseValues::new(vec![0, 5], vec![0.5, 0.25]).unwrap();
    let request = UpdateRequest::new("v1").with_sparse_values(sparse);
    index(&server).update(&request).await.unwrap();
}

#[tokio::test]
async fn test_list_vector_ids_without_parameters_is_bare_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vectors/list"))
        .and(|req: &Request| req.url.query().is_none())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "vectors": [{"id": "a"}],
            "pagination": {"next": "tok"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = index(&server)
        .list_vector_ids(&ListVectorIdsRequest::default())
        .await
        .unwrap();

    assert_eq!(page.vectors[0].id, "a");
    assert_eq!(page.next_token(), Some("tok"));
}

#[tokio::test]
async fn test_list_vector_ids_parameter_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vectors/list"))
        .and(|req: &Request| {
            req.url.query() == Some("prefix=doc%23&limit=10&paginationToken=t1&namespace=ns")
        })
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"vectors": []})))
        .expect(1)
        .mount(&server)
        .await;

    let request = ListVectorIdsRequest::default()
        .with_namespace("ns")
        .with_limit(10)
        .with_prefix("doc#")
        .with_pagination_token("t1");
    index(&server).list_vector_ids(&request).await.unwrap();
}

#[tokio::test]
async fn test_namespace_view_scopes_requests() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/vectors/upsert"))
        .and(|req: &Request| body(req)["namespace"] == json!("books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"upsertedCount": 1})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .and(|req: &Request| {
            let body = body(req);
            body["namespace"] == json!("books") && body["id"] == json!("v1")
        })
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"matches": []})))
        .expect(1)
        .mount(&server)
        .await;

    let books = index(&server).namespace("books");
    books.upsert(&[Vector::new("v1", vec![1.0])]).await.unwrap();
    let response = books
        .query(QueryRequest::by_id("v1").with_namespace("ignored"))
        .await
        .unwrap();

    assert!(response.matches.is_empty());
    assert_eq!(books.namespace(), "books");
}

#[tokio::test]
async fn test_describe_index_stats_posts_empty_object() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/describe_index_stats"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "namespaces": {"": {"vectorCount": 2}, "books": {"vectorCount": 5}},
            "dimension": 3,
            "indexFullness": 0.0,
            "totalVectorCount": 7
        })))
        .expect(3)
        .mount(&server)
        .await;

    let index = index(&server);
    let stats = index.describe_index_stats(None).await.unwrap();
    assert_eq!(stats.total_vector_count, 7);

    let namespaces = index.list_namespaces().await.unwrap();
    assert_eq!(namespaces, vec!["".to_owned(), "books".to_owned()]);

    let books = index.describe_namespace("books").await.unwrap();
    assert_eq!(books.map(|ns| ns.vector_count), Some(5));
}

#[tokio::test]
async fn test_delete_namespace_sends_delete_all() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/vectors/delete"))
        .and(body_json(json!({"deleteAll": true, "namespace": "books"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    index(&server).delete_namespace("books").await.unwrap();
}

#[tokio::test]
async fn test_import_lifecycle() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bulk/imports"))
        .and(body_json(json!({"uri": "s3://bucket/data/"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "imp/1"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/bulk/imports/imp%2F1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "imp/1", "status": "Pending"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/bulk/imports/imp%2F1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let index = index(&server);
    let started = index
        .start_import(&StartImportRequest::new("s3://bucket/data/"))
        .await
        .unwrap();
    let id = started["id"].as_str().unwrap();

    let import = index.describe_import(id).await.unwrap();
    assert_eq!(import["status"], json!("Pending"));

    index.cancel_import(id).await.unwrap();
}
