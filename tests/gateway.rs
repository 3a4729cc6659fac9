//! End-to-end tests: HTTP in, mock downstream behind.

use std::sync::Arc;

use graphql_grpc_gateway::config::GatewayConfig;
use graphql_grpc_gateway::downstream::DownstreamError;
use graphql_grpc_gateway::http::{INVALID_PAYLOAD, X_REQUEST_ID};
use graphql_grpc_gateway::ResponseEnvelope;
use reqwest::StatusCode;
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_get_with_query_param() {
    let source = Arc::new(common::MockDataSource::default().with_record(common::widget()));
    let (url, shutdown) = common::start_gateway(GatewayConfig::default(), source.clone()).await;

    let res = common::client()
        .get(&url)
        .query(&[("query", r#"{ getData(id: "42") { id name } }"#)])
        .send()
        .await
        .expect("Gateway unreachable");

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "application/json");
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({"data": {"id": "42", "name": "Widget", "description": ""}, "errors": []})
    );

    let calls = source.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].id, "42");
    assert_eq!(calls[0].field_mask.paths(), ["id", "name"]);

    shutdown.trigger();
}

#[tokio::test]
async fn test_post_with_json_body() {
    let source = Arc::new(common::MockDataSource::default().with_record(common::widget()));
    let (url, shutdown) = common::start_gateway(GatewayConfig::default(), source.clone()).await;

    let res = common::client()
        .post(&url)
        .json(&json!({
            "query": "query Fetch($id: String) { getData(id: $id) { description name description } }",
            "variables": {"id": "42"}
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let envelope: ResponseEnvelope = res.json().await.unwrap();
    assert!(envelope.errors.is_empty());
    let data = envelope.data.unwrap();
    assert_eq!(data.name, "Widget");
    assert_eq!(data.description, "A widget");
    assert_eq!(data.id, "");

    assert_eq!(
        source.calls()[0].field_mask.paths(),
        ["description", "name", "description"]
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_unknown_field_is_envelope_error() {
    let source = Arc::new(common::MockDataSource::default().with_record(common::widget()));
    let (url, shutdown) = common::start_gateway(GatewayConfig::default(), source.clone()).await;

    let res = common::client()
        .get(&url)
        .query(&[("query", r#"{ getData(id: "42") { id foo } }"#)])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let envelope: ResponseEnvelope = res.json().await.unwrap();
    assert_eq!(envelope.data, None);
    assert!(envelope.errors.iter().any(|e| e.contains("foo")));
    assert!(source.calls().is_empty(), "Validation must stop the call");

    shutdown.trigger();
}

#[tokio::test]
async fn test_malformed_body_is_400() {
    let source = Arc::new(common::MockDataSource::default());
    let (url, shutdown) = common::start_gateway(GatewayConfig::default(), source.clone()).await;

    let res = common::client()
        .post(&url)
        .header("content-type", "application/json")
        .body("not json")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await.unwrap(), INVALID_PAYLOAD);
    assert!(source.calls().is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn test_downstream_failure_is_envelope_error() {
    let failure = DownstreamError::Rpc {
        code: tonic::Code::Unavailable,
        message: "connection refused".into(),
    };
    let source = Arc::new(common::MockDataSource::default().failing(failure.clone()));
    let (url, shutdown) = common::start_gateway(GatewayConfig::default(), source).await;

    let res = common::client()
        .get(&url)
        .query(&[("query", r#"{ getData(id: "42") { id } }"#)])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({"data": null, "errors": [failure.to_string()]})
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_missing_query_is_envelope_error() {
    let source = Arc::new(common::MockDataSource::default());
    let (url, shutdown) = common::start_gateway(GatewayConfig::default(), source.clone()).await;

    let res = common::client().get(&url).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let envelope: ResponseEnvelope = res.json().await.unwrap();
    assert_eq!(envelope.data, None);
    assert!(!envelope.errors.is_empty());
    assert!(source.calls().is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn test_empty_post_falls_back_to_url_param() {
    let source = Arc::new(common::MockDataSource::default().with_record(common::widget()));
    let (url, shutdown) = common::start_gateway(GatewayConfig::default(), source.clone()).await;

    let res = common::client()
        .post(&url)
        .query(&[("query", r#"{ getData(id: "42") { name } }"#)])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let envelope: ResponseEnvelope = res.json().await.unwrap();
    assert_eq!(envelope.data.unwrap().name, "Widget");

    shutdown.trigger();
}

#[tokio::test]
async fn test_configured_names_and_path() {
    let mut config = GatewayConfig::default();
    config.graphql.path = "/api/gql".into();
    config.graphql.query_param = "q".into();
    config.graphql.body_field = "document".into();

    let source = Arc::new(common::MockDataSource::default().with_record(common::widget()));
    let (url, shutdown) = common::start_gateway(config, source.clone()).await;
    assert!(url.ends_with("/api/gql"));

    let client = common::client();
    let via_param: ResponseEnvelope = client
        .get(&url)
        .query(&[("q", r#"{ getData(id: "42") { id } }"#)])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(via_param.data.unwrap().id, "42");

    let via_body: ResponseEnvelope = client
        .post(&url)
        .json(&json!({"document": r#"{ getData(id: "42") { name } }"#}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(via_body.data.unwrap().name, "Widget");

    let old_path = url.replace("/api/gql", "/graphql");
    let res = client.get(&old_path).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    shutdown.trigger();
}

#[tokio::test]
async fn test_request_id_is_set_and_propagated() {
    let source = Arc::new(common::MockDataSource::default().with_record(common::widget()));
    let (url, shutdown) = common::start_gateway(GatewayConfig::default(), source).await;
    let client = common::client();

    let res = client
        .get(&url)
        .query(&[("query", r#"{ getData(id: "42") { id } }"#)])
        .send()
        .await
        .unwrap();
    let generated = res.headers()[X_REQUEST_ID].to_str().unwrap().to_string();
    assert_eq!(generated.len(), 36);

    let res = client
        .get(&url)
        .header(X_REQUEST_ID, "caller-supplied")
        .query(&[("query", r#"{ getData(id: "42") { id } }"#)])
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()[X_REQUEST_ID], "caller-supplied");

    shutdown.trigger();
}
