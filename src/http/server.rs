//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the GraphQL handlers
//! - Wire up middleware (tracing, timeout, body limit, request ID)
//! - Bind server to listener and stop on the shutdown signal
//! - Decode the inbound request and hand it to the query executor

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Query, State},
    http::{HeaderMap, Method},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{GatewayConfig, GraphqlConfig};
use crate::http::request::{self, MakeRequestUuid, PayloadError, X_REQUEST_ID};
use crate::http::response::invalid_payload;
use crate::observability::metrics;
use crate::query::{GraphqlRequest, QueryExecutor};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub executor: Arc<QueryExecutor>,
    pub graphql: Arc<GraphqlConfig>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server serving `executor`.
    pub fn new(config: GatewayConfig, executor: QueryExecutor) -> Self {
        let state = AppState {
            executor: Arc::new(executor),
            graphql: Arc::new(config.graphql.clone()),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route(
                &config.graphql.path,
                get(graphql_get).post(graphql_post),
            )
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.limits.max_body_size))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            path = %self.config.graphql.path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// `GET <path>?query=...`
async fn graphql_get(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let decoded = request::from_query_params(&params, &state.graphql);
    respond(&state, Method::GET, &headers, decoded).await
}

/// `POST <path>` with a JSON body; an empty body falls back to URL parameters.
async fn graphql_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response {
    let decoded = if body.is_empty() {
        request::from_query_params(&params, &state.graphql)
    } else {
        request::from_json_body(&body, &state.graphql)
    };
    respond(&state, Method::POST, &headers, decoded).await
}

async fn respond(
    state: &AppState,
    method: Method,
    headers: &HeaderMap,
    decoded: Result<GraphqlRequest, PayloadError>,
) -> Response {
    let start_time = Instant::now();
    let request_id = headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    let request = match decoded {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Rejecting undecodable request");
            metrics::record_request(method.as_str(), 400, start_time);
            return invalid_payload();
        }
    };

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        operation = ?request.operation_name,
        "Executing query"
    );

    let envelope = state.executor.execute(request).await;
    metrics::record_request(method.as_str(), 200, start_time);
    envelope.into_response()
}
