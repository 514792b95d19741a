use axum::{
    extract::{FromRequest, FromRequestParts, Query},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::error::ServiceError;

/// JSON body extractor whose rejections render as 400 with the usual error body.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ServiceError))]
pub struct JsonBody<T>(pub T);

/// Query string extractor with the same 400 rendering as [`JsonBody`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(ServiceError))]
pub struct QueryParams<T>(pub T);

/// Adds `/health`, request tracing and permissive CORS to a service router.
pub fn service_router(routes: Router) -> Router {
    routes
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

pub async fn serve(app: Router, service_name: &str, port: u16) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("{} listening on http://0.0.0.0:{}", service_name, port);
    axum::serve(listener, app).await?;
    Ok(())
}
