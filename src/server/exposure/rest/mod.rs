//! REST API exposure
//!
//! The REST exposure consumes a `ServerHost` and produces an Axum `Router`
//! with the record routes and health check under `/api`.

use super::super::host::ServerHost;
use crate::core::error::ApiError;
use crate::records::handlers::AppState;
use crate::server::router::build_record_routes;
use anyhow::Result;
use axum::{Json, Router, extract::State, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// Returns a router with:
    /// - `/api/health`
    /// - `/api/posts` record routes
    /// - custom routes
    /// - a JSON 404 fallback, also answering a wrong method on a known path
    /// - request tracing, and permissive CORS when enabled in config
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let state = host.app_state();

        let api = Self::health_routes(state.clone()).merge(build_record_routes(state));

        let mut app = Router::new().nest("/api", api);

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        app = app
            .fallback(Self::route_not_found)
            .method_not_allowed_fallback(Self::route_not_found);

        let app = if host.config.cors {
            app.layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive()),
            )
        } else {
            app.layer(TraceLayer::new_for_http())
        };

        Ok(app)
    }

    /// Build health check routes
    fn health_routes(state: AppState) -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .with_state(state)
    }

    /// Health check endpoint handler
    async fn health_check(State(state): State<AppState>) -> Json<Value> {
        let stats = state.records.stats().await;
        Json(json!({
            "status": "OK",
            "message": "Flagged Posts API is running",
            "timestamp": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            "database": {
                "totalPosts": stats.total_records
            }
        }))
    }

    async fn route_not_found() -> ApiError {
        ApiError::route_not_found()
    }
}
