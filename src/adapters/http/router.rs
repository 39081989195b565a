//! Application router: API routes, static frontend and HTTP middleware.

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::payment::{payment_routes, PaymentAppState};

/// Build the complete application router.
///
/// API routes take precedence; every other path is served from
/// `server.static_dir`, falling back to its `index.html`.
pub fn app_router(state: PaymentAppState, server: &ServerConfig) -> Router {
    let index = server.static_dir.join("index.html");
    let static_files = ServeDir::new(&server.static_dir).fallback(ServeFile::new(index));

    payment_routes()
        .fallback_service(static_files)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(server))
                .layer(TimeoutLayer::new(server.request_timeout())),
        )
        .with_state(state)
}

/// CORS policy: any origin unless `cors_origins` lists specific ones.
pub fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins = server.cors_origins_list();
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}
