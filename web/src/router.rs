//! Router configuration.

use crate::error::AppError;
use crate::handlers::{admin, events, health, registrations};
use crate::middleware::correlation_id_layer;
use crate::state::AppState;
use axum::{
    Router,
    http::{
        HeaderName, HeaderValue, Method, Uri,
        header::{AUTHORIZATION, CONTENT_TYPE, InvalidHeaderValue},
    },
    routing::{get, post, put},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the complete Axum router.
///
/// Routes:
/// - `/health`, `/ready` (no auth)
/// - `/api/events`, `/api/registrations` (public)
/// - `/api/admin/...` (admin token)
///
/// Layers, outermost first: correlation id, CORS, request tracing.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let admin_routes = Router::new()
        .route("/events", post(admin::create_event))
        .route(
            "/events/:id",
            put(admin::update_event).delete(admin::delete_event),
        )
        .route("/events/:id/registrations", get(admin::event_registrations));

    let api_routes = Router::new()
        .route("/events", get(events::list_events))
        .route("/events/:id", get(events::get_event))
        .route(
            "/registrations",
            get(registrations::list_registrations).post(registrations::create_registration),
        )
        .route("/registrations/:id", get(registrations::get_registration))
        .nest("/admin", admin_routes);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/api", api_routes)
        .fallback(route_not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(correlation_id_layer())
}

/// Build the CORS layer.
///
/// With no origin configured any origin is allowed.
///
/// # Errors
///
/// Returns an error if `allowed_origin` is not a valid header value.
pub fn cors_layer(allowed_origin: Option<&str>) -> Result<CorsLayer, InvalidHeaderValue> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            CONTENT_TYPE,
            AUTHORIZATION,
            HeaderName::from_static("x-correlation-id"),
        ])
        .expose_headers([HeaderName::from_static("x-correlation-id")]);

    match allowed_origin {
        Some(origin) => Ok(layer.allow_origin(HeaderValue::from_str(origin)?)),
        None => Ok(layer.allow_origin(Any)),
    }
}

#[allow(clippy::unused_async)]
async fn route_not_found(uri: Uri) -> AppError {
    AppError::not_found("Route", uri.path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_accepts_valid_origin() {
        assert!(cors_layer(Some("https://fest.example.org")).is_ok());
        assert!(cors_layer(None).is_ok());
    }

    #[test]
    fn cors_rejects_invalid_origin() {
        assert!(cors_layer(Some("bad\norigin")).is_err());
    }
}
