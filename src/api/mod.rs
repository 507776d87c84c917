//! HTTP surface: route composition, authentication, and API docs.
//!
//! The streaming and call endpoints sit behind the shared-secret guard;
//! the health endpoint and the (optional) Swagger UI stay open. Endpoint
//! paths come from configuration and are not protocol-significant.

pub mod auth;
pub mod handlers;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;
use crate::config::GatewayConfig;
use crate::stream::handler::stream_handler;

/// OpenAPI document for the REST endpoints.
///
/// The streaming endpoint is intentionally absent: SSE does not fit the
/// request/response schema model.
#[derive(Debug, OpenApi)]
#[openapi(
    paths(handlers::call::call_handler, handlers::system::health_handler),
    components(schemas(
        crate::protocol::CallRequest,
        crate::protocol::CallAccepted,
        crate::error::ErrorResponse,
        crate::error::ErrorBody,
        crate::weather::LocationMatch,
        crate::weather::CompleteForecast,
        crate::weather::CurrentConditions,
        crate::weather::HourlyForecast,
        crate::weather::DailyForecast,
    )),
    tags(
        (name = "Calls", description = "Out-of-band calls correlated to streaming sessions"),
        (name = "System", description = "Health and service metadata"),
    )
)]
pub struct ApiDoc;

/// Builds the complete router: guarded stream + call endpoints, open
/// system routes, and the Swagger UI when the feature is enabled.
pub fn build_router(config: &GatewayConfig, state: AppState) -> Router {
    let guarded = Router::new()
        .route(&config.stream_path, get(stream_handler))
        .route(&config.call_path, post(handlers::call::call_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_shared_secret,
        ));

    let router = Router::new()
        .merge(guarded)
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
