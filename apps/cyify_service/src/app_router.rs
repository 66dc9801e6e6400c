use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
    app_module::AppState, health::health_controller, session::session_controller::session_router,
};

pub fn application_router() -> Router {
    Router::new()
        .route("/v1/health", get(health_controller::health))
        .merge(session_router())
}

/// The router with tracing and shared state attached, ready to serve.
pub fn application(state: AppState) -> Router {
    Router::new().merge(application_router()).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(Extension(state))
            .into_inner(),
    )
}
