use std::any::Any;

use axum::{
    Router,
    http::{Method, StatusCode},
    response::Response,
    routing::{get, post, put},
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::{INTERNAL_ERROR_MESSAGE, error_response};
use crate::handler::{
    AppState, create_highlight, delete_highlight, healthcheck, list_highlights, reorder_highlights,
    update_highlight,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/highlights", get(list_highlights))
        .route("/highlights", post(create_highlight))
        .route("/highlights/reorder", post(reorder_highlights))
        .route("/highlights/:id", put(update_highlight).delete(delete_highlight))
}

/// The full service: `/api` routes plus the health check, with state applied.
pub fn app(state: AppState) -> Router {
    let router = Router::new()
        .route("/", get(healthcheck))
        .nest("/api", routes())
        .with_state(state);

    with_middleware(router)
}

pub fn with_middleware(router: Router) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(cors::Any);

    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(panic = %detail, "handler panicked");

    error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
}
