use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRequest, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use tracing::info;

use crate::error::ApiError;
use crate::model::{CreateHighlight, Highlight, ReorderHighlights, StatusResponse, UpdateHighlight};
use crate::store::HighlightStore;

/// `Json` whose rejections go through `ApiError`, so a bad body still gets a
/// `{message}` response.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<HighlightStore>,
}

impl AppState {
    pub fn new(store: HighlightStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

pub async fn healthcheck() -> impl IntoResponse {
    info!("got healthcheck request");
    Json(StatusResponse {
        status: "ok".to_string(),
    })
}

pub async fn list_highlights(State(state): State<AppState>) -> Result<Json<Vec<Highlight>>, ApiError> {
    let highlights = state.store.list()?;
    Ok(Json(highlights))
}

pub async fn create_highlight(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateHighlight>,
) -> Result<Response, ApiError> {
    let highlight = state.store.add(payload.text)?;
    Ok((StatusCode::CREATED, Json(highlight)).into_response())
}

pub async fn update_highlight(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateHighlight>,
) -> Result<Json<Highlight>, ApiError> {
    let highlight = state.store.update(&id, payload.text)?;
    Ok(Json(highlight))
}

pub async fn delete_highlight(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    state.store.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reorder_highlights(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ReorderHighlights>,
) -> Result<Json<Vec<Highlight>>, ApiError> {
    let highlights = state.store.reorder(payload.reordered_highlights)?;
    Ok(Json(highlights))
}
