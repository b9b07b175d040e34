//! Password collection routes: `/passwords/*`
//!
//! Paths:
//! - `GET    /passwords` — list all entries
//! - `POST   /passwords` — create (backend assigns `id`), 201
//! - `GET    /passwords/{id}` — fetch one
//! - `PUT    /passwords/{id}` — full replace of non-id fields
//! - `DELETE /passwords/{id}` — delete, empty body
//!
//! A body `id` on `PUT` is ignored; the path id is authoritative.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use pwkeep_core::{Entry, EntryId, NewEntryBody};

use crate::error::AppError;
use crate::state::AppState;

/// Build the `/passwords` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_entries).post(create_entry))
        .route(
            "/{id}",
            get(get_entry).put(replace_entry).delete(delete_entry),
        )
}

// ── Handlers ─────────────────────────────────────────────────────────

async fn list_entries(State(state): State<Arc<AppState>>) -> Json<Vec<Entry>> {
    Json(state.store.list().await)
}

async fn create_entry(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewEntryBody>,
) -> Result<(StatusCode, Json<Entry>), AppError> {
    let entry = state.store.create(body).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn get_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EntryId>,
) -> Result<Json<Entry>, AppError> {
    Ok(Json(state.store.get(id).await?))
}

async fn replace_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EntryId>,
    Json(body): Json<NewEntryBody>,
) -> Result<Json<Entry>, AppError> {
    Ok(Json(state.store.replace(id, body).await?))
}

async fn delete_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EntryId>,
) -> Result<StatusCode, AppError> {
    state.store.delete(id).await?;
    Ok(StatusCode::OK)
}
