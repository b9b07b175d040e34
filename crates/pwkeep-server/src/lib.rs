//! `pwkeep` development backend.
//!
//! Serves the `/passwords` JSON collection the `pwkeep` client talks to:
//! list, fetch, create (backend-assigned ids), full replace, and delete.
//! Entries live in memory and can optionally be mirrored to a JSON file.
//!
//! The backend stores whatever `encryptedPassword` it is given; encoding is
//! the client's job.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router with tracing and CORS layers.
pub fn app(state: Arc<AppState>) -> Router {
    // Browser front-ends are usually served from another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .nest("/passwords", routes::passwords::router())
        .merge(routes::health::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
