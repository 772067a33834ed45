// Copyright (c) edamorph.dev 2025
// This file is licensed under the AGPL-3.0-or-later

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Upload size cap, applied to the whole request body.
const MAX_UPLOAD_BYTES: usize = 256 * 1024 * 1024;

/// Build the application router over the shared state.
pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(handlers::health))
		.route("/import", post(handlers::import))
		.route("/current_dataset", get(handlers::current_dataset))
		.route("/preview", get(handlers::preview))
		.route("/reset", post(handlers::reset))
		.layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}
