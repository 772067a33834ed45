// Copyright (c) edamorph.dev 2025
// This file is licensed under the AGPL-3.0-or-later

//! HTTP surface of the EdaMorph workspace.
//!
//! An Axum router over the session slot: uploads are ingested into the slot,
//! dataset metadata is served as JSON, and previews are served as Arrow IPC
//! streams. Conversion work runs on the blocking pool so the handlers never
//! stall the runtime.
//!
//! # Endpoints
//!
//! - `GET /health` - liveness check
//! - `POST /import` - multipart file upload replacing the session dataset
//! - `GET /current_dataset` - metadata of the loaded dataset
//! - `GET /preview` - Arrow IPC stream preview of the loaded dataset
//! - `POST /reset` - empty the session slot

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::HttpConfig;
pub use error::{AppError, ErrorResponse};
pub use routes::router;
pub use state::AppState;
