// Copyright (c) edamorph.dev 2025
// This file is licensed under the AGPL-3.0-or-later

//! HTTP error handling and response formatting.
//!
//! This module provides error types that implement Axum's `IntoResponse`
//! trait for consistent error responses across all endpoints.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use edamorph_frame::FrameError;
use edamorph_ingest::IngestError;
use serde::Serialize;

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
	/// Human-readable error message.
	pub error: String,
	/// Machine-readable error code.
	pub code: String,
}

impl ErrorResponse {
	pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
		Self {
			code: code.into(),
			error: error.into(),
		}
	}
}

/// Application error type that converts to HTTP responses.
#[derive(Debug)]
pub enum AppError {
	/// Upload rejection or decode failure.
	Ingest(IngestError),
	/// Conversion failure.
	Frame(FrameError),
	/// Request parsing error.
	BadRequest(String),
	/// Internal server error.
	Internal(String),
}

impl From<IngestError> for AppError {
	fn from(e: IngestError) -> Self {
		AppError::Ingest(e)
	}
}

impl From<FrameError> for AppError {
	fn from(e: FrameError) -> Self {
		AppError::Frame(e)
	}
}

impl std::fmt::Display for AppError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			AppError::Ingest(e) => write!(f, "Ingestion error: {}", e),
			AppError::Frame(e) => write!(f, "Conversion error: {}", e),
			AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
			AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
		}
	}
}

impl std::error::Error for AppError {}

impl AppError {
	fn status_and_code(&self) -> (StatusCode, &'static str) {
		match self {
			AppError::Ingest(IngestError::UnsupportedFileType { .. }) => {
				(StatusCode::UNSUPPORTED_MEDIA_TYPE, "UNSUPPORTED_FILE_TYPE")
			}
			AppError::Ingest(IngestError::ImportFailed { .. }) => {
				(StatusCode::UNPROCESSABLE_ENTITY, "IMPORT_FAILED")
			}
			AppError::Frame(FrameError::UnknownColumn { .. }) => {
				(StatusCode::BAD_REQUEST, "UNKNOWN_COLUMN")
			}
			AppError::Frame(FrameError::UnsupportedBackend { .. }) => {
				(StatusCode::BAD_REQUEST, "UNSUPPORTED_BACKEND")
			}
			AppError::Frame(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
			AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
			AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
		}
	}
}

impl IntoResponse for AppError {
	fn into_response(self) -> Response {
		let (status, code) = self.status_and_code();
		if status.is_server_error() {
			tracing::error!(error = %self, "request failed");
		} else {
			tracing::debug!(error = %self, "request rejected");
		}
		(status, Json(ErrorResponse::new(code, self.to_string()))).into_response()
	}
}
