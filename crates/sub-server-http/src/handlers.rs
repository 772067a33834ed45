// Copyright (c) edamorph.dev 2025
// This file is licensed under the AGPL-3.0-or-later

//! Request handlers for the EdaMorph HTTP endpoints.

use std::collections::BTreeMap;
use std::ops::Range;

use arrow::datatypes::SchemaRef;
use axum::Json;
use axum::extract::{Multipart, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use bytes::Bytes;
use edamorph_frame::{ARROW_STREAM_CONTENT_TYPE, detect, empty_stream, preview_stream};
use edamorph_ingest::{Ingested, ingest};
use edamorph_session::Dataset;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
	pub status: &'static str,
}

/// `GET /health` - liveness check, no session access.
pub async fn health() -> Json<HealthResponse> {
	Json(HealthResponse {
		status: "ok",
	})
}

#[derive(Debug, Deserialize)]
pub struct ImportQuery {
	/// Spill the upload and defer decoding instead of decoding eagerly.
	#[serde(default)]
	pub lazy: Option<bool>,
}

/// Metadata of a freshly imported dataset.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
	pub success: bool,
	pub name: String,
	pub backend: String,
	pub lazy: bool,
	/// `null` when the handle is lazy and counting would force evaluation.
	pub rows: Option<usize>,
	pub columns: usize,
}

/// `POST /import` - multipart upload replacing the session dataset.
///
/// The session slot is only written after the upload decodes successfully,
/// so a rejected or failed import leaves the previous dataset in place.
pub async fn import(
	State(state): State<AppState>,
	Query(query): Query<ImportQuery>,
	mut multipart: Multipart,
) -> Result<Json<ImportResponse>, AppError> {
	let mut upload: Option<(String, Bytes)> = None;
	let mut lazy = query.lazy.unwrap_or(false);

	while let Some(field) =
		multipart.next_field().await.map_err(|e| AppError::BadRequest(e.to_string()))?
	{
		match field.name() {
			Some("file") => {
				let file_name = field
					.file_name()
					.ok_or_else(|| {
						AppError::BadRequest(
							"file field carries no file name".to_string(),
						)
					})?
					.to_string();
				let bytes = field
					.bytes()
					.await
					.map_err(|e| AppError::BadRequest(e.to_string()))?;
				upload = Some((file_name, bytes));
			}
			Some("lazy") => {
				let text = field
					.text()
					.await
					.map_err(|e| AppError::BadRequest(e.to_string()))?;
				lazy = matches!(text.as_str(), "true" | "1" | "on");
			}
			_ => {}
		}
	}

	let (file_name, bytes) =
		upload.ok_or_else(|| AppError::BadRequest("missing file field".to_string()))?;

	let decode_name = file_name.clone();
	let (ingested, schema) = tokio::task::spawn_blocking(
		move || -> Result<(Ingested, SchemaRef), AppError> {
			let ingested = ingest(&decode_name, bytes, lazy)?;
			let schema = ingested.handle.schema()?;
			Ok((ingested, schema))
		},
	)
	.await
	.map_err(|e| AppError::Internal(e.to_string()))??;

	let backend = detect(&ingested.handle).to_string();
	let rows = ingested.handle.row_count();
	let dataset = Dataset::new(ingested.handle, file_name, Some("upload".to_string()));
	tracing::info!(
		name = %dataset.name,
		%backend,
		lazy = dataset.lazy,
		rows,
		"dataset imported"
	);

	let response = ImportResponse {
		success: true,
		name: dataset.name.clone(),
		backend,
		lazy: dataset.lazy,
		rows,
		columns: schema.fields().len(),
	};
	state.session.set(dataset);
	Ok(Json(response))
}

/// Metadata of the currently loaded dataset.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DatasetResponse {
	Loaded {
		loaded: bool,
		name: String,
		source: Option<String>,
		backend: String,
		lazy: bool,
		/// `null` for lazy and SQL handles; counting would evaluate them.
		rows: Option<usize>,
		columns: usize,
		dtypes: BTreeMap<String, String>,
	},
	Empty {
		loaded: bool,
	},
}

/// `GET /current_dataset` - metadata of the loaded dataset, or
/// `{"loaded": false}` when the slot is empty.
pub async fn current_dataset(
	State(state): State<AppState>,
) -> Result<Json<DatasetResponse>, AppError> {
	let Some(dataset) = state.session.get() else {
		return Ok(Json(DatasetResponse::Empty {
			loaded: false,
		}));
	};

	// Lazy schemas read file metadata, so keep this off the runtime.
	let handle = dataset.handle.clone();
	let schema = tokio::task::spawn_blocking(move || handle.schema())
		.await
		.map_err(|e| AppError::Internal(e.to_string()))??;

	let dtypes = schema
		.fields()
		.iter()
		.map(|field| (field.name().clone(), field.data_type().to_string()))
		.collect();
	Ok(Json(DatasetResponse::Loaded {
		loaded: true,
		name: dataset.name,
		source: dataset.source,
		backend: detect(&dataset.handle).to_string(),
		lazy: dataset.lazy,
		rows: dataset.handle.row_count(),
		columns: schema.fields().len(),
		dtypes,
	}))
}

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
	/// Number of leading rows to stream.
	pub rows: Option<usize>,
	/// Comma-separated column subset, served in the order given.
	pub columns: Option<String>,
}

/// `GET /preview` - the loaded dataset as an Arrow IPC stream.
///
/// Always responds 200 with a decodable stream; an empty slot or a failed
/// conversion both produce an empty-schema stream.
pub async fn preview(
	State(state): State<AppState>,
	Query(query): Query<PreviewQuery>,
) -> impl IntoResponse {
	let columns: Option<Vec<String>> = query.columns.map(|raw| {
		raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
	});
	let rows: Option<Range<usize>> = query.rows.map(|n| 0..n);
	let snapshot = state.session.get();
	let default_rows = state.preview_default_rows;

	let bytes = tokio::task::spawn_blocking(move || {
		preview_stream(
			snapshot.as_ref().map(|dataset| dataset.handle.as_ref()),
			columns.as_deref(),
			rows,
			default_rows,
		)
	})
	.await
	.unwrap_or_else(|e| {
		tracing::error!(error = %e, "preview task failed, serving empty stream");
		empty_stream()
	});

	([(header::CONTENT_TYPE, ARROW_STREAM_CONTENT_TYPE)], bytes)
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
	pub status: &'static str,
}

/// `POST /reset` - empty the session slot.
pub async fn reset(State(state): State<AppState>) -> Json<ResetResponse> {
	state.session.clear();
	tracing::info!("session reset");
	Json(ResetResponse {
		status: "reset",
	})
}
