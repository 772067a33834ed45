// Copyright (c) edamorph.dev 2025
// This file is licensed under the AGPL-3.0-or-later

//! Arrow IPC preview streaming.
//!
//! The preview surface is best-effort: whatever goes wrong inside the
//! conversion, the caller always receives a valid, independently decodable
//! IPC stream. Failures are logged and degrade to the same empty stream an
//! unloaded session produces.

use std::ops::Range;

use arrow::datatypes::Schema;
use arrow::ipc::writer::StreamWriter;

use crate::convert::to_canonical;
use crate::error::Result;
use crate::handle::DataframeHandle;

/// Content type of the preview wire format.
pub const ARROW_STREAM_CONTENT_TYPE: &str = "application/vnd.apache.arrow.stream";

/// Rows served when the caller does not bound the preview.
pub const DEFAULT_PREVIEW_ROWS: usize = 100;

/// Encode a preview of `handle` as an Arrow IPC stream: one schema header
/// followed by at most one record batch.
///
/// With no handle the result is an empty-schema stream, and `rows` defaults
/// to `[0, default_rows)` when absent. This function never fails; see the
/// module docs for the degradation policy.
pub fn preview_stream(
	handle: Option<&DataframeHandle>,
	columns: Option<&[String]>,
	rows: Option<Range<usize>>,
	default_rows: usize,
) -> Vec<u8> {
	let Some(handle) = handle else {
		return empty_stream();
	};
	let window = rows.unwrap_or(0..default_rows);
	match encode(handle, columns, window) {
		Ok(bytes) => bytes,
		Err(error) => {
			tracing::warn!(%error, "arrow preview export failed, serving empty stream");
			empty_stream()
		}
	}
}

fn encode(
	handle: &DataframeHandle,
	columns: Option<&[String]>,
	rows: Range<usize>,
) -> Result<Vec<u8>> {
	let table = to_canonical(handle, columns, Some(rows))?;
	let mut writer = StreamWriter::try_new(Vec::new(), table.schema().as_ref())?;
	if table.num_rows() > 0 {
		writer.write(table.batch())?;
	}
	writer.finish()?;
	Ok(writer.into_inner()?)
}

/// A decodable stream carrying an empty schema and no batches.
pub fn empty_stream() -> Vec<u8> {
	match encode_empty() {
		Ok(bytes) => bytes,
		Err(error) => {
			tracing::error!(%error, "failed to encode the empty arrow stream");
			Vec::new()
		}
	}
}

fn encode_empty() -> Result<Vec<u8>> {
	let mut writer = StreamWriter::try_new(Vec::new(), &Schema::empty())?;
	writer.finish()?;
	Ok(writer.into_inner()?)
}
