// Copyright (c) edamorph.dev 2025
// This file is licensed under the AGPL-3.0-or-later

//! Conversion of dataframe handles into canonical tables.
//!
//! [`to_canonical`] is the single dispatch choke point: it classifies the
//! handle via [`detect`] and forwards to the converter registered for the
//! tag. Adding a backend means adding one converter module and one detector
//! branch; call sites never change.
//!
//! Every converter honors the same contract:
//!
//! - `columns` restricts the result schema to exactly those columns, in
//!   caller order; an unknown name is an error.
//! - `rows` is a half-open range clamped to the table length; a range past
//!   the end yields zero rows, never an error.
//! - The input handle is never mutated; two concurrent conversions of the
//!   same handle cannot interfere.
//! - Lazy handles evaluate only what the request needs, pushing selection
//!   into the file reader where the format allows it.

mod batches;
mod columnar;
mod rows;
mod scan;
mod sql;

use std::ops::Range;
use std::sync::Arc;

use arrow::array::{ArrayRef, RecordBatch, RecordBatchOptions};
use arrow::datatypes::{Schema, SchemaRef};
use arrow::error::ArrowError;

use crate::error::{FrameError, Result};
use crate::handle::{BackendTag, DataframeHandle, detect};
use crate::table::CanonicalTable;

/// Convert any supported handle into a canonical table, optionally
/// restricted to a column subset and a half-open row range.
pub fn to_canonical(
	handle: &DataframeHandle,
	columns: Option<&[String]>,
	rows: Option<Range<usize>>,
) -> Result<CanonicalTable> {
	match (detect(handle), handle) {
		(BackendTag::Columnar, DataframeHandle::Columnar(frame)) => {
			columnar::convert(frame, columns, rows)
		}
		(BackendTag::Rows, DataframeHandle::Rows(frame)) => rows::convert(frame, columns, rows),
		(BackendTag::Arrow, DataframeHandle::Arrow(frame)) => {
			batches::convert(frame, columns, rows)
		}
		(BackendTag::OutOfCore, DataframeHandle::Scan(frame)) => {
			scan::convert(frame, columns, rows)
		}
		(BackendTag::Sql, DataframeHandle::Sql(frame)) => sql::convert(frame, columns, rows),
		(tag, _) => Err(FrameError::UnsupportedBackend {
			backend: tag.to_string(),
		}),
	}
}

/// Resolve requested column names against a schema, preserving caller
/// order.
pub(crate) fn resolve_columns(schema: &Schema, columns: &[String]) -> Result<Vec<usize>> {
	columns.iter()
		.map(|name| {
			schema.index_of(name).map_err(|_| FrameError::UnknownColumn {
				name: name.clone(),
			})
		})
		.collect()
}

/// Clamp a half-open row range to a table length, returning offset and
/// take count.
pub(crate) fn clamp(rows: &Range<usize>, len: usize) -> (usize, usize) {
	let start = rows.start.min(len);
	let stop = rows.end.min(len).max(start);
	(start, stop - start)
}

/// Build a record batch with an explicit row count, so zero-column
/// projections still carry their length.
pub(crate) fn batch_from(
	schema: SchemaRef,
	arrays: Vec<ArrayRef>,
	row_count: usize,
) -> Result<RecordBatch> {
	let options = RecordBatchOptions::new().with_row_count(Some(row_count));
	Ok(RecordBatch::try_new_with_options(schema, arrays, &options)?)
}

/// Cut the `[offset, offset + take)` window out of a batch sequence with
/// zero-copy slices.
pub(crate) fn window_batches<I>(batches: I, mut offset: usize, mut take: usize) -> Result<Vec<RecordBatch>>
where
	I: IntoIterator<Item = std::result::Result<RecordBatch, ArrowError>>,
{
	let mut out = Vec::new();
	for batch in batches {
		let batch = batch?;
		if take == 0 {
			break;
		}
		let rows = batch.num_rows();
		if offset >= rows {
			offset -= rows;
			continue;
		}
		let sliced = take.min(rows - offset);
		out.push(batch.slice(offset, sliced));
		offset = 0;
		take -= sliced;
	}
	Ok(out)
}

/// Re-project a batch into caller column order. File readers may hand back
/// selected columns in file order; this makes the result order canonical.
pub(crate) fn reorder_columns(
	batch: RecordBatch,
	columns: Option<&[String]>,
) -> Result<RecordBatch> {
	let Some(names) = columns else {
		return Ok(batch);
	};
	let schema = batch.schema();
	let indices = resolve_columns(&schema, names)?;
	Ok(batch.project(&indices)?)
}

/// Projected schema for a column request, or the full schema when no
/// subset was asked for.
pub(crate) fn projected_schema(
	schema: &SchemaRef,
	columns: Option<&[String]>,
) -> Result<(SchemaRef, Vec<usize>)> {
	match columns {
		Some(names) => {
			let indices = resolve_columns(schema, names)?;
			Ok((Arc::new(schema.project(&indices)?), indices))
		}
		None => {
			let indices = (0..schema.fields().len()).collect();
			Ok((Arc::clone(schema), indices))
		}
	}
}
