// Copyright (c) edamorph.dev 2025
// This file is licensed under the AGPL-3.0-or-later

//! Converter for deferred file scans.
//!
//! Evaluation is bounded by the request: column projection and row bounds
//! are pushed into the csv, parquet and IPC readers, so a small preview of
//! a large file decodes only what the preview needs.

use std::fs::File;
use std::ops::Range;

use arrow::array::RecordBatch;
use arrow::compute::concat_batches;
use arrow::csv;
use arrow::ipc::reader::FileReader;
use parquet::arrow::ProjectionMask;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::{projected_schema, reorder_columns, window_batches};
use crate::error::Result;
use crate::handle::scan::csv_format;
use crate::handle::{ScanFormat, ScanFrame};
use crate::table::CanonicalTable;

const SCAN_BATCH_SIZE: usize = 8192;

pub(crate) fn convert(
	frame: &ScanFrame,
	columns: Option<&[String]>,
	rows: Option<Range<usize>>,
) -> Result<CanonicalTable> {
	match frame.format() {
		ScanFormat::Csv {
			delimiter,
		} => scan_csv(frame, delimiter, columns, rows),
		ScanFormat::Parquet => scan_parquet(frame, columns, rows),
		ScanFormat::Ipc => scan_ipc(frame, columns, rows),
	}
}

fn scan_csv(
	frame: &ScanFrame,
	delimiter: u8,
	columns: Option<&[String]>,
	rows: Option<Range<usize>>,
) -> Result<CanonicalTable> {
	let schema = frame.schema()?;
	let (projected, indices) = projected_schema(&schema, columns)?;

	let mut builder = csv::ReaderBuilder::new(schema)
		.with_format(csv_format(delimiter))
		.with_batch_size(SCAN_BATCH_SIZE)
		.with_projection(indices);
	if let Some(range) = &rows {
		builder = builder.with_bounds(range.start, range.end);
	}
	let reader = builder.build(File::open(frame.path())?)?;
	let batches: Vec<RecordBatch> = reader.collect::<std::result::Result<_, _>>()?;

	let merged = concat_batches(&projected, &batches)?;
	Ok(CanonicalTable::new(reorder_columns(merged, columns)?))
}

fn scan_parquet(
	frame: &ScanFrame,
	columns: Option<&[String]>,
	rows: Option<Range<usize>>,
) -> Result<CanonicalTable> {
	let file = File::open(frame.path())?;
	let mut builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
	let schema = builder.schema().clone();
	let (projected, indices) = projected_schema(&schema, columns)?;

	if columns.is_some() {
		let mask = ProjectionMask::roots(builder.parquet_schema(), indices.iter().copied());
		builder = builder.with_projection(mask);
	}
	if let Some(range) = &rows {
		builder = builder
			.with_offset(range.start)
			.with_limit(range.end.saturating_sub(range.start));
	}
	let reader = builder.with_batch_size(SCAN_BATCH_SIZE).build()?;
	let batches: Vec<RecordBatch> = reader.collect::<std::result::Result<_, _>>()?;

	// The mask keeps file column order; concat against whatever the
	// reader produced, then restore caller order.
	let read_schema = batches.first().map(RecordBatch::schema).unwrap_or(projected);
	let merged = concat_batches(&read_schema, &batches)?;
	Ok(CanonicalTable::new(reorder_columns(merged, columns)?))
}

fn scan_ipc(
	frame: &ScanFrame,
	columns: Option<&[String]>,
	rows: Option<Range<usize>>,
) -> Result<CanonicalTable> {
	let schema = frame.schema()?;
	let (projected, indices) = projected_schema(&schema, columns)?;

	let reader = FileReader::try_new(File::open(frame.path())?, Some(indices))?;
	let batches = match &rows {
		Some(range) => {
			let take = range.end.saturating_sub(range.start);
			window_batches(reader, range.start, take)?
		}
		None => reader.collect::<std::result::Result<_, _>>()?,
	};

	let merged = concat_batches(&projected, &batches)?;
	Ok(CanonicalTable::new(reorder_columns(merged, columns)?))
}
