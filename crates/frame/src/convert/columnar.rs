// Copyright (c) edamorph.dev 2025
// This file is licensed under the AGPL-3.0-or-later

//! Converter for eager column-oriented frames.

use std::ops::Range;

use arrow::array::ArrayRef;

use super::{batch_from, clamp, projected_schema};
use crate::error::Result;
use crate::handle::ColumnarFrame;
use crate::table::CanonicalTable;

pub(crate) fn convert(
	frame: &ColumnarFrame,
	columns: Option<&[String]>,
	rows: Option<Range<usize>>,
) -> Result<CanonicalTable> {
	let (schema, indices) = projected_schema(&frame.schema(), columns)?;
	let selected: Vec<ArrayRef> =
		indices.iter().map(|&index| frame.columns()[index].clone()).collect();

	let (offset, take) = match &rows {
		Some(range) => clamp(range, frame.row_count()),
		None => (0, frame.row_count()),
	};
	// Slices are views over the shared buffers; the frame stays untouched.
	let sliced: Vec<ArrayRef> =
		selected.iter().map(|array| array.slice(offset, take)).collect();

	Ok(CanonicalTable::new(batch_from(schema, sliced, take)?))
}
