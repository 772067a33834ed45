// Copyright (c) edamorph.dev 2025
// This file is licensed under the AGPL-3.0-or-later

//! Converter for eager Arrow-native frames.

use std::ops::Range;

use arrow::array::RecordBatch;
use arrow::compute::concat_batches;

use super::{clamp, projected_schema, window_batches};
use crate::error::Result;
use crate::handle::BatchFrame;
use crate::table::CanonicalTable;

pub(crate) fn convert(
	frame: &BatchFrame,
	columns: Option<&[String]>,
	rows: Option<Range<usize>>,
) -> Result<CanonicalTable> {
	let (schema, indices) = projected_schema(&frame.schema(), columns)?;

	let (offset, take) = match &rows {
		Some(range) => clamp(range, frame.row_count()),
		None => (0, frame.row_count()),
	};
	let window = window_batches(frame.batches().iter().cloned().map(Ok), offset, take)?;
	let projected: Vec<RecordBatch> = window
		.into_iter()
		.map(|batch| Ok(batch.project(&indices)?))
		.collect::<Result<_>>()?;

	Ok(CanonicalTable::new(concat_batches(&schema, &projected)?))
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use arrow::array::{Array, ArrayRef, Int64Array};
	use arrow::datatypes::{DataType, Field, Schema, SchemaRef};

	use super::*;

	fn frame() -> BatchFrame {
		let schema: SchemaRef = Arc::new(Schema::new(vec![
			Field::new("v", DataType::Int64, true),
			Field::new("w", DataType::Int64, true),
		]));
		let batch = |values: Vec<i64>| {
			let doubled: Vec<i64> = values.iter().map(|v| v * 10).collect();
			let v: ArrayRef = Arc::new(Int64Array::from(values));
			let w: ArrayRef = Arc::new(Int64Array::from(doubled));
			RecordBatch::try_new(schema.clone(), vec![v, w]).unwrap()
		};
		BatchFrame::try_new(
			schema.clone(),
			vec![batch(vec![1, 2, 3]), batch(vec![4, 5]), batch(vec![6])],
		)
		.unwrap()
	}

	#[test]
	fn test_window_spans_batch_boundaries() {
		let table = convert(&frame(), None, Some(2..5)).unwrap();
		assert_eq!(table.num_rows(), 3);
		let v = table.batch().column(0);
		let v = v.as_any().downcast_ref::<Int64Array>().unwrap();
		assert_eq!(v.values(), &[3, 4, 5]);
	}

	#[test]
	fn test_column_subset_with_window() {
		let columns = vec!["w".to_string()];
		let table = convert(&frame(), Some(&columns), Some(4..6)).unwrap();
		assert_eq!(table.column_names(), vec!["w"]);
		let w = table.batch().column(0);
		let w = w.as_any().downcast_ref::<Int64Array>().unwrap();
		assert_eq!(w.values(), &[50, 60]);
	}

	#[test]
	fn test_range_past_the_end_yields_zero_rows() {
		let table = convert(&frame(), None, Some(17..40)).unwrap();
		assert_eq!(table.num_rows(), 0);
		assert_eq!(table.num_columns(), 2);
	}
}
