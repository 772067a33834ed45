// Copyright (c) edamorph.dev 2025
// This file is licensed under the AGPL-3.0-or-later

//! Eager Arrow-native frames.

use std::sync::Arc;

use arrow::array::RecordBatch;
use arrow::datatypes::SchemaRef;
use arrow::error::ArrowError;

use crate::error::Result;

/// A table that is already a sequence of Arrow record batches, as produced
/// by the parquet and IPC readers.
#[derive(Debug)]
pub struct BatchFrame {
	schema: SchemaRef,
	batches: Vec<RecordBatch>,
}

impl BatchFrame {
	pub fn try_new(schema: SchemaRef, batches: Vec<RecordBatch>) -> Result<Self> {
		for batch in &batches {
			if batch.schema() != schema {
				return Err(ArrowError::SchemaError(format!(
					"batch schema {:?} does not match frame schema {:?}",
					batch.schema(),
					schema
				))
				.into());
			}
		}
		Ok(Self {
			schema,
			batches,
		})
	}

	pub fn schema(&self) -> SchemaRef {
		Arc::clone(&self.schema)
	}

	pub fn batches(&self) -> &[RecordBatch] {
		&self.batches
	}

	pub fn row_count(&self) -> usize {
		self.batches.iter().map(RecordBatch::num_rows).sum()
	}
}

#[cfg(test)]
mod tests {
	use arrow::array::{ArrayRef, Int64Array};
	use arrow::datatypes::{DataType, Field, Schema};

	use super::*;

	#[test]
	fn test_row_count_spans_batches() {
		let schema = Arc::new(Schema::new(vec![Field::new("v", DataType::Int64, true)]));
		let batch = |values: Vec<i64>| {
			let array: ArrayRef = Arc::new(Int64Array::from(values));
			RecordBatch::try_new(schema.clone(), vec![array]).unwrap()
		};
		let frame =
			BatchFrame::try_new(schema.clone(), vec![batch(vec![1, 2]), batch(vec![3])]).unwrap();
		assert_eq!(frame.row_count(), 3);
	}

	#[test]
	fn test_try_new_rejects_schema_mismatch() {
		let schema = Arc::new(Schema::new(vec![Field::new("v", DataType::Int64, true)]));
		let other = Arc::new(Schema::new(vec![Field::new("w", DataType::Int64, true)]));
		let array: ArrayRef = Arc::new(Int64Array::from(vec![1]));
		let batch = RecordBatch::try_new(other, vec![array]).unwrap();
		assert!(BatchFrame::try_new(schema, vec![batch]).is_err());
	}
}
