// Copyright (c) edamorph.dev 2025
// This file is licensed under the AGPL-3.0-or-later

//! Eager column-oriented frames.

use std::sync::Arc;

use arrow::array::{ArrayRef, RecordBatch};
use arrow::compute::concat_batches;
use arrow::datatypes::SchemaRef;

use crate::error::{FrameError, Result};

/// A fully materialized table stored as one array per column.
///
/// Arrays are reference counted, so converters slice and project without
/// copying and without mutating the frame.
#[derive(Debug)]
pub struct ColumnarFrame {
	schema: SchemaRef,
	columns: Vec<ArrayRef>,
}

impl ColumnarFrame {
	pub fn try_new(schema: SchemaRef, columns: Vec<ArrayRef>) -> Result<Self> {
		if columns.len() != schema.fields().len() {
			return Err(FrameError::ColumnLength {
				column: String::from("<frame>"),
				actual: columns.len(),
				expected: schema.fields().len(),
			});
		}
		let expected = columns.first().map_or(0, |column| column.len());
		for (field, column) in schema.fields().iter().zip(&columns) {
			if column.len() != expected {
				return Err(FrameError::ColumnLength {
					column: field.name().clone(),
					actual: column.len(),
					expected,
				});
			}
			if column.data_type() != field.data_type() {
				return Err(FrameError::ValueType {
					column: field.name().clone(),
					expected: format!("{:?}", field.data_type()),
				});
			}
		}
		Ok(Self {
			schema,
			columns,
		})
	}

	/// Collapse record batches into one contiguous array per column.
	pub fn from_batches(schema: SchemaRef, batches: &[RecordBatch]) -> Result<Self> {
		let merged = concat_batches(&schema, batches)?;
		Ok(Self {
			schema,
			columns: merged.columns().to_vec(),
		})
	}

	pub fn schema(&self) -> SchemaRef {
		Arc::clone(&self.schema)
	}

	pub fn columns(&self) -> &[ArrayRef] {
		&self.columns
	}

	pub fn row_count(&self) -> usize {
		self.columns.first().map_or(0, |column| column.len())
	}
}

#[cfg(test)]
mod tests {
	use arrow::array::{Int64Array, StringArray};
	use arrow::datatypes::{DataType, Field, Schema};

	use super::*;

	fn schema() -> SchemaRef {
		Arc::new(Schema::new(vec![
			Field::new("id", DataType::Int64, true),
			Field::new("name", DataType::Utf8, true),
		]))
	}

	#[test]
	fn test_try_new_accepts_matching_columns() {
		let ids: ArrayRef = Arc::new(Int64Array::from(vec![1, 2]));
		let names: ArrayRef = Arc::new(StringArray::from(vec!["a", "b"]));
		let frame = ColumnarFrame::try_new(schema(), vec![ids, names]).unwrap();
		assert_eq!(frame.row_count(), 2);
	}

	#[test]
	fn test_try_new_rejects_length_mismatch() {
		let ids: ArrayRef = Arc::new(Int64Array::from(vec![1, 2]));
		let names: ArrayRef = Arc::new(StringArray::from(vec!["a"]));
		let err = ColumnarFrame::try_new(schema(), vec![ids, names]).unwrap_err();
		assert!(matches!(err, FrameError::ColumnLength { .. }));
	}

	#[test]
	fn test_try_new_rejects_type_mismatch() {
		let ids: ArrayRef = Arc::new(StringArray::from(vec!["1", "2"]));
		let names: ArrayRef = Arc::new(StringArray::from(vec!["a", "b"]));
		let err = ColumnarFrame::try_new(schema(), vec![ids, names]).unwrap_err();
		assert!(matches!(err, FrameError::ValueType { .. }));
	}
}
