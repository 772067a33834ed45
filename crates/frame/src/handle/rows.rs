// Copyright (c) edamorph.dev 2025
// This file is licensed under the AGPL-3.0-or-later

//! Eager row-oriented frames.
//!
//! The row-native backend holds records the way row-major engines do: a
//! vector of rows, each a vector of loosely typed cells. The converter
//! pivots the requested window into Arrow columns on demand.

use std::sync::Arc;

use arrow::datatypes::{DataType, SchemaRef};

use crate::error::{FrameError, Result};

/// One loosely typed value inside a row-native frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	Str(String),
}

/// A fully materialized row-major table.
#[derive(Debug)]
pub struct RowFrame {
	schema: SchemaRef,
	rows: Vec<Vec<Cell>>,
}

impl RowFrame {
	/// Columns may be `Boolean`, `Int64`, `Float64` or `Utf8`; every row
	/// must carry one cell per column.
	pub fn try_new(schema: SchemaRef, rows: Vec<Vec<Cell>>) -> Result<Self> {
		for field in schema.fields() {
			match field.data_type() {
				DataType::Boolean
				| DataType::Int64
				| DataType::Float64
				| DataType::Utf8 => {}
				other => {
					return Err(FrameError::UnsupportedType(format!("{:?}", other)));
				}
			}
		}
		let width = schema.fields().len();
		for (index, row) in rows.iter().enumerate() {
			if row.len() != width {
				return Err(FrameError::ColumnLength {
					column: format!("<row {}>", index),
					actual: row.len(),
					expected: width,
				});
			}
		}
		Ok(Self {
			schema,
			rows,
		})
	}

	pub fn schema(&self) -> SchemaRef {
		Arc::clone(&self.schema)
	}

	pub fn rows(&self) -> &[Vec<Cell>] {
		&self.rows
	}

	pub fn row_count(&self) -> usize {
		self.rows.len()
	}
}

#[cfg(test)]
mod tests {
	use arrow::datatypes::{Field, Schema};

	use super::*;

	#[test]
	fn test_try_new_rejects_ragged_rows() {
		let schema = Arc::new(Schema::new(vec![
			Field::new("a", DataType::Int64, true),
			Field::new("b", DataType::Utf8, true),
		]));
		let rows = vec![vec![Cell::Int(1), Cell::Str("x".into())], vec![Cell::Int(2)]];
		let err = RowFrame::try_new(schema, rows).unwrap_err();
		assert!(matches!(err, FrameError::ColumnLength { .. }));
	}

	#[test]
	fn test_try_new_rejects_unsupported_declared_type() {
		let schema = Arc::new(Schema::new(vec![Field::new("a", DataType::Date32, true)]));
		let err = RowFrame::try_new(schema, Vec::new()).unwrap_err();
		assert!(matches!(err, FrameError::UnsupportedType(_)));
	}
}
