// Copyright (c) edamorph.dev 2025
// This file is licensed under the AGPL-3.0-or-later

//! Converter for eager row-oriented frames.
//!
//! Pivots the requested row window into Arrow columns. Only the window is
//! materialized: selection happens before any builder sees a cell.

use std::ops::Range;
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanBuilder, Float64Builder, Int64Builder, StringBuilder};
use arrow::datatypes::{DataType, Field};

use super::{batch_from, clamp, projected_schema};
use crate::error::{FrameError, Result};
use crate::handle::{Cell, RowFrame};
use crate::table::CanonicalTable;

pub(crate) fn convert(
	frame: &RowFrame,
	columns: Option<&[String]>,
	rows: Option<Range<usize>>,
) -> Result<CanonicalTable> {
	let (schema, indices) = projected_schema(&frame.schema(), columns)?;
	let (offset, take) = match &rows {
		Some(range) => clamp(range, frame.row_count()),
		None => (0, frame.row_count()),
	};
	let window = &frame.rows()[offset..offset + take];

	let arrays: Vec<ArrayRef> = indices
		.iter()
		.zip(schema.fields())
		.map(|(&index, field)| build_column(field.as_ref(), window, index))
		.collect::<Result<_>>()?;

	Ok(CanonicalTable::new(batch_from(schema, arrays, take)?))
}

fn build_column(field: &Field, window: &[Vec<Cell>], index: usize) -> Result<ArrayRef> {
	match field.data_type() {
		DataType::Int64 => {
			let mut builder = Int64Builder::with_capacity(window.len());
			for row in window {
				match &row[index] {
					Cell::Null => builder.append_null(),
					Cell::Int(value) => builder.append_value(*value),
					_ => return Err(value_type(field)),
				}
			}
			Ok(Arc::new(builder.finish()))
		}
		DataType::Float64 => {
			let mut builder = Float64Builder::with_capacity(window.len());
			for row in window {
				match &row[index] {
					Cell::Null => builder.append_null(),
					Cell::Float(value) => builder.append_value(*value),
					// integer cells are accepted in Float64 columns
					Cell::Int(value) => builder.append_value(*value as f64),
					_ => return Err(value_type(field)),
				}
			}
			Ok(Arc::new(builder.finish()))
		}
		DataType::Boolean => {
			let mut builder = BooleanBuilder::with_capacity(window.len());
			for row in window {
				match &row[index] {
					Cell::Null => builder.append_null(),
					Cell::Bool(value) => builder.append_value(*value),
					_ => return Err(value_type(field)),
				}
			}
			Ok(Arc::new(builder.finish()))
		}
		DataType::Utf8 => {
			let mut builder = StringBuilder::new();
			for row in window {
				match &row[index] {
					Cell::Null => builder.append_null(),
					Cell::Str(value) => builder.append_value(value),
					_ => return Err(value_type(field)),
				}
			}
			Ok(Arc::new(builder.finish()))
		}
		other => Err(FrameError::UnsupportedType(format!("{:?}", other))),
	}
}

fn value_type(field: &Field) -> FrameError {
	FrameError::ValueType {
		column: field.name().clone(),
		expected: format!("{:?}", field.data_type()),
	}
}

#[cfg(test)]
mod tests {
	use arrow::array::{Array, Float64Array, Int64Array, StringArray};
	use arrow::datatypes::Schema;

	use super::*;

	fn frame() -> RowFrame {
		let schema = Arc::new(Schema::new(vec![
			Field::new("id", DataType::Int64, true),
			Field::new("name", DataType::Utf8, true),
			Field::new("score", DataType::Float64, true),
		]));
		let rows = vec![
			vec![Cell::Int(1), Cell::Str("a".into()), Cell::Float(0.5)],
			vec![Cell::Int(2), Cell::Null, Cell::Int(3)],
			vec![Cell::Int(3), Cell::Str("c".into()), Cell::Null],
		];
		RowFrame::try_new(schema, rows).unwrap()
	}

	#[test]
	fn test_pivot_to_columns() {
		let table = convert(&frame(), None, None).unwrap();
		assert_eq!(table.num_rows(), 3);
		let ids = table.batch().column(0);
		let ids = ids.as_any().downcast_ref::<Int64Array>().unwrap();
		assert_eq!(ids.values(), &[1, 2, 3]);
		let names = table.batch().column(1);
		let names = names.as_any().downcast_ref::<StringArray>().unwrap();
		assert!(names.is_null(1));
		assert_eq!(names.value(2), "c");
	}

	#[test]
	fn test_integers_widen_into_float_columns() {
		let table = convert(&frame(), None, None).unwrap();
		let scores = table.batch().column(2);
		let scores = scores.as_any().downcast_ref::<Float64Array>().unwrap();
		assert_eq!(scores.value(1), 3.0);
		assert!(scores.is_null(2));
	}

	#[test]
	fn test_window_only_materializes_requested_rows() {
		let columns = vec!["name".to_string()];
		let table = convert(&frame(), Some(&columns), Some(2..10)).unwrap();
		assert_eq!(table.num_rows(), 1);
		assert_eq!(table.column_names(), vec!["name"]);
	}

	#[test]
	fn test_cell_type_mismatch_is_an_error() {
		let schema = Arc::new(Schema::new(vec![Field::new("id", DataType::Int64, true)]));
		let frame =
			RowFrame::try_new(schema, vec![vec![Cell::Str("oops".into())]]).unwrap();
		let err = convert(&frame, None, None).unwrap_err();
		assert!(matches!(err, FrameError::ValueType { .. }));
	}
}
