// Copyright (c) edamorph.dev 2025
// This file is licensed under the AGPL-3.0-or-later

//! Converter for SQL relations.
//!
//! Column and row selection are expressed in the generated query itself
//! (`SELECT <cols> FROM <rel> LIMIT <n> OFFSET <start>`), executed on a
//! throwaway connection scoped to this one conversion.

use std::ops::Range;
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanBuilder, Float64Builder, Int64Builder, StringBuilder};
use arrow::datatypes::{DataType, Field};
use rusqlite::types::ValueRef;

use super::{batch_from, projected_schema};
use crate::error::{FrameError, Result};
use crate::handle::SqlFrame;
use crate::handle::sql::quote_ident;
use crate::table::CanonicalTable;

pub(crate) fn convert(
	frame: &SqlFrame,
	columns: Option<&[String]>,
	rows: Option<Range<usize>>,
) -> Result<CanonicalTable> {
	let connection = frame.connect()?;
	let schema = frame.schema_on(&connection)?;
	let (projected, _) = projected_schema(&schema, columns)?;

	let select = match columns {
		Some(names) if !names.is_empty() => {
			names.iter().map(|name| quote_ident(name)).collect::<Vec<_>>().join(", ")
		}
		Some(_) => String::from("NULL"),
		None => String::from("*"),
	};
	let mut sql = format!("SELECT {} FROM {}", select, quote_ident(frame.relation()));
	if let Some(range) = &rows {
		sql.push_str(&format!(
			" LIMIT {} OFFSET {}",
			range.end.saturating_sub(range.start),
			range.start
		));
	}

	let empty_projection = projected.fields().is_empty();
	let mut builders: Vec<ColumnBuilder> =
		projected.fields().iter().map(|field| ColumnBuilder::new(field.as_ref())).collect();

	let mut statement = connection.prepare(&sql)?;
	let mut result = statement.query([])?;
	let mut row_count = 0usize;
	while let Some(row) = result.next()? {
		if !empty_projection {
			for (index, builder) in builders.iter_mut().enumerate() {
				builder.append(row.get_ref(index)?)?;
			}
		}
		row_count += 1;
	}

	let arrays: Vec<ArrayRef> = builders.into_iter().map(ColumnBuilder::finish).collect();
	Ok(CanonicalTable::new(batch_from(projected, arrays, row_count)?))
}

/// Arrow builder for one result column, typed by the declared schema.
enum ColumnBuilder {
	Int(String, Int64Builder),
	Float(String, Float64Builder),
	Bool(String, BooleanBuilder),
	Text(String, StringBuilder),
}

impl ColumnBuilder {
	fn new(field: &Field) -> Self {
		let name = field.name().clone();
		match field.data_type() {
			DataType::Int64 => ColumnBuilder::Int(name, Int64Builder::new()),
			DataType::Float64 => ColumnBuilder::Float(name, Float64Builder::new()),
			DataType::Boolean => ColumnBuilder::Bool(name, BooleanBuilder::new()),
			// schema_on maps every other declaration to text
			_ => ColumnBuilder::Text(name, StringBuilder::new()),
		}
	}

	fn append(&mut self, value: ValueRef<'_>) -> Result<()> {
		match self {
			ColumnBuilder::Int(name, builder) => match value {
				ValueRef::Null => builder.append_null(),
				ValueRef::Integer(v) => builder.append_value(v),
				_ => return Err(value_type(name, "Int64")),
			},
			ColumnBuilder::Float(name, builder) => match value {
				ValueRef::Null => builder.append_null(),
				ValueRef::Real(v) => builder.append_value(v),
				ValueRef::Integer(v) => builder.append_value(v as f64),
				_ => return Err(value_type(name, "Float64")),
			},
			ColumnBuilder::Bool(name, builder) => match value {
				ValueRef::Null => builder.append_null(),
				ValueRef::Integer(v) => builder.append_value(v != 0),
				_ => return Err(value_type(name, "Boolean")),
			},
			ColumnBuilder::Text(name, builder) => match value {
				ValueRef::Null => builder.append_null(),
				ValueRef::Text(bytes) => {
					let text = std::str::from_utf8(bytes)
						.map_err(|_| value_type(name, "Utf8"))?;
					builder.append_value(text);
				}
				ValueRef::Integer(v) => builder.append_value(v.to_string()),
				ValueRef::Real(v) => builder.append_value(v.to_string()),
				ValueRef::Blob(_) => return Err(value_type(name, "Utf8")),
			},
		}
		Ok(())
	}

	fn finish(self) -> ArrayRef {
		match self {
			ColumnBuilder::Int(_, mut builder) => Arc::new(builder.finish()),
			ColumnBuilder::Float(_, mut builder) => Arc::new(builder.finish()),
			ColumnBuilder::Bool(_, mut builder) => Arc::new(builder.finish()),
			ColumnBuilder::Text(_, mut builder) => Arc::new(builder.finish()),
		}
	}
}

fn value_type(column: &str, expected: &str) -> FrameError {
	FrameError::ValueType {
		column: column.to_string(),
		expected: expected.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use arrow::array::{Array, Int64Array, StringArray};
	use rusqlite::Connection;

	use super::*;

	fn fixture() -> (tempfile::TempDir, SqlFrame) {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("data.sqlite");
		let connection = Connection::open(&path).unwrap();
		connection
			.execute_batch(
				"CREATE TABLE t (id INTEGER, name TEXT, score REAL);
				 INSERT INTO t VALUES (1, 'a', 0.5), (2, 'b', 1.5),
				 (3, NULL, 2.5), (4, 'd', 3.5), (5, 'e', 4.5);",
			)
			.unwrap();
		drop(connection);
		(dir, SqlFrame::new(path, "t"))
	}

	#[test]
	fn test_full_relation() {
		let (_dir, frame) = fixture();
		let table = convert(&frame, None, None).unwrap();
		assert_eq!(table.num_rows(), 5);
		assert_eq!(table.column_names(), vec!["id", "name", "score"]);
		let names = table.batch().column(1);
		let names = names.as_any().downcast_ref::<StringArray>().unwrap();
		assert!(names.is_null(2));
	}

	#[test]
	fn test_limit_offset_window() {
		let (_dir, frame) = fixture();
		let columns = vec!["name".to_string(), "id".to_string()];
		let table = convert(&frame, Some(&columns), Some(1..3)).unwrap();
		assert_eq!(table.column_names(), vec!["name", "id"]);
		assert_eq!(table.num_rows(), 2);
		let ids = table.batch().column(1);
		let ids = ids.as_any().downcast_ref::<Int64Array>().unwrap();
		assert_eq!(ids.values(), &[2, 3]);
	}

	#[test]
	fn test_offset_past_the_end_yields_zero_rows() {
		let (_dir, frame) = fixture();
		let table = convert(&frame, None, Some(9..12)).unwrap();
		assert_eq!(table.num_rows(), 0);
		assert_eq!(table.num_columns(), 3);
	}

	#[test]
	fn test_unknown_column_is_an_error() {
		let (_dir, frame) = fixture();
		let columns = vec!["missing".to_string()];
		let err = convert(&frame, Some(&columns), None).unwrap_err();
		assert!(matches!(err, FrameError::UnknownColumn { .. }));
	}
}
