// Copyright (c) edamorph.dev 2025
// This file is licensed under the AGPL-3.0-or-later

//! Backend-specific dataframe handles and their classification.
//!
//! [`DataframeHandle`] is a closed sum type: one variant per supported
//! dataframe backend, each carrying only what its converter needs. The
//! variant is chosen once, at ingestion time; [`detect`] classifies a handle
//! structurally and never touches row data, so it is safe to call on lazy
//! handles without forcing an evaluation.

mod batches;
mod columnar;
mod rows;
pub(crate) mod scan;
pub(crate) mod sql;

use std::fmt::{self, Display, Formatter};

use arrow::datatypes::SchemaRef;

pub use batches::BatchFrame;
pub use columnar::ColumnarFrame;
pub use rows::{Cell, RowFrame};
pub use scan::{ScanFormat, ScanFrame};
pub use sql::SqlFrame;

use crate::error::Result;

/// An opaque, backend-specific in-memory (or deferred) table.
#[derive(Debug)]
pub enum DataframeHandle {
	/// Eager column-oriented table.
	Columnar(ColumnarFrame),
	/// Eager row-oriented table.
	Rows(RowFrame),
	/// Eager Arrow record batches.
	Arrow(BatchFrame),
	/// Deferred scan over an on-disk file.
	Scan(ScanFrame),
	/// Relation inside a SQL database file.
	Sql(SqlFrame),
}

impl DataframeHandle {
	/// The handle's schema. Reads file metadata for scans and column
	/// declarations for SQL relations, but never decodes row data.
	pub fn schema(&self) -> Result<SchemaRef> {
		match self {
			DataframeHandle::Columnar(frame) => Ok(frame.schema()),
			DataframeHandle::Rows(frame) => Ok(frame.schema()),
			DataframeHandle::Arrow(frame) => Ok(frame.schema()),
			DataframeHandle::Scan(frame) => frame.schema(),
			DataframeHandle::Sql(frame) => frame.schema(),
		}
	}

	/// Row count, where it is known without evaluating the handle.
	pub fn row_count(&self) -> Option<usize> {
		match self {
			DataframeHandle::Columnar(frame) => Some(frame.row_count()),
			DataframeHandle::Rows(frame) => Some(frame.row_count()),
			DataframeHandle::Arrow(frame) => Some(frame.row_count()),
			DataframeHandle::Scan(_) | DataframeHandle::Sql(_) => None,
		}
	}

	/// Whether producing rows requires an explicit evaluation step.
	pub fn is_lazy(&self) -> bool {
		matches!(self, DataframeHandle::Scan(_))
	}
}

/// Classification label for the engine behind a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendTag {
	Columnar,
	Rows,
	Arrow,
	OutOfCore,
	Sql,
	Unknown,
}

impl Display for BackendTag {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			BackendTag::Columnar => f.write_str("columnar"),
			BackendTag::Rows => f.write_str("rows"),
			BackendTag::Arrow => f.write_str("arrow"),
			BackendTag::OutOfCore => f.write_str("out-of-core"),
			BackendTag::Sql => f.write_str("sql"),
			BackendTag::Unknown => f.write_str("unknown"),
		}
	}
}

/// Classify a handle. Pure and total: checks run in the listed priority
/// order and no method that could trigger computation is invoked.
pub fn detect(handle: &DataframeHandle) -> BackendTag {
	match handle {
		DataframeHandle::Columnar(_) => BackendTag::Columnar,
		DataframeHandle::Rows(_) => BackendTag::Rows,
		DataframeHandle::Arrow(_) => BackendTag::Arrow,
		DataframeHandle::Scan(_) => BackendTag::OutOfCore,
		DataframeHandle::Sql(_) => BackendTag::Sql,
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use arrow::array::{ArrayRef, Int64Array};
	use arrow::datatypes::{DataType, Field, Schema};

	use super::*;

	fn columnar() -> DataframeHandle {
		let schema = Arc::new(Schema::new(vec![Field::new("id", DataType::Int64, true)]));
		let ids: ArrayRef = Arc::new(Int64Array::from(vec![1, 2, 3]));
		DataframeHandle::Columnar(ColumnarFrame::try_new(schema, vec![ids]).unwrap())
	}

	#[test]
	fn test_detect_columnar() {
		assert_eq!(detect(&columnar()), BackendTag::Columnar);
	}

	#[test]
	fn test_detect_sql() {
		let handle = DataframeHandle::Sql(SqlFrame::new("/tmp/db.sqlite", "t"));
		assert_eq!(detect(&handle), BackendTag::Sql);
	}

	#[test]
	fn test_backend_tag_display() {
		assert_eq!(BackendTag::Columnar.to_string(), "columnar");
		assert_eq!(BackendTag::OutOfCore.to_string(), "out-of-core");
		assert_eq!(BackendTag::Unknown.to_string(), "unknown");
	}

	#[test]
	fn test_eager_handle_reports_rows() {
		let handle = columnar();
		assert_eq!(handle.row_count(), Some(3));
		assert!(!handle.is_lazy());
	}

	#[test]
	fn test_sql_handle_has_no_cheap_row_count() {
		let handle = DataframeHandle::Sql(SqlFrame::new("/tmp/db.sqlite", "t"));
		assert_eq!(handle.row_count(), None);
	}
}
