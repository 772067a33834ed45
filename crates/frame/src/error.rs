// Copyright (c) edamorph.dev 2025
// This file is licensed under the AGPL-3.0-or-later

//! The unified error type for the dataframe core.

use arrow::error::ArrowError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FrameError>;

#[derive(Debug, Error)]
pub enum FrameError {
	/// A requested column is absent from the handle's schema.
	#[error("unknown column '{name}'")]
	UnknownColumn {
		name: String,
	},

	/// The dispatcher could not classify a handle.
	#[error("unsupported dataframe backend '{backend}'")]
	UnsupportedBackend {
		backend: String,
	},

	/// A declared column type has no row-native representation.
	#[error("unsupported data type for row-native frames: {0}")]
	UnsupportedType(String),

	/// A value does not match the column's declared type.
	#[error("column '{column}' expects {expected} values")]
	ValueType {
		column: String,
		expected: String,
	},

	/// Column arrays of one frame disagree on length.
	#[error("column '{column}' has {actual} rows, expected {expected}")]
	ColumnLength {
		column: String,
		actual: usize,
		expected: usize,
	},

	#[error("arrow error: {0}")]
	Arrow(#[from] ArrowError),

	#[error("parquet error: {0}")]
	Parquet(#[from] parquet::errors::ParquetError),

	#[error("sql error: {0}")]
	Sql(#[from] rusqlite::Error),

	#[error("io error: {0}")]
	Io(#[from] std::io::Error),
}
