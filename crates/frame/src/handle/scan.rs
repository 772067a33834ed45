// Copyright (c) edamorph.dev 2025
// This file is licensed under the AGPL-3.0-or-later

//! Deferred scans over on-disk files.
//!
//! A scan is the lazy materialization state: nothing is decoded until a
//! conversion asks for rows, and the converter pushes column and row
//! selection into the file reader. Spilled uploads own their backing temp
//! file, so the bytes outlive the request that carried them and vanish when
//! the handle is dropped.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::csv::reader::Format;
use arrow::datatypes::SchemaRef;
use arrow::ipc::reader::FileReader;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tempfile::TempPath;

use crate::error::Result;

/// How many leading records the CSV schema inference may look at.
const CSV_INFER_RECORDS: usize = 1024;

/// On-disk encoding of a scanned file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanFormat {
	/// Delimited text with a header row.
	Csv {
		delimiter: u8,
	},
	Parquet,
	/// Arrow IPC file, as written for `.arrow` / `.feather`.
	Ipc,
}

#[derive(Debug)]
enum ScanSource {
	/// A caller-managed file.
	Path(PathBuf),
	/// A spilled upload; the file is deleted when the handle is dropped.
	Spilled(TempPath),
}

/// An unevaluated scan over a tabular file.
#[derive(Debug)]
pub struct ScanFrame {
	format: ScanFormat,
	source: ScanSource,
}

impl ScanFrame {
	pub fn new(format: ScanFormat, path: impl Into<PathBuf>) -> Self {
		Self {
			format,
			source: ScanSource::Path(path.into()),
		}
	}

	/// Wrap a spilled upload, taking ownership of its temp file.
	pub fn spilled(format: ScanFormat, path: TempPath) -> Self {
		Self {
			format,
			source: ScanSource::Spilled(path),
		}
	}

	pub fn format(&self) -> ScanFormat {
		self.format
	}

	pub fn path(&self) -> &Path {
		match &self.source {
			ScanSource::Path(path) => path,
			ScanSource::Spilled(path) => path,
		}
	}

	/// Schema of the scanned file, read from the header or metadata
	/// without decoding row data.
	pub fn schema(&self) -> Result<SchemaRef> {
		match self.format {
			ScanFormat::Csv {
				delimiter,
			} => {
				let file = File::open(self.path())?;
				let (schema, _) =
					csv_format(delimiter).infer_schema(file, Some(CSV_INFER_RECORDS))?;
				Ok(Arc::new(schema))
			}
			ScanFormat::Parquet => {
				let file = File::open(self.path())?;
				let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
				Ok(builder.schema().clone())
			}
			ScanFormat::Ipc => {
				let file = File::open(self.path())?;
				let reader = FileReader::try_new(file, None)?;
				Ok(reader.schema())
			}
		}
	}
}

pub(crate) fn csv_format(delimiter: u8) -> Format {
	Format::default().with_header(true).with_delimiter(delimiter)
}
