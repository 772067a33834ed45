// Copyright (c) edamorph.dev 2025
// This file is licensed under the AGPL-3.0-or-later

use edamorph_frame::ScanFormat;

use crate::error::{IngestError, Result};

/// File formats the ingestion endpoint accepts, keyed by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFormat {
	Csv,
	Tsv,
	Parquet,
	/// Arrow IPC file, uploaded as `.arrow` or `.feather`.
	Ipc,
}

impl UploadFormat {
	/// Pick the format from the file name's final extension,
	/// case-insensitively. Anything else is [`UnsupportedFileType`].
	///
	/// [`UnsupportedFileType`]: IngestError::UnsupportedFileType
	pub fn from_file_name(file_name: &str) -> Result<Self> {
		let extension = file_name.rsplit('.').next().unwrap_or("");
		match extension.to_ascii_lowercase().as_str() {
			"csv" => Ok(UploadFormat::Csv),
			"tsv" => Ok(UploadFormat::Tsv),
			"parquet" => Ok(UploadFormat::Parquet),
			"arrow" | "feather" => Ok(UploadFormat::Ipc),
			other => Err(IngestError::UnsupportedFileType {
				extension: other.to_string(),
			}),
		}
	}

	pub fn delimiter(&self) -> u8 {
		match self {
			UploadFormat::Tsv => b'\t',
			_ => b',',
		}
	}

	/// The scan encoding used when this upload is ingested lazily.
	pub fn scan_format(&self) -> ScanFormat {
		match self {
			UploadFormat::Csv | UploadFormat::Tsv => ScanFormat::Csv {
				delimiter: self.delimiter(),
			},
			UploadFormat::Parquet => ScanFormat::Parquet,
			UploadFormat::Ipc => ScanFormat::Ipc,
		}
	}
}
