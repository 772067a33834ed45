// Copyright (c) edamorph.dev 2025
// This file is licensed under the AGPL-3.0-or-later

use edamorph_frame::FrameError;

pub type Result<T> = std::result::Result<T, IngestError>;

/// Failure modes of an upload.
///
/// Either the extension is one we do not serve, or it is served and the
/// decode fails. Both leave the session untouched; the caller only commits a
/// dataset on success.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
	#[error("unsupported file type: .{extension}")]
	UnsupportedFileType { extension: String },

	#[error("import failed: {source}")]
	ImportFailed {
		#[source]
		source: FrameError,
	},
}

impl From<FrameError> for IngestError {
	fn from(source: FrameError) -> Self {
		IngestError::ImportFailed {
			source,
		}
	}
}

impl From<arrow::error::ArrowError> for IngestError {
	fn from(error: arrow::error::ArrowError) -> Self {
		FrameError::from(error).into()
	}
}

impl From<parquet::errors::ParquetError> for IngestError {
	fn from(error: parquet::errors::ParquetError) -> Self {
		FrameError::from(error).into()
	}
}

impl From<std::io::Error> for IngestError {
	fn from(error: std::io::Error) -> Self {
		FrameError::from(error).into()
	}
}
