// Copyright (c) edamorph.dev 2025
// This file is licensed under the AGPL-3.0-or-later

use std::io::{Cursor, Write};
use std::sync::Arc;

use arrow::array::RecordBatch;
use arrow::csv;
use arrow::ipc::reader::FileReader;
use bytes::Bytes;
use edamorph_frame::{BatchFrame, ColumnarFrame, DataframeHandle, ScanFrame};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tempfile::NamedTempFile;

use crate::error::Result;
use crate::format::UploadFormat;

/// How many leading records the CSV schema inference may look at.
const CSV_INFER_RECORDS: usize = 1024;

const INGEST_BATCH_SIZE: usize = 8192;

/// The outcome of a successful upload.
#[derive(Debug)]
pub struct Ingested {
	pub handle: DataframeHandle,
	pub format: UploadFormat,
}

/// Decode an upload into a dataframe handle.
///
/// The extension of `file_name` picks the decoder. Eager ingestion decodes
/// the bytes in memory; lazy ingestion spills them to a temp file owned by
/// the returned handle and defers decoding to first access. Any failure is
/// reported without side effects, so the caller's session state survives a
/// bad upload unchanged.
pub fn ingest(file_name: &str, bytes: Bytes, lazy: bool) -> Result<Ingested> {
	let format = UploadFormat::from_file_name(file_name)?;
	tracing::debug!(file_name, ?format, lazy, size = bytes.len(), "ingesting upload");
	let handle = if lazy {
		spill(format, &bytes)?
	} else {
		match format {
			UploadFormat::Csv | UploadFormat::Tsv => decode_delimited(format, &bytes)?,
			UploadFormat::Parquet => decode_parquet(bytes)?,
			UploadFormat::Ipc => decode_ipc(&bytes)?,
		}
	};
	Ok(Ingested {
		handle,
		format,
	})
}

fn decode_delimited(format: UploadFormat, bytes: &[u8]) -> Result<DataframeHandle> {
	let csv_format = csv::reader::Format::default()
		.with_header(true)
		.with_delimiter(format.delimiter());
	let (schema, _) = csv_format.infer_schema(Cursor::new(bytes), Some(CSV_INFER_RECORDS))?;
	let schema = Arc::new(schema);

	let reader = csv::ReaderBuilder::new(Arc::clone(&schema))
		.with_format(csv_format)
		.with_batch_size(INGEST_BATCH_SIZE)
		.build(Cursor::new(bytes))?;
	let batches: Vec<RecordBatch> = reader.collect::<std::result::Result<_, _>>()?;
	Ok(DataframeHandle::Columnar(ColumnarFrame::from_batches(schema, &batches)?))
}

fn decode_parquet(bytes: Bytes) -> Result<DataframeHandle> {
	let builder = ParquetRecordBatchReaderBuilder::try_new(bytes)?;
	let schema = builder.schema().clone();
	let reader = builder.with_batch_size(INGEST_BATCH_SIZE).build()?;
	let batches: Vec<RecordBatch> = reader.collect::<std::result::Result<_, _>>()?;
	Ok(DataframeHandle::Arrow(BatchFrame::try_new(schema, batches)?))
}

fn decode_ipc(bytes: &[u8]) -> Result<DataframeHandle> {
	let reader = FileReader::try_new(Cursor::new(bytes), None)?;
	let schema = reader.schema();
	let batches: Vec<RecordBatch> = reader.collect::<std::result::Result<_, _>>()?;
	Ok(DataframeHandle::Arrow(BatchFrame::try_new(schema, batches)?))
}

/// Spill the upload to a temp file and hand ownership to a scan handle.
/// Schema readability is checked up front so a corrupt upload fails here
/// rather than on the first preview.
fn spill(format: UploadFormat, bytes: &[u8]) -> Result<DataframeHandle> {
	let mut file = NamedTempFile::new()?;
	file.write_all(bytes)?;
	file.flush()?;
	let frame = ScanFrame::spilled(format.scan_format(), file.into_temp_path());
	frame.schema()?;
	Ok(DataframeHandle::Scan(frame))
}

#[cfg(test)]
mod tests {
	use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
	use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
	use arrow::ipc::writer::FileWriter;
	use edamorph_frame::to_canonical;
	use parquet::arrow::ArrowWriter;

	use super::*;
	use crate::error::IngestError;

	fn sample_batch() -> RecordBatch {
		let schema = Arc::new(Schema::new(vec![
			Field::new("id", DataType::Int64, true),
			Field::new("name", DataType::Utf8, true),
			Field::new("score", DataType::Float64, true),
		]));
		let ids: ArrayRef = Arc::new(Int64Array::from(vec![1, 2, 3]));
		let names: ArrayRef = Arc::new(StringArray::from(vec!["a", "b", "c"]));
		let scores: ArrayRef = Arc::new(Float64Array::from(vec![0.5, 1.5, 2.5]));
		RecordBatch::try_new(schema, vec![ids, names, scores]).unwrap()
	}

	fn parquet_bytes() -> Bytes {
		let batch = sample_batch();
		let mut buffer = Vec::new();
		let mut writer = ArrowWriter::try_new(&mut buffer, batch.schema(), None).unwrap();
		writer.write(&batch).unwrap();
		writer.close().unwrap();
		Bytes::from(buffer)
	}

	fn ipc_bytes() -> Bytes {
		let batch = sample_batch();
		let mut buffer = Vec::new();
		let mut writer = FileWriter::try_new(&mut buffer, batch.schema().as_ref()).unwrap();
		writer.write(&batch).unwrap();
		writer.finish().unwrap();
		drop(writer);
		Bytes::from(buffer)
	}

	fn csv_bytes() -> Bytes {
		Bytes::from_static(b"id,name,score\n1,a,0.5\n2,b,1.5\n3,c,2.5\n")
	}

	fn field_names(schema: &SchemaRef) -> Vec<&str> {
		schema.fields().iter().map(|f| f.name().as_str()).collect()
	}

	#[test]
	fn test_csv_schema_round_trips() {
		let ingested = ingest("data.csv", csv_bytes(), false).unwrap();
		let schema = ingested.handle.schema().unwrap();
		assert_eq!(field_names(&schema), vec!["id", "name", "score"]);
		assert_eq!(schema.field(0).data_type(), &DataType::Int64);
		assert_eq!(ingested.handle.row_count(), Some(3));
	}

	#[test]
	fn test_tsv_uses_tab_delimiter() {
		let bytes = Bytes::from_static(b"id\tname\n1\ta\n2\tb\n");
		let ingested = ingest("data.tsv", bytes, false).unwrap();
		let schema = ingested.handle.schema().unwrap();
		assert_eq!(field_names(&schema), vec!["id", "name"]);
		assert_eq!(ingested.handle.row_count(), Some(2));
	}

	#[test]
	fn test_parquet_schema_round_trips() {
		let ingested = ingest("data.parquet", parquet_bytes(), false).unwrap();
		let schema = ingested.handle.schema().unwrap();
		assert_eq!(field_names(&schema), vec!["id", "name", "score"]);
		assert_eq!(ingested.handle.row_count(), Some(3));
	}

	#[test]
	fn test_feather_decodes_as_ipc() {
		let ingested = ingest("data.feather", ipc_bytes(), false).unwrap();
		let schema = ingested.handle.schema().unwrap();
		assert_eq!(field_names(&schema), vec!["id", "name", "score"]);
	}

	#[test]
	fn test_unsupported_extension_is_rejected_before_decoding() {
		let err = ingest("report.xlsx", csv_bytes(), false).unwrap_err();
		assert!(matches!(err, IngestError::UnsupportedFileType { .. }));
	}

	#[test]
	fn test_garbage_parquet_bytes_fail_as_import_failed() {
		let err = ingest("data.parquet", csv_bytes(), false).unwrap_err();
		assert!(matches!(err, IngestError::ImportFailed { .. }));
	}

	#[test]
	fn test_garbage_lazy_upload_fails_at_ingest() {
		let bytes = Bytes::from_static(b"\x00\x01\x02not a parquet file");
		let err = ingest("data.parquet", bytes, true).unwrap_err();
		assert!(matches!(err, IngestError::ImportFailed { .. }));
	}

	#[test]
	fn test_lazy_and_eager_ingestion_agree() {
		let eager = ingest("data.csv", csv_bytes(), false).unwrap();
		let lazy = ingest("data.csv", csv_bytes(), true).unwrap();
		assert!(lazy.handle.is_lazy());
		assert!(!eager.handle.is_lazy());

		let columns = vec!["score".to_string(), "id".to_string()];
		let from_eager = to_canonical(&eager.handle, Some(&columns), Some(0..2)).unwrap();
		let from_lazy = to_canonical(&lazy.handle, Some(&columns), Some(0..2)).unwrap();
		assert_eq!(from_eager.schema(), from_lazy.schema());
		assert_eq!(from_eager.batch(), from_lazy.batch());
	}

	#[test]
	fn test_lazy_parquet_agrees_with_eager() {
		let eager = ingest("data.parquet", parquet_bytes(), false).unwrap();
		let lazy = ingest("data.parquet", parquet_bytes(), true).unwrap();
		let from_eager = to_canonical(&eager.handle, None, Some(1..3)).unwrap();
		let from_lazy = to_canonical(&lazy.handle, None, Some(1..3)).unwrap();
		assert_eq!(from_eager.batch(), from_lazy.batch());
	}
}
