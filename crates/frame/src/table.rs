// Copyright (c) edamorph.dev 2025
// This file is licensed under the AGPL-3.0-or-later

//! The backend-neutral columnar table.

use arrow::array::RecordBatch;
use arrow::datatypes::SchemaRef;

/// A backend-neutral column-oriented table, constructed fresh per request
/// and never persisted. The schema travels with the data, so the table can
/// be serialized without side information.
#[derive(Debug, Clone)]
pub struct CanonicalTable {
	batch: RecordBatch,
}

impl CanonicalTable {
	pub(crate) fn new(batch: RecordBatch) -> Self {
		Self {
			batch,
		}
	}

	pub fn schema(&self) -> SchemaRef {
		self.batch.schema()
	}

	pub fn num_rows(&self) -> usize {
		self.batch.num_rows()
	}

	pub fn num_columns(&self) -> usize {
		self.batch.num_columns()
	}

	pub fn column_names(&self) -> Vec<String> {
		self.batch
			.schema()
			.fields()
			.iter()
			.map(|field| field.name().clone())
			.collect()
	}

	pub fn batch(&self) -> &RecordBatch {
		&self.batch
	}

	pub fn into_batch(self) -> RecordBatch {
		self.batch
	}
}
