// Copyright (c) edamorph.dev 2025
// This file is licensed under the AGPL-3.0-or-later

//! SQL relation handles.
//!
//! The handle stores only the database path and the relation name. Every
//! operation opens a throwaway connection scoped to the single request, so
//! concurrent conversions never share statement state.

use std::path::PathBuf;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use rusqlite::Connection;

use crate::error::Result;

/// A named relation inside a SQLite database file.
#[derive(Debug, Clone)]
pub struct SqlFrame {
	database: PathBuf,
	relation: String,
}

impl SqlFrame {
	pub fn new(database: impl Into<PathBuf>, relation: impl Into<String>) -> Self {
		Self {
			database: database.into(),
			relation: relation.into(),
		}
	}

	pub fn relation(&self) -> &str {
		&self.relation
	}

	pub(crate) fn connect(&self) -> Result<Connection> {
		Ok(Connection::open(&self.database)?)
	}

	/// Schema from the relation's column declarations; no rows are read.
	pub fn schema(&self) -> Result<SchemaRef> {
		let connection = self.connect()?;
		self.schema_on(&connection)
	}

	pub(crate) fn schema_on(&self, connection: &Connection) -> Result<SchemaRef> {
		let sql = format!("SELECT * FROM {} LIMIT 0", quote_ident(&self.relation));
		let statement = connection.prepare(&sql)?;
		let fields: Vec<Field> = statement
			.columns()
			.iter()
			.map(|column| {
				Field::new(column.name(), decl_to_arrow(column.decl_type()), true)
			})
			.collect();
		Ok(Arc::new(Schema::new(fields)))
	}
}

/// Double-quote an identifier for interpolation into generated SQL.
pub(crate) fn quote_ident(name: &str) -> String {
	format!("\"{}\"", name.replace('"', "\"\""))
}

/// SQLite declared types follow affinity rules; anything unrecognized
/// degrades to text.
fn decl_to_arrow(decl: Option<&str>) -> DataType {
	let Some(decl) = decl else {
		return DataType::Utf8;
	};
	let upper = decl.to_ascii_uppercase();
	if upper.contains("BOOL") {
		DataType::Boolean
	} else if upper.contains("INT") {
		DataType::Int64
	} else if upper.contains("REAL") || upper.contains("FLOA") || upper.contains("DOUB") {
		DataType::Float64
	} else {
		DataType::Utf8
	}
}
