// Copyright (c) edamorph.dev 2025
// This file is licensed under the AGPL-3.0-or-later

//! Upload ingestion: file-format dispatch and dataframe construction.
//!
//! An upload arrives as a file name plus its bytes. The extension picks the
//! decoder, the decoder produces a [`DataframeHandle`], and nothing outside
//! this crate needs to know which format backed it. Lazy ingestion spills
//! the bytes to a temp file and defers decoding to first access.

mod error;
mod format;
mod reader;

pub use error::{IngestError, Result};
pub use format::UploadFormat;
pub use reader::{Ingested, ingest};
