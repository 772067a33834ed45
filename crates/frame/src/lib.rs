// Copyright (c) edamorph.dev 2025
// This file is licensed under the AGPL-3.0-or-later

//! Universal dataframe ingestion and Arrow export core for EdaMorph.
//!
//! Every tabular source the workspace can hold is normalized behind the
//! [`DataframeHandle`] sum type. A handle is classified by [`detect`] into a
//! [`BackendTag`], converted on demand into a backend-neutral
//! [`CanonicalTable`] by [`to_canonical`], and exported to clients as a
//! self-describing Arrow IPC stream by [`preview_stream`].
//!
//! Handles come in two materialization states:
//!
//! - *Eager*: fully realized in memory (columnar, row-major or Arrow
//!   batches); row count and schema are immediately known.
//! - *Lazy*: a deferred scan over an on-disk file; the schema is read from
//!   the file header or metadata, but rows are only decoded when a
//!   conversion asks for them.

pub mod convert;
pub mod error;
pub mod handle;
pub mod stream;
pub mod table;

pub use convert::to_canonical;
pub use error::{FrameError, Result};
pub use handle::{
	BackendTag, BatchFrame, Cell, ColumnarFrame, DataframeHandle, RowFrame, ScanFormat,
	ScanFrame, SqlFrame, detect,
};
pub use stream::{ARROW_STREAM_CONTENT_TYPE, DEFAULT_PREVIEW_ROWS, empty_stream, preview_stream};
pub use table::CanonicalTable;
