// Copyright (c) edamorph.dev 2025
// This file is licensed under the AGPL-3.0-or-later

//! The single mutable dataset slot behind an EdaMorph session.
//!
//! The workspace holds exactly one active dataset at a time. Loading a new
//! one replaces every field of the slot in one step, so readers either see
//! the old dataset or the new one, never a mixture.

use std::sync::Arc;

use edamorph_frame::DataframeHandle;
use parking_lot::RwLock;

/// The dataset currently loaded into a session, plus its display metadata.
#[derive(Debug, Clone)]
pub struct Dataset {
	/// The backend handle. Shared: previews run against a snapshot while
	/// the slot stays free for replacement.
	pub handle: Arc<DataframeHandle>,
	/// File name the dataset was loaded from.
	pub name: String,
	/// Where the bytes came from, when known (e.g. an upload).
	pub source: Option<String>,
	/// Whether the handle defers evaluation to access time.
	pub lazy: bool,
}

impl Dataset {
	pub fn new(
		handle: DataframeHandle,
		name: impl Into<String>,
		source: Option<String>,
	) -> Self {
		let handle = Arc::new(handle);
		let lazy = handle.is_lazy();
		Self {
			handle,
			name: name.into(),
			source,
			lazy,
		}
	}
}

/// Thread-safe holder of the session's one dataset.
///
/// All fields are replaced together under the write lock; `get` hands out a
/// cloned snapshot so callers never hold the lock across a conversion.
#[derive(Debug, Default)]
pub struct SessionSlot {
	current: RwLock<Option<Dataset>>,
}

impl SessionSlot {
	pub fn new() -> Self {
		Self::default()
	}

	/// Replace the slot's contents. The previous dataset, if any, is
	/// dropped once the last outstanding snapshot releases it.
	pub fn set(&self, dataset: Dataset) {
		*self.current.write() = Some(dataset);
	}

	/// Snapshot of the current dataset.
	pub fn get(&self) -> Option<Dataset> {
		self.current.read().clone()
	}

	/// Empty the slot.
	pub fn clear(&self) {
		*self.current.write() = None;
	}

	pub fn is_loaded(&self) -> bool {
		self.current.read().is_some()
	}
}
