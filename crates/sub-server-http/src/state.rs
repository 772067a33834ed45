// Copyright (c) edamorph.dev 2025
// This file is licensed under the AGPL-3.0-or-later

use std::sync::Arc;

use edamorph_session::SessionSlot;

use crate::config::HttpConfig;

/// Shared application state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
	/// The session's single dataset slot.
	pub session: Arc<SessionSlot>,
	/// Preview row count when the request does not specify one.
	pub preview_default_rows: usize,
}

impl AppState {
	pub fn new(config: &HttpConfig) -> Self {
		Self {
			session: Arc::new(SessionSlot::new()),
			preview_default_rows: config.preview_default_rows,
		}
	}
}
