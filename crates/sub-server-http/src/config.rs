// Copyright (c) edamorph.dev 2025
// This file is licensed under the AGPL-3.0-or-later

use edamorph_frame::DEFAULT_PREVIEW_ROWS;

/// Runtime configuration of the HTTP server.
#[derive(Debug, Clone)]
pub struct HttpConfig {
	/// Address and port to bind to (e.g. "127.0.0.1:8090").
	pub bind_addr: String,
	/// Preview row count when a request does not specify one.
	pub preview_default_rows: usize,
}

impl Default for HttpConfig {
	fn default() -> Self {
		Self {
			bind_addr: String::from("127.0.0.1:8090"),
			preview_default_rows: DEFAULT_PREVIEW_ROWS,
		}
	}
}

impl HttpConfig {
	/// Build the config from the environment, falling back to defaults.
	///
	/// - `EDAMORPH_BIND` - bind address
	/// - `EDAMORPH_PREVIEW_ROWS` - default preview row count
	pub fn from_env() -> Self {
		let mut config = Self::default();
		if let Ok(bind_addr) = std::env::var("EDAMORPH_BIND") {
			config.bind_addr = bind_addr;
		}
		if let Ok(rows) = std::env::var("EDAMORPH_PREVIEW_ROWS") {
			match rows.parse() {
				Ok(rows) => config.preview_default_rows = rows,
				Err(_) => {
					tracing::warn!(value = %rows, "ignoring unparsable EDAMORPH_PREVIEW_ROWS");
				}
			}
		}
		config
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = HttpConfig::default();
		assert_eq!(config.bind_addr, "127.0.0.1:8090");
		assert_eq!(config.preview_default_rows, DEFAULT_PREVIEW_ROWS);
	}
}
