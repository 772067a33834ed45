// Copyright (c) edamorph.dev 2025
// This file is licensed under the AGPL-3.0-or-later

use edamorph_sub_server_http::{AppState, HttpConfig, router};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
		)
		.init();

	let config = HttpConfig::from_env();
	let state = AppState::new(&config);
	let app = router(state);

	let listener = match TcpListener::bind(&config.bind_addr).await {
		Ok(listener) => listener,
		Err(error) => {
			tracing::error!(%error, bind_addr = %config.bind_addr, "failed to bind");
			std::process::exit(1);
		}
	};
	match listener.local_addr() {
		Ok(addr) => tracing::info!(%addr, "edamorph server listening"),
		Err(error) => tracing::warn!(%error, "bound, but local address is unknown"),
	}

	if let Err(error) = axum::serve(listener, app).with_graceful_shutdown(shutdown()).await {
		tracing::error!(%error, "server terminated abnormally");
		std::process::exit(1);
	}
	tracing::info!("edamorph server stopped");
}

async fn shutdown() {
	if let Err(error) = tokio::signal::ctrl_c().await {
		tracing::error!(%error, "failed to listen for ctrl-c");
		return;
	}
	tracing::info!("shutdown signal received");
}
