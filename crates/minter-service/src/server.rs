//! HTTP server for the minter API.
//!
//! This module provides a minimal HTTP server infrastructure for the
//! minter API.

use axum::{
	routing::{get, post},
	Router,
};
use minter_config::ApiConfig;
use minter_core::MinterEngine;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::apis;

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
	/// Reference to the mint engine for processing requests.
	pub engine: Arc<MinterEngine>,
}

/// Starts the HTTP server for the API.
///
/// This function creates and configures the HTTP server with routing,
/// middleware, and error handling for the endpoints.
pub async fn start_server(
	api_config: ApiConfig,
	engine: Arc<MinterEngine>,
) -> Result<(), Box<dyn std::error::Error>> {
	let app_state = AppState { engine };

	// Build the router with /api base path and the mint endpoints
	let app = Router::new()
		.route("/health", get(apis::health))
		.nest(
			"/api",
			Router::new()
				.route("/mint", post(apis::mint::handle_mint))
				.route("/vouchers", post(apis::mint::handle_voucher)),
		)
		.layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
		.with_state(app_state);

	let bind_address = format!("{}:{}", api_config.host, api_config.port);
	let listener = TcpListener::bind(&bind_address).await?;

	tracing::info!("Minter API server starting on {}", bind_address);

	axum::serve(listener, app).await?;

	Ok(())
}
