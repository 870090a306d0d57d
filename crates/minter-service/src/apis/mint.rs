//! Mint and voucher endpoints.
//!
//! POST /api/mint uploads NFT content and returns a signed voucher for it.
//! POST /api/vouchers signs a voucher for content that is already uploaded.

use crate::server::AppState;
use alloy_primitives::U256;
use axum::{
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Json, Response},
};
use minter_core::{MintRequest, MinterError};
use minter_metadata::MetadataError;
use minter_types::{without_0x_prefix, SignedVoucher};
use minter_voucher::VoucherError;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Request body for POST /api/mint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintApiRequest {
	/// Token id the voucher authorizes, decimal or 0x-hex.
	pub token_id: String,
	/// Display name for the NFT.
	pub name: String,
	/// Free-form description.
	#[serde(default)]
	pub description: String,
	/// Hex-encoded image bytes, with or without a 0x prefix.
	pub image: String,
	/// Minimum redemption price in wei, decimal or 0x-hex. Defaults to zero.
	pub min_price: Option<String>,
}

/// Request body for POST /api/vouchers.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherApiRequest {
	/// Token id the voucher authorizes, decimal or 0x-hex.
	pub token_id: String,
	/// Metadata URI the voucher commits to.
	pub uri: String,
	/// Minimum redemption price in wei, decimal or 0x-hex. Defaults to zero.
	pub min_price: Option<String>,
}

/// Response body for POST /api/mint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintApiResponse {
	pub token_id: U256,
	pub image_uri: String,
	pub metadata_uri: String,
	pub voucher: SignedVoucher,
}

/// Error payload returned by the API.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
	/// Machine-readable error code.
	pub error: String,
	/// Human-readable message.
	pub message: String,
}

/// API error carrying a status code and a machine-readable error code.
#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	code: &'static str,
	message: String,
}

impl ApiError {
	fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
		Self {
			status: StatusCode::BAD_REQUEST,
			code,
			message: message.into(),
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		(
			self.status,
			Json(ErrorResponse {
				error: self.code.to_string(),
				message: self.message,
			}),
		)
			.into_response()
	}
}

impl From<VoucherError> for ApiError {
	fn from(err: VoucherError) -> Self {
		let (status, code) = match &err {
			VoucherError::EmptyUri => (StatusCode::BAD_REQUEST, "INVALID_URI"),
			VoucherError::DomainResolution(_) => {
				(StatusCode::BAD_GATEWAY, "DOMAIN_RESOLUTION_FAILED")
			},
			VoucherError::Signing(_) => (StatusCode::BAD_GATEWAY, "SIGNING_FAILED"),
			VoucherError::InvalidSignature(_) => {
				(StatusCode::INTERNAL_SERVER_ERROR, "INVALID_SIGNATURE")
			},
		};
		Self {
			status,
			code,
			message: err.to_string(),
		}
	}
}

impl From<MinterError> for ApiError {
	fn from(err: MinterError) -> Self {
		match err {
			MinterError::Metadata(metadata_err) => {
				let (status, code) = match &metadata_err {
					MetadataError::InvalidRecord(_) => (StatusCode::BAD_REQUEST, "INVALID_CONTENT"),
					_ => (StatusCode::BAD_GATEWAY, "UPLOAD_FAILED"),
				};
				Self {
					status,
					code,
					message: metadata_err.to_string(),
				}
			},
			MinterError::Voucher(voucher_err) => voucher_err.into(),
		}
	}
}

/// Handles POST /api/mint requests.
///
/// Uploads the content, signs a voucher for the resulting metadata URI,
/// and returns both URIs together with the voucher.
pub async fn handle_mint(
	State(state): State<AppState>,
	Json(request): Json<MintApiRequest>,
) -> Result<Json<MintApiResponse>, ApiError> {
	let token_id = parse_u256("tokenId", &request.token_id)?;
	let min_price = request
		.min_price
		.as_deref()
		.map(|value| parse_u256("minPrice", value))
		.transpose()?;
	let image = hex::decode(without_0x_prefix(&request.image))
		.map_err(|e| ApiError::bad_request("INVALID_IMAGE", format!("image must be hex encoded: {}", e)))?;

	let receipt = state
		.engine
		.mint(MintRequest {
			token_id,
			name: request.name,
			description: request.description,
			image,
			min_price,
		})
		.await
		.map_err(|e| {
			warn!("Mint request failed: {}", e);
			ApiError::from(e)
		})?;

	Ok(Json(MintApiResponse {
		token_id: receipt.token_id,
		image_uri: receipt.image_uri.to_string(),
		metadata_uri: receipt.metadata_uri.to_string(),
		voucher: receipt.voucher,
	}))
}

/// Handles POST /api/vouchers requests.
///
/// Signs a voucher for a metadata URI the caller already holds.
pub async fn handle_voucher(
	State(state): State<AppState>,
	Json(request): Json<VoucherApiRequest>,
) -> Result<Json<SignedVoucher>, ApiError> {
	let token_id = parse_u256("tokenId", &request.token_id)?;
	let min_price = request
		.min_price
		.as_deref()
		.map(|value| parse_u256("minPrice", value))
		.transpose()?;

	let voucher = state
		.engine
		.vouchers()
		.create_voucher(token_id, request.uri, min_price)
		.await
		.map_err(|e| {
			warn!("Voucher request failed: {}", e);
			ApiError::from(e)
		})?;

	Ok(Json(voucher))
}

fn parse_u256(field: &'static str, value: &str) -> Result<U256, ApiError> {
	value.parse::<U256>().map_err(|e| {
		ApiError::bad_request(
			"INVALID_NUMBER",
			format!("{} must be a decimal or 0x-hex integer: {}", field, e),
		)
	})
}
