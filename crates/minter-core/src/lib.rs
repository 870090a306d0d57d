//! Mint pipeline for the lazymint workspace.
//!
//! Coordinates the sequential mint flow: upload content to the metadata
//! store, then request a signed voucher bound to the uploaded URI. Each
//! stage is a single async suspension point with no parallelism; nothing
//! is retried and nothing is persisted. Callers own abort and timeout
//! policy around the whole flow.

use alloy_primitives::U256;
use minter_metadata::{MetadataError, MetadataStoreService};
use minter_types::{ContentUri, SignedVoucher};
use minter_voucher::{VoucherBuilder, VoucherError};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during the mint pipeline.
#[derive(Debug, Error)]
pub enum MinterError {
	/// Content upload failed or the content was not mintable.
	#[error(transparent)]
	Metadata(#[from] MetadataError),
	/// Voucher construction failed.
	#[error(transparent)]
	Voucher(#[from] VoucherError),
}

/// A request to mint: the content plus the voucher parameters.
#[derive(Debug, Clone)]
pub struct MintRequest {
	/// Token id the voucher will authorize. Opaque here; uniqueness is the
	/// caller's responsibility.
	pub token_id: U256,
	/// Display name for the NFT. Must be non-empty.
	pub name: String,
	/// Free-form description.
	pub description: String,
	/// Raw image bytes.
	pub image: Vec<u8>,
	/// Minimum redemption price in wei; `None` means free.
	pub min_price: Option<U256>,
}

/// The outcome of a mint: where the content lives and the voucher for it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintReceipt {
	/// Token id the voucher authorizes.
	pub token_id: U256,
	/// Content URI of the uploaded image.
	pub image_uri: ContentUri,
	/// Content URI of the uploaded metadata record.
	pub metadata_uri: ContentUri,
	/// The signed voucher a buyer can redeem on-chain.
	pub voucher: SignedVoucher,
}

/// Drives the upload-then-sign mint flow.
pub struct MinterEngine {
	/// Metadata store the content is uploaded to.
	metadata: Arc<MetadataStoreService>,
	/// Voucher builder bound to the verifying contract and signer.
	vouchers: Arc<VoucherBuilder>,
}

impl MinterEngine {
	/// Creates an engine over the given metadata store and voucher builder.
	pub fn new(metadata: Arc<MetadataStoreService>, vouchers: Arc<VoucherBuilder>) -> Self {
		Self { metadata, vouchers }
	}

	/// Returns the voucher builder, for callers that already hold a
	/// content URI and only need a voucher.
	pub fn vouchers(&self) -> &VoucherBuilder {
		&self.vouchers
	}

	/// Uploads the content and returns a signed voucher for it.
	///
	/// Stages run strictly in sequence: image upload, metadata upload,
	/// domain resolution, signature. A failure at any stage aborts the
	/// rest and surfaces to the caller.
	pub async fn mint(&self, request: MintRequest) -> Result<MintReceipt, MinterError> {
		tracing::info!(name = %request.name, "Uploading content to the metadata store");
		let stored = self
			.metadata
			.store_nft(&request.name, &request.description, &request.image)
			.await?;

		tracing::info!(uri = %stored.metadata_uri, "Upload complete, requesting voucher signature");
		let voucher = self
			.vouchers
			.create_voucher(request.token_id, stored.metadata_uri.as_str(), request.min_price)
			.await?;

		tracing::info!(token_id = %request.token_id, "Voucher signed");
		Ok(MintReceipt {
			token_id: request.token_id,
			image_uri: stored.image_uri,
			metadata_uri: stored.metadata_uri,
			voucher,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use minter_contract::implementations::fixed::FixedContract;
	use minter_contract::ContractService;
	use minter_metadata::implementations::memory::MemoryMetadataStore;
	use minter_signer::implementations::local::LocalSigner;
	use minter_signer::SignerService;
	use minter_types::{NftMetadata, SecretKey};
	use minter_voucher::verify::verify_voucher;

	// Well-known anvil development key
	const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
	const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

	fn engine_with_store() -> (MinterEngine, MemoryMetadataStore) {
		let store = MemoryMetadataStore::new();
		let metadata = Arc::new(MetadataStoreService::new(Box::new(store.clone())));

		let contract = Arc::new(ContractService::new(Box::new(FixedContract::new(
			"0x5FbDB2315678afecb367f032d93F642f64180aa3".parse().unwrap(),
			31337,
		))));
		let signer = Arc::new(SignerService::new(Box::new(
			LocalSigner::new(&SecretKey::from(TEST_KEY)).unwrap(),
		)));
		let vouchers = Arc::new(VoucherBuilder::new(contract, signer));

		(MinterEngine::new(metadata, vouchers), store)
	}

	fn request() -> MintRequest {
		MintRequest {
			token_id: U256::from(1),
			name: "Sunset".to_string(),
			description: "A sunset over the bay".to_string(),
			image: b"image bytes".to_vec(),
			min_price: Some(U256::from(1_000_000_000_000_000_000u128)),
		}
	}

	#[tokio::test]
	async fn test_mint_produces_verifiable_voucher() {
		let (engine, _store) = engine_with_store();

		let receipt = engine.mint(request()).await.unwrap();

		assert_eq!(receipt.voucher.payload.uri, receipt.metadata_uri.as_str());
		assert_eq!(
			receipt.voucher.payload.min_price,
			U256::from(1_000_000_000_000_000_000u128)
		);

		let domain = engine.vouchers().signing_domain().await.unwrap();
		let creator = TEST_ADDRESS.parse().unwrap();
		assert!(verify_voucher(&receipt.voucher, domain, &creator).unwrap());
	}

	#[tokio::test]
	async fn test_mint_uploads_record_referencing_image() {
		let (engine, store) = engine_with_store();

		let receipt = engine.mint(request()).await.unwrap();

		let record_bytes = store.retrieve(&receipt.metadata_uri).await.unwrap();
		let record: NftMetadata = serde_json::from_slice(&record_bytes).unwrap();
		assert_eq!(record.name, "Sunset");
		assert_eq!(record.image, receipt.image_uri);
		assert_eq!(store.retrieve(&receipt.image_uri).await.unwrap(), b"image bytes");
	}

	#[tokio::test]
	async fn test_mint_rejects_empty_name() {
		let (engine, _store) = engine_with_store();

		let mut bad = request();
		bad.name = String::new();

		let err = engine.mint(bad).await.unwrap_err();
		assert!(matches!(
			err,
			MinterError::Metadata(MetadataError::InvalidRecord(_))
		));
	}
}
